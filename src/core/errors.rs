use serde::Serialize;
use thiserror::Error;

/// Failure reported by the remote store. `message` is what the list screen
/// shows verbatim ("Erreur 404").
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct RemoteError {
    pub status: u16,
    pub message: String,
}

impl RemoteError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        RemoteError {
            status,
            message: message.into(),
        }
    }

    /// Error carrying the default `Erreur <status>` message.
    pub fn from_status(status: u16) -> Self {
        RemoteError::new(status, format!("Erreur {}", status))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("Unsupported receipt file `{0}`: only jpg, jpeg and png images are accepted")]
    UnsupportedFileType(String),
    #[error("Field `{0}` is required")]
    MissingField(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("A receipt must be uploaded before submitting")]
    ReceiptMissing,
    #[error("This bill has already been submitted")]
    AlreadySubmitted,
}

/// Why a fetched record could not be normalized. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MalformedRecordError {
    #[error("Unparsable date `{0}`")]
    InvalidDate(String),
    #[error("Unknown status `{0}`")]
    UnknownStatus(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BilledError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No authenticated user in session")]
    MissingSession,
    #[error("Invalid session: {0}")]
    InvalidSession(String),
    #[error("The page was left before the response arrived")]
    ViewDetached,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}
