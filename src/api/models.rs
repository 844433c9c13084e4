use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::{BilledError, ValidationError};

#[derive(Deserialize, ToSchema)]
pub struct ReceiptPreviewRequest {
    pub bill_url: Option<String>,
    /// Width of the modal the receipt is shown in, in pixels.
    pub modal_width: u32,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RedirectResponse {
    pub redirect: String,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for BilledError to implement IntoResponse
pub struct ApiError(pub BilledError);

impl From<BilledError> for ApiError {
    fn from(err: BilledError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BilledError::Remote(e) => StatusCode::from_u16(e.status).unwrap_or(StatusCode::BAD_GATEWAY),
            BilledError::Validation(ValidationError::AlreadySubmitted) => StatusCode::CONFLICT,
            BilledError::Validation(_) | BilledError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BilledError::MissingSession | BilledError::InvalidSession(_) | BilledError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            BilledError::ViewDetached => StatusCode::CONFLICT,
            BilledError::LoggingError(_) | BilledError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}
