use crate::core::errors::BilledError;
use crate::core::models::SessionUser;

/// Read-only access to the authenticated user.
pub trait SessionInfo: Send + Sync {
    fn current_user(&self) -> Result<SessionUser, BilledError>;
}

/// A session whose user is known up front (tests, token-authenticated requests).
#[derive(Clone, Debug)]
pub struct StaticSession {
    user: Option<SessionUser>,
}

impl StaticSession {
    pub fn new(user: SessionUser) -> Self {
        StaticSession { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        StaticSession { user: None }
    }
}

impl SessionInfo for StaticSession {
    fn current_user(&self) -> Result<SessionUser, BilledError> {
        let user = self.user.clone().ok_or(BilledError::MissingSession)?;
        validate_user(user)
    }
}

/// Session backed by the serialized `user` entry the login screen stores,
/// e.g. `{"type":"Employee","email":"a@a"}`.
#[derive(Clone, Debug)]
pub struct StoredSession {
    entry: Option<String>,
}

impl StoredSession {
    pub fn new(entry: Option<String>) -> Self {
        StoredSession { entry }
    }
}

impl SessionInfo for StoredSession {
    fn current_user(&self) -> Result<SessionUser, BilledError> {
        let entry = self.entry.as_deref().ok_or(BilledError::MissingSession)?;
        let user: SessionUser =
            serde_json::from_str(entry).map_err(|e| BilledError::InvalidSession(e.to_string()))?;
        validate_user(user)
    }
}

fn validate_user(user: SessionUser) -> Result<SessionUser, BilledError> {
    if user.email.trim().is_empty() {
        return Err(BilledError::InvalidSession("email is empty".to_string()));
    }
    Ok(user)
}
