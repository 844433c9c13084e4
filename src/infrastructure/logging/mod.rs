pub mod in_memory;

use crate::core::errors::BilledError;
use crate::core::models::AppLog;
use async_trait::async_trait;

/// Journal of what the controllers did on behalf of a user.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_email: Option<&str>,
    ) -> Result<(), BilledError>;

    /// Every entry, oldest first.
    async fn get_logs(&self) -> Result<Vec<AppLog>, BilledError>;

    /// Entries recorded on behalf of `user_email`, oldest first.
    async fn get_user_logs(&self, user_email: &str) -> Result<Vec<AppLog>, BilledError>;
}
