use crate::core::errors::BilledError;
use crate::core::models::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Activity journal kept for the lifetime of the process. Clones share entries.
#[derive(Clone, Default)]
pub struct InMemoryLogging {
    entries: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(&self, action: &str, details: Value, user_email: Option<&str>) -> Result<(), BilledError> {
        // Details are a flat object; anything else is a caller bug.
        let Value::Object(fields) = details else {
            return Err(BilledError::LoggingError(format!(
                "Details of `{}` must be a JSON object",
                action
            )));
        };
        let entry = AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            user_email: user_email.map(String::from),
            details: fields.into_iter().collect(),
            timestamp: chrono::Utc::now(),
        };
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, BilledError> {
        Ok(self.entries.read().await.clone())
    }

    async fn get_user_logs(&self, user_email: &str) -> Result<Vec<AppLog>, BilledError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.user_email.as_deref() == Some(user_email))
            .cloned()
            .collect())
    }
}
