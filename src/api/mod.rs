pub mod handlers;
pub mod models;
pub mod openapi;

use crate::auth::jwt::{ClaimsSession, JwtService};
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::store::RemoteStore;
use crate::infrastructure::store::http::HttpRemoteStore;
use crate::infrastructure::store::in_memory::InMemoryStore;
use std::sync::Arc;

/// Where bills are persisted.
pub enum Backend {
    InMemory(InMemoryStore),
    Http(HttpRemoteStore),
}

impl Backend {
    /// Store as seen by the user behind `session`.
    pub fn store_for(&self, session: &ClaimsSession) -> Arc<dyn RemoteStore> {
        match self {
            Backend::InMemory(store) => Arc::new(store.scoped_to(&session.claims.sub)),
            Backend::Http(store) => Arc::new(store.with_token(&session.token)),
        }
    }
}

pub struct AppState {
    pub backend: Backend,
    pub logging: Arc<InMemoryLogging>,
    pub jwt: JwtService,
}
