pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::bills::BillListController;
pub use crate::core::errors::{BilledError, MalformedRecordError, RemoteError, ValidationError};
pub use crate::core::new_bill::NewBillController;
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;
pub use crate::infrastructure::store::RemoteStore;
pub use crate::infrastructure::store::in_memory::InMemoryStore;

#[cfg(test)]
mod tests; // Include integration tests
