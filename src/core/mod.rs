pub mod bills;
pub mod errors;
pub mod format;
pub mod models;
pub mod navigation;
pub mod new_bill;
pub mod session;
