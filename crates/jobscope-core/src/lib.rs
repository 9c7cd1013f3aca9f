pub mod account;
pub mod alumnus;
pub mod assessment;
pub mod chat;
pub mod distribution;
pub mod error;
pub mod graph;
pub mod indicator;
pub mod route;
pub mod session;
pub mod student;
pub mod timeline;
pub mod vault;

// Re-export common error type
pub use error::{JobscopeError, Result};
