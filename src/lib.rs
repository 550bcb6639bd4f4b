//! userdir - an in-memory user directory served over HTTP
//!
//! This library provides the user store, the CRUD directory on top of it,
//! and the axum server used by the `userdir` binary.

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod server;
pub mod store;
pub mod user;

// Re-export Args for the binary
pub use cli::Args;
pub use config::ServerConfig;
pub use directory::UserDirectory;
pub use error::DirectoryError;
pub use store::{InMemoryUserStore, UserRepository};
pub use user::{User, UserPayload};
