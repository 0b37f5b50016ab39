//! Common utilities shared across all services.
//!
//! This crate provides:
//! - Unified error handling with HTTP conversion
//! - The `{success, message, data}` response envelope
//! - Configuration structures
//! - Database connection handling (feature `database`)

pub mod config;
#[cfg(feature = "database")]
pub mod database;
pub mod error;
#[cfg(feature = "database")]
pub mod migration;
pub mod response;

pub use config::*;
#[cfg(feature = "database")]
pub use database::Database;
pub use error::{AppError, AppResult, OptionExt};
#[cfg(feature = "database")]
pub use migration::{run_migrations, MigrateAction};
pub use response::{ApiResponse, Created};
