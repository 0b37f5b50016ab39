//! HTTP request handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod review_handler;
pub mod user_handler;

pub use auth_handler::{account_routes, auth_routes};
pub use health_handler::health_routes;
pub use review_handler::{review_read_routes, review_write_routes};
pub use user_handler::user_routes;
