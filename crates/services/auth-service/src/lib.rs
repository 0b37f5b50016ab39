//! Auth Service Library
//!
//! The credential service: registration, login, forgot-password and role
//! changes. Passwords are hashed with Argon2 before they reach the user
//! repository, and sessions are stateless HS256 tokens.

pub mod config;
pub mod notify;
pub mod service;

pub use config::AuthServiceConfig;
pub use notify::{Email, LogMailer, Notifier};
pub use service::{AuthService, AuthSession, Authenticator, Claims, TokenResponse};
