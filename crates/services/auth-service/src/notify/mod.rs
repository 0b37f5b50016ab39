//! Outgoing user notifications.
//!
//! Notifications are delivered inline through a [`Notifier`]. The bundled
//! [`LogMailer`] writes each message to the log instead of sending it.

mod email;
mod log_mailer;

use async_trait::async_trait;

use common::AppResult;

pub use email::Email;
pub use log_mailer::LogMailer;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Delivery channel for user-facing messages.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a single message.
    async fn send(&self, email: Email) -> AppResult<()>;
}
