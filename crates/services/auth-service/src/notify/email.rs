//! Email message payloads.

use serde::{Deserialize, Serialize};

use common::MailConfig;
use domain::User;

/// Email payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Email body content (plain text)
    pub body: String,
    /// Optional sender override (defaults to the configured sender)
    #[serde(default)]
    pub from: Option<String>,
}

impl Email {
    /// Create a new email
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            from: None,
        }
    }

    /// Set custom sender address
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Greeting sent after a successful registration
    pub fn welcome(user: &User, config: &MailConfig) -> Self {
        Self::new(
            user.email.as_str(),
            format!("Welcome to {}", config.sender_name),
            format!(
                "Hi {},\n\nYour {} account \"{}\" is ready. You are registered as a {}.\n",
                user.fullname, config.sender_name, user.username, user.role
            ),
        )
        .with_from(config.from.as_str())
    }

    /// Carries a freshly generated password to its owner
    pub fn password_reset(user: &User, new_password: &str, config: &MailConfig) -> Self {
        Self::new(
            user.email.as_str(),
            format!("Your new {} password", config.sender_name),
            format!(
                "Hi {},\n\nYour password has been reset. Your new password is: {}\n\n\
                 Please sign in and change it as soon as possible.\n",
                user.fullname, new_password
            ),
        )
        .with_from(config.from.as_str())
    }
}
