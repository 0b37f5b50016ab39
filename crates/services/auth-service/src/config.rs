//! Auth service configuration.

use common::{JwtConfig, MailConfig};

/// Auth service configuration.
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Token signing settings
    pub jwt: JwtConfig,
    /// Notification sender settings
    pub mail: MailConfig,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            mail: MailConfig::from_env(),
        }
    }
}
