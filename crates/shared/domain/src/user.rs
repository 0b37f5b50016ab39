//! User domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{is_self_assignable_role, ROLE_ADMIN, ROLE_BUYER, ROLE_SELLER};
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("invalid email pattern: {e}"))
});

/// Check an email address against the accepted format.
pub fn validate_email(email: &str) -> DomainResult<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(DomainError::validation("Invalid email format"))
    }
}

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl UserRole {
    /// Parse a role a user is allowed to pick for themselves.
    ///
    /// Only `buyer` and `seller` are accepted; `admin` is never self-assignable.
    pub fn parse_self_assignable(value: &str) -> DomainResult<Self> {
        if !is_self_assignable_role(value) {
            return Err(DomainError::validation(format!(
                "Invalid role. Must be '{}' or '{}'",
                ROLE_BUYER, ROLE_SELLER
            )));
        }
        Ok(UserRole::from(value))
    }
}

/// Lenient conversion used for stored values; unknown strings fall back to buyer.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_SELLER => UserRole::Seller,
            _ => UserRole::Buyer,
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::from(s.as_str())
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Buyer => write!(f, "{}", ROLE_BUYER),
            UserRole::Seller => write!(f, "{}", ROLE_SELLER),
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
        }
    }
}

/// User domain entity
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Don't expose hash in debug output
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl User {
    /// Stored credential as a password value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.as_str())
    }
}

/// Registration input as received from the client.
///
/// Blank strings count as missing fields.
#[derive(Clone, Default, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

impl std::fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUser")
            .field("username", &self.username)
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

impl RegisterUser {
    /// Validate the registration input and resolve the requested role.
    ///
    /// Checks run in order: required fields, email format, password length,
    /// role. The first failure is returned.
    pub fn validate(&self) -> DomainResult<UserRole> {
        let required = [
            ("Username", &self.username),
            ("Full name", &self.fullname),
            ("Email", &self.email),
            ("Password", &self.password),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(DomainError::validation(format!("{} is required", field)));
        }

        validate_email(&self.email)?;

        if self.password.chars().count() < crate::MIN_PASSWORD_LENGTH {
            return Err(DomainError::password(format!(
                "Password must be at least {} characters",
                crate::MIN_PASSWORD_LENGTH
            )));
        }

        match self.role.as_deref() {
            None | Some("") => Ok(UserRole::default()),
            Some(role) => UserRole::parse_self_assignable(role),
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// Login handle, unique across users
    pub username: String,
    /// Display name
    pub fullname: String,
    /// User email address, unique across users
    pub email: String,
    /// Current role
    pub role: UserRole,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self::from(user.clone())
    }
}
