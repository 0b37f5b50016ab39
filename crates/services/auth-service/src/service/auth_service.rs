//! Authentication service - Handles credentials and session tokens.
//!
//! Passwords go through the domain `Password` value object before they reach
//! the repository. Tokens are stateless: a role change issues a fresh token,
//! while previously issued ones stay valid until they expire.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    Password, RegisterUser, User, UserResponse, UserRole, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER,
};
use user_service_lib::repository::{NewUser, UserRepository};

use crate::config::AuthServiceConfig;
use crate::notify::{Email, Notifier};

/// Hash verified when the email is unknown, so both login failures cost the same.
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    Password::new(&Password::generate())
        .map(Password::into_string)
        .unwrap_or_default()
});

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

/// Token plus the profile it was issued for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthSession {
    pub token: TokenResponse,
    pub user: UserResponse,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user; the role defaults to buyer.
    async fn register(&self, input: RegisterUser) -> AppResult<User>;

    /// Check credentials and issue a session token.
    async fn login(&self, email: String, password: String) -> AppResult<AuthSession>;

    /// Replace the password with a generated one and send it to the user.
    async fn forgot_password(&self, email: String) -> AppResult<()>;

    /// Switch between buyer and seller, returning a token for the new role.
    async fn change_role(&self, user_id: Uuid, new_role: String) -> AppResult<AuthSession>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService on top of the user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn Notifier>,
    config: AuthServiceConfig,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn Notifier>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            notifier,
            config,
        }
    }

    /// Generate JWT token for a user
    fn generate_token(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expiration_hours = self.config.jwt.expiration_hours;
        let expires_at = now + Duration::hours(expiration_hours);

        let claims = Claims {
            id: user.id,
            role: user.role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt.secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: expiration_hours * SECONDS_PER_HOUR,
        })
    }

    fn issue_session(&self, user: &User) -> AppResult<AuthSession> {
        Ok(AuthSession {
            token: self.generate_token(user)?,
            user: UserResponse::from(user),
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, input: RegisterUser) -> AppResult<User> {
        let role = input.validate()?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let user = self
            .users
            .create(NewUser {
                username: input.username,
                fullname: input.fullname,
                email: input.email,
                password_hash,
                role,
            })
            .await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        // Best effort: registration succeeds even if the greeting is lost
        if let Err(e) = self
            .notifier
            .send(Email::welcome(&user, &self.config.mail))
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to send welcome email");
        }

        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthSession> {
        let user = self.users.find_by_email(&email).await?;

        let stored_password = match &user {
            Some(user) => user.password(),
            None => Password::from_hash(DUMMY_HASH.as_str()),
        };
        let password_valid = stored_password.verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::debug!(user_id = %user.id, "Login succeeded");
                self.issue_session(&user)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn forgot_password(&self, email: String) -> AppResult<()> {
        let user = self.users.find_by_email(&email).await?.ok_or_not_found()?;

        let new_password = Password::generate();
        let password_hash = Password::new(&new_password)?.into_string();
        let user = self
            .users
            .update_password_hash(user.id, password_hash)
            .await?;
        tracing::info!(user_id = %user.id, "Password reset");

        self.notifier
            .send(Email::password_reset(&user, &new_password, &self.config.mail))
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to deliver new password");
                e
            })
    }

    async fn change_role(&self, user_id: Uuid, new_role: String) -> AppResult<AuthSession> {
        let role = UserRole::parse_self_assignable(&new_role)?;
        let user = self.users.find_by_id(user_id).await?.ok_or_not_found()?;

        let user = self.users.update_role(user.id, role).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "Role changed");

        self.issue_session(&user)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt.secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
