//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    routing::{post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use auth_service_lib::AuthSession;
use common::{ApiResponse, AppResult, Created};
use domain::{RegisterUser, UserResponse};

use crate::extractors::ValidatedJson;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// User registration request
///
/// Field rules live in the credential service so every client sees the same
/// messages in the same order; missing fields deserialize as empty and are
/// reported as "required".
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Unique login name
    #[serde(default)]
    #[schema(example = "janedoe")]
    pub username: String,
    /// Display name
    #[serde(default)]
    #[schema(example = "Jane Doe")]
    pub fullname: String,
    /// User email address
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// User password (minimum 6 characters)
    #[serde(default)]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
    /// "buyer" (default) or "seller"
    #[schema(example = "buyer")]
    pub role: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        RegisterUser {
            username: req.username,
            fullname: req.fullname,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

/// User login request
#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret123")]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Forgot-password request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
}

/// Role switch request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeRoleRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Role is required"))]
    #[schema(example = "seller")]
    pub role: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
}

/// Authentication routes acting on the caller's own account
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/role", put(change_role))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or username already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.auth_service.register(payload.into()).await?;

    Ok(Created(ApiResponse::with_message(
        UserResponse::from(user),
        "User registered successfully",
    )))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthSession),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthSession>> {
    let session = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(ApiResponse::with_message(session, "Login successful"))
}

/// Send a freshly generated password to the account's email
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "New password sent"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No account with this email"),
        (status = 500, description = "Password could not be delivered")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    state.auth_service.forgot_password(payload.email).await?;

    Ok(ApiResponse::message("A new password has been sent to your email"))
}

/// Switch the caller between buyer and seller
#[utoipa::path(
    put,
    path = "/auth/role",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed, new token issued", body = AuthSession),
        (status = 400, description = "Role must be buyer or seller"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_role(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChangeRoleRequest>,
) -> AppResult<ApiResponse<AuthSession>> {
    let session = state
        .auth_service
        .change_role(current_user.id, payload.role)
        .await?;

    Ok(ApiResponse::with_message(session, "Role updated"))
}
