//! User handlers.

use axum::{
    extract::{Extension, State},
    routing::get,
    Router,
};

use common::{ApiResponse, AppResult};
use domain::UserResponse;

use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_current_user))
}

/// Get current authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;

    Ok(ApiResponse::success(UserResponse::from(user)))
}
