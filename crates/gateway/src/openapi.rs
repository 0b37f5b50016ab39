//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use auth_service_lib::{AuthSession, TokenResponse};
use domain::{Review, ReviewThread, UserResponse, UserRole};

use crate::handlers::auth_handler::{
    ChangeRoleRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
};
use crate::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use crate::handlers::review_handler::{SubmitReplyRequest, SubmitReviewRequest};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::forgot_password,
        crate::handlers::auth_handler::change_role,
        crate::handlers::user_handler::get_current_user,
        crate::handlers::review_handler::list_reviews,
        crate::handlers::review_handler::submit_review,
        crate::handlers::review_handler::submit_reply,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            ForgotPasswordRequest,
            ChangeRoleRequest,
            TokenResponse,
            AuthSession,
            UserResponse,
            UserRole,
            SubmitReviewRequest,
            SubmitReplyRequest,
            Review,
            ReviewThread,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and credential recovery"),
        (name = "Users", description = "Profile of the signed-in user"),
        (name = "Reviews", description = "Product reviews and replies"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/auth/register",
            "/auth/login",
            "/auth/forgot-password",
            "/auth/role",
            "/users/me",
            "/products/{product_id}/reviews",
            "/products/{product_id}/reviews/{review_id}/replies",
            "/health",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
