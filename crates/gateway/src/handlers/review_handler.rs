//! Product review handlers.

use axum::{
    extract::{Extension, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{ApiResponse, AppResult, Created};
use domain::{Review, ReviewThread};

use crate::extractors::{ValidatedJson, ValidatedPath};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// New root review
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitReviewRequest {
    /// Star rating from 1 to 5
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i16,
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment is required"))]
    #[schema(example = "Arrived quickly, works as described")]
    pub comment: String,
}

/// Reply to a root review
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitReplyRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment is required"))]
    #[schema(example = "Thanks for the feedback!")]
    pub comment: String,
}

/// Review routes open to anonymous visitors
pub fn review_read_routes() -> Router<AppState> {
    Router::new().route("/:product_id/reviews", get(list_reviews))
}

/// Review routes that need an authenticated author
pub fn review_write_routes() -> Router<AppState> {
    Router::new()
        .route("/:product_id/reviews", post(submit_review))
        .route("/:product_id/reviews/:review_id/replies", post(submit_reply))
}

/// List a product's reviews as threads
#[utoipa::path(
    get,
    path = "/products/{product_id}/reviews",
    tag = "Reviews",
    params(
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Root reviews with their replies, oldest first", body = Vec<ReviewThread>)
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    ValidatedPath(product_id): ValidatedPath<Uuid>,
) -> AppResult<ApiResponse<Vec<ReviewThread>>> {
    let threads = state.review_service.list_threads(product_id).await?;
    Ok(ApiResponse::success(threads))
}

/// Post a rated review
#[utoipa::path(
    post,
    path = "/products/{product_id}/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    request_body = SubmitReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn submit_review(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(product_id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<SubmitReviewRequest>,
) -> AppResult<Created<Review>> {
    let review = state
        .review_service
        .submit_review(current_user.id, product_id, payload.rating, payload.comment)
        .await?;

    Ok(Created(ApiResponse::success(review)))
}

/// Reply to a root review
#[utoipa::path(
    post,
    path = "/products/{product_id}/reviews/{review_id}/replies",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = Uuid, Path, description = "Product ID"),
        ("review_id" = Uuid, Path, description = "Root review being answered")
    ),
    request_body = SubmitReplyRequest,
    responses(
        (status = 201, description = "Reply created", body = Review),
        (status = 400, description = "Validation error or reply to a reply"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Review not found for this product")
    )
)]
pub async fn submit_reply(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath((product_id, review_id)): ValidatedPath<(Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<SubmitReplyRequest>,
) -> AppResult<Created<Review>> {
    let reply = state
        .review_service
        .submit_reply(current_user.id, product_id, review_id, payload.comment)
        .await?;

    Ok(Created(ApiResponse::success(reply)))
}
