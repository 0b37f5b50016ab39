//! Integration tests for API endpoints.
//!
//! The router is driven with stub services, so no database is needed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use auth_service_lib::{AuthService, AuthSession, Claims, TokenResponse};
use common::{AppError, AppResult, Database};
use domain::{
    group_reviews, NewReview, RegisterUser, Review, ReviewThread, User, UserResponse, UserRole,
};
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;
use review_service_lib::service::ReviewService;
use user_service_lib::service::UserService;

const VALID_TOKEN: &str = "valid-test-token";
const TAKEN_EMAIL: &str = "taken@example.com";

fn caller_id() -> Uuid {
    Uuid::from_u128(0x5eed)
}

fn test_user(id: Uuid, email: &str, role: UserRole) -> User {
    User {
        id,
        username: "tester".to_string(),
        fullname: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "hashed".to_string(),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn session(user: &User) -> AuthSession {
    AuthSession {
        token: TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        },
        user: UserResponse::from(user),
    }
}

// =============================================================================
// Stub Services
// =============================================================================

/// Auth service that answers from fixed rules
struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn register(&self, input: RegisterUser) -> AppResult<User> {
        let role = input.validate()?;
        if input.email == TAKEN_EMAIL {
            return Err(AppError::conflict("Email"));
        }
        Ok(test_user(Uuid::new_v4(), &input.email, role))
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthSession> {
        if password != "secret123" {
            return Err(AppError::InvalidCredentials);
        }
        Ok(session(&test_user(caller_id(), &email, UserRole::Buyer)))
    }

    async fn forgot_password(&self, email: String) -> AppResult<()> {
        match email.as_str() {
            "jane@example.com" => Ok(()),
            "smtp-down@example.com" => Err(AppError::internal("mail relay refused")),
            _ => Err(AppError::NotFound),
        }
    }

    async fn change_role(&self, user_id: Uuid, new_role: String) -> AppResult<AuthSession> {
        let role = UserRole::parse_self_assignable(&new_role)?;
        Ok(session(&test_user(user_id, "jane@example.com", role)))
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == VALID_TOKEN {
            Ok(Claims {
                id: caller_id(),
                role: UserRole::Buyer,
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

/// User service that knows only the caller
struct StubUserService;

#[async_trait]
impl UserService for StubUserService {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        if id == caller_id() {
            Ok(test_user(id, "jane@example.com", UserRole::Buyer))
        } else {
            Err(AppError::NotFound)
        }
    }
}

/// Review service keeping rows in memory
#[derive(Default)]
struct StubReviewService {
    rows: Mutex<Vec<Review>>,
}

impl StubReviewService {
    fn insert(&self, new: NewReview) -> Review {
        let review = Review {
            id: Uuid::new_v4(),
            product_id: new.product_id,
            author_id: new.author_id,
            rating: new.rating,
            comment: new.comment,
            parent_id: new.parent_id,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(review.clone());
        review
    }
}

#[async_trait]
impl ReviewService for StubReviewService {
    async fn list_threads(&self, product_id: Uuid) -> AppResult<Vec<ReviewThread>> {
        let rows: Vec<Review> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        Ok(group_reviews(&rows))
    }

    async fn submit_review(
        &self,
        author_id: Uuid,
        product_id: Uuid,
        rating: i16,
        comment: String,
    ) -> AppResult<Review> {
        let new = NewReview::root(product_id, author_id, rating, comment)?;
        Ok(self.insert(new))
    }

    async fn submit_reply(
        &self,
        author_id: Uuid,
        product_id: Uuid,
        parent_id: Uuid,
        comment: String,
    ) -> AppResult<Review> {
        let parent = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == parent_id)
            .cloned()
            .ok_or(AppError::NotFound)?;
        let new = NewReview::reply(&parent, product_id, author_id, comment)?;
        Ok(self.insert(new))
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> Router {
    app_with_reviews(Arc::new(StubReviewService::default()))
}

fn app_with_reviews(reviews: Arc<StubReviewService>) -> Router {
    let state = AppState::new(
        Arc::new(StubAuthService),
        Arc::new(StubUserService),
        reviews,
        Database::disconnected(),
    );
    create_router(state)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn registration(email: &str) -> Value {
    json!({
        "username": "jane",
        "fullname": "Jane Doe",
        "email": email,
        "password": "secret123"
    })
}

// =============================================================================
// Auth Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_register_created() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/auth/register",
        None,
        Some(registration("jane@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert_eq!(body["data"]["role"], "buyer");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_missing_field_is_validation_error() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"fullname": "Jane", "email": "jane@example.com", "password": "secret123"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username is required");
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_blank_or_missing_fullname_same_message() {
    let mut blank = registration("jane@example.com");
    blank["fullname"] = json!("   ");
    let mut empty = registration("jane@example.com");
    empty["fullname"] = json!("");

    for payload in [blank, empty] {
        let (status, body) = send(app(), Method::POST, "/auth/register", None, Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Full name is required");
    }
}

#[tokio::test]
async fn test_register_reports_fields_in_form_order() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"fullname": "Jane Doe", "password": "secret123"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username is required");
}

#[tokio::test]
async fn test_register_short_password_rejected() {
    let mut payload = registration("jane@example.com");
    payload["password"] = json!("12345");

    let (status, body) = send(app(), Method::POST, "/auth/register", None, Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_register_admin_role_rejected() {
    let mut payload = registration("jane@example.com");
    payload["role"] = json!("admin");

    let (status, _) = send(app(), Method::POST, "/auth/register", None, Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_conflict() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/auth/register",
        None,
        Some(registration(TAKEN_EMAIL)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_token_and_profile() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"email": "jane@example.com", "password": "secret123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token"]["token_type"], "Bearer");
    assert_eq!(body["data"]["user"]["id"], caller_id().to_string());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"email": "jane@example.com", "password": "nope-nope"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_forgot_password_outcomes() {
    let cases = [
        ("jane@example.com", StatusCode::OK),
        ("ghost@example.com", StatusCode::NOT_FOUND),
        ("smtp-down@example.com", StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (email, expected) in cases {
        let (status, body) = send(
            app(),
            Method::POST,
            "/auth/forgot-password",
            None,
            Some(json!({ "email": email })),
        )
        .await;
        assert_eq!(status, expected, "{email}");
        assert_eq!(body["success"], expected == StatusCode::OK);
    }
}

#[tokio::test]
async fn test_change_role_requires_token() {
    let (status, body) = send(
        app(),
        Method::PUT,
        "/auth/role",
        None,
        Some(json!({"role": "seller"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_change_role_reissues_session() {
    let (status, body) = send(
        app(),
        Method::PUT,
        "/auth/role",
        Some(VALID_TOKEN),
        Some(json!({"role": "seller"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "seller");
    assert_eq!(body["data"]["user"]["id"], caller_id().to_string());
}

#[tokio::test]
async fn test_change_role_to_admin_rejected() {
    let (status, _) = send(
        app(),
        Method::PUT,
        "/auth/role",
        Some(VALID_TOKEN),
        Some(json!({"role": "admin"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// User Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_me_with_valid_token() {
    let (status, body) = send(app(), Method::GET, "/users/me", Some(VALID_TOKEN), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], caller_id().to_string());
}

#[tokio::test]
async fn test_me_with_bad_token() {
    let (status, _) = send(app(), Method::GET, "/users/me", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Review Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_post_review_requires_token() {
    let uri = format!("/products/{}/reviews", Uuid::new_v4());
    let (status, _) = send(
        app(),
        Method::POST,
        &uri,
        None,
        Some(json!({"rating": 5, "comment": "Great"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_review_rating_out_of_range() {
    let uri = format!("/products/{}/reviews", Uuid::new_v4());
    let (status, body) = send(
        app(),
        Method::POST,
        &uri,
        Some(VALID_TOKEN),
        Some(json!({"rating": 6, "comment": "Great"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Rating must be between 1 and 5");
}

#[tokio::test]
async fn test_review_thread_round_trip() {
    let reviews = Arc::new(StubReviewService::default());
    let product = Uuid::new_v4();
    let reviews_uri = format!("/products/{product}/reviews");

    let (status, body) = send(
        app_with_reviews(reviews.clone()),
        Method::POST,
        &reviews_uri,
        Some(VALID_TOKEN),
        Some(json!({"rating": 4, "comment": "Does the job"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let root_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["author_id"], caller_id().to_string());

    let (status, body) = send(
        app_with_reviews(reviews.clone()),
        Method::POST,
        &format!("{reviews_uri}/{root_id}/replies"),
        Some(VALID_TOKEN),
        Some(json!({"comment": "Thanks!"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let reply_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app_with_reviews(reviews.clone()),
        Method::POST,
        &format!("{reviews_uri}/{reply_id}/replies"),
        Some(VALID_TOKEN),
        Some(json!({"comment": "Nested"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(app_with_reviews(reviews), Method::GET, &reviews_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let threads = body["data"].as_array().unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0]["id"], root_id.as_str());
    assert_eq!(threads[0]["rating"], 4);
    assert_eq!(threads[0]["replies"][0]["id"], reply_id.as_str());
}

#[tokio::test]
async fn test_reply_to_missing_review() {
    let uri = format!(
        "/products/{}/reviews/{}/replies",
        Uuid::new_v4(),
        Uuid::new_v4()
    );
    let (status, body) = send(
        app(),
        Method::POST,
        &uri,
        Some(VALID_TOKEN),
        Some(json!({"comment": "Hello?"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_product_id_uses_envelope() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/products/not-a-uuid/reviews")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_review_id_on_reply() {
    let uri = format!("/products/{}/reviews/42/replies", Uuid::new_v4());
    let (status, body) = send(
        app(),
        Method::POST,
        &uri,
        Some(VALID_TOKEN),
        Some(json!({"comment": "Hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_reviews_empty_product() {
    let uri = format!("/products/{}/reviews", Uuid::new_v4());
    let (status, body) = send(app(), Method::GET, &uri, None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

// =============================================================================
// Health & Docs
// =============================================================================

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let (status, body) = send(app(), Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["services"]["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = send(app(), Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/auth/register").is_some());
}
