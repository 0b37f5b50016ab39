//! Review repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use uuid::Uuid;

use super::entities::review::{self, ActiveModel, Entity as ReviewEntity};
use common::{AppError, AppResult};
use domain::{NewReview, Review};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Review repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// All reviews and replies of a product, oldest first
    async fn list_by_product(&self, product_id: Uuid) -> AppResult<Vec<Review>>;

    /// Find a review or reply by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>>;

    /// Persist a validated review or reply
    async fn create(&self, review: NewReview) -> AppResult<Review>;
}

/// Concrete implementation of ReviewRepository backed by SeaORM
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Reviews of one product, oldest first; equal timestamps keep the store's order.
fn by_product(product_id: Uuid) -> Select<ReviewEntity> {
    ReviewEntity::find()
        .filter(review::Column::ProductId.eq(product_id))
        .order_by_asc(review::Column::CreatedAt)
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn list_by_product(&self, product_id: Uuid) -> AppResult<Vec<Review>> {
        let models = by_product(product_id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Review::from))
    }

    async fn create(&self, review: NewReview) -> AppResult<Review> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(review.product_id),
            author_id: Set(review.author_id),
            rating: Set(review.rating),
            comment: Set(review.comment),
            parent_id: Set(review.parent_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        tracing::debug!(review_id = %model.id, product_id = %model.product_id, "Review row inserted");
        Ok(Review::from(model))
    }
}
