//! Review service - Lists review threads and accepts new reviews and replies.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{group_reviews, NewReview, Review, ReviewThread};

use crate::repository::ReviewRepository;

/// Review service trait for dependency injection.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// All reviews of a product, grouped into root/reply threads
    async fn list_threads(&self, product_id: Uuid) -> AppResult<Vec<ReviewThread>>;

    /// Post a rated root review
    async fn submit_review(
        &self,
        author_id: Uuid,
        product_id: Uuid,
        rating: i16,
        comment: String,
    ) -> AppResult<Review>;

    /// Reply to an existing root review of the same product
    async fn submit_reply(
        &self,
        author_id: Uuid,
        product_id: Uuid,
        parent_id: Uuid,
        comment: String,
    ) -> AppResult<Review>;
}

/// Concrete implementation of ReviewService using repository.
pub struct ReviewManager {
    repo: Arc<dyn ReviewRepository>,
}

impl ReviewManager {
    pub fn new(repo: Arc<dyn ReviewRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ReviewService for ReviewManager {
    async fn list_threads(&self, product_id: Uuid) -> AppResult<Vec<ReviewThread>> {
        let reviews = self.repo.list_by_product(product_id).await?;
        let threads = group_reviews(&reviews);
        tracing::debug!(
            product_id = %product_id,
            records = reviews.len(),
            threads = threads.len(),
            "Grouped reviews"
        );
        Ok(threads)
    }

    async fn submit_review(
        &self,
        author_id: Uuid,
        product_id: Uuid,
        rating: i16,
        comment: String,
    ) -> AppResult<Review> {
        let review = NewReview::root(product_id, author_id, rating, comment)?;
        let review = self.repo.create(review).await?;
        tracing::info!(review_id = %review.id, product_id = %product_id, "Review posted");
        Ok(review)
    }

    async fn submit_reply(
        &self,
        author_id: Uuid,
        product_id: Uuid,
        parent_id: Uuid,
        comment: String,
    ) -> AppResult<Review> {
        let parent = self.repo.find_by_id(parent_id).await?.ok_or_not_found()?;
        let reply = NewReview::reply(&parent, product_id, author_id, comment)?;
        let reply = self.repo.create(reply).await?;
        tracing::info!(review_id = %reply.id, parent_id = %parent_id, "Reply posted");
        Ok(reply)
    }
}
