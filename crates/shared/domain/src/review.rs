//! Product reviews and the two-level review/reply tree.
//!
//! Reviews are stored flat; a reply points at its root review through
//! `parent_id`. [`group_reviews`] rebuilds the tree for display and
//! [`attach_reply`] splices a freshly posted reply into an existing tree.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::error::{DomainError, DomainResult};

/// A single review or reply as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub author_id: Uuid,
    /// Star rating, present on root reviews only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i16>,
    pub comment: String,
    /// Root review this record replies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// A root review with its direct replies, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReviewThread {
    #[serde(flatten)]
    pub review: Review,
    pub replies: Vec<Review>,
}

impl ReviewThread {
    fn new(review: Review) -> Self {
        Self {
            review,
            replies: Vec::new(),
        }
    }
}

/// Data needed to persist a new review or reply.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: Uuid,
    pub author_id: Uuid,
    pub rating: Option<i16>,
    pub comment: String,
    pub parent_id: Option<Uuid>,
}

impl NewReview {
    /// A root review; the rating must lie within `MIN_RATING..=MAX_RATING`.
    pub fn root(
        product_id: Uuid,
        author_id: Uuid,
        rating: i16,
        comment: String,
    ) -> DomainResult<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(DomainError::validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        let comment = require_comment(comment)?;

        Ok(Self {
            product_id,
            author_id,
            rating: Some(rating),
            comment,
            parent_id: None,
        })
    }

    /// A reply to the root review `parent`.
    ///
    /// Replies can only target root reviews of the same product.
    pub fn reply(
        parent: &Review,
        product_id: Uuid,
        author_id: Uuid,
        comment: String,
    ) -> DomainResult<Self> {
        if parent.product_id != product_id {
            return Err(DomainError::not_found("Review"));
        }
        if parent.is_reply() {
            return Err(DomainError::validation("Replies cannot be replied to"));
        }
        let comment = require_comment(comment)?;

        Ok(Self {
            product_id,
            author_id,
            rating: None,
            comment,
            parent_id: Some(parent.id),
        })
    }
}

fn require_comment(comment: String) -> DomainResult<String> {
    if comment.trim().is_empty() {
        return Err(DomainError::validation("Comment is required"));
    }
    Ok(comment)
}

/// Rebuild the review tree from a flat, ordered list.
///
/// Every record is indexed first; records with a parent are then attached to
/// that parent's reply list in input order. Replies whose parent is not in the
/// batch are dropped, never promoted to roots. A reply to a reply lands on a
/// non-root entry and therefore never surfaces.
pub fn group_reviews(reviews: &[Review]) -> Vec<ReviewThread> {
    let mut index: HashMap<Uuid, ReviewThread> = reviews
        .iter()
        .map(|review| (review.id, ReviewThread::new(review.clone())))
        .collect();

    for review in reviews {
        let Some(parent_id) = review.parent_id else {
            continue;
        };
        if let Some(parent) = index.get_mut(&parent_id) {
            parent.replies.push(review.clone());
        }
    }

    reviews
        .iter()
        .filter(|review| review.is_root())
        .filter_map(|review| index.remove(&review.id))
        .collect()
}

/// Splice a newly created reply into an already grouped tree.
///
/// Returns `false` and leaves the tree untouched when the reply's parent is
/// not one of the roots.
pub fn attach_reply(threads: &mut [ReviewThread], reply: Review) -> bool {
    let Some(parent_id) = reply.parent_id else {
        return false;
    };

    match threads.iter_mut().find(|thread| thread.review.id == parent_id) {
        Some(thread) => {
            thread.replies.push(reply);
            true
        }
        None => false,
    }
}
