//! Repository layer for data access.

pub mod entities;
mod review_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewStore};
