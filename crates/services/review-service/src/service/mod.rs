//! Review service business logic.

mod review_service;

pub use review_service::{ReviewManager, ReviewService};
