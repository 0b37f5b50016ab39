//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Entities here are shared by every service and by the HTTP gateway.

pub mod constants;
pub mod error;
pub mod password;
pub mod review;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use review::{attach_reply, group_reviews, NewReview, Review, ReviewThread};
pub use user::{validate_email, RegisterUser, User, UserResponse, UserRole};
