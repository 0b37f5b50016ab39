//! Review Service Library
//!
//! Owns the `reviews` table. Reviews and replies are stored flat and
//! regrouped into two-level threads when a product's reviews are listed.

pub mod infra;
pub mod repository;
pub mod service;

use sea_orm::{DatabaseConnection, DbErr};

use common::MigrateAction;

pub use infra::Migrator;

/// Run review-service migrations, returning the resulting migration status.
pub async fn run_migrations(
    db: &DatabaseConnection,
    action: MigrateAction,
) -> Result<Vec<(String, bool)>, DbErr> {
    common::run_migrations::<Migrator>(db, action).await
}
