//! User Service Library
//!
//! Owns the `users` table: entity, repository, migrations and the
//! profile-lookup use cases. Credential handling lives in `auth-service`,
//! which drives this crate through [`repository::UserRepository`].

pub mod infra;
pub mod repository;
pub mod service;

use sea_orm::{DatabaseConnection, DbErr};

use common::MigrateAction;

pub use infra::Migrator;

/// Run user-service migrations, returning the resulting migration status.
pub async fn run_migrations(
    db: &DatabaseConnection,
    action: MigrateAction,
) -> Result<Vec<(String, bool)>, DbErr> {
    common::run_migrations::<Migrator>(db, action).await
}
