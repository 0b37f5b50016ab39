//! Migration runner shared by every service.
//!
//! Each service ships its own `MigratorTrait` implementation with a dedicated
//! history table, so services can be migrated and rolled back independently.

use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply pending migrations
    Up,
    /// Roll back the most recent migration
    Down,
    /// Report applied/pending migrations
    Status,
    /// Roll back every migration, then apply them all again
    Refresh,
}

/// Run `action` for migrator `M`.
///
/// Returns `(migration name, applied)` for every known migration once the
/// action has completed.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    action: MigrateAction,
) -> Result<Vec<(String, bool)>, DbErr> {
    match action {
        MigrateAction::Up => M::up(db, None).await?,
        MigrateAction::Down => M::down(db, Some(1)).await?,
        MigrateAction::Status => {}
        MigrateAction::Refresh => M::refresh(db).await?,
    }

    let migrations = M::get_migration_with_status(db)
        .await?
        .iter()
        .map(|m| {
            (
                m.name().to_string(),
                matches!(m.status(), MigrationStatus::Applied),
            )
        })
        .collect();

    Ok(migrations)
}
