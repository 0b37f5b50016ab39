//! Database migrations for the reviews table.

use sea_orm_migration::prelude::*;

mod m20240201_000001_create_reviews_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240201_000001_create_reviews_table::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("review_service_migrations").into_iden()
    }
}
