//! Infrastructure layer - schema migrations.

pub mod migrations;

pub use migrations::Migrator;
