//! Infrastructure layer - database and migrations.

pub mod migrations;

pub use migrations::Migrator;

/// Connection pool migrated with this service's [`Migrator`].
pub type Database = common::Database<Migrator>;
