//! Todo service migrations.

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_todos_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_todos_table::Migration)]
    }

    /// Kept apart from other services' history in a shared database.
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_todos").into_iden()
    }
}
