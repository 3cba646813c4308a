//! Database connection and migration handling.
//!
//! Each service owns a [`MigratorTrait`] implementation and records its
//! applied versions in its own bookkeeping table (see
//! `MigratorTrait::migration_table_name`), so several services can share one
//! database without tripping over each other's history.

use std::marker::PhantomData;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    Statement,
};
use sea_orm_migration::{MigrationStatus, MigratorTrait};
use tracing::info;

use crate::config::DatabaseConfig;

/// Migration command shared by every service CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::Subcommand))]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Roll back every migration of this service, then apply them again
    Fresh,
}

/// Connection pool tied to the migrator `M` of one service.
pub struct Database<M> {
    connection: DatabaseConnection,
    migrator: PhantomData<fn() -> M>,
}

impl<M> Clone for Database<M> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            migrator: PhantomData,
        }
    }
}

impl<M: MigratorTrait> Database<M> {
    /// Connect and apply pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;
        db.run_migrations().await?;
        info!("Database connected and migrations applied");

        Ok(db)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        Ok(Self {
            connection,
            migrator: PhantomData,
        })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        M::up(&self.connection, None).await
    }

    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        M::down(&self.connection, Some(1)).await
    }

    /// Every migration of `M` with its applied flag, in definition order.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let migrations = M::get_migration_with_status(&self.connection).await?;

        Ok(migrations
            .iter()
            .map(|m| {
                let applied = matches!(m.status(), MigrationStatus::Applied);
                (m.name().to_string(), applied)
            })
            .collect())
    }

    /// Roll back and reapply the migrations of `M` only. Tables owned by
    /// other migrators in the same database are left alone.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        M::refresh(&self.connection).await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Run a migration CLI command.
    pub async fn migrate(&self, action: MigrateAction) -> Result<(), DbErr> {
        match action {
            MigrateAction::Up => {
                self.run_migrations().await?;
                info!("Migrations applied successfully");
            }
            MigrateAction::Down => {
                self.rollback_migration().await?;
                info!("Rolled back last migration");
            }
            MigrateAction::Status => {
                for (name, applied) in self.migration_status().await? {
                    let marker = if applied { "[x]" } else { "[ ]" };
                    println!("{} {}", marker, name);
                }
            }
            MigrateAction::Fresh => {
                self.fresh_migrations().await?;
                info!("Migrations rolled back and reapplied");
            }
        }

        Ok(())
    }
}
