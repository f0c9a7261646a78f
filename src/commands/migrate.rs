//! Migrate command - Schema management for the storefront tables.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

fn schema_error(action: &str) -> impl Fn(sea_orm::DbErr) -> AppError + '_ {
    move |e| AppError::internal(format!("{} failed: {}", action, e))
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(schema_error("Database connection"))?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await.map_err(schema_error("Migration"))?;
            tracing::info!("Food, user, order and contact tables are up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration()
                .await
                .map_err(schema_error("Rollback"))?;
            tracing::info!("Rolled back the most recent migration");
        }
        MigrateAction::Status => {
            let states = db
                .migration_status()
                .await
                .map_err(schema_error("Status check"))?;
            let pending = states.iter().filter(|s| !s.applied).count();
            for state in &states {
                println!(
                    "{:<8} {}",
                    if state.applied { "applied" } else { "pending" },
                    state.name
                );
            }
            tracing::info!(total = states.len(), pending, "Migration status");
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables, existing orders and carts will be lost");
            db.fresh_migrations()
                .await
                .map_err(schema_error("Fresh migration"))?;
            tracing::info!("Schema rebuilt from scratch");
        }
    }

    Ok(())
}
