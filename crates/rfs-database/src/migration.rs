//! Schema migrations for the PostgreSQL item store.

use sqlx::PgPool;
use tracing::info;

use rfs_core::error::{AppError, ErrorKind};

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run item store migrations: {e}"),
                e,
            )
        })?;

    info!("Item store schema is up to date");
    Ok(())
}
