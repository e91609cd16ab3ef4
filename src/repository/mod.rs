//! Repository layer for database operations

pub mod equipment;
pub mod plans;
pub mod standards;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub standards: standards::StandardsRepository,
    pub plans: plans::PlansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            standards: standards::StandardsRepository::new(pool.clone()),
            plans: plans::PlansRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Delete all data; type deletions cascade to everything else
    pub async fn clear_all(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM equipment_types").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM maintenance_types").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Map constraint violations to client errors, everything else to `AppError::Database`
pub(crate) fn map_constraint_error(
    err: sqlx::Error,
    on_unique: impl FnOnce() -> AppError,
    on_foreign_key: impl FnOnce() -> AppError,
) -> AppError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_unique_violation() {
            return on_unique();
        }
        if db.is_foreign_key_violation() {
            return on_foreign_key();
        }
    }
    AppError::Database(err)
}

/// Escape a user search term for ILIKE
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
