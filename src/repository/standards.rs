//! Maintenance types and standards repository

use sqlx::{Pool, Postgres};

use super::map_constraint_error;
use crate::{
    error::{AppError, AppResult},
    models::maintenance::{
        CreateMaintenanceStandard, CreateMaintenanceType, MaintenanceStandard, MaintenanceType,
        UpdateMaintenanceType,
    },
};

const STANDARD_SELECT: &str = r#"
    SELECT s.id, s.equipment_type_id, et.name AS equipment_type_name,
           s.maintenance_type_id, mt.name AS maintenance_type_name,
           s.frequency_months
    FROM maintenance_standards s
    JOIN equipment_types et ON et.id = s.equipment_type_id
    JOIN maintenance_types mt ON mt.id = s.maintenance_type_id
"#;

#[derive(Clone)]
pub struct StandardsRepository {
    pool: Pool<Postgres>,
}

impl StandardsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Maintenance types ----

    pub async fn list_types(&self) -> AppResult<Vec<MaintenanceType>> {
        let rows = sqlx::query_as::<_, MaintenanceType>(
            "SELECT id, name, code FROM maintenance_types ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_type(&self, id: i32) -> AppResult<MaintenanceType> {
        sqlx::query_as::<_, MaintenanceType>("SELECT id, name, code FROM maintenance_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance type {} not found", id)))
    }

    pub async fn create_type(&self, data: &CreateMaintenanceType) -> AppResult<MaintenanceType> {
        sqlx::query_as::<_, MaintenanceType>(
            "INSERT INTO maintenance_types (name, code) VALUES ($1, $2) RETURNING id, name, code"
        )
        .bind(&data.name)
        .bind(&data.code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_error(
                e,
                || AppError::duplicate_field("code", "Code already exists"),
                || AppError::Internal("Unexpected foreign key violation".to_string()),
            )
        })
    }

    pub async fn update_type(&self, id: i32, data: &UpdateMaintenanceType) -> AppResult<MaintenanceType> {
        sqlx::query_as::<_, MaintenanceType>(
            r#"
            UPDATE maintenance_types
            SET name = COALESCE($1, name), code = COALESCE($2, code)
            WHERE id = $3
            RETURNING id, name, code
            "#,
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_error(
                e,
                || AppError::duplicate_field("code", "Code already exists"),
                || AppError::Internal("Unexpected foreign key violation".to_string()),
            )
        })?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance type {} not found", id)))
    }

    /// Delete a maintenance type (cascades to standards and plans)
    pub async fn delete_type(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Maintenance type {} not found", id)));
        }
        Ok(())
    }

    // ---- Standards ----

    pub async fn list(&self) -> AppResult<Vec<MaintenanceStandard>> {
        let query = format!("{} ORDER BY et.name, mt.name", STANDARD_SELECT);
        let rows = sqlx::query_as::<_, MaintenanceStandard>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Standards applicable to one equipment type
    pub async fn list_for_equipment_type(&self, equipment_type_id: i32) -> AppResult<Vec<MaintenanceStandard>> {
        let query = format!("{} WHERE s.equipment_type_id = $1 ORDER BY mt.name", STANDARD_SELECT);
        let rows = sqlx::query_as::<_, MaintenanceStandard>(&query)
            .bind(equipment_type_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceStandard> {
        let query = format!("{} WHERE s.id = $1", STANDARD_SELECT);
        sqlx::query_as::<_, MaintenanceStandard>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance standard {} not found", id)))
    }

    pub async fn create(&self, data: &CreateMaintenanceStandard) -> AppResult<MaintenanceStandard> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO maintenance_standards (equipment_type_id, maintenance_type_id, frequency_months)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(data.equipment_type_id)
        .bind(data.maintenance_type_id)
        .bind(data.frequency_months)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_error(
                e,
                || AppError::Conflict("A standard already exists for this equipment type and maintenance type".to_string()),
                || AppError::Validation("Unknown equipment type or maintenance type".to_string()),
            )
        })?;

        self.get_by_id(id).await
    }

    pub async fn update_frequency(&self, id: i32, frequency_months: i32) -> AppResult<MaintenanceStandard> {
        let result = sqlx::query("UPDATE maintenance_standards SET frequency_months = $1 WHERE id = $2")
            .bind(frequency_months)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Maintenance standard {} not found", id)));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_standards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Maintenance standard {} not found", id)));
        }
        Ok(())
    }
}
