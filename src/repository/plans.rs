//! Maintenance plans repository

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use super::{like_pattern, map_constraint_error};
use crate::{
    error::{AppError, AppResult},
    models::plan::{CreatePlan, MaintenancePlan, NewPlan, PlanQuery, PlanStatus},
    services::planner::PlanStore,
};

const PLAN_SELECT: &str = r#"
    SELECT p.id, p.equipment_id, e.name AS equipment_name, e.inventory_number,
           p.maintenance_type_id, mt.name AS maintenance_type_name, mt.code AS maintenance_type_code,
           p.planned_date, p.actual_date, p.status, p.notes,
           p.created_by, p.updated_by, p.created_at, p.updated_at
    FROM maintenance_plans p
    JOIN equipment e ON e.id = p.equipment_id
    JOIN maintenance_types mt ON mt.id = p.maintenance_type_id
"#;

/// Fields written by the edit path, already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanChanges {
    pub status: PlanStatus,
    pub actual_date: Option<NaiveDate>,
    pub notes: String,
    pub updated_by: Option<String>,
}

/// Per-user activity counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityCounts {
    pub created: i64,
    pub updated: i64,
}

#[derive(Clone)]
pub struct PlansRepository {
    pool: Pool<Postgres>,
}

impl PlansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List plans ordered by planned date
    pub async fn list(&self, query: &PlanQuery) -> AppResult<Vec<MaintenancePlan>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("p.status = ${}", idx));
            idx += 1;
        }
        if query.equipment_id.is_some() {
            conditions.push(format!("p.equipment_id = ${}", idx));
            idx += 1;
        }
        if query.maintenance_type_id.is_some() {
            conditions.push(format!("p.maintenance_type_id = ${}", idx));
            idx += 1;
        }
        if query.start_date.is_some() {
            conditions.push(format!("p.planned_date >= ${}", idx));
            idx += 1;
        }
        if query.end_date.is_some() {
            conditions.push(format!("p.planned_date <= ${}", idx));
            idx += 1;
        }
        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);
        if pattern.is_some() {
            conditions.push(format!(
                "(e.name ILIKE ${0} OR e.inventory_number ILIKE ${0})",
                idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!("{} {} ORDER BY p.planned_date, p.id", PLAN_SELECT, where_clause);

        let mut builder = sqlx::query_as::<_, MaintenancePlan>(&select_q);
        if let Some(status) = query.status { builder = builder.bind(status); }
        if let Some(eq) = query.equipment_id { builder = builder.bind(eq); }
        if let Some(mt) = query.maintenance_type_id { builder = builder.bind(mt); }
        if let Some(sd) = query.start_date { builder = builder.bind(sd); }
        if let Some(ed) = query.end_date { builder = builder.bind(ed); }
        if let Some(ref p) = pattern { builder = builder.bind(p); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenancePlan> {
        let query = format!("{} WHERE p.id = $1", PLAN_SELECT);
        sqlx::query_as::<_, MaintenancePlan>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance plan {} not found", id)))
    }

    /// Insert a manually entered plan
    pub async fn create(&self, data: &CreatePlan, created_by: Option<&str>) -> AppResult<MaintenancePlan> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO maintenance_plans
                (equipment_id, maintenance_type_id, planned_date, actual_date, status, notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.maintenance_type_id)
        .bind(data.planned_date)
        .bind(data.actual_date)
        .bind(data.status.unwrap_or_default())
        .bind(data.notes.as_deref().unwrap_or(""))
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_error(
                e,
                || AppError::Internal("Unexpected unique violation".to_string()),
                || AppError::Validation("Unknown equipment or maintenance type".to_string()),
            )
        })?;

        self.get_by_id(id).await
    }

    /// Write edited fields and stamp the editor
    pub async fn update(&self, id: i32, changes: &PlanChanges) -> AppResult<MaintenancePlan> {
        let result = sqlx::query(
            r#"
            UPDATE maintenance_plans
            SET status = $1, actual_date = $2, notes = $3, updated_by = $4, updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(changes.status)
        .bind(changes.actual_date)
        .bind(&changes.notes)
        .bind(&changes.updated_by)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Maintenance plan {} not found", id)));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Maintenance plan {} not found", id)));
        }
        Ok(())
    }

    // ---- Profile ----

    pub async fn activity_counts(&self, login: &str) -> AppResult<ActivityCounts> {
        let (created, updated): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE created_by = $1),
                COUNT(*) FILTER (WHERE updated_by = $1)
            FROM maintenance_plans
            "#,
        )
        .bind(login)
        .fetch_one(&self.pool)
        .await?;
        Ok(ActivityCounts { created, updated })
    }

    /// Most recently created plans by a user
    pub async fn recent_created_by(&self, login: &str, limit: i64) -> AppResult<Vec<MaintenancePlan>> {
        let query = format!(
            "{} WHERE p.created_by = $1 ORDER BY p.created_at DESC LIMIT $2",
            PLAN_SELECT
        );
        let rows = sqlx::query_as::<_, MaintenancePlan>(&query)
            .bind(login)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Most recently updated plans by a user, excluding the ones they created
    pub async fn recent_updated_by(&self, login: &str, limit: i64) -> AppResult<Vec<MaintenancePlan>> {
        let query = format!(
            r#"{} WHERE p.updated_by = $1 AND p.created_by IS DISTINCT FROM $1
               ORDER BY p.updated_at DESC LIMIT $2"#,
            PLAN_SELECT
        );
        let rows = sqlx::query_as::<_, MaintenancePlan>(&query)
            .bind(login)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl PlanStore for PlansRepository {
    async fn count_for_pair(&self, equipment_id: i32, maintenance_type_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_plans WHERE equipment_id = $1 AND maintenance_type_id = $2"
        )
        .bind(equipment_id)
        .bind(maintenance_type_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn latest_planned_date(&self, equipment_id: i32, maintenance_type_id: i32) -> AppResult<Option<NaiveDate>> {
        let date: Option<NaiveDate> = sqlx::query_scalar(
            "SELECT MAX(planned_date) FROM maintenance_plans WHERE equipment_id = $1 AND maintenance_type_id = $2"
        )
        .bind(equipment_id)
        .bind(maintenance_type_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(date)
    }

    async fn plan_exists(&self, equipment_id: i32, maintenance_type_id: i32, planned_date: NaiveDate) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM maintenance_plans
                WHERE equipment_id = $1 AND maintenance_type_id = $2 AND planned_date = $3
            )
            "#,
        )
        .bind(equipment_id)
        .bind(maintenance_type_id)
        .bind(planned_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert_generated(&self, plan: &NewPlan) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO maintenance_plans (equipment_id, maintenance_type_id, planned_date, status, created_by)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(plan.equipment_id)
        .bind(plan.maintenance_type_id)
        .bind(plan.planned_date)
        .bind(PlanStatus::Planned)
        .bind(&plan.created_by)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
