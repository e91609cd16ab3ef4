//! Equipment catalog repository (types and instances)

use sqlx::{Pool, Postgres};

use super::{like_pattern, map_constraint_error};
use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, EquipmentQuery, EquipmentType, EquipmentTypeInput,
        UpdateEquipment,
    },
};

const EQUIPMENT_COLUMNS: &str = r#"
    e.id, e.name, e.inventory_number, e.equipment_type_id,
    t.name AS equipment_type_name, e.installation_date
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Equipment types ----

    pub async fn list_types(&self) -> AppResult<Vec<EquipmentType>> {
        let rows = sqlx::query_as::<_, EquipmentType>(
            "SELECT id, name FROM equipment_types ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_type(&self, id: i32) -> AppResult<EquipmentType> {
        sqlx::query_as::<_, EquipmentType>("SELECT id, name FROM equipment_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment type {} not found", id)))
    }

    pub async fn create_type(&self, data: &EquipmentTypeInput) -> AppResult<EquipmentType> {
        let row = sqlx::query_as::<_, EquipmentType>(
            "INSERT INTO equipment_types (name) VALUES ($1) RETURNING id, name"
        )
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_type(&self, id: i32, data: &EquipmentTypeInput) -> AppResult<EquipmentType> {
        sqlx::query_as::<_, EquipmentType>(
            "UPDATE equipment_types SET name = $1 WHERE id = $2 RETURNING id, name"
        )
        .bind(&data.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment type {} not found", id)))
    }

    /// Delete a type (cascades to its equipment, standards and plans)
    pub async fn delete_type(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment type {} not found", id)));
        }
        Ok(())
    }

    // ---- Equipment ----

    /// List equipment, optionally filtered by type and search term
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.equipment_type_id.is_some() {
            conditions.push(format!("e.equipment_type_id = ${}", idx));
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

        let select_q = format!(
            "SELECT {} FROM equipment e JOIN equipment_types t ON t.id = e.equipment_type_id {} ORDER BY e.name",
            EQUIPMENT_COLUMNS, where_clause
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&select_q);
        if let Some(type_id) = query.equipment_type_id { builder = builder.bind(type_id); }
        if let Some(ref p) = pattern { builder = builder.bind(p); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// List all equipment (for batch plan generation)
    pub async fn list_all(&self) -> AppResult<Vec<Equipment>> {
        self.list(&EquipmentQuery::default()).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        let select_q = format!(
            "SELECT {} FROM equipment e JOIN equipment_types t ON t.id = e.equipment_type_id WHERE e.id = $1",
            EQUIPMENT_COLUMNS
        );
        sqlx::query_as::<_, Equipment>(&select_q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Check whether an inventory number is already taken (optionally by another row)
    pub async fn inventory_number_exists(&self, inventory_number: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM equipment WHERE inventory_number = $1 AND ($2::int IS NULL OR id <> $2))"
        )
        .bind(inventory_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let query = format!(
            r#"
            WITH e AS (
                INSERT INTO equipment (name, inventory_number, equipment_type_id, installation_date)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT {} FROM e JOIN equipment_types t ON t.id = e.equipment_type_id
            "#,
            EQUIPMENT_COLUMNS
        );

        sqlx::query_as::<_, Equipment>(&query)
            .bind(&data.name)
            .bind(&data.inventory_number)
            .bind(data.equipment_type_id)
            .bind(data.installation_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_constraint_error(
                    e,
                    || AppError::duplicate_field("inventory_number", "Inventory number already exists"),
                    || AppError::Validation(format!("Equipment type {} does not exist", data.equipment_type_id)),
                )
            })
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.inventory_number, "inventory_number");
        add_field!(data.equipment_type_id, "equipment_type_id");
        add_field!(data.installation_date, "installation_date");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            r#"
            WITH e AS (
                UPDATE equipment SET {} WHERE id = ${} RETURNING *
            )
            SELECT {} FROM e JOIN equipment_types t ON t.id = e.equipment_type_id
            "#,
            sets.join(", "),
            idx,
            EQUIPMENT_COLUMNS
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.inventory_number);
        bind_field!(data.equipment_type_id);
        bind_field!(data.installation_date);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_constraint_error(
                    e,
                    || AppError::duplicate_field("inventory_number", "Inventory number already exists"),
                    || AppError::Validation("Equipment type does not exist".to_string()),
                )
            })?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment (cascades to its plans)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }
}
