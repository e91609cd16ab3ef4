//! Equipment catalog service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{
            CreateEquipment, Equipment, EquipmentQuery, EquipmentType, EquipmentTypeInput,
            UpdateEquipment,
        },
        Actor,
    },
    repository::Repository,
    services::planner::PlannerService,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    planner: PlannerService,
}

impl EquipmentService {
    pub fn new(repository: Repository, planner: PlannerService) -> Self {
        Self { repository, planner }
    }

    // ---- Types ----

    pub async fn list_types(&self) -> AppResult<Vec<EquipmentType>> {
        self.repository.equipment.list_types().await
    }

    pub async fn get_type(&self, id: i32) -> AppResult<EquipmentType> {
        self.repository.equipment.get_type(id).await
    }

    pub async fn create_type(&self, data: &EquipmentTypeInput) -> AppResult<EquipmentType> {
        data.validate()?;
        self.repository.equipment.create_type(data).await
    }

    pub async fn update_type(&self, id: i32, data: &EquipmentTypeInput) -> AppResult<EquipmentType> {
        data.validate()?;
        self.repository.equipment.update_type(id, data).await
    }

    pub async fn delete_type(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete_type(id).await
    }

    // ---- Equipment ----

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Create equipment and generate its plans over the default horizon
    pub async fn create(&self, data: &CreateEquipment, actor: &Actor) -> AppResult<(Equipment, u64)> {
        data.validate()?;

        if self.repository.equipment.inventory_number_exists(&data.inventory_number, None).await? {
            return Err(AppError::duplicate_field("inventory_number", "Inventory number already exists"));
        }
        self.repository.equipment.get_type(data.equipment_type_id).await?;

        let equipment = self.repository.equipment.create(data).await?;
        let created = self
            .planner
            .generate_for(&equipment, self.planner.default_horizon_months(), actor)
            .await?;

        tracing::info!(
            "Equipment {} ({}) added, {} plans generated",
            equipment.name, equipment.inventory_number, created
        );
        Ok((equipment, created))
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;

        if let Some(ref inventory_number) = data.inventory_number {
            if self.repository.equipment.inventory_number_exists(inventory_number, Some(id)).await? {
                return Err(AppError::duplicate_field("inventory_number", "Inventory number already exists"));
            }
        }

        self.repository.equipment.update(id, data).await
    }

    /// Delete equipment and, by cascade, its plans
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await?;
        tracing::info!("Equipment {} deleted", id);
        Ok(())
    }
}
