//! Maintenance types and standards service

use validator::Validate;

use crate::{
    error::AppResult,
    models::maintenance::{
        CreateMaintenanceStandard, CreateMaintenanceType, MaintenanceStandard, MaintenanceType,
        UpdateMaintenanceStandard, UpdateMaintenanceType,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct StandardsService {
    repository: Repository,
}

impl StandardsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Maintenance types ----
    pub async fn list_types(&self) -> AppResult<Vec<MaintenanceType>> {
        self.repository.standards.list_types().await
    }

    pub async fn get_type(&self, id: i32) -> AppResult<MaintenanceType> {
        self.repository.standards.get_type(id).await
    }

    pub async fn create_type(&self, data: &CreateMaintenanceType) -> AppResult<MaintenanceType> {
        data.validate()?;
        self.repository.standards.create_type(data).await
    }

    pub async fn update_type(&self, id: i32, data: &UpdateMaintenanceType) -> AppResult<MaintenanceType> {
        data.validate()?;
        self.repository.standards.update_type(id, data).await
    }

    /// Delete a maintenance type; its standards and plans go with it
    pub async fn delete_type(&self, id: i32) -> AppResult<()> {
        self.repository.standards.delete_type(id).await
    }

    // ---- Standards ----
    pub async fn list(&self) -> AppResult<Vec<MaintenanceStandard>> {
        self.repository.standards.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceStandard> {
        self.repository.standards.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateMaintenanceStandard) -> AppResult<MaintenanceStandard> {
        if data.frequency_months <= 0 {
            tracing::warn!(
                "Standard for equipment type {} / maintenance type {} has frequency {}; it will not produce plans",
                data.equipment_type_id, data.maintenance_type_id, data.frequency_months
            );
        }
        self.repository.standards.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateMaintenanceStandard) -> AppResult<MaintenanceStandard> {
        self.repository.standards.update_frequency(id, data.frequency_months).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.standards.delete(id).await
    }
}
