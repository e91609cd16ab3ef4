//! Maintenance types and standards

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Kind of service (inspection, repair, overhaul)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceType {
    pub id: i32,
    pub name: String,
    /// Unique short code; drives calendar colors
    pub code: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenanceType {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMaintenanceType {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))]
    pub code: Option<String>,
}

/// Required frequency of one maintenance type for one equipment type
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceStandard {
    pub id: i32,
    pub equipment_type_id: i32,
    pub equipment_type_name: String,
    pub maintenance_type_id: i32,
    pub maintenance_type_name: String,
    /// Frequency in months; values <= 0 never produce plans
    pub frequency_months: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMaintenanceStandard {
    pub equipment_type_id: i32,
    pub maintenance_type_id: i32,
    pub frequency_months: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMaintenanceStandard {
    pub frequency_months: i32,
}
