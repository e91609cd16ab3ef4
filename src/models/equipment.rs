//! Equipment catalog models (types and instances)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// ---------------------------------------------------------------------------
// EquipmentType
// ---------------------------------------------------------------------------

/// Category of machinery (lathe, press, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentType {
    pub id: i32,
    pub name: String,
}

/// Create or rename an equipment type
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EquipmentTypeInput {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// Equipment record, joined with its type name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    /// Unique inventory number
    pub inventory_number: String,
    pub equipment_type_id: i32,
    pub equipment_type_name: String,
    /// Date the equipment was put into service; anchors plan generation
    pub installation_date: NaiveDate,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Inventory number must be 1-50 characters"))]
    pub inventory_number: String,
    pub equipment_type_id: i32,
    /// Installation date (YYYY-MM-DD)
    pub installation_date: NaiveDate,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Inventory number must be 1-50 characters"))]
    pub inventory_number: Option<String>,
    pub equipment_type_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
}

/// Query parameters for equipment listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Filter by equipment type
    pub equipment_type_id: Option<i32>,
    /// Search in name and inventory number
    pub search: Option<String>,
}

/// Plan generation request for one piece of equipment
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct GeneratePlansRequest {
    /// Horizon in years (ignored if horizon_months is set)
    #[validate(range(min = 1, max = 100, message = "Horizon must be 1-100 years"))]
    pub years: Option<i32>,
    /// Horizon in months
    #[validate(range(min = 1, max = 1200, message = "Horizon must be 1-1200 months"))]
    pub horizon_months: Option<i32>,
}

impl GeneratePlansRequest {
    pub fn horizon_months(&self, default: i32) -> i32 {
        self.horizon_months
            .or_else(|| self.years.map(|y| y.saturating_mul(12)))
            .unwrap_or(default)
    }
}

/// Plan generation result
#[derive(Debug, Serialize, ToSchema)]
pub struct GeneratePlansResponse {
    pub equipment_id: i32,
    pub horizon_months: i32,
    pub created: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_resolution() {
        let req = GeneratePlansRequest::default();
        assert_eq!(req.horizon_months(36), 36);

        let req = GeneratePlansRequest { years: Some(5), horizon_months: None };
        assert_eq!(req.horizon_months(36), 60);

        let req = GeneratePlansRequest { years: Some(5), horizon_months: Some(18) };
        assert_eq!(req.horizon_months(36), 18);
    }

    #[test]
    fn test_horizon_bounds() {
        assert!(GeneratePlansRequest::default().validate().is_ok());
        assert!(GeneratePlansRequest { years: Some(3), horizon_months: Some(1200) }.validate().is_ok());

        let errors = GeneratePlansRequest { years: None, horizon_months: Some(i32::MAX) }
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("horizon_months"));

        let errors = GeneratePlansRequest { years: Some(0), horizon_months: None }
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("years"));

        let errors = GeneratePlansRequest { years: None, horizon_months: Some(-6) }
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("horizon_months"));
    }

    #[test]
    fn test_create_equipment_validation() {
        let data = CreateEquipment {
            name: String::new(),
            inventory_number: "LATHE-001".to_string(),
            equipment_type_id: 1,
            installation_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let errors = data.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(!errors.field_errors().contains_key("inventory_number"));
    }
}
