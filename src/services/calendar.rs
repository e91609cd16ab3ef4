//! Calendar projection of maintenance plans

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::plan::{MaintenancePlan, PlanQuery, PlanStatus},
    repository::Repository,
};

pub const COLOR_COMPLETED: &str = "#28a745";
pub const COLOR_IN_PROGRESS: &str = "#ffc107";
pub const COLOR_CANCELLED: &str = "#dc3545";
pub const COLOR_INSPECTION: &str = "#007bff";
pub const COLOR_REPAIR: &str = "#fd7e14";
pub const COLOR_OTHER: &str = "#6f42c1";

/// Calendar event for one plan
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: i32,
    pub title: String,
    /// Planned date (YYYY-MM-DD)
    pub start: String,
    pub color: &'static str,
    pub text_color: &'static str,
    pub extended_props: CalendarEventProps,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarEventProps {
    pub equipment: String,
    pub maintenance_type: String,
    /// Status label
    pub status: &'static str,
    pub inventory_number: String,
    pub created_by: String,
    pub updated_by: String,
}

/// Event color: status overrides, then maintenance type code
pub fn event_color(status: PlanStatus, maintenance_type_code: &str) -> &'static str {
    match status {
        PlanStatus::Completed => COLOR_COMPLETED,
        PlanStatus::InProgress => COLOR_IN_PROGRESS,
        PlanStatus::Cancelled => COLOR_CANCELLED,
        PlanStatus::Planned => match maintenance_type_code {
            "inspection" => COLOR_INSPECTION,
            "repair" => COLOR_REPAIR,
            _ => COLOR_OTHER,
        },
    }
}

impl From<&MaintenancePlan> for CalendarEvent {
    fn from(plan: &MaintenancePlan) -> Self {
        Self {
            id: plan.id,
            title: format!("{} - {}", plan.equipment_name, plan.maintenance_type_name),
            start: plan.planned_date.format("%Y-%m-%d").to_string(),
            color: event_color(plan.status, &plan.maintenance_type_code),
            text_color: "white",
            extended_props: CalendarEventProps {
                equipment: plan.equipment_name.clone(),
                maintenance_type: plan.maintenance_type_name.clone(),
                status: plan.status.label(),
                inventory_number: plan.inventory_number.clone(),
                created_by: plan.created_by.clone().unwrap_or_else(|| "System".to_string()),
                updated_by: plan.updated_by.clone().unwrap_or_else(|| "Not modified".to_string()),
            },
        }
    }
}

#[derive(Clone)]
pub struct CalendarService {
    repository: Repository,
}

impl CalendarService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// One event per stored plan
    pub async fn events(&self) -> AppResult<Vec<CalendarEvent>> {
        let plans = self.repository.plans.list(&PlanQuery::default()).await?;
        tracing::debug!("Calendar: {} plans", plans.len());
        Ok(plans.iter().map(CalendarEvent::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn plan(status: PlanStatus, code: &str) -> MaintenancePlan {
        MaintenancePlan {
            id: 3,
            equipment_id: 1,
            equipment_name: "Screw compressor".to_string(),
            inventory_number: "COMP-001".to_string(),
            maintenance_type_id: 1,
            maintenance_type_name: "Inspection".to_string(),
            maintenance_type_code: code.to_string(),
            planned_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            actual_date: None,
            status,
            notes: String::new(),
            created_by: None,
            updated_by: Some("foreman".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_colors_override_type() {
        for code in ["inspection", "repair", "overhaul"] {
            assert_eq!(event_color(PlanStatus::Completed, code), COLOR_COMPLETED);
            assert_eq!(event_color(PlanStatus::InProgress, code), COLOR_IN_PROGRESS);
            assert_eq!(event_color(PlanStatus::Cancelled, code), COLOR_CANCELLED);
        }
    }

    #[test]
    fn test_planned_colors_by_type_code() {
        assert_eq!(event_color(PlanStatus::Planned, "inspection"), "#007bff");
        assert_eq!(event_color(PlanStatus::Planned, "repair"), "#fd7e14");
        assert_eq!(event_color(PlanStatus::Planned, "overhaul"), "#6f42c1");
        assert_eq!(event_color(PlanStatus::Planned, "calibration"), "#6f42c1");
    }

    #[test]
    fn test_event_shape() {
        let event = CalendarEvent::from(&plan(PlanStatus::Planned, "inspection"));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["title"], "Screw compressor - Inspection");
        assert_eq!(json["start"], "2024-03-01");
        assert_eq!(json["color"], "#007bff");
        assert_eq!(json["textColor"], "white");
        assert_eq!(json["extendedProps"]["status"], "Planned");
        assert_eq!(json["extendedProps"]["inventory_number"], "COMP-001");
        assert_eq!(json["extendedProps"]["created_by"], "System");
        assert_eq!(json["extendedProps"]["updated_by"], "foreman");
    }
}
