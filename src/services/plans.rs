//! Maintenance plan service

use chrono::{Local, NaiveDate};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        plan::{CreatePlan, MaintenancePlan, PlanQuery, PlanStatus, UpdatePlan},
        Actor,
    },
    repository::{plans::PlanChanges, Repository},
};

#[derive(Clone)]
pub struct PlansService {
    repository: Repository,
}

/// Merge an edit into the current plan.
///
/// A plan that ends up completed without an actual date gets `today`.
pub fn resolve_changes(
    current: &MaintenancePlan,
    edit: &UpdatePlan,
    actor: &Actor,
    today: NaiveDate,
) -> PlanChanges {
    let status = edit.status.unwrap_or(current.status);
    let mut actual_date = edit.actual_date.or(current.actual_date);
    if status == PlanStatus::Completed && actual_date.is_none() {
        actual_date = Some(today);
    }

    PlanChanges {
        status,
        actual_date,
        notes: edit.notes.clone().unwrap_or_else(|| current.notes.clone()),
        updated_by: actor.login().map(str::to_string),
    }
}

impl PlansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &PlanQuery) -> AppResult<Vec<MaintenancePlan>> {
        self.repository.plans.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenancePlan> {
        self.repository.plans.get_by_id(id).await
    }

    /// Create a plan by hand; status defaults to planned
    pub async fn create(&self, data: &CreatePlan, actor: &Actor) -> AppResult<MaintenancePlan> {
        data.validate()?;
        let plan = self.repository.plans.create(data, actor.login()).await?;
        tracing::info!(
            "Plan {} created for equipment {} on {}",
            plan.id, plan.equipment_id, plan.planned_date
        );
        Ok(plan)
    }

    /// Record status, actual date and notes
    pub async fn update(&self, id: i32, edit: &UpdatePlan, actor: &Actor) -> AppResult<MaintenancePlan> {
        edit.validate()?;
        let current = self.repository.plans.get_by_id(id).await?;
        let changes = resolve_changes(&current, edit, actor, Local::now().date_naive());
        self.repository.plans.update(id, &changes).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.plans.delete(id).await?;
        tracing::info!("Plan {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(status: PlanStatus, actual_date: Option<NaiveDate>) -> MaintenancePlan {
        MaintenancePlan {
            id: 7,
            equipment_id: 1,
            equipment_name: "Hydraulic press 50t".to_string(),
            inventory_number: "PRESS-001".to_string(),
            maintenance_type_id: 2,
            maintenance_type_name: "Repair".to_string(),
            maintenance_type_code: "repair".to_string(),
            planned_date: date(2024, 6, 29),
            actual_date,
            status,
            notes: "scheduled".to_string(),
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_completed_without_date_defaults_to_today() {
        let today = date(2024, 7, 2);
        let edit = UpdatePlan {
            status: Some(PlanStatus::Completed),
            ..Default::default()
        };
        let changes = resolve_changes(&plan(PlanStatus::Planned, None), &edit, &Actor::System, today);
        assert_eq!(changes.status, PlanStatus::Completed);
        assert_eq!(changes.actual_date, Some(today));
    }

    #[test]
    fn test_supplied_actual_date_is_kept() {
        let edit = UpdatePlan {
            status: Some(PlanStatus::Completed),
            actual_date: Some(date(2024, 6, 27)),
            notes: None,
        };
        let changes = resolve_changes(&plan(PlanStatus::InProgress, None), &edit, &Actor::System, date(2024, 7, 2));
        assert_eq!(changes.actual_date, Some(date(2024, 6, 27)));
    }

    #[test]
    fn test_already_completed_without_date_gets_today() {
        let today = date(2024, 7, 2);
        let edit = UpdatePlan {
            notes: Some("checked oil".to_string()),
            ..Default::default()
        };
        let changes = resolve_changes(&plan(PlanStatus::Completed, None), &edit, &Actor::System, today);
        assert_eq!(changes.actual_date, Some(today));
        assert_eq!(changes.notes, "checked oil");
    }

    #[test]
    fn test_other_statuses_leave_actual_date_empty() {
        let edit = UpdatePlan {
            status: Some(PlanStatus::Cancelled),
            ..Default::default()
        };
        let changes = resolve_changes(&plan(PlanStatus::Planned, None), &edit, &Actor::System, date(2024, 7, 2));
        assert_eq!(changes.actual_date, None);
        assert_eq!(changes.notes, "scheduled");
    }

    #[test]
    fn test_editor_is_stamped() {
        let actor = Actor::User("foreman".to_string());
        let changes = resolve_changes(
            &plan(PlanStatus::Planned, None),
            &UpdatePlan::default(),
            &actor,
            date(2024, 7, 2),
        );
        assert_eq!(changes.updated_by.as_deref(), Some("foreman"));
        assert_eq!(changes.status, PlanStatus::Planned);
    }
}
