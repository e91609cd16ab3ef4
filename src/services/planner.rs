//! Maintenance plan generation
//!
//! Projects planned maintenance dates from an equipment's installation date
//! and the frequencies of the standards for its type. A month is counted as
//! exactly 30 days; stored dates depend on that, so it must not be replaced
//! with calendar-month arithmetic.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use crate::{
    error::AppResult,
    models::{Actor, Equipment, MaintenanceStandard, NewPlan},
    repository::Repository,
};

/// Horizon used when none is requested (three years)
pub const DEFAULT_HORIZON_MONTHS: i32 = 36;

/// Length of a planning month
pub const DAYS_PER_MONTH: u64 = 30;

/// Number of periods of `frequency_months` that fit in `horizon_months`
pub fn period_count(horizon_months: i32, frequency_months: i32) -> i32 {
    if frequency_months <= 0 || horizon_months <= 0 {
        return 0;
    }
    horizon_months / frequency_months
}

/// Dates `anchor + frequency * 30 * i` days for `i` in `1..=periods`.
///
/// Stops early if a date would overflow the calendar.
pub fn projected_dates(anchor: NaiveDate, frequency_months: i32, periods: i32) -> Vec<NaiveDate> {
    if frequency_months <= 0 || periods <= 0 {
        return Vec::new();
    }
    let step = frequency_months as u64 * DAYS_PER_MONTH;
    (1..=periods as u64)
        .map_while(|i| anchor.checked_add_days(Days::new(step * i)))
        .collect()
}

/// Storage operations the generator needs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Number of plans for an (equipment, maintenance type) pair
    async fn count_for_pair(&self, equipment_id: i32, maintenance_type_id: i32) -> AppResult<i64>;

    /// Latest planned date for a pair, if any plan exists
    async fn latest_planned_date(
        &self,
        equipment_id: i32,
        maintenance_type_id: i32,
    ) -> AppResult<Option<NaiveDate>>;

    /// Whether a plan exists for the exact triple
    async fn plan_exists(
        &self,
        equipment_id: i32,
        maintenance_type_id: i32,
        planned_date: NaiveDate,
    ) -> AppResult<bool>;

    /// Insert a generated plan (status planned, no actual date, empty notes)
    async fn insert_generated(&self, plan: &NewPlan) -> AppResult<()>;
}

/// Create the missing plans for one piece of equipment.
///
/// For each standard with a positive frequency, nothing is done if the pair
/// already has at least `horizon / frequency` plans. Otherwise dates are
/// projected from the latest existing planned date (or the installation
/// date) and inserted when not already present. The existence check is not
/// atomic with the insert: concurrent runs may create duplicates.
///
/// Returns the number of plans created.
pub async fn generate_plans<S>(
    store: &S,
    equipment: &Equipment,
    standards: &[MaintenanceStandard],
    horizon_months: i32,
    actor: &Actor,
) -> AppResult<u64>
where
    S: PlanStore + ?Sized,
{
    let mut created = 0;

    for standard in standards
        .iter()
        .filter(|s| s.equipment_type_id == equipment.equipment_type_id)
    {
        let periods = period_count(horizon_months, standard.frequency_months);
        if periods == 0 {
            continue;
        }

        let mt_id = standard.maintenance_type_id;
        let existing = store.count_for_pair(equipment.id, mt_id).await?;
        if existing >= periods as i64 {
            tracing::debug!(
                "Equipment {} / maintenance type {}: {} plans already, nothing to add",
                equipment.id, mt_id, existing
            );
            continue;
        }

        let anchor = store
            .latest_planned_date(equipment.id, mt_id)
            .await?
            .unwrap_or(equipment.installation_date);

        for planned_date in projected_dates(anchor, standard.frequency_months, periods) {
            if store.plan_exists(equipment.id, mt_id, planned_date).await? {
                continue;
            }
            store
                .insert_generated(&NewPlan {
                    equipment_id: equipment.id,
                    maintenance_type_id: mt_id,
                    planned_date,
                    created_by: actor.login().map(str::to_string),
                })
                .await?;
            created += 1;
        }
    }

    if created > 0 {
        tracing::info!("{}: created {} plans", equipment.name, created);
    }

    Ok(created)
}

/// Plan generation against the database
#[derive(Clone)]
pub struct PlannerService {
    repository: Repository,
    default_horizon_months: i32,
}

impl PlannerService {
    pub fn new(repository: Repository, default_horizon_months: i32) -> Self {
        Self { repository, default_horizon_months }
    }

    pub fn default_horizon_months(&self) -> i32 {
        self.default_horizon_months
    }

    /// Generate plans for one piece of equipment
    pub async fn generate_for(&self, equipment: &Equipment, horizon_months: i32, actor: &Actor) -> AppResult<u64> {
        let standards = self
            .repository
            .standards
            .list_for_equipment_type(equipment.equipment_type_id)
            .await?;
        generate_plans(&self.repository.plans, equipment, &standards, horizon_months, actor).await
    }

    /// Generate plans for one piece of equipment by ID
    pub async fn generate_for_id(&self, equipment_id: i32, horizon_months: i32, actor: &Actor) -> AppResult<u64> {
        let equipment = self.repository.equipment.get_by_id(equipment_id).await?;
        self.generate_for(&equipment, horizon_months, actor).await
    }

    /// Generate plans for all equipment
    pub async fn generate_all(&self, horizon_months: i32, actor: &Actor) -> AppResult<u64> {
        let mut total = 0;
        for equipment in self.repository.equipment.list_all().await? {
            total += self.generate_for(&equipment, horizon_months, actor).await?;
        }
        tracing::info!("Plan generation ({} months): {} new plans", horizon_months, total);
        Ok(total)
    }
}
