//! Business logic services

pub mod calendar;
pub mod equipment;
pub mod planner;
pub mod plans;
pub mod profile;
pub mod seed;
pub mod standards;

use crate::{config::PlanningConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub equipment: equipment::EquipmentService,
    pub standards: standards::StandardsService,
    pub planner: planner::PlannerService,
    pub plans: plans::PlansService,
    pub calendar: calendar::CalendarService,
    pub profile: profile::ProfileService,
    pub seed: seed::SeedService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, planning: &PlanningConfig) -> Self {
        let planner = planner::PlannerService::new(repository.clone(), planning.default_horizon_months);
        Self {
            equipment: equipment::EquipmentService::new(repository.clone(), planner.clone()),
            standards: standards::StandardsService::new(repository.clone()),
            plans: plans::PlansService::new(repository.clone()),
            calendar: calendar::CalendarService::new(repository.clone()),
            profile: profile::ProfileService::new(repository.clone()),
            seed: seed::SeedService::new(repository.clone()),
            planner,
            repository,
        }
    }
}
