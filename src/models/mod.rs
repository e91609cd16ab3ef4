//! Data models

pub mod equipment;
pub mod maintenance;
pub mod plan;
pub mod user;

// Re-export commonly used types
pub use equipment::{Equipment, EquipmentType};
pub use maintenance::{MaintenanceStandard, MaintenanceType};
pub use plan::{MaintenancePlan, NewPlan, PlanStatus};
pub use user::{Actor, UserClaims};
