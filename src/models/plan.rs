//! Maintenance plan model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Plan status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Planned => "planned",
            PlanStatus::InProgress => "in_progress",
            PlanStatus::Completed => "completed",
            PlanStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PlanStatus::Planned => "Planned",
            PlanStatus::InProgress => "In progress",
            PlanStatus::Completed => "Completed",
            PlanStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::str::FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(PlanStatus::Planned),
            "in_progress" => Ok(PlanStatus::InProgress),
            "completed" => Ok(PlanStatus::Completed),
            "cancelled" => Ok(PlanStatus::Cancelled),
            _ => Err(format!("Invalid plan status: {}", s)),
        }
    }
}

// Stored as TEXT
impl sqlx::Type<Postgres> for PlanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for PlanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for PlanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Maintenance plan with equipment and maintenance type details
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenancePlan {
    pub id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub inventory_number: String,
    pub maintenance_type_id: i32,
    pub maintenance_type_name: String,
    pub maintenance_type_code: String,
    pub planned_date: NaiveDate,
    pub actual_date: Option<NaiveDate>,
    pub status: PlanStatus,
    pub notes: String,
    /// Login of the creator (null for generated plans)
    pub created_by: Option<String>,
    /// Login of the last editor
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New plan row as written by the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlan {
    pub equipment_id: i32,
    pub maintenance_type_id: i32,
    pub planned_date: NaiveDate,
    pub created_by: Option<String>,
}

/// Create plan request (manual entry)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlan {
    pub equipment_id: i32,
    pub maintenance_type_id: i32,
    /// Planned date (YYYY-MM-DD)
    pub planned_date: NaiveDate,
    /// Defaults to planned
    pub status: Option<PlanStatus>,
    pub actual_date: Option<NaiveDate>,
    #[validate(length(max = 10000, message = "Notes are too long"))]
    pub notes: Option<String>,
}

/// Edit plan request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePlan {
    pub status: Option<PlanStatus>,
    pub actual_date: Option<NaiveDate>,
    #[validate(length(max = 10000, message = "Notes are too long"))]
    pub notes: Option<String>,
}

/// Query parameters for plan listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PlanQuery {
    pub status: Option<PlanStatus>,
    pub equipment_id: Option<i32>,
    pub maintenance_type_id: Option<i32>,
    /// Planned on or after (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Planned on or before (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    /// Search in equipment name and inventory number
    pub search: Option<String>,
}
