//! Per-user activity summary

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::plan::MaintenancePlan,
    repository::Repository,
};

const RECENT_LIMIT: i64 = 5;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileSummary {
    pub login: String,
    pub plans_created: i64,
    pub plans_updated: i64,
    pub recent_created: Vec<MaintenancePlan>,
    /// Recently edited plans created by someone else
    pub recent_updated: Vec<MaintenancePlan>,
}

#[derive(Clone)]
pub struct ProfileService {
    repository: Repository,
}

impl ProfileService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn summary(&self, login: &str) -> AppResult<ProfileSummary> {
        let counts = self.repository.plans.activity_counts(login).await?;
        let recent_created = self.repository.plans.recent_created_by(login, RECENT_LIMIT).await?;
        let recent_updated = self.repository.plans.recent_updated_by(login, RECENT_LIMIT).await?;

        Ok(ProfileSummary {
            login: login.to_string(),
            plans_created: counts.created,
            plans_updated: counts.updated,
            recent_created,
            recent_updated,
        })
    }
}
