//! Current user's activity endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::profile::ProfileSummary};

use super::AuthenticatedUser;

/// Plans created and edited by the current user
#[utoipa::path(
    get,
    path = "/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Activity summary", body = ProfileSummary),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ProfileSummary>> {
    let summary = state.services.profile.summary(&claims.sub).await?;
    Ok(Json(summary))
}
