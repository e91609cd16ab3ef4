//! Maintenance plan API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::plan::{CreatePlan, MaintenancePlan, PlanQuery, UpdatePlan},
};

use super::AuthenticatedUser;

/// List maintenance plans
#[utoipa::path(
    get,
    path = "/plans",
    tag = "plans",
    security(("bearer_auth" = [])),
    params(PlanQuery),
    responses(
        (status = 200, description = "Plans ordered by planned date", body = Vec<MaintenancePlan>)
    )
)]
pub async fn list_plans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<PlanQuery>,
) -> AppResult<Json<Vec<MaintenancePlan>>> {
    let plans = state.services.plans.list(&query).await?;
    Ok(Json(plans))
}

/// Get a maintenance plan
#[utoipa::path(
    get,
    path = "/plans/{id}",
    tag = "plans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan details", body = MaintenancePlan),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_plan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenancePlan>> {
    let plan = state.services.plans.get_by_id(id).await?;
    Ok(Json(plan))
}

/// Create a maintenance plan
#[utoipa::path(
    post,
    path = "/plans",
    tag = "plans",
    security(("bearer_auth" = [])),
    request_body = CreatePlan,
    responses(
        (status = 201, description = "Plan created", body = MaintenancePlan)
    )
)]
pub async fn create_plan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreatePlan>,
) -> AppResult<(StatusCode, Json<MaintenancePlan>)> {
    let plan = state.services.plans.create(&data, &claims.actor()).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// Record status, actual date and notes
#[utoipa::path(
    put,
    path = "/plans/{id}",
    tag = "plans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Plan ID")),
    request_body = UpdatePlan,
    responses(
        (status = 200, description = "Plan updated", body = MaintenancePlan)
    )
)]
pub async fn update_plan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePlan>,
) -> AppResult<Json<MaintenancePlan>> {
    let plan = state.services.plans.update(id, &data, &claims.actor()).await?;
    Ok(Json(plan))
}

/// Delete a maintenance plan
#[utoipa::path(
    delete,
    path = "/plans/{id}",
    tag = "plans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 204, description = "Plan deleted")
    )
)]
pub async fn delete_plan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.plans.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
