//! Maintenance types and standards API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::maintenance::{
        CreateMaintenanceStandard, CreateMaintenanceType, MaintenanceStandard, MaintenanceType,
        UpdateMaintenanceStandard, UpdateMaintenanceType,
    },
};

use super::AuthenticatedUser;

// ---- Maintenance types ----

/// List maintenance types
#[utoipa::path(
    get,
    path = "/maintenance-types",
    tag = "standards",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Maintenance types", body = Vec<MaintenanceType>)
    )
)]
pub async fn list_maintenance_types(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<MaintenanceType>>> {
    let types = state.services.standards.list_types().await?;
    Ok(Json(types))
}

/// Get a maintenance type
#[utoipa::path(
    get,
    path = "/maintenance-types/{id}",
    tag = "standards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance type ID")),
    responses(
        (status = 200, description = "Maintenance type", body = MaintenanceType)
    )
)]
pub async fn get_maintenance_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceType>> {
    let maintenance_type = state.services.standards.get_type(id).await?;
    Ok(Json(maintenance_type))
}

/// Create a maintenance type
#[utoipa::path(
    post,
    path = "/maintenance-types",
    tag = "standards",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenanceType,
    responses(
        (status = 201, description = "Maintenance type created", body = MaintenanceType),
        (status = 400, description = "Invalid fields or duplicate code")
    )
)]
pub async fn create_maintenance_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMaintenanceType>,
) -> AppResult<(StatusCode, Json<MaintenanceType>)> {
    claims.require_admin()?;
    let maintenance_type = state.services.standards.create_type(&data).await?;
    Ok((StatusCode::CREATED, Json(maintenance_type)))
}

/// Update a maintenance type
#[utoipa::path(
    put,
    path = "/maintenance-types/{id}",
    tag = "standards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance type ID")),
    request_body = UpdateMaintenanceType,
    responses(
        (status = 200, description = "Maintenance type updated", body = MaintenanceType)
    )
)]
pub async fn update_maintenance_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenanceType>,
) -> AppResult<Json<MaintenanceType>> {
    claims.require_admin()?;
    let maintenance_type = state.services.standards.update_type(id, &data).await?;
    Ok(Json(maintenance_type))
}

/// Delete a maintenance type with its standards and plans
#[utoipa::path(
    delete,
    path = "/maintenance-types/{id}",
    tag = "standards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance type ID")),
    responses(
        (status = 204, description = "Maintenance type deleted")
    )
)]
pub async fn delete_maintenance_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.standards.delete_type(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Standards ----

/// List maintenance standards
#[utoipa::path(
    get,
    path = "/standards",
    tag = "standards",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Maintenance standards", body = Vec<MaintenanceStandard>)
    )
)]
pub async fn list_standards(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<MaintenanceStandard>>> {
    let standards = state.services.standards.list().await?;
    Ok(Json(standards))
}

/// Get a maintenance standard
#[utoipa::path(
    get,
    path = "/standards/{id}",
    tag = "standards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Standard ID")),
    responses(
        (status = 200, description = "Maintenance standard", body = MaintenanceStandard)
    )
)]
pub async fn get_standard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceStandard>> {
    let standard = state.services.standards.get_by_id(id).await?;
    Ok(Json(standard))
}

/// Create a maintenance standard
#[utoipa::path(
    post,
    path = "/standards",
    tag = "standards",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenanceStandard,
    responses(
        (status = 201, description = "Standard created", body = MaintenanceStandard),
        (status = 409, description = "A standard already exists for this pair")
    )
)]
pub async fn create_standard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMaintenanceStandard>,
) -> AppResult<(StatusCode, Json<MaintenanceStandard>)> {
    claims.require_admin()?;
    let standard = state.services.standards.create(&data).await?;
    Ok((StatusCode::CREATED, Json(standard)))
}

/// Change a standard's frequency
#[utoipa::path(
    put,
    path = "/standards/{id}",
    tag = "standards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Standard ID")),
    request_body = UpdateMaintenanceStandard,
    responses(
        (status = 200, description = "Standard updated", body = MaintenanceStandard)
    )
)]
pub async fn update_standard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenanceStandard>,
) -> AppResult<Json<MaintenanceStandard>> {
    claims.require_admin()?;
    let standard = state.services.standards.update(id, &data).await?;
    Ok(Json(standard))
}

/// Delete a maintenance standard
#[utoipa::path(
    delete,
    path = "/standards/{id}",
    tag = "standards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Standard ID")),
    responses(
        (status = 204, description = "Standard deleted")
    )
)]
pub async fn delete_standard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.standards.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
