//! Equipment catalog API endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, EquipmentQuery, EquipmentType, EquipmentTypeInput,
        GeneratePlansRequest, GeneratePlansResponse, UpdateEquipment,
    },
};

use super::AuthenticatedUser;

/// Created equipment with the number of plans generated for it
#[derive(Serialize, ToSchema)]
pub struct CreateEquipmentResponse {
    pub equipment: Equipment,
    pub plans_generated: u64,
}

// ---- Equipment types ----

/// List equipment types
#[utoipa::path(
    get,
    path = "/equipment-types",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment types", body = Vec<EquipmentType>)
    )
)]
pub async fn list_equipment_types(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<EquipmentType>>> {
    let types = state.services.equipment.list_types().await?;
    Ok(Json(types))
}

/// Get an equipment type
#[utoipa::path(
    get,
    path = "/equipment-types/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID")),
    responses(
        (status = 200, description = "Equipment type", body = EquipmentType),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_equipment_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentType>> {
    let equipment_type = state.services.equipment.get_type(id).await?;
    Ok(Json(equipment_type))
}

/// Create an equipment type
#[utoipa::path(
    post,
    path = "/equipment-types",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = EquipmentTypeInput,
    responses(
        (status = 201, description = "Equipment type created", body = EquipmentType)
    )
)]
pub async fn create_equipment_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<EquipmentTypeInput>,
) -> AppResult<(StatusCode, Json<EquipmentType>)> {
    claims.require_admin()?;
    let equipment_type = state.services.equipment.create_type(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment_type)))
}

/// Rename an equipment type
#[utoipa::path(
    put,
    path = "/equipment-types/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID")),
    request_body = EquipmentTypeInput,
    responses(
        (status = 200, description = "Equipment type updated", body = EquipmentType)
    )
)]
pub async fn update_equipment_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<EquipmentTypeInput>,
) -> AppResult<Json<EquipmentType>> {
    claims.require_admin()?;
    let equipment_type = state.services.equipment.update_type(id, &data).await?;
    Ok(Json(equipment_type))
}

/// Delete an equipment type with its equipment, standards and plans
#[utoipa::path(
    delete,
    path = "/equipment-types/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID")),
    responses(
        (status = 204, description = "Equipment type deleted")
    )
)]
pub async fn delete_equipment_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.equipment.delete_type(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Equipment ----

/// List equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list(&query).await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Create equipment and generate its maintenance plans
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = CreateEquipmentResponse),
        (status = 400, description = "Invalid fields")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<CreateEquipmentResponse>)> {
    let (equipment, plans_generated) = state.services.equipment.create(&data, &claims.actor()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateEquipmentResponse { equipment, plans_generated }),
    ))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment)
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Delete equipment and its plans
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Generate missing plans for one piece of equipment
#[utoipa::path(
    post,
    path = "/equipment/{id}/generate-plans",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = GeneratePlansRequest,
    responses(
        (status = 200, description = "Plans generated", body = GeneratePlansResponse),
        (status = 400, description = "Malformed body or horizon out of range")
    )
)]
pub async fn generate_plans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    body: Result<Json<GeneratePlansRequest>, JsonRejection>,
) -> AppResult<Json<GeneratePlansResponse>> {
    let request = request_or_default(body)?;
    request.validate()?;
    let planner = &state.services.planner;
    let horizon_months = request.horizon_months(planner.default_horizon_months());
    let created = planner.generate_for_id(id, horizon_months, &claims.actor()).await?;
    Ok(Json(GeneratePlansResponse {
        equipment_id: id,
        horizon_months,
        created,
    }))
}

/// A request without a JSON body uses the default horizon
fn request_or_default(
    body: Result<Json<GeneratePlansRequest>, JsonRejection>,
) -> AppResult<GeneratePlansRequest> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(GeneratePlansRequest::default()),
        Err(e) => Err(AppError::BadRequest(e.body_text())),
    }
}
