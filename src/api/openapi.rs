//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{calendar, equipment, health, plans, profile, standards};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Maintenance Planning API",
        version = "0.1.0",
        description = "Equipment catalog, maintenance standards and planned maintenance REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment_types,
        equipment::get_equipment_type,
        equipment::create_equipment_type,
        equipment::update_equipment_type,
        equipment::delete_equipment_type,
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::generate_plans,
        // Standards
        standards::list_maintenance_types,
        standards::get_maintenance_type,
        standards::create_maintenance_type,
        standards::update_maintenance_type,
        standards::delete_maintenance_type,
        standards::list_standards,
        standards::get_standard,
        standards::create_standard,
        standards::update_standard,
        standards::delete_standard,
        // Plans
        plans::list_plans,
        plans::get_plan,
        plans::create_plan,
        plans::update_plan,
        plans::delete_plan,
        // Calendar
        calendar::calendar_events,
        // Profile
        profile::get_profile,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::EquipmentType,
            crate::models::equipment::EquipmentTypeInput,
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::GeneratePlansRequest,
            crate::models::equipment::GeneratePlansResponse,
            equipment::CreateEquipmentResponse,
            // Standards
            crate::models::maintenance::MaintenanceType,
            crate::models::maintenance::CreateMaintenanceType,
            crate::models::maintenance::UpdateMaintenanceType,
            crate::models::maintenance::MaintenanceStandard,
            crate::models::maintenance::CreateMaintenanceStandard,
            crate::models::maintenance::UpdateMaintenanceStandard,
            // Plans
            crate::models::plan::PlanStatus,
            crate::models::plan::MaintenancePlan,
            crate::models::plan::CreatePlan,
            crate::models::plan::UpdatePlan,
            // Calendar
            crate::services::calendar::CalendarEvent,
            crate::services::calendar::CalendarEventProps,
            // Profile
            crate::services::profile::ProfileSummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment catalog"),
        (name = "standards", description = "Maintenance types and standards"),
        (name = "plans", description = "Planned maintenance"),
        (name = "calendar", description = "Calendar projection of plans"),
        (name = "profile", description = "Current user's activity")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
