use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers, models as admin_models};
use crate::features::agents::{dtos as agents_dtos, handlers as agents_handlers, models as agents_models};
use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::installations::{
    dtos as installations_dtos, handlers as installations_handlers, models as installations_models,
};
use crate::features::villages::{
    dtos as villages_dtos, handlers as villages_handlers, models as villages_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::get_me,
        // Dashboard
        dashboard_handlers::get_summary,
        dashboard_handlers::get_stats,
        dashboard_handlers::get_agents,
        dashboard_handlers::get_villages,
        // Installations
        installations_handlers::list_installations,
        installations_handlers::get_installation,
        installations_handlers::create_installation,
        installations_handlers::update_installation,
        installations_handlers::confirm_installation,
        installations_handlers::set_commission,
        installations_handlers::delete_installation,
        // Agents
        agents_handlers::list_agents,
        agents_handlers::create_agent,
        agents_handlers::update_agent,
        agents_handlers::delete_agent,
        // Villages
        villages_handlers::list_villages,
        villages_handlers::create_village,
        villages_handlers::update_village,
        villages_handlers::delete_village,
        // Admin
        admin_handlers::list_users,
        admin_handlers::create_user,
        admin_handlers::update_user,
        admin_handlers::delete_user,
        admin_handlers::list_activity_logs,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth::model::Role,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Dashboard
            dashboard_dtos::StatusCountsDto,
            dashboard_dtos::WeeklyBucketDto,
            dashboard_dtos::MonthCountsDto,
            dashboard_dtos::MonthOverMonthDto,
            dashboard_dtos::AgentRollupDto,
            dashboard_dtos::VillageRollupDto,
            dashboard_dtos::CommissionSummaryDto,
            dashboard_dtos::PeriodDto,
            dashboard_dtos::DashboardSummaryDto,
            dashboard_dtos::DashboardStatsDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            ApiResponse<dashboard_dtos::DashboardStatsDto>,
            ApiResponse<Vec<dashboard_dtos::AgentRollupDto>>,
            ApiResponse<Vec<dashboard_dtos::VillageRollupDto>>,
            // Installations
            installations_models::InstallationStatus,
            installations_models::InstallationDetails,
            installations_models::InstallationRecord,
            installations_dtos::CreateInstallationDto,
            installations_dtos::UpdateInstallationDto,
            installations_dtos::ConfirmInstallationDto,
            installations_dtos::CommissionDto,
            ApiResponse<Vec<installations_models::InstallationRecord>>,
            ApiResponse<installations_models::InstallationRecord>,
            // Agents
            agents_models::Agent,
            agents_dtos::AgentRequestDto,
            ApiResponse<Vec<agents_models::Agent>>,
            // Villages
            villages_models::Village,
            villages_dtos::VillageRequestDto,
            ApiResponse<Vec<villages_models::Village>>,
            // Admin
            admin_models::User,
            admin_models::ActivityLogEntry,
            admin_dtos::CreateUserDto,
            admin_dtos::UpdateUserDto,
            ApiResponse<Vec<admin_models::User>>,
            ApiResponse<Vec<admin_models::ActivityLogEntry>>,
        )
    ),
    tags(
        (name = "auth", description = "Login through the record store"),
        (name = "Dashboard", description = "Installation statistics and rollups"),
        (name = "installations", description = "Customer registration and installation lifecycle"),
        (name = "agents", description = "Sales agents (changes are administrator only)"),
        (name = "villages", description = "Villages (changes are administrator only)"),
        (name = "admin", description = "Accounts and activity log (administrator only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Pelanggan API",
        version = "0.1.0",
        description = "Customer installation tracking API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
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

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
