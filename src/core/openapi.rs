use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::changelog::{dtos as changelog_dtos, handlers as changelog_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::features::needs::{
    dtos as needs_dtos, handlers as needs_handlers, models as needs_models,
};
use crate::features::points::{
    dtos as points_dtos, handlers as points_handlers, models as points_models,
};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::geo::Coordinate;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::refresh_token,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Collection points
        points_handlers::create_point,
        points_handlers::list_points,
        points_handlers::nearby_points,
        points_handlers::my_points,
        points_handlers::get_point,
        points_handlers::update_point,
        points_handlers::update_point_status,
        points_handlers::delete_point,
        // Supply needs
        needs_handlers::create_need,
        needs_handlers::toggle_need,
        needs_handlers::update_need,
        needs_handlers::delete_need,
        // Incident reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::report_feed,
        // Files
        files_handlers::upload_photo,
        // Changelog (admin)
        changelog_handlers::list_changelog,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Coordinate,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::RefreshTokenRequestDto,
            auth::dtos::LogoutRequestDto,
            auth::dtos::RefreshTokenResponseDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::MeResponseDto>,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::RefreshTokenResponseDto>,
            ApiResponse<String>,
            // Collection points
            points_models::PointStatus,
            points_models::PointResolution,
            points_dtos::CreatePointDto,
            points_dtos::UpdatePointDto,
            points_dtos::UpdatePointStatusDto,
            points_dtos::ContactLinksDto,
            points_dtos::PointResponseDto,
            points_dtos::NearbyPointDto,
            ApiResponse<points_dtos::PointResponseDto>,
            ApiResponse<Vec<points_dtos::PointResponseDto>>,
            ApiResponse<Vec<points_dtos::NearbyPointDto>>,
            // Supply needs
            needs_models::Urgency,
            needs_dtos::CreateNeedDto,
            needs_dtos::UpdateNeedDto,
            needs_dtos::NeedResponseDto,
            ApiResponse<needs_dtos::NeedResponseDto>,
            // Incident reports
            reports_models::ReportType,
            reports_dtos::CreateReportDto,
            reports_dtos::ReportResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Files
            files_dtos::UploadPhotoDto,
            files_dtos::PhotoResponseDto,
            ApiResponse<files_dtos::PhotoResponseDto>,
            // Changelog
            changelog_dtos::ChangeLogResponseDto,
            ApiResponse<Vec<changelog_dtos::ChangeLogResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "points", description = "Donation collection points"),
        (name = "needs", description = "Supply needs of collection points"),
        (name = "reports", description = "Anonymous flooding and landslide reports (public)"),
        (name = "files", description = "Report photo upload (public)"),
        (name = "changelog", description = "Audit trail (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Ajude JF API",
        version = "0.1.0",
        description = "API documentation for Ajude JF",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
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
