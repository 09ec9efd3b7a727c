//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{catalog, health, insights, sessions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sepilok Booking API",
        version = "0.1.0",
        description = "Booking widget backend for Sepilok wildlife attractions",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Catalog
        catalog::get_catalog,
        catalog::get_quote,
        // Insights
        insights::get_insights,
        // Sessions
        sessions::create_session,
        sessions::get_session,
        sessions::end_session,
        sessions::restart_session,
        sessions::select_experience,
        sessions::set_date,
        sessions::set_timeslot,
        sessions::set_visitor_name,
        sessions::adjust_count,
        sessions::submit,
    ),
    components(
        schemas(
            // Catalog
            catalog::CatalogResponse,
            crate::models::experience::Experience,
            crate::models::experience::ExperienceId,
            crate::models::experience::PriceTable,
            crate::models::experience::VisitorCategory,
            crate::models::booking::QuoteQuery,
            crate::models::booking::QuoteResponse,
            // Insights
            insights::InsightsQuery,
            crate::services::facts::Insights,
            // Sessions
            crate::models::booking::SessionView,
            crate::models::booking::SubmissionPhase,
            crate::models::booking::SelectExperience,
            crate::models::booking::SetDate,
            crate::models::booking::SetTimeslot,
            crate::models::booking::SetVisitorName,
            crate::models::booking::AdjustCount,
            crate::models::booking::SubmissionReceipt,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Experiences, timeslots and quotes"),
        (name = "insights", description = "Wildlife facts and travel tips"),
        (name = "sessions", description = "Booking sessions and submission")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
