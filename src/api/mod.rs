//! API handlers for the booking widget

pub mod catalog;
pub mod health;
pub mod insights;
pub mod openapi;
pub mod sessions;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    models::experience::ExperienceId,
    AppState,
};

/// Parse an experience identifier from the wire
pub(crate) fn parse_experience(raw: &str) -> AppResult<ExperienceId> {
    raw.parse().map_err(AppError::BadRequest)
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // The widget page may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        // Catalog
        .route("/catalog", get(catalog::get_catalog))
        .route("/quote", get(catalog::get_quote))
        // Insights
        .route("/insights", get(insights::get_insights))
        // Sessions
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/:id",
            get(sessions::get_session).delete(sessions::end_session),
        )
        .route("/sessions/:id/restart", post(sessions::restart_session))
        .route("/sessions/:id/experience", put(sessions::select_experience))
        .route("/sessions/:id/date", put(sessions::set_date))
        .route("/sessions/:id/timeslot", put(sessions::set_timeslot))
        .route("/sessions/:id/visitor-name", put(sessions::set_visitor_name))
        .route("/sessions/:id/counts", post(sessions::adjust_count))
        .route("/sessions/:id/submit", post(sessions::submit))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
