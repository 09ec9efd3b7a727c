//! Wildlife fact and travel tip endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    services::{booking::BookingService, facts::Insights},
};

use super::parse_experience;

/// Query parameters for insights
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct InsightsQuery {
    /// ORANGUTAN, SUNBEAR or COMBO
    pub experience: String,
    /// Visit date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

/// Fact (and tip) for the selected experience and date.
///
/// Always answers 200; provider failures resolve to fixed fallback text.
#[utoipa::path(
    get,
    path = "/insights",
    tag = "insights",
    params(InsightsQuery),
    responses(
        (status = 200, description = "Display strings", body = Insights),
        (status = 400, description = "Unknown experience or bad date", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_insights(
    State(state): State<crate::AppState>,
    Query(query): Query<InsightsQuery>,
) -> AppResult<Json<Insights>> {
    let experience = parse_experience(&query.experience)?;
    let date = match query.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", raw)))?,
        None => BookingService::today(),
    };

    Ok(Json(state.services.insights.insights(experience, date).await))
}
