//! Catalog and quote endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    catalog,
    error::AppResult,
    models::{
        booking::{QuoteQuery, QuoteResponse, Timeslot},
        experience::Experience,
    },
};

use super::parse_experience;

#[derive(Serialize, ToSchema)]
pub struct CatalogResponse {
    pub experiences: Vec<Experience>,
    /// Fixed visit timeslots, in display order
    pub timeslots: Vec<String>,
    pub currency: String,
    /// Whether the form asks for the visitor's name
    pub require_visitor_name: bool,
    /// Whether a travel tip accompanies the wildlife fact
    pub travel_tips: bool,
}

/// Experiences, timeslots and form options
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Booking catalog", body = CatalogResponse)
    )
)]
pub async fn get_catalog(State(state): State<crate::AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        experiences: catalog::experiences().to_vec(),
        timeslots: Timeslot::all().map(|slot| slot.to_string()).collect(),
        currency: state.config.booking.currency.clone(),
        require_visitor_name: state.config.booking.require_visitor_name,
        travel_tips: state.config.booking.travel_tips,
    })
}

/// Price a selection without opening a session
#[utoipa::path(
    get,
    path = "/quote",
    tag = "catalog",
    params(QuoteQuery),
    responses(
        (status = 200, description = "Price quote", body = QuoteResponse),
        (status = 400, description = "Unknown experience", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_quote(
    State(state): State<crate::AppState>,
    Query(query): Query<QuoteQuery>,
) -> AppResult<Json<QuoteResponse>> {
    let experience = parse_experience(&query.experience)?;
    let quote = state.services.booking.quote(
        experience,
        query.adults.unwrap_or(1),
        query.children.unwrap_or(0),
    )?;
    Ok(Json(quote))
}
