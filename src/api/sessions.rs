//! Booking session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::booking::{
        AdjustCount, SelectExperience, SessionView, SetDate, SetTimeslot, SetVisitorName,
        SubmissionReceipt,
    },
};

use super::parse_experience;

/// Start a booking session with default choices
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "sessions",
    responses(
        (status = 201, description = "Session created", body = SessionView)
    )
)]
pub async fn create_session(
    State(state): State<crate::AppState>,
) -> (StatusCode, Json<SessionView>) {
    let view = state.services.booking.create_session().await;
    (StatusCode::CREATED, Json(view))
}

/// Current state and total of a session
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session", body = SessionView),
        (status = 404, description = "Session not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_session(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    Ok(Json(state.services.booking.get_session(id).await?))
}

/// End a session
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 204, description = "Session ended"),
        (status = 404, description = "Session not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn end_session(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.booking.end_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reset every choice to its default
#[utoipa::path(
    post,
    path = "/sessions/{id}/restart",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session reset", body = SessionView),
        (status = 409, description = "Submission in progress", body = crate::error::ErrorResponse)
    )
)]
pub async fn restart_session(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    Ok(Json(state.services.booking.restart(id).await?))
}

/// Select the experience to book
#[utoipa::path(
    put,
    path = "/sessions/{id}/experience",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SelectExperience,
    responses(
        (status = 200, description = "Experience selected", body = SessionView),
        (status = 400, description = "Unknown experience", body = crate::error::ErrorResponse)
    )
)]
pub async fn select_experience(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<SelectExperience>,
) -> AppResult<Json<SessionView>> {
    let experience = parse_experience(&data.experience)?;
    Ok(Json(
        state.services.booking.select_experience(id, experience).await?,
    ))
}

/// Set the visit date
#[utoipa::path(
    put,
    path = "/sessions/{id}/date",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SetDate,
    responses(
        (status = 200, description = "Date set", body = SessionView),
        (status = 400, description = "Date in the past", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_date(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<SetDate>,
) -> AppResult<Json<SessionView>> {
    Ok(Json(state.services.booking.set_date(id, data.date).await?))
}

/// Pick one of the fixed timeslots
#[utoipa::path(
    put,
    path = "/sessions/{id}/timeslot",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SetTimeslot,
    responses(
        (status = 200, description = "Timeslot set", body = SessionView),
        (status = 400, description = "Unknown timeslot", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_timeslot(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<SetTimeslot>,
) -> AppResult<Json<SessionView>> {
    Ok(Json(
        state.services.booking.set_timeslot(id, &data.timeslot).await?,
    ))
}

/// Set the visitor's name
#[utoipa::path(
    put,
    path = "/sessions/{id}/visitor-name",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SetVisitorName,
    responses(
        (status = 200, description = "Name set", body = SessionView)
    )
)]
pub async fn set_visitor_name(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<SetVisitorName>,
) -> AppResult<Json<SessionView>> {
    data.validate()?;
    Ok(Json(
        state
            .services
            .booking
            .set_visitor_name(id, data.visitor_name)
            .await?,
    ))
}

/// Add or remove visitors; counts clamp at their floor instead of failing
#[utoipa::path(
    post,
    path = "/sessions/{id}/counts",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = AdjustCount,
    responses(
        (status = 200, description = "Counts adjusted", body = SessionView)
    )
)]
pub async fn adjust_count(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<AdjustCount>,
) -> AppResult<Json<SessionView>> {
    Ok(Json(
        state
            .services
            .booking
            .adjust_count(id, data.category, data.delta)
            .await?,
    ))
}

/// Submit the booking: log it, then return the messaging handoff link
#[utoipa::path(
    post,
    path = "/sessions/{id}/submit",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Handoff ready", body = SubmissionReceipt),
        (status = 400, description = "Visitor name missing", body = crate::error::ErrorResponse),
        (status = 409, description = "Submission already in progress", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionReceipt>> {
    Ok(Json(state.services.booking.submit(id).await?))
}
