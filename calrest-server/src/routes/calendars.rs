//! Calendar endpoints

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use calrest_core::model::{Calendar, CalendarCreation};
use calrest_core::{Query, Record};

use crate::routes::{AppError, json_body};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendars", get(list_calendars).post(create_calendar))
        .route(
            "/calendars/{id}",
            get(get_calendar).put(update_calendar).delete(remove_calendar),
        )
}

/// GET /calendars - List all calendars
async fn list_calendars(State(state): State<AppState>) -> Json<Vec<Calendar>> {
    Json(state.calendars.find_all(&Query::all()))
}

/// GET /calendars/:id - Get one calendar
async fn get_calendar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Calendar>, AppError> {
    state
        .calendars
        .find_by_id(&id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("Calendar not found"))
}

/// POST /calendars - Create a calendar
async fn create_calendar(
    State(state): State<AppState>,
    payload: Result<Json<CalendarCreation>, JsonRejection>,
) -> Result<(StatusCode, Json<Calendar>), AppError> {
    let input = json_body(payload)?;
    let calendar = state.calendars.create(input)?;

    Ok((StatusCode::CREATED, Json(calendar)))
}

/// PUT /calendars/:id - Replace a calendar
async fn update_calendar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Calendar>, JsonRejection>,
) -> Result<Json<Calendar>, AppError> {
    let calendar = json_body(payload)?;

    if calendar.id != id {
        return Err(AppError::bad_request("calendarId doesn't match calendar._id"));
    }

    state
        .calendars
        .update(calendar)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Calendar not found"))
}

/// DELETE /calendars/:id - Remove a calendar
async fn remove_calendar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .calendars
        .remove_one(&Query::all().with(Calendar::ID_FIELD, id))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| AppError::not_found("Calendar not found"))
}
