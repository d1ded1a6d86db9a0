//! Calendar event endpoints, nested under a calendar

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Request, State, rejection::JsonRejection},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
};

use calrest_core::model::{CalendarEvent, CalendarEventCreation};

use crate::routes::{AppError, json_body};
use crate::state::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/calendars/{calendar_id}/events",
            get(list_events).post(create_event),
        )
        .route(
            "/calendars/{calendar_id}/events/{id}",
            get(get_event).put(update_event).delete(remove_event),
        )
        .route_layer(middleware::from_fn_with_state(state, require_calendar))
}

/// Reject any event request whose calendar doesn't exist.
async fn require_calendar(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let exists = params
        .get("calendar_id")
        .is_some_and(|id| state.calendars.find_by_id(id).is_some());

    if !exists {
        return Err(AppError::not_found("Calendar not found"));
    }

    Ok(next.run(request).await)
}

/// GET /calendars/:calendar_id/events - List events of a calendar
async fn list_events(
    State(state): State<AppState>,
    Path(calendar_id): Path<String>,
) -> Json<Vec<CalendarEvent>> {
    Json(state.events.find_all(&CalendarEvent::of_calendar(&calendar_id)))
}

/// GET /calendars/:calendar_id/events/:id - Get one event
async fn get_event(
    State(state): State<AppState>,
    Path((calendar_id, id)): Path<(String, String)>,
) -> Result<Json<CalendarEvent>, AppError> {
    state
        .events
        .find_one(&CalendarEvent::in_calendar(&calendar_id, &id))
        .map(Json)
        .ok_or_else(|| AppError::not_found("CalendarEvent not found"))
}

/// POST /calendars/:calendar_id/events - Create an event in a calendar
async fn create_event(
    State(state): State<AppState>,
    Path(calendar_id): Path<String>,
    payload: Result<Json<CalendarEventCreation>, JsonRejection>,
) -> Result<(StatusCode, Json<CalendarEvent>), AppError> {
    let input = json_body(payload)?;
    let event = state.events.create(input.in_calendar(calendar_id))?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /calendars/:calendar_id/events/:id - Replace an event
async fn update_event(
    State(state): State<AppState>,
    Path((calendar_id, id)): Path<(String, String)>,
    payload: Result<Json<CalendarEvent>, JsonRejection>,
) -> Result<Json<CalendarEvent>, AppError> {
    let event = json_body(payload)?;

    if event.calendar_id != calendar_id {
        return Err(AppError::bad_request(
            "calendarId doesn't match event.calendarId",
        ));
    }
    if event.id != id {
        return Err(AppError::bad_request("id doesn't match event._id"));
    }

    // Events of other calendars are invisible under this path.
    state
        .events
        .update_where(&CalendarEvent::of_calendar(&calendar_id), event)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("CalendarEvent not found"))
}

/// DELETE /calendars/:calendar_id/events/:id - Remove an event
async fn remove_event(
    State(state): State<AppState>,
    Path((calendar_id, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state
        .events
        .remove_one(&CalendarEvent::in_calendar(&calendar_id, &id))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| AppError::not_found("CalendarEvent not found"))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use calrest_core::Query;
    use serde_json::json;

    use crate::routes::test_support::{HOME, WORK, send, test_app};

    #[tokio::test]
    async fn test_list_events_of_calendar() {
        let (app, _) = test_app();
        let (status, body) =
            send(&app, Method::GET, &format!("/rest/calendars/{WORK}/events"), None).await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Standup", "Review"]);
    }

    #[tokio::test]
    async fn test_unknown_calendar_is_rejected_by_guard() {
        let (app, _) = test_app();

        for (method, uri) in [
            (Method::GET, "/rest/calendars/ghost/events"),
            (Method::GET, "/rest/calendars/ghost/events/evt-1"),
            (Method::DELETE, "/rest/calendars/ghost/events/evt-1"),
        ] {
            let (status, body) = send(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(body["message"], "Calendar not found", "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_guard_runs_before_body_validation() {
        let (app, _) = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/rest/calendars/ghost/events",
            Some(json!({"name": "No dates"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Calendar not found");
    }

    #[tokio::test]
    async fn test_get_event() {
        let (app, _) = test_app();
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/rest/calendars/{WORK}/events/evt-2"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["_id"], "evt-2");
        assert_eq!(body["calendarId"], WORK);
        assert_eq!(body["startDate"], "2025-03-20T15:00:00Z");
        assert_eq!(body["tasks"], json!([{"name": "Prepare", "percent": 20}]));
    }

    #[tokio::test]
    async fn test_event_of_other_calendar_is_404() {
        let (app, _) = test_app();
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/rest/calendars/{HOME}/events/evt-1"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "CalendarEvent not found");
    }

    #[tokio::test]
    async fn test_create_event_takes_calendar_from_path() {
        let (app, state) = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/rest/calendars/{HOME}/events"),
            Some(json!({
                "name": "Groceries",
                "startDate": "2025-04-01T10:00:00Z",
                "endDate": "2025-04-01T11:00:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["calendarId"], HOME);
        assert_eq!(body["tasks"], json!([]));

        let id = body["_id"].as_str().unwrap();
        let stored = state.events.find_by_id(id).unwrap();
        assert_eq!(stored.name, "Groceries");
        assert_eq!(stored.calendar_id, HOME);
    }

    #[tokio::test]
    async fn test_create_event_with_bad_date_is_400() {
        let (app, state) = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/rest/calendars/{HOME}/events"),
            Some(json!({
                "name": "Groceries",
                "startDate": "tomorrow",
                "endDate": "2025-04-01T11:00:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["name"], "VALIDATION_ERROR");
        assert!(
            body["errors"][0]["message"].as_str().unwrap().contains("startDate"),
            "Issue should name the bad field: {}",
            body
        );
        assert_eq!(state.events.len(), 3);
    }

    #[tokio::test]
    async fn test_task_percent_over_100_is_400() {
        let (app, state) = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/rest/calendars/{HOME}/events"),
            Some(json!({
                "name": "Groceries",
                "startDate": "2025-04-01T10:00:00Z",
                "endDate": "2025-04-01T11:00:00Z",
                "tasks": [{"name": "List", "percent": 150}]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["name"], "VALIDATION_ERROR");
        assert!(
            body["errors"][0]["message"].as_str().unwrap().contains("tasks[0].percent"),
            "Issue should carry the field path: {}",
            body
        );
        assert_eq!(state.events.len(), 3);
    }

    #[tokio::test]
    async fn test_update_event() {
        let (app, state) = test_app();
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/rest/calendars/{WORK}/events/evt-1"),
            Some(json!({
                "_id": "evt-1",
                "calendarId": WORK,
                "name": "Standup (moved)",
                "startDate": "2025-03-21T09:00:00Z",
                "endDate": "2025-03-21T09:15:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Standup (moved)");
        assert_eq!(
            body["tasks"],
            json!([]),
            "Update replaces the whole record, tasks are not merged"
        );

        let ids: Vec<String> = state
            .events
            .find_all(&Query::all())
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["evt-1", "evt-2", "evt-3"]);
    }

    #[tokio::test]
    async fn test_update_event_calendar_mismatch_is_400() {
        let (app, _) = test_app();
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/rest/calendars/{WORK}/events/evt-1"),
            Some(json!({
                "_id": "evt-1",
                "calendarId": HOME,
                "name": "Standup",
                "startDate": "2025-03-21T09:00:00Z",
                "endDate": "2025-03-21T09:15:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "calendarId doesn't match event.calendarId");
    }

    #[tokio::test]
    async fn test_update_event_id_mismatch_is_400() {
        let (app, _) = test_app();
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/rest/calendars/{WORK}/events/evt-1"),
            Some(json!({
                "_id": "evt-2",
                "calendarId": WORK,
                "name": "Standup",
                "startDate": "2025-03-21T09:00:00Z",
                "endDate": "2025-03-21T09:15:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "id doesn't match event._id");
    }

    #[tokio::test]
    async fn test_update_event_of_other_calendar_is_404() {
        let (app, state) = test_app();
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/rest/calendars/{HOME}/events/evt-1"),
            Some(json!({
                "_id": "evt-1",
                "calendarId": HOME,
                "name": "Hijacked",
                "startDate": "2025-03-21T09:00:00Z",
                "endDate": "2025-03-21T09:15:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(state.events.find_by_id("evt-1").unwrap().calendar_id, WORK);
    }

    #[tokio::test]
    async fn test_remove_event() {
        let (app, state) = test_app();
        let uri = format!("/rest/calendars/{WORK}/events/evt-1");

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.events.len(), 2);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "CalendarEvent not found");
    }

    #[tokio::test]
    async fn test_remove_event_of_other_calendar_is_404() {
        let (app, state) = test_app();
        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/rest/calendars/{HOME}/events/evt-1"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(state.events.len(), 3);
    }

    #[tokio::test]
    async fn test_removing_calendar_keeps_its_events() {
        let (app, state) = test_app();
        let (status, _) =
            send(&app, Method::DELETE, &format!("/rest/calendars/{WORK}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert_eq!(state.events.len(), 3);
        let (status, _) =
            send(&app, Method::GET, &format!("/rest/calendars/{WORK}/events"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "Guard hides orphaned events");
    }
}
