//! Read-only snapshots for rendering

use axum::{Json, Router, extract::State, routing::get};
use dragcal_core::{EventTemplate, ScheduledEvent, Staging, View};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/templates", get(list_templates))
        .route("/staging", get(staging))
        .route("/view", get(view))
}

/// GET /events - Placed events, in commit order
async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<ScheduledEvent>>, AppError> {
    Ok(Json(state.session()?.events().to_vec()))
}

/// GET /templates - Draggable templates, in display order
async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventTemplate>>, AppError> {
    Ok(Json(state.session()?.templates().to_vec()))
}

/// GET /staging - Which form is open
async fn staging(State(state): State<AppState>) -> Result<Json<Staging>, AppError> {
    Ok(Json(state.session()?.staging().clone()))
}

/// GET /view - Events, templates and form state together
async fn view(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    Ok(Json(state.session()?.view()))
}
