//! Widget and form callbacks
//!
//! Every mutating endpoint answers with the full view so the widget can
//! re-render from a single response.

use axum::{
    Json, Router,
    extract::State,
    routing::{post, put},
};
use dragcal_core::View;
use dragcal_core::payload::{RawDrop, RawEventClick, RawSlotClick};
use serde::Deserialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drop", post(drop_template))
        .route("/slot-click", post(slot_click))
        .route("/event-click", post(event_click))
        .route("/draft/title", put(set_title))
        .route("/draft/submit", post(submit))
        .route("/deletion/confirm", post(confirm_deletion))
        .route("/deletion/cancel", post(cancel_deletion))
        .route("/close", post(close))
}

/// POST /drop - A template was dropped on a slot
async fn drop_template(
    State(state): State<AppState>,
    Json(raw): Json<RawDrop>,
) -> Result<Json<View>, AppError> {
    let mut session = state.session()?;
    session.on_drop(raw.try_into()?)?;
    Ok(Json(session.view()))
}

/// POST /slot-click - Open the creation form for a slot
async fn slot_click(
    State(state): State<AppState>,
    Json(raw): Json<RawSlotClick>,
) -> Result<Json<View>, AppError> {
    let mut session = state.session()?;
    session.on_slot_click(raw.try_into()?)?;
    Ok(Json(session.view()))
}

/// POST /event-click - Stage a placed event for deletion
async fn event_click(
    State(state): State<AppState>,
    Json(raw): Json<RawEventClick>,
) -> Result<Json<View>, AppError> {
    let mut session = state.session()?;
    session.on_event_click(raw.into())?;
    Ok(Json(session.view()))
}

/// Request body for the form's title field
#[derive(Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

/// PUT /draft/title - The form's title field changed
async fn set_title(
    State(state): State<AppState>,
    Json(req): Json<TitleRequest>,
) -> Result<Json<View>, AppError> {
    let mut session = state.session()?;
    session.set_title(&req.title)?;
    Ok(Json(session.view()))
}

/// POST /draft/submit - Place the event from the form
async fn submit(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    let mut session = state.session()?;
    session.submit()?;
    Ok(Json(session.view()))
}

/// POST /deletion/confirm - Delete the staged event
async fn confirm_deletion(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    let mut session = state.session()?;
    session.confirm_deletion()?;
    Ok(Json(session.view()))
}

/// POST /deletion/cancel - Keep the staged event
async fn cancel_deletion(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    let mut session = state.session()?;
    session.cancel_deletion()?;
    Ok(Json(session.view()))
}

/// POST /close - Close any open form
async fn close(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    let mut session = state.session()?;
    session.close();
    Ok(Json(session.view()))
}
