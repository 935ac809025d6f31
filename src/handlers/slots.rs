use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::{parse_date, require_staff, resolve_session};
use crate::errors::AppError;
use crate::models::Slot;
use crate::services::reservation::{self, DaySlot};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: String,
}

// GET /api/slots?date=YYYY-MM-DD
pub async fn list_open(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Slot>>, AppError> {
    let date = parse_date(&query.date)?;

    let db = state.db.lock().unwrap();
    let slots = reservation::list_available_slots(&db, date)?;
    Ok(Json(slots))
}

// GET /api/slots/day?date=YYYY-MM-DD
pub async fn day_view(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<DaySlot>>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;
    let date = parse_date(&query.date)?;

    let db = state.db.lock().unwrap();
    let day = reservation::day_overview(&db, date)?;
    Ok(Json(day))
}

// POST /api/slots/toggle
#[derive(Deserialize)]
pub struct ToggleRequest {
    pub date: String,
    pub time: String,
}

pub async fn toggle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ToggleRequest>,
) -> Result<Json<Slot>, AppError> {
    let session = resolve_session(&state, &headers)?;
    let date = parse_date(&body.date)?;

    let db = state.db.lock().unwrap();
    let slot = reservation::toggle_slot(&db, &session, date, &body.time)?;
    Ok(Json(slot))
}
