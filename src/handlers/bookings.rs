use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::{require_staff, resolve_session};
use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::reservation::{self, ReserveRequest};
use crate::state::AppState;

// POST /api/bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub slot_id: String,
    pub service_id: String,
    pub payment_method: Option<String>,
    pub comment: Option<String>,
    pub reference: Option<String>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let session = resolve_session(&state, &headers)?;
    let customer = session.user.clone();

    let req = ReserveRequest {
        slot_id: body.slot_id,
        service_id: body.service_id,
        payment_method: body.payment_method,
        comment: body.comment,
        reference: body.reference,
        deposit_paid: false,
    };

    let outcome = {
        let mut db = state.db.lock().unwrap();
        reservation::reserve(
            &mut db,
            &session,
            &customer,
            &req,
            &state.config.staff_whatsapp,
        )?
    };

    // Advisory handoff; the reservation stands either way.
    if let Err(e) = state.notifier.notify(&outcome.summary).await {
        tracing::warn!(error = %e, "booking notification failed");
    }

    Ok(Json(outcome.booking))
}

// POST /api/admin/bookings
#[derive(Deserialize)]
pub struct ManualBookingRequest {
    pub customer_email: String,
    pub slot_id: String,
    pub service_id: String,
    pub payment_method: Option<String>,
    pub comment: Option<String>,
    pub reference: Option<String>,
    #[serde(default)]
    pub deposit_paid: bool,
}

pub async fn create_manual(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ManualBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;

    let req = ReserveRequest {
        slot_id: body.slot_id,
        service_id: body.service_id,
        payment_method: body.payment_method,
        comment: body.comment,
        reference: body.reference,
        deposit_paid: body.deposit_paid,
    };

    let outcome = {
        let mut db = state.db.lock().unwrap();
        let customer = queries::get_user_by_email(&db, &body.customer_email)?
            .ok_or_else(|| AppError::NotFound(format!("customer {}", body.customer_email)))?;
        reservation::reserve(
            &mut db,
            &session,
            &customer,
            &req,
            &state.config.staff_whatsapp,
        )?
    };

    if let Err(e) = state.notifier.notify(&outcome.summary).await {
        tracing::warn!(error = %e, "booking notification failed");
    }

    Ok(Json(outcome.booking))
}

// GET /api/bookings/mine
pub async fn mine(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    let session = resolve_session(&state, &headers)?;

    let db = state.db.lock().unwrap();
    let bookings = queries::get_bookings_for_email(&db, &session.user.email)?;
    Ok(Json(bookings))
}

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn list_all(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;

    let status_filter = query.status.as_deref().map(BookingStatus::parse);
    let limit = query.limit.unwrap_or(50);

    let db = state.db.lock().unwrap();
    let bookings = queries::get_all_bookings(&db, status_filter, limit)?;
    Ok(Json(bookings))
}

// POST /api/admin/bookings/:id/cancel
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let session = resolve_session(&state, &headers)?;

    let mut db = state.db.lock().unwrap();
    let booking =
        reservation::cancel_booking(&mut db, &session, &id, state.config.reopen_on_cancel)?;
    Ok(Json(booking))
}

// POST /api/admin/bookings/:id/complete
pub async fn complete(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let session = resolve_session(&state, &headers)?;

    let db = state.db.lock().unwrap();
    let booking = reservation::complete_booking(&db, &session, &id)?;
    Ok(Json(booking))
}
