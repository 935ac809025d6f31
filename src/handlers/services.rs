use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::{require_staff, resolve_session};
use crate::db::queries;
use crate::errors::AppError;
use crate::models::Service;
use crate::state::AppState;

// GET /api/services
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Service>>, AppError> {
    let db = state.db.lock().unwrap();
    let services = queries::list_services(&db)?;
    Ok(Json(services))
}

#[derive(Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub price: f64,
}

fn validate(body: &ServiceRequest) -> Result<(), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("service name is required".to_string()));
    }
    if !body.price.is_finite() || body.price < 0.0 {
        return Err(AppError::BadRequest("invalid price".to_string()));
    }
    Ok(())
}

// POST /api/services
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;
    validate(&body)?;

    let service = Service {
        id: Uuid::new_v4().to_string(),
        name: body.name.trim().to_string(),
        price: body.price,
    };

    let db = state.db.lock().unwrap();
    queries::insert_service(&db, &service)?;
    Ok(Json(service))
}

// PUT /api/services/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;
    validate(&body)?;

    let db = state.db.lock().unwrap();
    let updated = queries::update_service(&db, &id, body.name.trim(), body.price)?;
    if !updated {
        return Err(AppError::NotFound(format!("service {id}")));
    }

    Ok(Json(Service {
        id,
        name: body.name.trim().to_string(),
        price: body.price,
    }))
}

// DELETE /api/services/:id
pub async fn remove(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;

    let db = state.db.lock().unwrap();
    let removed = queries::delete_service(&db, &id)?;
    if !removed {
        return Err(AppError::NotFound(format!("service {id}")));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}
