use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::{require_staff, resolve_session};
use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Role, Session, UserProfile};
use crate::state::AppState;

const KNOWN_ROLES: [&str; 9] = [
    "customer",
    "user",
    "premium",
    "vip",
    "staff",
    "barberyass",
    "admin",
    "superadmin",
    "god",
];

/// Superadmin accounts can only be touched by another superadmin.
fn guard_superadmin_target(session: &Session, target: &UserProfile) -> Result<(), AppError> {
    if target.role == Role::SuperAdmin && session.user.role != Role::SuperAdmin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

// GET /api/admin/users
pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;

    let db = state.db.lock().unwrap();
    let users = queries::list_users(&db)?;
    Ok(Json(users))
}

// POST /api/admin/users
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Option<String>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;

    if body.name.trim().is_empty() || body.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and email are required".to_string(),
        ));
    }

    let role = match body.role.as_deref() {
        None => Role::Customer,
        Some(r) => parse_role(&session, r)?,
    };

    let email = body.email.trim().to_lowercase();
    let user = UserProfile {
        id: Uuid::new_v4().to_string(),
        name: body.name.trim().to_string(),
        email: email.clone(),
        phone: body.phone.trim().to_string(),
        role,
        requires_deposit: false,
    };

    let db = state.db.lock().unwrap();
    if queries::get_user_by_email(&db, &email)?.is_some() {
        return Err(AppError::BadRequest("email already registered".to_string()));
    }
    queries::insert_user(&db, &user)?;
    Ok(Json(user))
}

// POST /api/admin/users/:id/role
#[derive(Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

pub async fn set_role(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<SetRoleRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;

    let role = parse_role(&session, &body.role)?;

    let db = state.db.lock().unwrap();
    let mut target =
        queries::get_user(&db, &id)?.ok_or_else(|| AppError::NotFound(format!("user {id}")))?;
    guard_superadmin_target(&session, &target)?;

    queries::set_user_role(&db, &id, role)?;
    target.role = role;
    Ok(Json(target))
}

// POST /api/admin/users/:id/deposit
pub async fn toggle_deposit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;

    let db = state.db.lock().unwrap();
    let mut target =
        queries::get_user(&db, &id)?.ok_or_else(|| AppError::NotFound(format!("user {id}")))?;
    guard_superadmin_target(&session, &target)?;

    target.requires_deposit = !target.requires_deposit;
    queries::set_requires_deposit(&db, &id, target.requires_deposit)?;
    Ok(Json(target))
}

// DELETE /api/admin/users/:id
pub async fn remove(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = resolve_session(&state, &headers)?;
    require_staff(&session)?;

    let db = state.db.lock().unwrap();
    let target =
        queries::get_user(&db, &id)?.ok_or_else(|| AppError::NotFound(format!("user {id}")))?;
    guard_superadmin_target(&session, &target)?;

    queries::delete_user(&db, &id)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

fn parse_role(session: &Session, raw: &str) -> Result<Role, AppError> {
    if !KNOWN_ROLES.contains(&raw) {
        return Err(AppError::BadRequest(format!("unknown role: {raw}")));
    }
    let role = Role::parse(raw);
    // Only a superadmin may mint another superadmin.
    if role == Role::SuperAdmin && session.user.role != Role::SuperAdmin {
        return Err(AppError::Forbidden);
    }
    Ok(role)
}
