use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::Subject;
use crate::errors::AppError;
use crate::models::{Item, ItemStatus};
use crate::SharedState;

// ── Request / Response DTOs ──────────────────────────────────

#[derive(Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub status: ItemStatus,
}

#[derive(Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub status: Option<ItemStatus>,
}

// ── Handlers ─────────────────────────────────────────────────

/// GET / — liveness probe for deploy checks.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "online",
        "message": "Backend is up and serving requests.",
        "docs": "/docs",
    }))
}

/// POST /token — exchange the form-encoded credential pair for a signed
/// bearer token.
pub async fn issue_token(
    State(state): State<SharedState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let access_token = state.tokens.issue(&form.username, &form.password)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// GET /api/items — all items, oldest first.
pub async fn list_items(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Item>>, AppError> {
    Ok(Json(state.db.list().await?))
}

/// POST /api/items — create an item; the store assigns the id.
pub async fn create_item(
    State(state): State<SharedState>,
    subject: Option<Extension<Subject>>,
    Json(payload): Json<ItemCreate>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let item = state.db.insert(&payload.name, payload.status).await?;
    match subject {
        Some(Extension(Subject(user))) => {
            tracing::info!(id = item.id, user = %user, "item created")
        }
        None => tracing::info!(id = item.id, "item created"),
    }
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/{id} — partial update; only supplied fields change.
pub async fn update_item(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Json(payload): Json<ItemUpdate>,
) -> Result<Json<Item>, AppError> {
    let updated = state
        .db
        .update(id, payload.name.as_deref(), payload.status)
        .await?;
    updated.map(Json).ok_or(AppError::NotFound)
}

/// DELETE /api/items/{id} — 204 on success, 404 for an unknown id.
pub async fn delete_item(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if state.db.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

/// GET /api/data — legacy dashboard payload kept for the original
/// frontend; same rows as /api/items plus an engine tag.
pub async fn legacy_data(
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let items = state.db.list().await?;
    Ok(Json(json!({
        "items": items,
        "backend_engine": "axum + MySQL",
    })))
}
