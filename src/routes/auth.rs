use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::{self, hash_password, verify_password},
    entities::user,
    error::{AppError, AppResult, unique_violation},
    models::now_sec,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<user::Model>)> {
    let username = req.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::validation("username", "username is required"));
    }
    if req.password.len() < 8 {
        return Err(AppError::validation("password", "password must be at least 8 characters"));
    }

    let created = user::ActiveModel {
        id: Default::default(),
        username: Set(username),
        email: Set(req.email.filter(|e| !e.trim().is_empty())),
        password_hash: Set(hash_password(&req.password)?),
        is_staff: Set(false),
        created_at: Set(now_sec()),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "username already taken"))?;

    tracing::info!(user_id = created.id, username = %created.username, "user registered");

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let found = user::Entity::find()
        .filter(user::Column::Username.eq(req.username.trim()))
        .one(&state.db)
        .await?;

    // same failure for unknown user and wrong password
    let found = found.ok_or(AppError::Unauthorized)?;
    if !verify_password(&found.password_hash, &req.password) {
        return Err(AppError::Unauthorized);
    }

    let token = auth::issue_token(&state.db, found.id).await?;
    Ok(Json(TokenResponse { token }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let token = auth::bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    if auth::resolve_token(&state.db, token).await?.is_none() {
        return Err(AppError::Unauthorized);
    }
    auth::revoke_token(&state.db, token).await?;
    Ok(StatusCode::NO_CONTENT)
}
