use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use crate::{
    AppState,
    auth::Actor,
    authz,
    entities::{movie, movie_report, movie_report::ReportKind},
    error::{AppError, AppResult},
    models::now_sec,
    pagination::{self, Page, PageQuery},
};

#[derive(Debug, Deserialize)]
pub struct CreateReport {
    pub movie_id: i32,
    pub kind: ReportKind,
    pub description: String,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<movie_report::Model>)> {
    if payload.description.trim().is_empty() {
        return Err(AppError::validation("description", "description is required"));
    }
    movie::Entity::find_by_id(payload.movie_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("movie"))?;

    let created = movie_report::ActiveModel {
        id: Default::default(),
        movie_id: Set(payload.movie_id),
        user_id: Set(actor.id()),
        kind: Set(payload.kind),
        description: Set(payload.description),
        is_resolved: Set(false),
        created_at: Set(now_sec()),
        resolved_at: Set(None),
    }
    .insert(&state.db)
    .await?;

    tracing::info!(report_id = created.id, movie_id = created.movie_id, "movie reported");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Staff see every report; everyone else sees their own.
pub async fn list(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<movie_report::Model>>> {
    let mut select = movie_report::Entity::find();
    if !actor.is_staff() {
        select = select.filter(movie_report::Column::UserId.eq(actor.id()));
    }
    let select = select.order_by_desc(movie_report::Column::CreatedAt);
    Ok(Json(pagination::paginate(&state.db, select, &page, pagination::DEFAULT).await?))
}

/// Marks a report resolved. One-way: a second resolve attempt conflicts.
/// Staff may resolve any report (the moderation path); the reporter may
/// close their own.
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<movie_report::Model>> {
    let found = movie_report::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("report"))?;
    authz::require_owner_or_staff(&actor, found.user_id)?;

    if found.is_resolved {
        return Err(AppError::conflict("report is already resolved"));
    }

    let mut model: movie_report::ActiveModel = found.into();
    model.is_resolved = Set(true);
    model.resolved_at = Set(Some(now_sec()));
    Ok(Json(model.update(&state.db).await?))
}
