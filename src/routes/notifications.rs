use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use crate::{
    AppState,
    auth::Actor,
    authz,
    entities::notification,
    error::{AppError, AppResult},
    pagination::{self, Page, PageQuery},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NotificationQuery {
    pub unread: Option<bool>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Query(q): Query<NotificationQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<notification::Model>>> {
    let mut select =
        notification::Entity::find().filter(notification::Column::UserId.eq(actor.id()));
    if let Some(unread) = q.unread {
        select = select.filter(notification::Column::IsRead.eq(!unread));
    }
    let select = select.order_by_desc(notification::Column::CreatedAt);
    Ok(Json(pagination::paginate(&state.db, select, &page, pagination::DEFAULT).await?))
}

/// Flips a notification to read. One-way: marking an already-read
/// notification again conflicts, like every other one-way transition.
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<notification::Model>> {
    let found = notification::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("notification"))?;
    authz::require_owner(&actor, found.user_id)?;

    if found.is_read {
        return Err(AppError::conflict("notification is already read"));
    }

    let mut model: notification::ActiveModel = found.into();
    model.is_read = Set(true);
    Ok(Json(model.update(&state.db).await?))
}
