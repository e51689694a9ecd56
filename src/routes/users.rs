//! Follows and the actor's own activity feed. The feed is append-only:
//! list is the only operation it exposes.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    AppState,
    activity::{self, ActivityRefs},
    auth::Actor,
    entities::{user, user_activity, user_activity::ActivityKind, user_follow},
    error::{AppError, AppResult, unique_violation},
    models::now_sec,
    pagination::{self, Page, PageQuery},
};

pub async fn activity(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<user_activity::Model>>> {
    let select = user_activity::Entity::find()
        .filter(user_activity::Column::UserId.eq(actor.id()))
        .order_by_desc(user_activity::Column::CreatedAt);
    Ok(Json(pagination::paginate(&state.db, select, &page, pagination::DEFAULT).await?))
}

pub async fn follow(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if id == actor.id() {
        return Err(AppError::validation("user", "you cannot follow yourself"));
    }
    let target =
        user::Entity::find_by_id(id).one(&state.db).await?.ok_or(AppError::NotFound("user"))?;

    user_follow::ActiveModel {
        id: Default::default(),
        follower_id: Set(actor.id()),
        followee_id: Set(target.id),
        created_at: Set(now_sec()),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "you already follow this user"))?;

    activity::record(&state.db, actor.id(), ActivityKind::UserFollowed, ActivityRefs::user(target.id))
        .await;
    activity::notify(
        &state.db,
        target.id,
        "New follower",
        &format!("{} started following you", actor.user.username),
    )
    .await;

    Ok(StatusCode::CREATED)
}

pub async fn unfollow(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let result = user_follow::Entity::delete_many()
        .filter(user_follow::Column::FollowerId.eq(actor.id()))
        .filter(user_follow::Column::FolloweeId.eq(id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("follow"));
    }
    Ok(StatusCode::NO_CONTENT)
}
