//! Watchlist and typed movie-list entries. Both are owner-scoped and
//! deduplicated by unique index: (user, movie) for the watchlist,
//! (user, movie, kind) for the typed lists.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

use crate::{
    AppState,
    activity::{self, ActivityRefs},
    auth::Actor,
    authz,
    entities::{movie, movie_list, movie_list::ListKind, user_activity::ActivityKind, watchlist},
    error::{AppError, AppResult, unique_violation},
    models::now_sec,
    pagination::{self, Page, PageQuery},
};

pub async fn watchlist(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<watchlist::Model>>> {
    let select = watchlist::Entity::find()
        .filter(watchlist::Column::UserId.eq(actor.id()))
        .order_by_desc(watchlist::Column::AddedAt);
    Ok(Json(pagination::paginate(&state.db, select, &page, pagination::DEFAULT).await?))
}

#[derive(Debug, Deserialize)]
pub struct AddWatchlist {
    pub movie_id: i32,
}

pub async fn add_watchlist(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<AddWatchlist>,
) -> AppResult<(StatusCode, Json<watchlist::Model>)> {
    movie::Entity::find_by_id(payload.movie_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("movie"))?;

    let created = watchlist::ActiveModel {
        id: Default::default(),
        user_id: Set(actor.id()),
        movie_id: Set(payload.movie_id),
        added_at: Set(now_sec()),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "movie is already on your watchlist"))?;

    activity::record(
        &state.db,
        actor.id(),
        ActivityKind::WatchlistAdd,
        ActivityRefs::movie(payload.movie_id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn remove_watchlist(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let found = watchlist::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("watchlist entry"))?;
    authz::require_owner(&actor, found.user_id)?;
    found.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub kind: Option<ListKind>,
}

pub async fn movie_lists(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Query(q): Query<ListQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<movie_list::Model>>> {
    let mut select = movie_list::Entity::find().filter(movie_list::Column::UserId.eq(actor.id()));
    if let Some(kind) = q.kind {
        select = select.filter(movie_list::Column::Kind.eq(kind));
    }
    let select = select.order_by_desc(movie_list::Column::AddedAt);
    Ok(Json(pagination::paginate(&state.db, select, &page, pagination::DEFAULT).await?))
}

#[derive(Debug, Deserialize)]
pub struct AddMovieList {
    pub movie_id: i32,
    pub kind: ListKind,
}

pub async fn add_movie_list(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<AddMovieList>,
) -> AppResult<(StatusCode, Json<movie_list::Model>)> {
    movie::Entity::find_by_id(payload.movie_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("movie"))?;

    let created = movie_list::ActiveModel {
        id: Default::default(),
        user_id: Set(actor.id()),
        movie_id: Set(payload.movie_id),
        kind: Set(payload.kind),
        added_at: Set(now_sec()),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "movie is already on that list"))?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn remove_movie_list(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let found = movie_list::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("list entry"))?;
    authz::require_owner(&actor, found.user_id)?;
    found.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[tokio::test]
    async fn watchlist_add_is_unique_per_movie() {
        let state = testutil::state().await;
        let u = testutil::actor(&state.db, "u", false).await;
        let m = testutil::movie(&state.db, "Dune").await;

        let (_, Json(entry)) = add_watchlist(
            State(state.clone()),
            u.clone(),
            Json(AddWatchlist { movie_id: m.id }),
        )
        .await
        .unwrap();
        assert_eq!(entry.user_id, u.id());

        let err = add_watchlist(
            State(state.clone()),
            u.clone(),
            Json(AddWatchlist { movie_id: m.id }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // a different user can still add the same movie
        let v = testutil::actor(&state.db, "v", false).await;
        add_watchlist(State(state.clone()), v, Json(AddWatchlist { movie_id: m.id }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_entries_are_unique_per_kind() {
        let state = testutil::state().await;
        let u = testutil::actor(&state.db, "u", false).await;
        let m = testutil::movie(&state.db, "Fargo").await;

        add_movie_list(
            State(state.clone()),
            u.clone(),
            Json(AddMovieList { movie_id: m.id, kind: ListKind::Watched }),
        )
        .await
        .unwrap();

        // same movie under a different kind is fine
        add_movie_list(
            State(state.clone()),
            u.clone(),
            Json(AddMovieList { movie_id: m.id, kind: ListKind::Favorite }),
        )
        .await
        .unwrap();

        let err = add_movie_list(
            State(state.clone()),
            u.clone(),
            Json(AddMovieList { movie_id: m.id, kind: ListKind::Watched }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn entries_are_owner_scoped() {
        let state = testutil::state().await;
        let u = testutil::actor(&state.db, "u", false).await;
        let v = testutil::actor(&state.db, "v", false).await;
        let m = testutil::movie(&state.db, "Heat").await;

        let (_, Json(entry)) = add_watchlist(
            State(state.clone()),
            u.clone(),
            Json(AddWatchlist { movie_id: m.id }),
        )
        .await
        .unwrap();

        // v sees an empty watchlist and cannot remove u's entry
        let Json(page) =
            watchlist(State(state.clone()), v.clone(), Query(PageQuery::default()))
                .await
                .unwrap();
        assert_eq!(page.count, 0);

        let err =
            remove_watchlist(State(state.clone()), v, Path(entry.id)).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        remove_watchlist(State(state.clone()), u, Path(entry.id)).await.unwrap();
    }
}
