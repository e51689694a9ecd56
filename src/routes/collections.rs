use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::Actor,
    authz,
    entities::{collection, collection_movie, movie},
    error::{AppError, AppResult, unique_violation},
    models::now_sec,
    pagination::{self, Page, PageQuery},
};

#[derive(Debug, Serialize)]
pub struct CollectionDetail {
    #[serde(flatten)]
    pub collection: collection::Model,
    pub movies: Vec<movie::Model>,
}

async fn fetch(db: &DatabaseConnection, id: i32) -> AppResult<collection::Model> {
    collection::Entity::find_by_id(id).one(db).await?.ok_or(AppError::NotFound("collection"))
}

/// Lists collections the actor may see: public ones plus their own.
pub async fn list(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<collection::Model>>> {
    let select = collection::Entity::find()
        .filter(
            Condition::any()
                .add(collection::Column::IsPublic.eq(true))
                .add(collection::Column::OwnerId.eq(actor.id())),
        )
        .order_by_desc(collection::Column::CreatedAt);

    Ok(Json(pagination::paginate(&state.db, select, &page, pagination::COLLECTIONS).await?))
}

#[derive(Debug, Deserialize)]
pub struct CollectionPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<CollectionPayload>,
) -> AppResult<(StatusCode, Json<collection::Model>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("name", "name is required"));
    }

    let created = collection::ActiveModel {
        id: Default::default(),
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        owner_id: Set(actor.id()),
        is_public: Set(payload.is_public),
        created_at: Set(now_sec()),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<CollectionDetail>> {
    let found = fetch(&state.db, id).await?;
    authz::require_collection_view(&actor, &found)?;

    let movies = found.find_related(movie::Entity).all(&state.db).await?;
    Ok(Json(CollectionDetail { collection: found, movies }))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<CollectionPayload>,
) -> AppResult<Json<collection::Model>> {
    let found = fetch(&state.db, id).await?;
    authz::require_owner(&actor, found.owner_id)?;
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("name", "name is required"));
    }

    let mut model: collection::ActiveModel = found.into();
    model.name = Set(payload.name.trim().to_string());
    model.description = Set(payload.description);
    model.is_public = Set(payload.is_public);
    Ok(Json(model.update(&state.db).await?))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let found = fetch(&state.db, id).await?;
    authz::require_owner(&actor, found.owner_id)?;
    found.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AddMovie {
    pub movie_id: i32,
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<AddMovie>,
) -> AppResult<StatusCode> {
    let found = fetch(&state.db, id).await?;
    authz::require_owner(&actor, found.owner_id)?;

    movie::Entity::find_by_id(payload.movie_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("movie"))?;

    collection_movie::ActiveModel {
        collection_id: Set(found.id),
        movie_id: Set(payload.movie_id),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "movie is already in this collection"))?;

    Ok(StatusCode::CREATED)
}

pub async fn remove_movie(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path((id, movie_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    let found = fetch(&state.db, id).await?;
    authz::require_owner(&actor, found.owner_id)?;

    let result = collection_movie::Entity::delete_many()
        .filter(collection_movie::Column::CollectionId.eq(found.id))
        .filter(collection_movie::Column::MovieId.eq(movie_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("collection movie"));
    }

    Ok(StatusCode::NO_CONTENT)
}
