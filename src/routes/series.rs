//! Subtitles, seasons and episodes. All writes are staff catalog
//! maintenance; positions are unique per parent.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use crate::{
    AppState,
    auth::Actor,
    authz,
    entities::{movie, movie_episode, movie_season, subtitle},
    error::{AppError, AppResult, unique_violation},
    models,
    routes::movies::read_file_field,
    storage::FileKind,
};

pub async fn list_subtitles(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<subtitle::Model>>> {
    fetch_movie(&state, id).await?;
    let rows = subtitle::Entity::find()
        .filter(subtitle::Column::MovieId.eq(id))
        .order_by_asc(subtitle::Column::Language)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct SubtitleQuery {
    pub language: String,
}

/// Uploads a subtitle file for a movie; one subtitle per (movie, language).
pub async fn upload_subtitle(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    axum::extract::Query(q): axum::extract::Query<SubtitleQuery>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<subtitle::Model>)> {
    authz::require_staff(&actor)?;
    fetch_movie(&state, id).await?;
    let language = q.language.trim().to_lowercase();
    if language.is_empty() {
        return Err(AppError::validation("language", "language is required"));
    }

    let (filename, bytes) = read_file_field(multipart).await?;
    let reference = state.storage.store(&filename, &bytes, FileKind::Subtitle).await?;

    let created = subtitle::ActiveModel {
        id: Default::default(),
        movie_id: Set(id),
        language: Set(language),
        file_path: Set(reference),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "a subtitle for that language already exists"))?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
pub struct SeasonPayload {
    pub season_number: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_date: String,
}

pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<movie_season::Model>>> {
    fetch_movie(&state, id).await?;
    let rows = movie_season::Entity::find()
        .filter(movie_season::Column::MovieId.eq(id))
        .order_by_asc(movie_season::Column::SeasonNumber)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_season(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<SeasonPayload>,
) -> AppResult<(StatusCode, Json<movie_season::Model>)> {
    authz::require_staff(&actor)?;
    fetch_movie(&state, id).await?;
    if payload.season_number <= 0 {
        return Err(AppError::validation("season_number", "season number must be positive"));
    }
    models::validate_date("release_date", &payload.release_date)?;

    let created = movie_season::ActiveModel {
        id: Default::default(),
        movie_id: Set(id),
        season_number: Set(payload.season_number),
        title: Set(payload.title),
        description: Set(payload.description),
        release_date: Set(payload.release_date),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "that season number already exists for this movie"))?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
pub struct EpisodePayload {
    pub episode_number: i32,
    pub title: String,
    pub description: String,
    pub duration_min: i32,
    pub air_date: String,
}

pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<movie_episode::Model>>> {
    fetch_season(&state, id).await?;
    let rows = movie_episode::Entity::find()
        .filter(movie_episode::Column::SeasonId.eq(id))
        .order_by_asc(movie_episode::Column::EpisodeNumber)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<EpisodePayload>,
) -> AppResult<(StatusCode, Json<movie_episode::Model>)> {
    authz::require_staff(&actor)?;
    fetch_season(&state, id).await?;
    if payload.episode_number <= 0 {
        return Err(AppError::validation("episode_number", "episode number must be positive"));
    }
    if payload.duration_min <= 0 {
        return Err(AppError::validation("duration_min", "duration must be positive"));
    }
    models::validate_date("air_date", &payload.air_date)?;

    let created = movie_episode::ActiveModel {
        id: Default::default(),
        season_id: Set(id),
        episode_number: Set(payload.episode_number),
        title: Set(payload.title),
        description: Set(payload.description),
        duration_min: Set(payload.duration_min),
        video_path: Set(None),
        air_date: Set(payload.air_date),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "that episode number already exists in this season"))?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Uploads the video file for an episode.
pub async fn upload_episode_video(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<movie_episode::Model>> {
    authz::require_staff(&actor)?;
    let found = movie_episode::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("episode"))?;

    let (filename, bytes) = read_file_field(multipart).await?;
    let reference = state.storage.store(&filename, &bytes, FileKind::EpisodeVideo).await?;

    let mut model: movie_episode::ActiveModel = found.into();
    model.video_path = Set(Some(reference));
    Ok(Json(model.update(&state.db).await?))
}

async fn fetch_movie(state: &AppState, id: i32) -> AppResult<movie::Model> {
    movie::Entity::find_by_id(id).one(&state.db).await?.ok_or(AppError::NotFound("movie"))
}

async fn fetch_season(state: &AppState, id: i32) -> AppResult<movie_season::Model> {
    movie_season::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("season"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    fn season(n: i32) -> SeasonPayload {
        SeasonPayload {
            season_number: n,
            title: format!("Season {n}"),
            description: String::new(),
            release_date: "2021-01-01".to_string(),
        }
    }

    fn episode(n: i32) -> EpisodePayload {
        EpisodePayload {
            episode_number: n,
            title: format!("Episode {n}"),
            description: "things happen".to_string(),
            duration_min: 45,
            air_date: "2021-02-01".to_string(),
        }
    }

    #[tokio::test]
    async fn season_numbers_are_unique_per_movie() {
        let state = testutil::state().await;
        let staff = testutil::actor(&state.db, "admin", true).await;
        let m = testutil::movie(&state.db, "Twin Peaks").await;

        create_season(State(state.clone()), staff.clone(), Path(m.id), Json(season(1)))
            .await
            .unwrap();
        let err = create_season(State(state.clone()), staff.clone(), Path(m.id), Json(season(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // the same number on another movie is fine
        let other = testutil::movie(&state.db, "The Wire").await;
        create_season(State(state.clone()), staff, Path(other.id), Json(season(1)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn episode_numbers_are_unique_per_season() {
        let state = testutil::state().await;
        let staff = testutil::actor(&state.db, "admin", true).await;
        let m = testutil::movie(&state.db, "Twin Peaks").await;

        let (_, Json(s1)) =
            create_season(State(state.clone()), staff.clone(), Path(m.id), Json(season(1)))
                .await
                .unwrap();
        let (_, Json(s2)) =
            create_season(State(state.clone()), staff.clone(), Path(m.id), Json(season(2)))
                .await
                .unwrap();

        create_episode(State(state.clone()), staff.clone(), Path(s1.id), Json(episode(1)))
            .await
            .unwrap();
        let err =
            create_episode(State(state.clone()), staff.clone(), Path(s1.id), Json(episode(1)))
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        create_episode(State(state.clone()), staff, Path(s2.id), Json(episode(1)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_staff_cannot_touch_series_data() {
        let state = testutil::state().await;
        let pleb = testutil::actor(&state.db, "pleb", false).await;
        let m = testutil::movie(&state.db, "Twin Peaks").await;

        let err = create_season(State(state.clone()), pleb, Path(m.id), Json(season(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
    }
}
