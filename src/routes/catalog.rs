//! Reference data: genres, countries, people, awards. Reads are open to
//! any authenticated actor; writes are staff-only.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::Actor,
    authz,
    entities::{award, country, genre, movie, movie_award, person},
    entities::person::PersonRole,
    error::{AppError, AppResult},
    models,
};

#[derive(Debug, Deserialize)]
pub struct NamePayload {
    pub name: String,
}

fn require_name(payload: &NamePayload) -> AppResult<&str> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "name is required"));
    }
    Ok(name)
}

// ── genres ───────────────────────────────────────────────────────────

pub async fn list_genres(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
) -> AppResult<Json<Vec<genre::Model>>> {
    Ok(Json(genre::Entity::find().order_by_asc(genre::Column::Name).all(&state.db).await?))
}

pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<NamePayload>,
) -> AppResult<(StatusCode, Json<genre::Model>)> {
    authz::require_staff(&actor)?;
    let name = require_name(&payload)?;
    let created =
        genre::ActiveModel { id: Default::default(), name: Set(name.to_string()) }
            .insert(&state.db)
            .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<NamePayload>,
) -> AppResult<Json<genre::Model>> {
    authz::require_staff(&actor)?;
    let name = require_name(&payload)?;
    let found =
        genre::Entity::find_by_id(id).one(&state.db).await?.ok_or(AppError::NotFound("genre"))?;
    let mut model: genre::ActiveModel = found.into();
    model.name = Set(name.to_string());
    Ok(Json(model.update(&state.db).await?))
}

pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    authz::require_staff(&actor)?;
    let found =
        genre::Entity::find_by_id(id).one(&state.db).await?.ok_or(AppError::NotFound("genre"))?;
    found.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── countries ────────────────────────────────────────────────────────

pub async fn list_countries(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
) -> AppResult<Json<Vec<country::Model>>> {
    Ok(Json(country::Entity::find().order_by_asc(country::Column::Name).all(&state.db).await?))
}

pub async fn create_country(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<NamePayload>,
) -> AppResult<(StatusCode, Json<country::Model>)> {
    authz::require_staff(&actor)?;
    let name = require_name(&payload)?;
    let created =
        country::ActiveModel { id: Default::default(), name: Set(name.to_string()) }
            .insert(&state.db)
            .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_country(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<NamePayload>,
) -> AppResult<Json<country::Model>> {
    authz::require_staff(&actor)?;
    let name = require_name(&payload)?;
    let found = country::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("country"))?;
    let mut model: country::ActiveModel = found.into();
    model.name = Set(name.to_string());
    Ok(Json(model.update(&state.db).await?))
}

pub async fn delete_country(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    authz::require_staff(&actor)?;
    let found = country::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("country"))?;
    found.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── people ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PersonPayload {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    pub birth_date: Option<String>,
    pub role: PersonRole,
}

impl PersonPayload {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("name", "name is required"));
        }
        if let Some(birth_date) = &self.birth_date {
            models::validate_date("birth_date", birth_date)?;
        }
        Ok(())
    }
}

pub async fn list_people(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
) -> AppResult<Json<Vec<person::Model>>> {
    Ok(Json(person::Entity::find().order_by_asc(person::Column::Name).all(&state.db).await?))
}

pub async fn retrieve_person(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<person::Model>> {
    let found = fetch_person(&state.db, id).await?;
    Ok(Json(found))
}

pub async fn create_person(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<PersonPayload>,
) -> AppResult<(StatusCode, Json<person::Model>)> {
    authz::require_staff(&actor)?;
    payload.validate()?;
    let created = person::ActiveModel {
        id: Default::default(),
        name: Set(payload.name.trim().to_string()),
        bio: Set(payload.bio),
        birth_date: Set(payload.birth_date),
        photo_path: Set(None),
        role: Set(payload.role),
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_person(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<PersonPayload>,
) -> AppResult<Json<person::Model>> {
    authz::require_staff(&actor)?;
    payload.validate()?;
    let found = fetch_person(&state.db, id).await?;
    let mut model: person::ActiveModel = found.into();
    model.name = Set(payload.name.trim().to_string());
    model.bio = Set(payload.bio);
    model.birth_date = Set(payload.birth_date);
    model.role = Set(payload.role);
    Ok(Json(model.update(&state.db).await?))
}

pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    authz::require_staff(&actor)?;
    let found = fetch_person(&state.db, id).await?;
    found.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_person_photo(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    multipart: axum::extract::Multipart,
) -> AppResult<Json<person::Model>> {
    authz::require_staff(&actor)?;
    let found = fetch_person(&state.db, id).await?;

    let (filename, bytes) = crate::routes::movies::read_file_field(multipart).await?;
    let reference = state.storage.store(&filename, &bytes, crate::storage::FileKind::Photo).await?;

    let mut model: person::ActiveModel = found.into();
    model.photo_path = Set(Some(reference));
    Ok(Json(model.update(&state.db).await?))
}

async fn fetch_person(db: &DatabaseConnection, id: i32) -> AppResult<person::Model> {
    person::Entity::find_by_id(id).one(db).await?.ok_or(AppError::NotFound("person"))
}

// ── awards ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AwardPayload {
    pub name: String,
    pub organization: String,
    #[serde(default)]
    pub description: String,
}

pub async fn list_awards(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
) -> AppResult<Json<Vec<award::Model>>> {
    Ok(Json(award::Entity::find().order_by_asc(award::Column::Name).all(&state.db).await?))
}

pub async fn create_award(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<AwardPayload>,
) -> AppResult<(StatusCode, Json<award::Model>)> {
    authz::require_staff(&actor)?;
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("name", "name is required"));
    }
    let created = award::ActiveModel {
        id: Default::default(),
        name: Set(payload.name.trim().to_string()),
        organization: Set(payload.organization),
        description: Set(payload.description),
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_award(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<AwardPayload>,
) -> AppResult<Json<award::Model>> {
    authz::require_staff(&actor)?;
    let found =
        award::Entity::find_by_id(id).one(&state.db).await?.ok_or(AppError::NotFound("award"))?;
    let mut model: award::ActiveModel = found.into();
    model.name = Set(payload.name.trim().to_string());
    model.organization = Set(payload.organization);
    model.description = Set(payload.description);
    Ok(Json(model.update(&state.db).await?))
}

pub async fn delete_award(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    authz::require_staff(&actor)?;
    let found =
        award::Entity::find_by_id(id).one(&state.db).await?.ok_or(AppError::NotFound("award"))?;
    found.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AttachAward {
    pub award_id: i32,
    pub year: i32,
    pub category: String,
    #[serde(default)]
    pub winner: bool,
}

#[derive(Debug, Serialize)]
pub struct MovieAwardEntry {
    #[serde(flatten)]
    pub movie_award: movie_award::Model,
    pub award_name: String,
}

pub async fn list_movie_awards(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MovieAwardEntry>>> {
    movie::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("movie"))?;

    let rows = movie_award::Entity::find()
        .filter(movie_award::Column::MovieId.eq(id))
        .find_also_related(award::Entity)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(movie_award, a)| MovieAwardEntry {
                movie_award,
                award_name: a.map(|a| a.name).unwrap_or_default(),
            })
            .collect(),
    ))
}

pub async fn attach_award(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<AttachAward>,
) -> AppResult<(StatusCode, Json<movie_award::Model>)> {
    authz::require_staff(&actor)?;
    movie::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("movie"))?;
    award::Entity::find_by_id(payload.award_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("award"))?;

    let created = movie_award::ActiveModel {
        id: Default::default(),
        movie_id: Set(id),
        award_id: Set(payload.award_id),
        year: Set(payload.year),
        category: Set(payload.category),
        winner: Set(payload.winner),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[tokio::test]
    async fn reference_data_writes_are_staff_only() {
        let state = testutil::state().await;
        let staff = testutil::actor(&state.db, "admin", true).await;
        let pleb = testutil::actor(&state.db, "pleb", false).await;

        let err = create_genre(
            State(state.clone()),
            pleb.clone(),
            Json(NamePayload { name: "Horror".to_string() }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        let (_, Json(created)) = create_genre(
            State(state.clone()),
            staff.clone(),
            Json(NamePayload { name: "Horror".to_string() }),
        )
        .await
        .unwrap();

        // reads are open to everyone authenticated
        let Json(all) = list_genres(State(state.clone()), pleb.clone()).await.unwrap();
        assert_eq!(all.len(), 1);

        let err = delete_genre(State(state.clone()), pleb, Path(created.id)).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
        delete_genre(State(state.clone()), staff, Path(created.id)).await.unwrap();
    }

    #[tokio::test]
    async fn person_birth_date_is_validated() {
        let state = testutil::state().await;
        let staff = testutil::actor(&state.db, "admin", true).await;

        let err = create_person(
            State(state.clone()),
            staff.clone(),
            Json(PersonPayload {
                name: "Akira Kurosawa".to_string(),
                bio: String::new(),
                birth_date: Some("23-03-1910".to_string()),
                role: PersonRole::Director,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "birth_date", .. }));

        create_person(
            State(state.clone()),
            staff,
            Json(PersonPayload {
                name: "Akira Kurosawa".to_string(),
                bio: String::new(),
                birth_date: Some("1910-03-23".to_string()),
                role: PersonRole::Director,
            }),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn awards_attach_to_movies() {
        let state = testutil::state().await;
        let staff = testutil::actor(&state.db, "admin", true).await;
        let m = testutil::movie(&state.db, "Parasite").await;

        let (_, Json(oscar)) = create_award(
            State(state.clone()),
            staff.clone(),
            Json(AwardPayload {
                name: "Academy Award".to_string(),
                organization: "AMPAS".to_string(),
                description: String::new(),
            }),
        )
        .await
        .unwrap();

        attach_award(
            State(state.clone()),
            staff.clone(),
            Path(m.id),
            Json(AttachAward {
                award_id: oscar.id,
                year: 2020,
                category: "Best Picture".to_string(),
                winner: true,
            }),
        )
        .await
        .unwrap();

        let Json(entries) =
            list_movie_awards(State(state.clone()), staff, Path(m.id)).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].award_name, "Academy Award");
        assert!(entries[0].movie_award.winner);
    }
}
