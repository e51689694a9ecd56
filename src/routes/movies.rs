use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::Actor,
    authz,
    entities::{country, genre, movie, movie_country, movie_credit, movie_genre, person},
    entities::person::PersonRole,
    error::{AppError, AppResult, unique_violation},
    filters::{self, MovieFilter},
    models::{self, now_sec},
    notify,
    pagination::{self, Page, PageQuery},
    storage::FileKind,
};

#[derive(Debug, Deserialize)]
pub struct MoviePayload {
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    pub description: String,
    pub release_date: String,
    pub duration_min: i32,
    pub language: String,
    #[serde(default = "default_age_rating")]
    pub age_rating: String,
    pub budget: Option<f64>,
    pub box_office: Option<f64>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub genres: Vec<i32>,
    #[serde(default)]
    pub countries: Vec<i32>,
}

fn default_age_rating() -> String {
    "PG".to_string()
}

impl MoviePayload {
    fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("title", "title is required"));
        }
        models::validate_date("release_date", &self.release_date)?;
        if self.duration_min <= 0 {
            return Err(AppError::validation("duration_min", "duration must be positive"));
        }
        models::validate_language(&self.language)?;
        models::validate_age_rating(&self.age_rating)?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CreditEntry {
    #[serde(flatten)]
    pub credit: movie_credit::Model,
    pub person_name: String,
}

#[derive(Debug, Serialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: movie::Model,
    pub genres: Vec<genre::Model>,
    pub countries: Vec<country::Model>,
    pub credits: Vec<CreditEntry>,
}

async fn detail(db: &DatabaseConnection, m: movie::Model) -> AppResult<MovieDetail> {
    let genres = m.find_related(genre::Entity).all(db).await?;
    let countries = m.find_related(country::Entity).all(db).await?;
    let credits = movie_credit::Entity::find()
        .filter(movie_credit::Column::MovieId.eq(m.id))
        .find_also_related(person::Entity)
        .all(db)
        .await?
        .into_iter()
        .map(|(credit, p)| CreditEntry {
            credit,
            person_name: p.map(|p| p.name).unwrap_or_default(),
        })
        .collect();

    Ok(MovieDetail { movie: m, genres, countries, credits })
}

async fn fetch(db: &DatabaseConnection, id: i32) -> AppResult<movie::Model> {
    movie::Entity::find_by_id(id).one(db).await?.ok_or(AppError::NotFound("movie"))
}

/// Replaces the genre and country link sets for a movie, verifying every
/// referenced id exists.
async fn set_links<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    genres: &[i32],
    countries: &[i32],
) -> AppResult<()> {
    movie_genre::Entity::delete_many()
        .filter(movie_genre::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;
    movie_country::Entity::delete_many()
        .filter(movie_country::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;

    for genre_id in genres {
        if genre::Entity::find_by_id(*genre_id).one(conn).await?.is_none() {
            return Err(AppError::validation("genres", format!("unknown genre id {genre_id}")));
        }
        movie_genre::ActiveModel { movie_id: Set(movie_id), genre_id: Set(*genre_id) }
            .insert(conn)
            .await?;
    }
    for country_id in countries {
        if country::Entity::find_by_id(*country_id).one(conn).await?.is_none() {
            return Err(AppError::validation(
                "countries",
                format!("unknown country id {country_id}"),
            ));
        }
        movie_country::ActiveModel { movie_id: Set(movie_id), country_id: Set(*country_id) }
            .insert(conn)
            .await?;
    }
    Ok(())
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
    Query(filter): Query<MovieFilter>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<movie::Model>>> {
    let result =
        pagination::paginate(&state.db, filters::select(&filter), &page, pagination::MOVIES)
            .await?;
    Ok(Json(result))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<MoviePayload>,
) -> AppResult<(StatusCode, Json<MovieDetail>)> {
    authz::require_staff(&actor)?;
    payload.validate()?;

    let txn = state.db.begin().await?;
    let created = movie::ActiveModel {
        id: Default::default(),
        title: Set(payload.title.trim().to_string()),
        original_title: Set(payload.original_title.trim().to_string()),
        description: Set(payload.description.clone()),
        release_date: Set(payload.release_date.clone()),
        duration_min: Set(payload.duration_min),
        rating: Set(0.0),
        language: Set(payload.language.clone()),
        age_rating: Set(payload.age_rating.clone()),
        budget: Set(payload.budget),
        box_office: Set(payload.box_office),
        is_featured: Set(payload.is_featured),
        views_count: Set(0),
        poster_path: Set(None),
        trailer_path: Set(None),
        created_at: Set(now_sec()),
        updated_at: Set(now_sec()),
    }
    .insert(&txn)
    .await?;
    set_links(&txn, created.id, &payload.genres, &payload.countries).await?;
    txn.commit().await?;

    tracing::info!(movie_id = created.id, title = %created.title, "movie created");

    // best-effort fan-out to registered users
    notify::movie_added(&state.db, &created).await;

    let body = detail(&state.db, created).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieDetail>> {
    let found = fetch(&state.db, id).await?;

    let views = found.views_count + 1;
    let mut bump: movie::ActiveModel = found.into();
    bump.views_count = Set(views);
    let found = bump.update(&state.db).await?;

    Ok(Json(detail(&state.db, found).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<MoviePayload>,
) -> AppResult<Json<MovieDetail>> {
    authz::require_staff(&actor)?;
    payload.validate()?;
    let found = fetch(&state.db, id).await?;

    let txn = state.db.begin().await?;
    let mut model: movie::ActiveModel = found.into();
    model.title = Set(payload.title.trim().to_string());
    model.original_title = Set(payload.original_title.trim().to_string());
    model.description = Set(payload.description.clone());
    model.release_date = Set(payload.release_date.clone());
    model.duration_min = Set(payload.duration_min);
    model.language = Set(payload.language.clone());
    model.age_rating = Set(payload.age_rating.clone());
    model.budget = Set(payload.budget);
    model.box_office = Set(payload.box_office);
    model.is_featured = Set(payload.is_featured);
    model.updated_at = Set(now_sec());
    let updated = model.update(&txn).await?;
    set_links(&txn, updated.id, &payload.genres, &payload.countries).await?;
    txn.commit().await?;

    Ok(Json(detail(&state.db, updated).await?))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    authz::require_staff(&actor)?;
    let found = fetch(&state.db, id).await?;
    found.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct CreditPayload {
    pub person_id: i32,
    pub role: PersonRole,
    pub character_name: Option<String>,
    #[serde(default)]
    pub is_main_character: bool,
}

pub async fn add_credit(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<CreditPayload>,
) -> AppResult<(StatusCode, Json<movie_credit::Model>)> {
    authz::require_staff(&actor)?;
    fetch(&state.db, id).await?;
    let who = person::Entity::find_by_id(payload.person_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("person"))?;

    // the credit's role tag must match the person's own role
    if who.role != payload.role {
        return Err(AppError::validation(
            "role",
            format!("{} is not registered as a {:?}", who.name, payload.role),
        ));
    }

    let created = movie_credit::ActiveModel {
        id: Default::default(),
        movie_id: Set(id),
        person_id: Set(payload.person_id),
        role: Set(payload.role),
        character_name: Set(payload.character_name),
        is_main_character: Set(payload.is_main_character),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "person already credited on this movie in that role"))?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn upload_poster(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<movie::Model>> {
    authz::require_staff(&actor)?;
    let found = fetch(&state.db, id).await?;

    let (filename, bytes) = read_file_field(multipart).await?;
    let reference = state.storage.store(&filename, &bytes, FileKind::Poster).await?;

    let mut model: movie::ActiveModel = found.into();
    model.poster_path = Set(Some(reference));
    model.updated_at = Set(now_sec());
    Ok(Json(model.update(&state.db).await?))
}

pub async fn upload_trailer(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<movie::Model>> {
    authz::require_staff(&actor)?;
    let found = fetch(&state.db, id).await?;

    let (filename, bytes) = read_file_field(multipart).await?;
    let reference = state.storage.store(&filename, &bytes, FileKind::Trailer).await?;

    let mut model: movie::ActiveModel = found.into();
    model.trailer_path = Set(Some(reference));
    model.updated_at = Set(now_sec());
    Ok(Json(model.update(&state.db).await?))
}

pub(crate) async fn read_file_field(mut multipart: Multipart) -> AppResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation("file", e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .ok_or_else(|| AppError::validation("file", "upload has no filename"))?
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation("file", e.to_string()))?;
        return Ok((filename, bytes.to_vec()));
    }
    Err(AppError::validation("file", "missing file field"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::notification, testutil};

    fn payload(title: &str) -> MoviePayload {
        MoviePayload {
            title: title.to_string(),
            original_title: String::new(),
            description: "a film".to_string(),
            release_date: "1999-03-31".to_string(),
            duration_min: 136,
            language: "EN".to_string(),
            age_rating: "R".to_string(),
            budget: None,
            box_office: None,
            is_featured: false,
            genres: vec![],
            countries: vec![],
        }
    }

    #[tokio::test]
    async fn non_staff_cannot_create() {
        let state = testutil::state().await;
        let actor = testutil::actor(&state.db, "viewer", false).await;

        let err = create(State(state.clone()), actor, Json(payload("The Matrix")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
    }

    #[tokio::test]
    async fn staff_create_links_and_notifies() {
        let state = testutil::state().await;
        let staff = testutil::actor(&state.db, "admin", true).await;
        let watcher = testutil::user(&state.db, "watcher", false).await;
        let scifi = testutil::genre(&state.db, "Sci-Fi").await;

        let mut body = payload("The Matrix");
        body.genres = vec![scifi.id];
        let (status, Json(created)) =
            create(State(state.clone()), staff, Json(body)).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.movie.rating, 0.0);
        assert_eq!(created.genres.len(), 1);

        // fan-out reached the registered user
        let notes = notification::Entity::find()
            .filter(notification::Column::UserId.eq(watcher.id))
            .all(&state.db)
            .await
            .unwrap();
        assert_eq!(notes.len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_unknown_genre() {
        let state = testutil::state().await;
        let staff = testutil::actor(&state.db, "admin", true).await;

        let mut body = payload("Heat");
        body.genres = vec![404];
        let err = create(State(state.clone()), staff, Json(body)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "genres", .. }));

        // the whole create rolled back
        assert!(movie::Entity::find().all(&state.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_validates_fields() {
        let state = testutil::state().await;
        let staff = testutil::actor(&state.db, "admin", true).await;

        let mut body = payload("Heat");
        body.language = "XX".to_string();
        assert!(create(State(state.clone()), staff.clone(), Json(body)).await.is_err());

        let mut body = payload("Heat");
        body.release_date = "31/03/1999".to_string();
        assert!(create(State(state.clone()), staff, Json(body)).await.is_err());
    }

    #[tokio::test]
    async fn retrieve_bumps_views_and_missing_is_not_found() {
        let state = testutil::state().await;
        let actor = testutil::actor(&state.db, "viewer", false).await;
        let m = testutil::movie(&state.db, "Ran").await;

        let Json(got) = retrieve(State(state.clone()), actor.clone(), Path(m.id)).await.unwrap();
        assert_eq!(got.movie.views_count, 1);
        let Json(got) = retrieve(State(state.clone()), actor.clone(), Path(m.id)).await.unwrap();
        assert_eq!(got.movie.views_count, 2);

        let err = retrieve(State(state.clone()), actor, Path(999)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("movie")));
    }

    #[tokio::test]
    async fn credit_role_must_match_person_role() {
        let state = testutil::state().await;
        let staff = testutil::actor(&state.db, "admin", true).await;
        let m = testutil::movie(&state.db, "Alien").await;
        let actor_person = testutil::person(&state.db, "Sigourney Weaver", PersonRole::Actor).await;

        let err = add_credit(
            State(state.clone()),
            staff.clone(),
            Path(m.id),
            Json(CreditPayload {
                person_id: actor_person.id,
                role: PersonRole::Director,
                character_name: None,
                is_main_character: false,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "role", .. }));

        let (_, Json(credit)) = add_credit(
            State(state.clone()),
            staff.clone(),
            Path(m.id),
            Json(CreditPayload {
                person_id: actor_person.id,
                role: PersonRole::Actor,
                character_name: Some("Ripley".to_string()),
                is_main_character: true,
            }),
        )
        .await
        .unwrap();
        assert_eq!(credit.character_name.as_deref(), Some("Ripley"));

        // duplicate (movie, person, role) conflicts
        let err = add_credit(
            State(state.clone()),
            staff,
            Path(m.id),
            Json(CreditPayload {
                person_id: actor_person.id,
                role: PersonRole::Actor,
                character_name: None,
                is_main_character: false,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
