//! Shared test fixtures: a migrated in-memory database plus seed-data
//! factories with sensible defaults.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set,
};

use crate::{
    AppState,
    auth::Actor,
    config::Config,
    entities::{collection, genre, movie, movie_credit, movie_genre, person, review, user},
    entities::person::PersonRole,
    models::{now_sec, random_hex},
    storage::Storage,
};

pub async fn db() -> DatabaseConnection {
    // single connection so the in-memory database is shared across queries
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn state() -> Arc<AppState> {
    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".to_string(),
        media_dir: std::env::temp_dir().join(format!("kinoteka-media-{}", random_hex(8))),
        max_image_bytes: 5 * 1024 * 1024,
        max_video_bytes: 100 * 1024 * 1024,
    };
    let db = db().await;
    let storage = Storage::new(&config);
    Arc::new(AppState { db, storage })
}

pub async fn user(db: &DatabaseConnection, username: &str, is_staff: bool) -> user::Model {
    user::ActiveModel {
        id: Default::default(),
        username: Set(username.to_string()),
        email: Set(Some(format!("{username}@example.com"))),
        password_hash: Set(String::new()),
        is_staff: Set(is_staff),
        created_at: Set(now_sec()),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn actor(db: &DatabaseConnection, username: &str, is_staff: bool) -> Actor {
    Actor { user: user(db, username, is_staff).await }
}

pub async fn movie(db: &DatabaseConnection, title: &str) -> movie::Model {
    movie_with(db, title, "2000-01-01", "EN").await
}

pub async fn movie_with(
    db: &DatabaseConnection,
    title: &str,
    release_date: &str,
    language: &str,
) -> movie::Model {
    movie::ActiveModel {
        id: Default::default(),
        title: Set(title.to_string()),
        original_title: Set(String::new()),
        description: Set(format!("{title} description")),
        release_date: Set(release_date.to_string()),
        duration_min: Set(120),
        rating: Set(0.0),
        language: Set(language.to_string()),
        age_rating: Set("PG".to_string()),
        budget: Set(None),
        box_office: Set(None),
        is_featured: Set(false),
        views_count: Set(0),
        poster_path: Set(None),
        trailer_path: Set(None),
        created_at: Set(now_sec()),
        updated_at: Set(now_sec()),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn fetch_movie(db: &DatabaseConnection, id: i32) -> movie::Model {
    movie::Entity::find_by_id(id).one(db).await.unwrap().unwrap()
}

pub async fn set_rating(db: &DatabaseConnection, id: i32, rating: f64) {
    let mut m: movie::ActiveModel = fetch_movie(db, id).await.into();
    m.rating = Set(rating);
    m.update(db).await.unwrap();
}

pub async fn set_featured(db: &DatabaseConnection, id: i32) {
    let mut m: movie::ActiveModel = fetch_movie(db, id).await.into();
    m.is_featured = Set(true);
    m.update(db).await.unwrap();
}

pub async fn review(
    db: &DatabaseConnection,
    movie_id: i32,
    user_id: i32,
    rating: i32,
) -> review::Model {
    review::ActiveModel {
        id: Default::default(),
        movie_id: Set(movie_id),
        user_id: Set(user_id),
        rating: Set(rating),
        comment: Set("fine".to_string()),
        created_at: Set(now_sec()),
        updated_at: Set(now_sec()),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn genre(db: &DatabaseConnection, name: &str) -> genre::Model {
    genre::ActiveModel { id: Default::default(), name: Set(name.to_string()) }
        .insert(db)
        .await
        .unwrap()
}

pub async fn tag_genre(db: &DatabaseConnection, movie_id: i32, genre_id: i32) {
    movie_genre::ActiveModel { movie_id: Set(movie_id), genre_id: Set(genre_id) }
        .insert(db)
        .await
        .unwrap();
}

pub async fn person(db: &DatabaseConnection, name: &str, role: PersonRole) -> person::Model {
    person::ActiveModel {
        id: Default::default(),
        name: Set(name.to_string()),
        bio: Set(String::new()),
        birth_date: Set(None),
        photo_path: Set(None),
        role: Set(role),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn credit(db: &DatabaseConnection, movie_id: i32, person_id: i32, role: PersonRole) {
    movie_credit::ActiveModel {
        id: Default::default(),
        movie_id: Set(movie_id),
        person_id: Set(person_id),
        role: Set(role),
        character_name: Set(None),
        is_main_character: Set(false),
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn collection(
    db: &DatabaseConnection,
    owner_id: i32,
    name: &str,
    is_public: bool,
) -> collection::Model {
    collection::ActiveModel {
        id: Default::default(),
        name: Set(name.to_string()),
        description: Set(String::new()),
        owner_id: Set(owner_id),
        is_public: Set(is_public),
        created_at: Set(now_sec()),
    }
    .insert(db)
    .await
    .unwrap()
}
