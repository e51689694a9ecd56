pub mod auth;
pub mod catalog;
pub mod collections;
pub mod lists;
pub mod movies;
pub mod notifications;
pub mod reports;
pub mod reviews;
pub mod series;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/movies", get(movies::list).post(movies::create))
        .route(
            "/api/movies/{id}",
            get(movies::retrieve).put(movies::update).delete(movies::remove),
        )
        .route("/api/movies/{id}/poster", post(movies::upload_poster))
        .route("/api/movies/{id}/trailer", post(movies::upload_trailer))
        .route("/api/movies/{id}/credits", post(movies::add_credit))
        .route(
            "/api/movies/{id}/subtitles",
            get(series::list_subtitles).post(series::upload_subtitle),
        )
        .route(
            "/api/movies/{id}/seasons",
            get(series::list_seasons).post(series::create_season),
        )
        .route(
            "/api/seasons/{id}/episodes",
            get(series::list_episodes).post(series::create_episode),
        )
        .route("/api/episodes/{id}/video", post(series::upload_episode_video))
        .route(
            "/api/movies/{id}/awards",
            get(catalog::list_movie_awards).post(catalog::attach_award),
        )
        .route("/api/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/api/reviews/{id}",
            get(reviews::retrieve).put(reviews::update).delete(reviews::remove),
        )
        .route("/api/reviews/{id}/like", post(reviews::like))
        .route("/api/collections", get(collections::list).post(collections::create))
        .route(
            "/api/collections/{id}",
            get(collections::retrieve).put(collections::update).delete(collections::remove),
        )
        .route("/api/collections/{id}/movies", post(collections::add_movie))
        .route("/api/collections/{id}/movies/{movie_id}", delete(collections::remove_movie))
        .route("/api/watchlist", get(lists::watchlist).post(lists::add_watchlist))
        .route("/api/watchlist/{id}", delete(lists::remove_watchlist))
        .route("/api/lists", get(lists::movie_lists).post(lists::add_movie_list))
        .route("/api/lists/{id}", delete(lists::remove_movie_list))
        .route("/api/reports", get(reports::list).post(reports::create))
        .route("/api/reports/{id}/resolve", post(reports::resolve))
        .route("/api/genres", get(catalog::list_genres).post(catalog::create_genre))
        .route("/api/genres/{id}", put(catalog::update_genre).delete(catalog::delete_genre))
        .route("/api/countries", get(catalog::list_countries).post(catalog::create_country))
        .route(
            "/api/countries/{id}",
            put(catalog::update_country).delete(catalog::delete_country),
        )
        .route("/api/people", get(catalog::list_people).post(catalog::create_person))
        .route(
            "/api/people/{id}",
            get(catalog::retrieve_person)
                .put(catalog::update_person)
                .delete(catalog::delete_person),
        )
        .route("/api/people/{id}/photo", post(catalog::upload_person_photo))
        .route("/api/awards", get(catalog::list_awards).post(catalog::create_award))
        .route("/api/awards/{id}", put(catalog::update_award).delete(catalog::delete_award))
        .route("/api/notifications", get(notifications::list))
        .route("/api/notifications/{id}/read", post(notifications::mark_read))
        .route("/api/activity", get(users::activity))
        .route("/api/users/{id}/follow", post(users::follow).delete(users::unfollow))
}
