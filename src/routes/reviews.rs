use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;

use crate::{
    AppState,
    activity::{self, ActivityRefs},
    auth::Actor,
    authz,
    entities::{movie, review, review_like, user_activity::ActivityKind},
    error::{AppError, AppResult, unique_violation},
    models::{self, now_sec},
    pagination::{self, Page, PageQuery},
    rating,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReviewListQuery {
    pub movie_id: Option<i32>,
    pub user_id: Option<i32>,
    pub ordering: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
    Query(q): Query<ReviewListQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<review::Model>>> {
    let mut select = review::Entity::find();
    if let Some(movie_id) = q.movie_id {
        select = select.filter(review::Column::MovieId.eq(movie_id));
    }
    if let Some(user_id) = q.user_id {
        select = select.filter(review::Column::UserId.eq(user_id));
    }
    select = match q.ordering.as_deref() {
        Some("rating") => select.order_by_asc(review::Column::Rating),
        Some("-rating") => select.order_by_desc(review::Column::Rating),
        Some("created_at") => select.order_by_asc(review::Column::CreatedAt),
        _ => select.order_by_desc(review::Column::CreatedAt),
    };

    Ok(Json(pagination::paginate(&state.db, select, &page, pagination::REVIEWS).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub movie_id: i32,
    pub rating: i32,
    pub comment: String,
}

/// Creates a review for the acting user. The owner is always the actor;
/// there is no owner field to supply. The movie's aggregate rating is
/// recomputed in the same transaction.
pub async fn create(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(payload): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<review::Model>)> {
    models::validate_review_rating(payload.rating)?;

    movie::Entity::find_by_id(payload.movie_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("movie"))?;

    let txn = state.db.begin().await?;
    let created = review::ActiveModel {
        id: Default::default(),
        movie_id: Set(payload.movie_id),
        user_id: Set(actor.id()),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        created_at: Set(now_sec()),
        updated_at: Set(now_sec()),
    }
    .insert(&txn)
    .await
    .map_err(|e| unique_violation(e, "you have already reviewed this movie"))?;
    rating::recompute(&txn, payload.movie_id).await?;
    txn.commit().await?;

    activity::record(
        &state.db,
        actor.id(),
        ActivityKind::ReviewAdded,
        ActivityRefs::review(created.movie_id, created.id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    _actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<Json<review::Model>> {
    let found = fetch(&state.db, id).await?;
    Ok(Json(found))
}

#[derive(Debug, Deserialize)]
pub struct UpdateReview {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReview>,
) -> AppResult<Json<review::Model>> {
    let found = fetch(&state.db, id).await?;
    authz::require_owner(&actor, found.user_id)?;

    if let Some(r) = payload.rating {
        models::validate_review_rating(r)?;
    }
    let rating_changed = payload.rating.is_some_and(|r| r != found.rating);
    let movie_id = found.movie_id;

    let txn = state.db.begin().await?;
    let mut model: review::ActiveModel = found.into();
    if let Some(r) = payload.rating {
        model.rating = Set(r);
    }
    if let Some(comment) = payload.comment {
        model.comment = Set(comment);
    }
    model.updated_at = Set(now_sec());
    let updated = model.update(&txn).await?;
    if rating_changed {
        rating::recompute(&txn, movie_id).await?;
    }
    txn.commit().await?;

    if rating_changed {
        activity::record(
            &state.db,
            actor.id(),
            ActivityKind::RatingGiven,
            ActivityRefs::review(updated.movie_id, updated.id),
        )
        .await;
    }

    Ok(Json(updated))
}

/// Deletes the actor's review. The movie reference is taken before the
/// row goes away so the rating can be recomputed without it.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let found = fetch(&state.db, id).await?;
    authz::require_owner(&actor, found.user_id)?;

    let movie_id = found.movie_id;
    let txn = state.db.begin().await?;
    found.delete(&txn).await?;
    rating::recompute(&txn, movie_id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn like(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let found = fetch(&state.db, id).await?;

    review_like::ActiveModel {
        id: Default::default(),
        review_id: Set(found.id),
        user_id: Set(actor.id()),
        created_at: Set(now_sec()),
    }
    .insert(&state.db)
    .await
    .map_err(|e| unique_violation(e, "you have already liked this review"))?;

    activity::record(
        &state.db,
        actor.id(),
        ActivityKind::ReviewLiked,
        ActivityRefs::review(found.movie_id, found.id),
    )
    .await;

    if found.user_id != actor.id() {
        activity::notify(
            &state.db,
            found.user_id,
            "Your review got a like",
            &format!("{} liked your review", actor.user.username),
        )
        .await;
    }

    Ok(StatusCode::CREATED)
}

async fn fetch(db: &sea_orm::DatabaseConnection, id: i32) -> AppResult<review::Model> {
    review::Entity::find_by_id(id).one(db).await?.ok_or(AppError::NotFound("review"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[tokio::test]
    async fn rating_follows_review_lifecycle() {
        let state = testutil::state().await;
        let m = testutil::movie(&state.db, "Paths of Glory").await;
        let a = testutil::actor(&state.db, "a", false).await;
        let b = testutil::actor(&state.db, "b", false).await;
        let c = testutil::actor(&state.db, "c", false).await;

        create(
            State(state.clone()),
            a.clone(),
            Json(CreateReview { movie_id: m.id, rating: 4, comment: "ok".to_string() }),
        )
        .await
        .unwrap();
        create(
            State(state.clone()),
            b.clone(),
            Json(CreateReview { movie_id: m.id, rating: 6, comment: "good".to_string() }),
        )
        .await
        .unwrap();
        assert_eq!(testutil::fetch_movie(&state.db, m.id).await.rating, 5.0);

        let (_, Json(by_c)) = create(
            State(state.clone()),
            c.clone(),
            Json(CreateReview { movie_id: m.id, rating: 10, comment: "great".to_string() }),
        )
        .await
        .unwrap();
        assert_eq!(testutil::fetch_movie(&state.db, m.id).await.rating, 6.7);
        assert_eq!(by_c.user_id, c.id());

        // a deletes their review
        let a_review = review::Entity::find()
            .filter(review::Column::UserId.eq(a.id()))
            .one(&state.db)
            .await
            .unwrap()
            .unwrap();
        remove(State(state.clone()), a.clone(), Path(a_review.id)).await.unwrap();
        assert_eq!(testutil::fetch_movie(&state.db, m.id).await.rating, 8.0);

        // deleting the remaining reviews resets the rating to zero
        for actor in [b, c] {
            let r = review::Entity::find()
                .filter(review::Column::UserId.eq(actor.id()))
                .one(&state.db)
                .await
                .unwrap()
                .unwrap();
            remove(State(state.clone()), actor, Path(r.id)).await.unwrap();
        }
        assert_eq!(testutil::fetch_movie(&state.db, m.id).await.rating, 0.0);
    }

    #[tokio::test]
    async fn second_review_for_same_movie_conflicts() {
        let state = testutil::state().await;
        let m = testutil::movie(&state.db, "Rashomon").await;
        let a = testutil::actor(&state.db, "a", false).await;

        create(
            State(state.clone()),
            a.clone(),
            Json(CreateReview { movie_id: m.id, rating: 7, comment: String::new() }),
        )
        .await
        .unwrap();

        let err = create(
            State(state.clone()),
            a,
            Json(CreateReview { movie_id: m.id, rating: 9, comment: String::new() }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // the failed attempt did not move the rating
        assert_eq!(testutil::fetch_movie(&state.db, m.id).await.rating, 7.0);
    }

    #[tokio::test]
    async fn only_the_owner_may_mutate() {
        let state = testutil::state().await;
        let m = testutil::movie(&state.db, "Persona").await;
        let owner = testutil::actor(&state.db, "owner", false).await;
        let other = testutil::actor(&state.db, "other", false).await;
        let staff = testutil::actor(&state.db, "staff", true).await;

        let (_, Json(r)) = create(
            State(state.clone()),
            owner.clone(),
            Json(CreateReview { movie_id: m.id, rating: 5, comment: String::new() }),
        )
        .await
        .unwrap();

        let err = update(
            State(state.clone()),
            other.clone(),
            Path(r.id),
            Json(UpdateReview { rating: Some(1), comment: None }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        let err = remove(State(state.clone()), staff, Path(r.id)).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        // the owner can, and the rating follows
        let Json(updated) = update(
            State(state.clone()),
            owner,
            Path(r.id),
            Json(UpdateReview { rating: Some(9), comment: Some("rewatched".to_string()) }),
        )
        .await
        .unwrap();
        assert_eq!(updated.rating, 9);
        assert_eq!(testutil::fetch_movie(&state.db, m.id).await.rating, 9.0);
    }

    #[tokio::test]
    async fn review_for_unknown_movie_is_not_found() {
        let state = testutil::state().await;
        let a = testutil::actor(&state.db, "a", false).await;

        let err = create(
            State(state.clone()),
            a,
            Json(CreateReview { movie_id: 999, rating: 5, comment: String::new() }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound("movie")));
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let state = testutil::state().await;
        let m = testutil::movie(&state.db, "Brazil").await;
        let a = testutil::actor(&state.db, "a", false).await;

        for bad in [0, 11] {
            let err = create(
                State(state.clone()),
                a.clone(),
                Json(CreateReview { movie_id: m.id, rating: bad, comment: String::new() }),
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AppError::Validation { field: "rating", .. }));
        }
    }

    #[tokio::test]
    async fn double_like_conflicts_and_author_is_notified() {
        let state = testutil::state().await;
        let m = testutil::movie(&state.db, "La Haine").await;
        let author = testutil::actor(&state.db, "author", false).await;
        let fan = testutil::actor(&state.db, "fan", false).await;

        let (_, Json(r)) = create(
            State(state.clone()),
            author.clone(),
            Json(CreateReview { movie_id: m.id, rating: 8, comment: String::new() }),
        )
        .await
        .unwrap();

        like(State(state.clone()), fan.clone(), Path(r.id)).await.unwrap();
        let err = like(State(state.clone()), fan, Path(r.id)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let notes = crate::entities::notification::Entity::find()
            .filter(crate::entities::notification::Column::UserId.eq(author.id()))
            .all(&state.db)
            .await
            .unwrap();
        assert_eq!(notes.len(), 1);
    }
}
