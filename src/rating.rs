//! Rating aggregation. A movie's displayed rating is the mean of its
//! review ratings rounded to one decimal, recomputed inside the same
//! transaction as the review mutation that triggered it. A failure here
//! aborts the whole transaction.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::{
    entities::{movie, review},
    error::{AppError, AppResult},
};

/// Recomputes the stored rating for `movie_id` from every attached
/// review and returns the new value. Zero reviews reset the rating to
/// exactly 0.0.
pub async fn recompute<C: ConnectionTrait>(conn: &C, movie_id: i32) -> AppResult<f64> {
    let reviews = review::Entity::find()
        .filter(review::Column::MovieId.eq(movie_id))
        .all(conn)
        .await?;

    let rating = if reviews.is_empty() {
        0.0
    } else {
        let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
        round_one_decimal(sum as f64 / reviews.len() as f64)
    };

    let current = movie::Entity::find_by_id(movie_id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("movie"))?;

    let mut model: movie::ActiveModel = current.into();
    model.rating = Set(rating);
    model.update(conn).await?;

    tracing::debug!(movie_id = movie_id, reviews = reviews.len(), rating = rating, "rating recomputed");

    Ok(rating)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
