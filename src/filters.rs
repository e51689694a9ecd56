//! Movie listing criteria. Each filter is translated into the SeaORM
//! select; name filters against related tables go through `IN` subqueries
//! so several of them can stack without join aliasing.

use sea_orm::{
    ActiveEnum, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Select,
    sea_query::{Expr, Func, Query, SelectStatement},
};
use serde::Deserialize;

use crate::entities::{
    genre, movie, movie_country, movie_credit, movie_genre, person, person::PersonRole,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieFilter {
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actor: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub age_rating: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

pub fn select(f: &MovieFilter) -> Select<movie::Entity> {
    let mut q = movie::Entity::find();

    if let Some(min) = f.min_rating {
        q = q.filter(movie::Column::Rating.gte(min));
    }
    if let Some(max) = f.max_rating {
        q = q.filter(movie::Column::Rating.lte(max));
    }
    // release dates are ISO strings, so year bounds compare lexically
    if let Some(year) = f.min_year {
        q = q.filter(movie::Column::ReleaseDate.gte(format!("{year:04}-01-01")));
    }
    if let Some(year) = f.max_year {
        q = q.filter(movie::Column::ReleaseDate.lte(format!("{year:04}-12-31")));
    }
    if let Some(language) = &f.language {
        q = q.filter(movie::Column::Language.eq(language.as_str()));
    }
    if let Some(age_rating) = &f.age_rating {
        q = q.filter(movie::Column::AgeRating.eq(age_rating.as_str()));
    }
    if let Some(featured) = f.featured {
        q = q.filter(movie::Column::IsFeatured.eq(featured));
    }
    if let Some(name) = &f.genre {
        q = q.filter(movie::Column::Id.in_subquery(genre_subquery(name)));
    }
    if let Some(name) = &f.country {
        q = q.filter(movie::Column::Id.in_subquery(country_subquery(name)));
    }
    if let Some(name) = &f.director {
        q = q.filter(movie::Column::Id.in_subquery(credit_subquery(PersonRole::Director, name)));
    }
    if let Some(name) = &f.actor {
        q = q.filter(movie::Column::Id.in_subquery(credit_subquery(PersonRole::Actor, name)));
    }
    if let Some(term) = &f.search {
        q = q.filter(
            Condition::any()
                .add(movie::Column::Title.contains(term.as_str()))
                .add(movie::Column::Description.contains(term.as_str())),
        );
    }

    ordered(q, f.ordering.as_deref())
}

fn genre_subquery(name: &str) -> SelectStatement {
    Query::select()
        .column((movie_genre::Entity, movie_genre::Column::MovieId))
        .from(movie_genre::Entity)
        .inner_join(
            genre::Entity,
            Expr::col((genre::Entity, genre::Column::Id))
                .equals((movie_genre::Entity, movie_genre::Column::GenreId)),
        )
        .and_where(
            Expr::expr(Func::lower(Expr::col((genre::Entity, genre::Column::Name))))
                .eq(name.to_lowercase()),
        )
        .to_owned()
}

fn country_subquery(name: &str) -> SelectStatement {
    Query::select()
        .column((movie_country::Entity, movie_country::Column::MovieId))
        .from(movie_country::Entity)
        .inner_join(
            crate::entities::country::Entity,
            Expr::col((crate::entities::country::Entity, crate::entities::country::Column::Id))
                .equals((movie_country::Entity, movie_country::Column::CountryId)),
        )
        .and_where(
            Expr::expr(Func::lower(Expr::col((
                crate::entities::country::Entity,
                crate::entities::country::Column::Name,
            ))))
            .eq(name.to_lowercase()),
        )
        .to_owned()
}

fn credit_subquery(role: PersonRole, name: &str) -> SelectStatement {
    Query::select()
        .column((movie_credit::Entity, movie_credit::Column::MovieId))
        .from(movie_credit::Entity)
        .inner_join(
            person::Entity,
            Expr::col((person::Entity, person::Column::Id))
                .equals((movie_credit::Entity, movie_credit::Column::PersonId)),
        )
        .and_where(
            Expr::col((movie_credit::Entity, movie_credit::Column::Role)).eq(role.to_value()),
        )
        .and_where(
            Expr::expr(Func::lower(Expr::col((person::Entity, person::Column::Name))))
                .like(format!("%{}%", name.to_lowercase())),
        )
        .to_owned()
}

fn ordered(q: Select<movie::Entity>, ordering: Option<&str>) -> Select<movie::Entity> {
    let Some(ordering) = ordering else {
        return q.order_by_desc(movie::Column::CreatedAt);
    };
    let (field, descending) = match ordering.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (ordering, false),
    };
    let column = match field {
        "release_date" => movie::Column::ReleaseDate,
        "rating" => movie::Column::Rating,
        "views_count" => movie::Column::ViewsCount,
        "created_at" => movie::Column::CreatedAt,
        // unknown fields fall back to the default ordering
        _ => return q.order_by_desc(movie::Column::CreatedAt),
    };
    if descending { q.order_by_desc(column) } else { q.order_by_asc(column) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    async fn titles(db: &sea_orm::DatabaseConnection, f: &MovieFilter) -> Vec<String> {
        select(f).all(db).await.unwrap().into_iter().map(|m| m.title).collect()
    }

    #[tokio::test]
    async fn rating_and_year_bounds() {
        let db = testutil::db().await;
        let old = testutil::movie_with(&db, "Old Low", "1970-05-01", "EN").await;
        let new = testutil::movie_with(&db, "New High", "2020-05-01", "EN").await;
        testutil::set_rating(&db, old.id, 3.0).await;
        testutil::set_rating(&db, new.id, 8.5).await;

        let f = MovieFilter { min_rating: Some(5.0), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["New High"]);

        let f = MovieFilter { max_rating: Some(5.0), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["Old Low"]);

        let f = MovieFilter { min_year: Some(2000), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["New High"]);

        let f =
            MovieFilter { min_year: Some(1960), max_year: Some(1980), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["Old Low"]);
    }

    #[tokio::test]
    async fn genre_is_exact_case_insensitive() {
        let db = testutil::db().await;
        let m1 = testutil::movie(&db, "Alien").await;
        let m2 = testutil::movie(&db, "Amelie").await;
        let horror = testutil::genre(&db, "Horror").await;
        let romance = testutil::genre(&db, "Romance").await;
        testutil::tag_genre(&db, m1.id, horror.id).await;
        testutil::tag_genre(&db, m2.id, romance.id).await;

        let f = MovieFilter { genre: Some("horror".to_string()), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["Alien"]);

        // substring must not match
        let f = MovieFilter { genre: Some("horr".to_string()), ..Default::default() };
        assert!(titles(&db, &f).await.is_empty());
    }

    #[tokio::test]
    async fn director_is_substring_case_insensitive() {
        let db = testutil::db().await;
        let m1 = testutil::movie(&db, "Jaws").await;
        let m2 = testutil::movie(&db, "Heat").await;
        let spielberg = testutil::person(&db, "Steven Spielberg", PersonRole::Director).await;
        let mann = testutil::person(&db, "Michael Mann", PersonRole::Director).await;
        testutil::credit(&db, m1.id, spielberg.id, PersonRole::Director).await;
        testutil::credit(&db, m2.id, mann.id, PersonRole::Director).await;

        let f = MovieFilter { director: Some("spielberg".to_string()), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["Jaws"]);

        // a director credit must not satisfy the actor filter
        let f = MovieFilter { actor: Some("spielberg".to_string()), ..Default::default() };
        assert!(titles(&db, &f).await.is_empty());
    }

    #[tokio::test]
    async fn language_and_featured_flags() {
        let db = testutil::db().await;
        let m1 = testutil::movie_with(&db, "Leviathan", "2014-06-01", "RU").await;
        testutil::movie_with(&db, "Arrival", "2016-11-11", "EN").await;
        testutil::set_featured(&db, m1.id).await;

        let f = MovieFilter { language: Some("RU".to_string()), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["Leviathan"]);

        let f = MovieFilter { featured: Some(true), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["Leviathan"]);
    }

    #[tokio::test]
    async fn search_matches_title_or_description() {
        let db = testutil::db().await;
        testutil::movie(&db, "The Thing").await;
        testutil::movie(&db, "Tenet").await;

        let f = MovieFilter { search: Some("thing".to_string()), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["The Thing"]);
    }

    #[tokio::test]
    async fn ordering_by_rating() {
        let db = testutil::db().await;
        let a = testutil::movie(&db, "A").await;
        let b = testutil::movie(&db, "B").await;
        testutil::set_rating(&db, a.id, 2.0).await;
        testutil::set_rating(&db, b.id, 9.0).await;

        let f = MovieFilter { ordering: Some("-rating".to_string()), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["B", "A"]);

        let f = MovieFilter { ordering: Some("rating".to_string()), ..Default::default() };
        assert_eq!(titles(&db, &f).await, vec!["A", "B"]);
    }
}
