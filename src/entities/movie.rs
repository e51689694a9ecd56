use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Catalog movie. `rating` is derived from reviews and never accepted
/// from a client; `views_count` is bumped on every retrieve.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub original_title: String,
    pub description: String,
    pub release_date: String,
    pub duration_min: i32,
    pub rating: f64,
    pub language: String,
    pub age_rating: String,
    pub budget: Option<f64>,
    pub box_office: Option<f64>,
    pub is_featured: bool,
    pub views_count: i32,
    pub poster_path: Option<String>,
    pub trailer_path: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_genre::Entity")]
    MovieGenres,
    #[sea_orm(has_many = "super::movie_country::Entity")]
    MovieCountries,
    #[sea_orm(has_many = "super::movie_credit::Entity")]
    Credits,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::subtitle::Entity")]
    Subtitles,
    #[sea_orm(has_many = "super::movie_season::Entity")]
    Seasons,
    #[sea_orm(has_many = "super::movie_award::Entity")]
    Awards,
}

impl Related<super::movie_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieGenres.def()
    }
}

impl Related<super::movie_credit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credits.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::subtitle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subtitles.def()
    }
}

impl Related<super::movie_season::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_genre::Relation::Movie.def().rev())
    }
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_country::Relation::Country.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_country::Relation::Movie.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
