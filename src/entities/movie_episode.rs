use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "movie_episode")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub season_id: i32,
    pub episode_number: i32,
    pub title: String,
    pub description: String,
    pub duration_min: i32,
    pub video_path: Option<String>,
    pub air_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie_season::Entity",
        from = "Column::SeasonId",
        to = "super::movie_season::Column::Id"
    )]
    Season,
}

impl Related<super::movie_season::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Season.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
