use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "award")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub organization: String,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_award::Entity")]
    MovieAwards,
}

impl Related<super::movie_award::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieAwards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
