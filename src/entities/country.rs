use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "country")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_country::Entity")]
    MovieCountries,
}

impl Related<super::movie_country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieCountries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
