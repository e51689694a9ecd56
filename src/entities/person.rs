use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Primary craft of a person, and the tag a movie credit is filed under.
/// A credit's role must match the person's own role; the boundary checks
/// this when a credit is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    #[sea_orm(string_value = "ACTOR")]
    Actor,
    #[sea_orm(string_value = "DIRECTOR")]
    Director,
    #[sea_orm(string_value = "WRITER")]
    Writer,
    #[sea_orm(string_value = "PRODUCER")]
    Producer,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub bio: String,
    pub birth_date: Option<String>,
    pub photo_path: Option<String>,
    pub role: PersonRole,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_credit::Entity")]
    Credits,
}

impl Related<super::movie_credit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
