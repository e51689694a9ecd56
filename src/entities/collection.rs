use sea_orm::entity::prelude::*;
use serde::Serialize;

/// User-curated movie set. Private collections are readable by the owner
/// only; all writes are owner-only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "collection")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub owner_id: i32,
    pub is_public: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::collection_movie::Entity")]
    CollectionMovies,
}

impl Related<super::collection_movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectionMovies.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        super::collection_movie::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::collection_movie::Relation::Collection.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
