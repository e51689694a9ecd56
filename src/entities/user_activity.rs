use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    #[sea_orm(string_value = "REVIEW")]
    ReviewAdded,
    #[sea_orm(string_value = "RATE")]
    RatingGiven,
    #[sea_orm(string_value = "WATCH")]
    WatchlistAdd,
    #[sea_orm(string_value = "LIKE")]
    ReviewLiked,
    #[sea_orm(string_value = "FOLLOW")]
    UserFollowed,
}

/// Append-only audit trail. Rows are written by the recorder after the
/// primary transaction commits and are never updated or deleted through
/// the API.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user_activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub kind: ActivityKind,
    pub movie_id: Option<i32>,
    pub review_id: Option<i32>,
    pub target_user_id: Option<i32>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
