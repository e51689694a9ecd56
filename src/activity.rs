//! Best-effort recorders for the audit trail and user notifications.
//! Both run after the primary transaction has committed; a failure is
//! logged and dropped, never surfaced to the request that triggered it.

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::{
    entities::{notification, user_activity, user_activity::ActivityKind},
    models::now_sec,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct ActivityRefs {
    pub movie_id: Option<i32>,
    pub review_id: Option<i32>,
    pub target_user_id: Option<i32>,
}

impl ActivityRefs {
    pub fn movie(movie_id: i32) -> Self {
        Self { movie_id: Some(movie_id), ..Default::default() }
    }

    pub fn review(movie_id: i32, review_id: i32) -> Self {
        Self { movie_id: Some(movie_id), review_id: Some(review_id), ..Default::default() }
    }

    pub fn user(target_user_id: i32) -> Self {
        Self { target_user_id: Some(target_user_id), ..Default::default() }
    }
}

/// Appends one activity row for the acting user. Called synchronously
/// after commit so per-actor records land in commit order.
pub async fn record(db: &DatabaseConnection, actor_id: i32, kind: ActivityKind, refs: ActivityRefs) {
    let row = user_activity::ActiveModel {
        id: Default::default(),
        user_id: Set(actor_id),
        kind: Set(kind),
        movie_id: Set(refs.movie_id),
        review_id: Set(refs.review_id),
        target_user_id: Set(refs.target_user_id),
        created_at: Set(now_sec()),
    };

    if let Err(err) = row.insert(db).await {
        tracing::warn!(actor_id = actor_id, kind = ?kind, error = %err, "failed to record activity");
    }
}

/// Appends one notification for a user.
pub async fn notify(db: &DatabaseConnection, user_id: i32, title: &str, message: &str) {
    let row = notification::ActiveModel {
        id: Default::default(),
        user_id: Set(user_id),
        title: Set(title.to_string()),
        message: Set(message.to_string()),
        is_read: Set(false),
        created_at: Set(now_sec()),
    };

    if let Err(err) = row.insert(db).await {
        tracing::warn!(user_id = user_id, title = %title, error = %err, "failed to store notification");
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

    use super::*;
    use crate::{entities::user_activity, testutil};

    #[tokio::test]
    async fn records_in_call_order_per_actor() {
        let db = testutil::db().await;
        let u = testutil::user(&db, "ada", false).await;
        let m = testutil::movie(&db, "Metropolis").await;

        record(&db, u.id, ActivityKind::ReviewAdded, ActivityRefs::movie(m.id)).await;
        record(&db, u.id, ActivityKind::WatchlistAdd, ActivityRefs::movie(m.id)).await;

        let rows = user_activity::Entity::find()
            .filter(user_activity::Column::UserId.eq(u.id))
            .order_by_asc(user_activity::Column::Id)
            .all(&db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, ActivityKind::ReviewAdded);
        assert_eq!(rows[1].kind, ActivityKind::WatchlistAdd);
    }

    #[tokio::test]
    async fn recorder_failure_is_swallowed() {
        let db = testutil::db().await;
        // user 999 does not exist, so the FK insert fails; record() must
        // still return normally.
        record(&db, 999, ActivityKind::ReviewAdded, ActivityRefs::default()).await;

        assert_eq!(user_activity::Entity::find().all(&db).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn notification_stored_unread() {
        let db = testutil::db().await;
        let u = testutil::user(&db, "bea", false).await;

        notify(&db, u.id, "Welcome", "hello").await;

        let rows = crate::entities::notification::Entity::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_read);
    }
}
