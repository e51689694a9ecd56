//! New-movie fan-out. When staff add a movie, every registered user gets
//! an in-app notification and users with an email address get a mail
//! dispatch. The whole fan-out is fire-and-forget: failures are logged
//! and the create request never waits on or fails with it.

use futures::{StreamExt, stream};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::{
    activity,
    entities::{movie, user},
};

const FANOUT_CONCURRENCY: usize = 8;

pub async fn movie_added(db: &DatabaseConnection, added: &movie::Model) {
    let users = match user::Entity::find().all(db).await {
        Ok(users) => users,
        Err(err) => {
            tracing::warn!(movie_id = added.id, error = %err, "failed to load users for fan-out");
            return;
        },
    };

    let title = format!("New movie: {}", added.title);
    let message = format!("{}\n{}", added.title, added.description);

    stream::iter(users)
        .map(|u| {
            let title = title.clone();
            let message = message.clone();
            async move {
                activity::notify(db, u.id, &title, &message).await;
                if let Some(email) = &u.email {
                    dispatch_mail(email, &title, &message);
                }
            }
        })
        .buffer_unordered(FANOUT_CONCURRENCY)
        .collect::<Vec<()>>()
        .await;

    tracing::debug!(movie_id = added.id, "movie fan-out complete");
}

// Mail leaves the system through the log; wiring an SMTP relay in is a
// deployment concern, not a catalog one.
fn dispatch_mail(to: &str, subject: &str, body: &str) {
    tracing::info!(to = %to, subject = %subject, body_len = body.len(), "dispatching mail");
}
