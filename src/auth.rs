use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::{
    AppState,
    entities::{auth_token, user},
    error::{AppError, AppResult},
    models::{now_sec, random_hex},
};

/// The authenticated identity behind a request. Every authorization and
/// recorder call receives this explicitly; there is no ambient identity.
#[derive(Clone, Debug)]
pub struct Actor {
    pub user: user::Model,
}

impl Actor {
    pub fn id(&self) -> i32 {
        self.user.id
    }

    pub fn is_staff(&self) -> bool {
        self.user.is_staff
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

/// Issues an opaque bearer token for the user. Tokens live server-side so
/// logout can revoke them.
pub async fn issue_token(db: &DatabaseConnection, user_id: i32) -> AppResult<String> {
    let token = random_hex(32);
    auth_token::ActiveModel {
        id: Default::default(),
        user_id: Set(user_id),
        token: Set(token.clone()),
        created_at: Set(now_sec()),
    }
    .insert(db)
    .await?;
    Ok(token)
}

pub async fn revoke_token(db: &DatabaseConnection, token: &str) -> AppResult<()> {
    auth_token::Entity::delete_many()
        .filter(auth_token::Column::Token.eq(token))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn resolve_token(db: &DatabaseConnection, token: &str) -> AppResult<Option<user::Model>> {
    let Some(row) =
        auth_token::Entity::find().filter(auth_token::Column::Token.eq(token)).one(db).await?
    else {
        return Ok(None);
    };
    Ok(user::Entity::find_by_id(row.user_id).one(db).await?)
}

pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<Arc<AppState>> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        let user = resolve_token(&state.db, token).await?.ok_or(AppError::Unauthorized)?;
        Ok(Actor { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password(&hash, "hunter2"));
        assert!(!verify_password(&hash, "hunter3"));
        assert!(!verify_password("not-a-hash", "hunter2"));
    }

    #[tokio::test]
    async fn token_issue_resolve_revoke() {
        let db = testutil::db().await;
        let user = testutil::user(&db, "alice", false).await;

        let token = issue_token(&db, user.id).await.unwrap();
        let resolved = resolve_token(&db, &token).await.unwrap().unwrap();
        assert_eq!(resolved.id, user.id);

        revoke_token(&db, &token).await.unwrap();
        assert!(resolve_token(&db, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_none() {
        let db = testutil::db().await;
        assert!(resolve_token(&db, "deadbeef").await.unwrap().is_none());
    }
}
