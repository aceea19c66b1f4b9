//! Accounts, login sessions and the caller-identity extractors handlers take.

use std::{
    num::NonZeroU32,
    sync::{Arc, LazyLock},
    time::Duration,
};

use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
};
use rand_core::{OsRng, RngCore};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::{
    AppState,
    entities::{now_sec, session, user},
    error::AppResult,
    urls,
};

pub const SESSION_COOKIE: &str = "sessionid";

/// Verified against when the username is unknown, so both paths cost one argon2 check.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("movist-unknown-user").ok());

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("failed to hash password: {e}"))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    password: &str,
) -> AppResult<user::Model> {
    let model = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(password)?),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Returns the named account, creating it with `password` when missing.
pub async fn ensure_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> AppResult<user::Model> {
    let existing =
        user::Entity::find().filter(user::Column::Username.eq(username)).one(db).await?;
    match existing {
        Some(user) => Ok(user),
        None => {
            let user = create_user(db, username, "", password).await?;
            tracing::info!(username = %user.username, "created account");
            Ok(user)
        },
    }
}

/// Checks a username/password pair. Unknown users and wrong passwords look the same.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> AppResult<Option<user::Model>> {
    let user = user::Entity::find().filter(user::Column::Username.eq(username)).one(db).await?;
    match user {
        Some(user) => Ok(verify_password(password, &user.password_hash).then_some(user)),
        None => {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                verify_password(password, hash);
            }
            Ok(None)
        },
    }
}

/// Opens a session for `user_id` and returns its cookie token.
pub async fn start_session(
    db: &DatabaseConnection,
    user_id: i32,
    ttl_seconds: i64,
) -> AppResult<String> {
    let now = now_sec();

    session::Entity::delete_many()
        .filter(session::Column::ExpiresAt.lte(now))
        .exec(db)
        .await?;

    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    let token = hex::encode(bytes);

    session::ActiveModel {
        token: Set(token.clone()),
        user_id: Set(user_id),
        expires_at: Set(now + ttl_seconds),
        created_at: Set(now),
    }
    .insert(db)
    .await?;

    Ok(token)
}

pub async fn end_session(db: &DatabaseConnection, token: &str) -> AppResult<()> {
    session::Entity::delete_by_id(token.to_string()).exec(db).await?;
    Ok(())
}

/// The user owning a live session, if any.
pub async fn session_user(
    db: &DatabaseConnection,
    token: &str,
) -> AppResult<Option<user::Model>> {
    let found = session::Entity::find_by_id(token.to_string())
        .filter(session::Column::ExpiresAt.gt(now_sec()))
        .find_also_related(user::Entity)
        .one(db)
        .await?;
    Ok(found.and_then(|(_, user)| user))
}

async fn caller(parts: &Parts, state: &AppState) -> AppResult<Option<user::Model>> {
    let jar = CookieJar::from_headers(&parts.headers);
    match jar.get(SESSION_COOKIE) {
        Some(cookie) => session_user(&state.db, cookie.value()).await,
        None => Ok(None),
    }
}

/// Caller identity for pages that render for anyone.
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<user::Model>);

impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        caller(parts, state).await.map(MaybeUser).map_err(IntoResponse::into_response)
    }
}

/// An authenticated caller. Anonymous requests are sent to the login page.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub user::Model);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match caller(parts, state).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => {
                let next = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
                tracing::debug!(path = %next, "anonymous request to protected page");
                Err(Redirect::to(&urls::login_with_next(next)).into_response())
            },
            Err(err) => Err(err.into_response()),
        }
    }
}

/// Per-username limit on login attempts.
pub struct LoginThrottle {
    limiter: RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>,
}

impl LoginThrottle {
    pub fn new(per_minute: u32) -> Self {
        Self::with_quota(Quota::per_minute(
            NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN),
        ))
    }

    pub fn with_quota(quota: Quota) -> Self {
        Self { limiter: RateLimiter::keyed(quota) }
    }

    /// Consumes one attempt for `username`; false once the quota is spent.
    pub fn allow(&self, username: &str) -> bool {
        self.limiter.check_key(&username.to_lowercase()).is_ok()
    }

    /// Number of usernames currently tracked.
    pub fn tracked(&self) -> usize {
        self.limiter.len()
    }

    /// Forgets usernames whose quota has fully replenished.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Prunes on a fixed interval for as long as the process runs.
    pub fn spawn_pruner(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(every);
            loop {
                tick.tick().await;
                let before = self.tracked();
                self.prune();
                tracing::debug!(before, after = self.tracked(), "pruned login throttle");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("s3cret!").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret!", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_unknown_user_hash_is_valid_argon2() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(PasswordHash::new(hash).is_ok());
        assert!(!verify_password("guess", hash));
    }

    #[test]
    fn test_prune_drops_replenished_usernames() {
        let quota = Quota::with_period(Duration::from_millis(10)).unwrap();
        let throttle = LoginThrottle::with_quota(quota);
        assert!(throttle.allow("alice"));
        assert!(throttle.allow("bob"));
        assert_eq!(throttle.tracked(), 2);

        std::thread::sleep(Duration::from_millis(60));
        throttle.prune();
        assert_eq!(throttle.tracked(), 0);
        assert!(throttle.allow("alice"));
    }

    #[tokio::test]
    async fn test_pruner_task_runs() {
        let throttle = Arc::new(LoginThrottle::with_quota(
            Quota::with_period(Duration::from_millis(5)).unwrap(),
        ));
        throttle.allow("mallory-1");
        throttle.allow("mallory-2");

        let handle = throttle.clone().spawn_pruner(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(throttle.tracked(), 0);
        handle.abort();
    }

    #[test]
    fn test_login_throttle_is_per_username() {
        let throttle = LoginThrottle::new(2);
        assert!(throttle.allow("alice"));
        assert!(throttle.allow("Alice"));
        assert!(!throttle.allow("ALICE"));
        assert!(throttle.allow("bob"));
    }
}
