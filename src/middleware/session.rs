//! Server-side sessions on top of `tower-sessions`.
//!
//! The cookie only carries an opaque session id. The session map lives in the
//! `sessions` table, so logging out or expiring a session takes effect for
//! every copy of the cookie.

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, sea_query::OnConflict};
use tower_sessions::{
    ExpiredDeletion, Expiry, SessionManagerLayer, SessionStore,
    cookie::{
        SameSite,
        time::{Duration, OffsetDateTime},
    },
    session::{Id, Record},
    session_store,
};

use crate::{
    config::AppConfig,
    db::OrmConn,
    entity::sessions::{ActiveModel, Column, Entity as Sessions},
};

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Session key holding the logged-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Session store backed by the application database.
#[derive(Debug, Clone)]
pub struct OrmSessionStore {
    orm: OrmConn,
}

impl OrmSessionStore {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

fn backend(err: sea_orm::DbErr) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}

#[async_trait]
impl SessionStore for OrmSessionStore {
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let data = serde_json::to_string(&record.data)
            .map_err(|err| session_store::Error::Encode(err.to_string()))?;
        let row = ActiveModel {
            id: Set(record.id.to_string()),
            data: Set(data),
            expires_at: Set(record.expiry_date.unix_timestamp()),
        };

        Sessions::insert(row)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([Column::Data, Column::ExpiresAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.orm)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let row = Sessions::find_by_id(session_id.to_string())
            .filter(Column::ExpiresAt.gt(now))
            .one(&self.orm)
            .await
            .map_err(backend)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let data = serde_json::from_str(&row.data)
            .map_err(|err| session_store::Error::Decode(err.to_string()))?;
        let expiry_date = OffsetDateTime::from_unix_timestamp(row.expires_at)
            .map_err(|err| session_store::Error::Decode(err.to_string()))?;

        Ok(Some(Record {
            id: *session_id,
            data,
            expiry_date,
        }))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        Sessions::delete_by_id(session_id.to_string())
            .exec(&self.orm)
            .await
            .map_err(backend)?;
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for OrmSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let removed = Sessions::delete_many()
            .filter(Column::ExpiresAt.lte(now))
            .exec(&self.orm)
            .await
            .map_err(backend)?
            .rows_affected;
        if removed > 0 {
            tracing::debug!(removed, "expired sessions purged");
        }
        Ok(())
    }
}

/// Cookie-backed session layer. Sessions expire after `session_ttl_hours`
/// of inactivity.
pub fn session_layer(orm: OrmConn, config: &AppConfig) -> SessionManagerLayer<OrmSessionStore> {
    SessionManagerLayer::new(OrmSessionStore::new(orm))
        .with_name(SESSION_COOKIE)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            config.session_ttl_hours,
        )))
        .with_secure(config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Periodically drop expired rows from the session table.
pub async fn purge_expired_sessions(store: OrmSessionStore, period: StdDuration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        if let Err(err) = store.delete_expired().await {
            tracing::warn!(error = %err, "failed to purge expired sessions");
        }
    }
}
