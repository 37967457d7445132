use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::EntityTrait;
use tower_sessions::Session;

use crate::{
    entity::Users,
    error::AppError,
    middleware::session::USER_ID_KEY,
    models::ADMIN_STATUS,
    state::AppState,
};

/// The user behind the current session, re-read from the database on every request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub name: String,
    pub status: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.status == ADMIN_STATUS
    }
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Resolve the user bound to the request's session.
///
/// Requests without a session, sessions that were flushed or expired and
/// sessions of deleted users all resolve to an anonymous caller.
pub async fn resolve_session(parts: &Parts, state: &AppState) -> Result<Option<AuthUser>, AppError> {
    let Some(session) = parts.extensions.get::<Session>().cloned() else {
        return Ok(None);
    };
    let Some(user_id) = session.get::<i32>(USER_ID_KEY).await? else {
        return Ok(None);
    };

    let user = Users::find_by_id(user_id).one(&state.orm).await?;
    Ok(user.map(|u| AuthUser {
        user_id: u.id,
        name: u.name,
        status: u.status,
    }))
}

/// Session lookup that never rejects an anonymous caller.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_session(parts, state).await?))
    }
}

/// Extractor for admin-only endpoints.
///
/// Anonymous and non-admin callers are sent back to the public catalog
/// before the handler body runs.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

pub enum AdminRejection {
    RedirectToCatalog,
    Failed(AppError),
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToCatalog => Redirect::to("/").into_response(),
            Self::Failed(err) => err.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_session(parts, state).await {
            Ok(Some(user)) if user.is_admin() => Ok(Self(user)),
            Ok(Some(user)) => {
                tracing::info!(user_id = user.user_id, uri = %parts.uri, "non-admin denied");
                Err(AdminRejection::RedirectToCatalog)
            }
            Ok(None) => Err(AdminRejection::RedirectToCatalog),
            Err(err) => Err(AdminRejection::Failed(err)),
        }
    }
}
