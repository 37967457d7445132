use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UpdateUserStatusRequest},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{USER_STATUS, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

/// Create an account.
///
/// A requested `status` only sticks when an admin is performing the
/// registration; everyone else starts out as a plain user.
pub async fn register_user(
    state: &AppState,
    caller: Option<&AuthUser>,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest {
        name,
        email,
        password,
        status,
    } = payload;

    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if password.is_empty() {
        return Err(AppError::BadRequest("password must not be empty".into()));
    }

    let exist = Users::find()
        .filter(UserCol::Name.eq(name.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("Name is already taken".to_string()));
    }

    let requested = status.filter(|s| !s.trim().is_empty());
    let status = match (caller, requested) {
        (Some(admin), Some(requested)) if admin.is_admin() => requested,
        (_, Some(requested)) => {
            tracing::warn!(name = %name, requested = %requested, "ignoring self-assigned status");
            USER_STATUS.to_string()
        }
        (_, None) => USER_STATUS.to_string(),
    };

    let password_hash = hash_password(&password)?;

    let user = UserActive {
        id: NotSet,
        name: Set(name),
        email: Set(email),
        password_hash: Set(password_hash),
        status: Set(status),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest("Name is already taken".to_string())
        }
        _ => AppError::OrmError(err),
    })?;

    tracing::info!(user_id = user.id, status = %user.status, "user registered");
    Ok(ApiResponse::success(
        "User created",
        user_from_entity(user),
        None,
    ))
}

/// Check a name/password pair. Binding the user to a session is left to the caller.
pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { name, password } = payload;
    let user = Users::find()
        .filter(UserCol::Name.eq(name.as_str()))
        .order_by_asc(UserCol::Id)
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::info!(user_id = user.id, "login rejected");
        return Err(AppError::Unauthorized);
    }

    tracing::info!(user_id = user.id, "user logged in");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            user: user_from_entity(user),
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let found = Users::find_by_id(user.user_id).one(&state.orm).await?;
    match found {
        Some(u) => Ok(ApiResponse::success("Profile", user_from_entity(u), None)),
        None => Err(AppError::NotFound),
    }
}

/// Grant or revoke a role. Takes effect on the target's next request.
pub async fn update_user_status(
    state: &AppState,
    admin: &AuthUser,
    id: i32,
    payload: UpdateUserStatusRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(admin)?;
    if payload.status.trim().is_empty() {
        return Err(AppError::BadRequest("status must not be empty".into()));
    }

    let existing = Users::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(u) => u,
        None => return Err(AppError::NotFound),
    };

    let mut active: UserActive = existing.into();
    active.status = Set(payload.status);
    let user = active.update(&state.orm).await?;

    tracing::info!(
        user_id = user.id,
        admin_id = admin.user_id,
        status = %user.status,
        "user status updated"
    );
    Ok(ApiResponse::success(
        "Status updated",
        user_from_entity(user),
        Some(Meta::empty()),
    ))
}

pub(crate) fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        status: model.status,
    }
}
