use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use tower_sessions::Session;

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, SessionView, UpdateUserStatusRequest},
    error::AppResult,
    middleware::{
        auth::{AuthUser, MaybeAuthUser, RequireAdmin},
        session::USER_ID_KEY,
    },
    models::User,
    response::{ApiResponse, Meta},
    services::auth_service::{self, login_user, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_view).post(login))
        .route("/register", get(register_view).post(register))
        .route("/logout", get(logout))
        .route("/update_user_status/{user_id}", post(update_user_status))
}

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Current session, if any", body = ApiResponse<SessionView>)
    ),
    tag = "Auth"
)]
pub async fn login_view(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> AppResult<Json<ApiResponse<SessionView>>> {
    session_view(&state, user).await
}

#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Current session, if any", body = ApiResponse<SessionView>)
    ),
    tag = "Auth"
)]
pub async fn register_view(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> AppResult<Json<ApiResponse<SessionView>>> {
    session_view(&state, user).await
}

async fn session_view(
    state: &AppState,
    user: Option<AuthUser>,
) -> AppResult<Json<ApiResponse<SessionView>>> {
    let user = match user {
        Some(user) => auth_service::get_profile(state, &user).await?.data,
        None => None,
    };
    Ok(Json(ApiResponse::success(
        "Session",
        SessionView { user },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Register user", body = ApiResponse<User>),
        (status = 400, description = "Name taken or missing field")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = register_user(&state, caller.as_ref(), payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user and set the session cookie", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = login_user(&state, payload).await?;
    if let Some(data) = resp.data.as_ref() {
        // Fresh id on privilege change.
        session.cycle_id().await?;
        session.insert(USER_ID_KEY, data.user.id).await?;
    }
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 200, description = "End the current session", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Auth"
)]
pub async fn logout(
    session: Session,
    MaybeAuthUser(user): MaybeAuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if let Some(user) = user {
        tracing::info!(user_id = user.user_id, "user logged out");
    }
    session.flush().await?;
    Ok(Json(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/update_user_status/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserStatusRequest,
    responses(
        (status = 200, description = "Set a user's status (admin only)", body = ApiResponse<User>),
        (status = 303, description = "Redirect to the catalog for non-admins"),
        (status = 404, description = "User not found"),
    ),
    tag = "Auth"
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::update_user_status(&state, &admin, user_id, payload).await?;
    Ok(Json(resp))
}
