use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    middleware::auth::MaybeAuthUser,
    response::{ApiResponse, Meta},
    services::auth_service,
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct AboutData {
    pub name: String,
    pub version: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/about", get(about))
        .route("/profile", get(profile))
}

#[utoipa::path(
    get,
    path = "/about",
    responses(
        (status = 200, description = "About the storefront", body = ApiResponse<AboutData>)
    ),
    tag = "Pages"
)]
pub async fn about() -> Json<ApiResponse<AboutData>> {
    let data = AboutData {
        name: "storefront".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(ApiResponse::success("About", data, Some(Meta::empty())))
}

#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Logged-in user", body = ApiResponse<crate::models::User>),
        (status = 303, description = "Redirect to login for anonymous callers"),
    ),
    tag = "Pages"
)]
pub async fn profile(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(Redirect::to("/login").into_response());
    };
    let resp = auth_service::get_profile(&state, &user).await?;
    Ok(Json(resp).into_response())
}
