#![allow(dead_code)]

use axum_storefront::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::items::CreateItemRequest,
    entity::users::ActiveModel as UserActive,
    middleware::auth::AuthUser,
    models::{ADMIN_STATUS, Item, USER_STATUS},
    services::{auth_service::hash_password, catalog_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use tempfile::TempDir;

/// Fresh in-memory database with migrations applied and a scratch media dir.
/// The returned `TempDir` must outlive the state.
pub async fn setup_state() -> anyhow::Result<(AppState, TempDir)> {
    let media = tempfile::tempdir()?;
    let config = AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        session_ttl_hours: 1,
        secure_cookies: false,
        media_dir: media.path().to_path_buf(),
        max_upload_bytes: 1024 * 1024,
    };

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    Ok((AppState::new(orm, config), media))
}

pub async fn create_user(
    state: &AppState,
    name: &str,
    password: &str,
    status: &str,
) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(format!("{name}@example.com")),
        password_hash: Set(hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?),
        status: Set(status.to_string()),
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        name: user.name,
        status: user.status,
    })
}

pub async fn create_admin(state: &AppState) -> anyhow::Result<AuthUser> {
    create_user(state, "admin", "admin-pass", ADMIN_STATUS).await
}

pub async fn create_customer(state: &AppState) -> anyhow::Result<AuthUser> {
    create_user(state, "customer", "customer-pass", USER_STATUS).await
}

pub fn item_request(title: &str, category: &str, price: i64) -> CreateItemRequest {
    CreateItemRequest {
        title: title.to_string(),
        price,
        is_active: true,
        description: format!("{title} description"),
        category: category.to_string(),
    }
}

pub async fn create_item(
    state: &AppState,
    admin: &AuthUser,
    title: &str,
    category: &str,
) -> anyhow::Result<Item> {
    let resp =
        catalog_service::create_item(state, admin, item_request(title, category, 100), None)
            .await?;
    resp.data.ok_or_else(|| anyhow::anyhow!("missing item"))
}
