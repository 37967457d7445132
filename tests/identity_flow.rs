mod common;

use axum_storefront::{
    dto::auth::{LoginRequest, RegisterRequest, UpdateUserStatusRequest},
    error::AppError,
    models::{ADMIN_STATUS, USER_STATUS},
    services::auth_service,
};

fn register_request(name: &str, password: &str, status: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: format!("{name}@example.com"),
        password: password.to_string(),
        status: status.map(str::to_string),
    }
}

fn login_request(name: &str, password: &str) -> LoginRequest {
    LoginRequest {
        name: name.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn register_then_login_returns_the_user() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;

    let user = auth_service::register_user(&state, None, register_request("olga", "s3cret", None))
        .await?
        .data
        .expect("user");
    assert_eq!(user.status, USER_STATUS);

    let login = auth_service::login_user(&state, login_request("olga", "s3cret"))
        .await?
        .data
        .expect("login");
    assert_eq!(login.user.id, user.id);
    assert_eq!(login.user.status, USER_STATUS);
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_name_are_rejected() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    auth_service::register_user(&state, None, register_request("ivan", "right", None)).await?;

    let wrong = auth_service::login_user(&state, login_request("ivan", "wrong")).await;
    assert!(matches!(wrong, Err(AppError::Unauthorized)));

    let unknown = auth_service::login_user(&state, login_request("nobody", "right")).await;
    assert!(matches!(unknown, Err(AppError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn self_assigned_admin_status_is_ignored() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;

    let user = auth_service::register_user(
        &state,
        None,
        register_request("mallory", "pw", Some(ADMIN_STATUS)),
    )
    .await?
    .data
    .expect("user");
    assert_eq!(user.status, USER_STATUS);

    let customer = common::create_customer(&state).await?;
    let other = auth_service::register_user(
        &state,
        Some(&customer),
        register_request("trudy", "pw", Some(ADMIN_STATUS)),
    )
    .await?
    .data
    .expect("user");
    assert_eq!(other.status, USER_STATUS);
    Ok(())
}

#[tokio::test]
async fn admin_may_register_another_admin() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    let admin = common::create_admin(&state).await?;

    let user = auth_service::register_user(
        &state,
        Some(&admin),
        register_request("deputy", "pw", Some(ADMIN_STATUS)),
    )
    .await?
    .data
    .expect("user");
    assert_eq!(user.status, ADMIN_STATUS);
    Ok(())
}

#[tokio::test]
async fn duplicate_names_are_rejected() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    auth_service::register_user(&state, None, register_request("sam", "one", None)).await?;

    let again = auth_service::register_user(&state, None, register_request("sam", "two", None)).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn register_requires_name_and_password() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;

    let no_name = auth_service::register_user(&state, None, register_request(" ", "pw", None)).await;
    assert!(matches!(no_name, Err(AppError::BadRequest(_))));

    let no_password = auth_service::register_user(&state, None, register_request("zoe", "", None)).await;
    assert!(matches!(no_password, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn admin_grants_status() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    let admin = common::create_admin(&state).await?;
    let customer = common::create_customer(&state).await?;

    let denied = auth_service::update_user_status(
        &state,
        &customer,
        customer.user_id,
        UpdateUserStatusRequest {
            status: ADMIN_STATUS.into(),
        },
    )
    .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let promoted = auth_service::update_user_status(
        &state,
        &admin,
        customer.user_id,
        UpdateUserStatusRequest {
            status: ADMIN_STATUS.into(),
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(promoted.status, ADMIN_STATUS);

    let missing = auth_service::update_user_status(
        &state,
        &admin,
        9999,
        UpdateUserStatusRequest {
            status: USER_STATUS.into(),
        },
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    Ok(())
}
