mod common;

use axum_storefront::{
    dto::orders::{BuyRequest, UpdateStatusRequest},
    error::AppError,
    models::{DEFAULT_ORDER_STATUS, DEFAULT_PAYMEN_STATUS},
    services::order_service::{self, StatusField},
};
use chrono::Utc;

fn buy_request(phone: &str, name: &str) -> BuyRequest {
    BuyRequest {
        client_number: phone.to_string(),
        client_name: name.to_string(),
    }
}

#[tokio::test]
async fn buy_records_client_and_default_statuses() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    let issued_at = Utc::now();

    let order = order_service::buy(&state, "Mystery Box".into(), buy_request("+15550001", "Nina"))
        .await?
        .data
        .expect("order");

    assert_eq!(order.product_title, "Mystery Box");
    assert_eq!(order.client_number, "+15550001");
    assert_eq!(order.client_name, "Nina");
    assert_eq!(order.order_status, DEFAULT_ORDER_STATUS);
    assert_eq!(order.paymen_status, DEFAULT_PAYMEN_STATUS);
    assert_eq!(order.item_id, None);
    assert!(order.date >= issued_at);
    Ok(())
}

#[tokio::test]
async fn buy_returns_the_inserted_id() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;

    let first = order_service::buy(&state, "A".into(), buy_request("1", "One"))
        .await?
        .data
        .expect("order");
    let second = order_service::buy(&state, "B".into(), buy_request("2", "Two"))
        .await?
        .data
        .expect("order");
    assert_ne!(first.id, second.id);

    let confirmation = order_service::get_confirmation(&state, first.id)
        .await?
        .data
        .expect("confirmation");
    assert_eq!(confirmation.id, first.id);
    assert_eq!(confirmation.product_title, "A");
    Ok(())
}

#[tokio::test]
async fn buy_links_existing_item_by_title() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    let admin = common::create_admin(&state).await?;
    let item = common::create_item(&state, &admin, "Lantern", "Outdoor").await?;

    let form = order_service::buy_form(&state, "Lantern".into())
        .await?
        .data
        .expect("form");
    assert_eq!(form.item.map(|i| i.id), Some(item.id));

    let order = order_service::buy(&state, "Lantern".into(), buy_request("3", "Lee"))
        .await?
        .data
        .expect("order");
    assert_eq!(order.item_id, Some(item.id));
    Ok(())
}

#[tokio::test]
async fn status_updates_touch_only_their_field() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    let admin = common::create_admin(&state).await?;
    let order = order_service::buy(&state, "Desk".into(), buy_request("4", "Dan"))
        .await?
        .data
        .expect("order");

    let shipped = order_service::update_status(
        &state,
        &admin,
        order.id,
        StatusField::Order,
        UpdateStatusRequest {
            status: "shipped".into(),
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(shipped.order_status, "shipped");
    assert_eq!(shipped.paymen_status, DEFAULT_PAYMEN_STATUS);
    assert_eq!(shipped.client_name, order.client_name);
    assert_eq!(shipped.client_number, order.client_number);
    assert_eq!(shipped.product_title, order.product_title);
    assert_eq!(shipped.date, order.date);

    let paid = order_service::update_status(
        &state,
        &admin,
        order.id,
        StatusField::Payment,
        UpdateStatusRequest {
            status: "paid in cash".into(),
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(paid.paymen_status, "paid in cash");
    assert_eq!(paid.order_status, "shipped");
    Ok(())
}

#[tokio::test]
async fn status_update_rejects_blank_and_unknown_orders() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    let admin = common::create_admin(&state).await?;
    let order = order_service::buy(&state, "Lamp".into(), buy_request("5", "Eve"))
        .await?
        .data
        .expect("order");

    let blank = order_service::update_status(
        &state,
        &admin,
        order.id,
        StatusField::Order,
        UpdateStatusRequest { status: "  ".into() },
    )
    .await;
    assert!(matches!(blank, Err(AppError::BadRequest(_))));

    let missing = order_service::update_status(
        &state,
        &admin,
        order.id + 100,
        StatusField::Payment,
        UpdateStatusRequest {
            status: "paid".into(),
        },
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn non_admin_cannot_list_or_update() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    let customer = common::create_customer(&state).await?;
    let order = order_service::buy(&state, "Rug".into(), buy_request("6", "Ray"))
        .await?
        .data
        .expect("order");

    assert!(matches!(
        order_service::list_orders(&state, &customer).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        order_service::update_status(
            &state,
            &customer,
            order.id,
            StatusField::Order,
            UpdateStatusRequest {
                status: "cancelled".into(),
            },
        )
        .await,
        Err(AppError::Forbidden)
    ));

    let confirmation = order_service::get_confirmation(&state, order.id)
        .await?
        .data
        .expect("confirmation");
    assert_eq!(confirmation.order_status, DEFAULT_ORDER_STATUS);
    Ok(())
}

#[tokio::test]
async fn orders_are_listed_oldest_first() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    let admin = common::create_admin(&state).await?;

    let mut placed = Vec::new();
    for title in ["first", "second", "third"] {
        let order = order_service::buy(&state, title.into(), buy_request("7", "Kim"))
            .await?
            .data
            .expect("order");
        placed.push(order.id);
    }

    let listed = order_service::list_orders(&state, &admin).await?;
    assert_eq!(listed.meta.as_ref().and_then(|m| m.total), Some(3));
    let ids: Vec<_> = listed.data.expect("orders").items.iter().map(|o| o.id).collect();
    assert_eq!(ids, placed);
    Ok(())
}

#[tokio::test]
async fn confirmation_for_unknown_order_is_not_found() -> anyhow::Result<()> {
    let (state, _media) = common::setup_state().await?;
    let result = order_service::get_confirmation(&state, 999).await;
    assert!(matches!(result, Err(AppError::NotFound)));
    Ok(())
}
