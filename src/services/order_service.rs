use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::orders::{BuyForm, BuyRequest, OrderConfirmation, OrderList, UpdateStatusRequest},
    entity::orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{DEFAULT_ORDER_STATUS, DEFAULT_PAYMEN_STATUS, Order},
    response::{ApiResponse, Meta},
    services::catalog_service,
    state::AppState,
};

/// Which of the two independent status fields an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    Order,
    Payment,
}

pub async fn buy_form(state: &AppState, title: String) -> AppResult<ApiResponse<BuyForm>> {
    let item = catalog_service::find_by_title(state, &title).await?;
    Ok(ApiResponse::success(
        "Order form",
        BuyForm { title, item },
        Some(Meta::empty()),
    ))
}

/// Place an order for a product title.
///
/// The title is stored verbatim; when it names an existing item the item's id
/// is recorded as well. The returned order carries the id assigned by the insert.
pub async fn buy(
    state: &AppState,
    title: String,
    payload: BuyRequest,
) -> AppResult<ApiResponse<Order>> {
    let BuyRequest {
        client_number,
        client_name,
    } = payload;
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("product title must not be empty".into()));
    }

    let item_id = catalog_service::find_by_title(state, &title)
        .await?
        .map(|item| item.id);

    let order = OrderActive {
        id: NotSet,
        client_number: Set(client_number),
        client_name: Set(client_name),
        product_title: Set(title),
        item_id: Set(item_id),
        order_status: Set(DEFAULT_ORDER_STATUS.into()),
        paymen_status: Set(DEFAULT_PAYMEN_STATUS.into()),
        date: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        order_id = order.id,
        item_id = ?order.item_id,
        product_title = %order.product_title,
        "order created"
    );

    Ok(ApiResponse::success(
        "Order accepted",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

/// Every order, oldest first.
pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let finder = Orders::find()
        .order_by_asc(OrderCol::Date)
        .order_by_asc(OrderCol::Id);

    let total = finder.clone().count(&state.orm).await?;
    let orders = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(Meta::total(total)),
    ))
}

pub async fn get_confirmation(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<OrderConfirmation>> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => order_from_entity(o),
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Order accepted",
        OrderConfirmation::from(order),
        Some(Meta::empty()),
    ))
}

/// Overwrite one status field; any non-blank text is accepted and the other
/// field is left untouched.
pub async fn update_status(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    field: StatusField,
    payload: UpdateStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let status = payload.status;
    if status.trim().is_empty() {
        return Err(AppError::BadRequest("status must not be empty".into()));
    }

    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let mut active: OrderActive = existing.into();
    match field {
        StatusField::Order => active.order_status = Set(status),
        StatusField::Payment => active.paymen_status = Set(status),
    }
    let order = active.update(&state.orm).await?;

    tracing::info!(
        order_id = order.id,
        user_id = user.user_id,
        ?field,
        order_status = %order.order_status,
        paymen_status = %order.paymen_status,
        "order status updated"
    );

    Ok(ApiResponse::success(
        "Status updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        client_number: model.client_number,
        client_name: model.client_name,
        product_title: model.product_title,
        item_id: model.item_id,
        order_status: model.order_status,
        paymen_status: model.paymen_status,
        date: model.date.with_timezone(&Utc),
    }
}
