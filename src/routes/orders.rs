use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{BuyForm, BuyRequest, OrderConfirmation, OrderList, UpdateStatusRequest},
    error::AppResult,
    middleware::auth::RequireAdmin,
    models::Order,
    response::ApiResponse,
    services::order_service::{self, StatusField},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/update_order_status/{order_id}", post(update_order_status))
        .route("/update_paymen_status/{order_id}", post(update_paymen_status))
        .route("/buy/{title}", get(buy_form).post(buy))
        .route("/order_accepted/{order_id}", get(order_accepted))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders by date (admin only)", body = ApiResponse<OrderList>),
        (status = 303, description = "Redirect to the catalog for non-admins"),
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/update_order_status/{order_id}",
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Set order status (admin only)", body = ApiResponse<Order>),
        (status = 303, description = "Redirect to the catalog for non-admins"),
        (status = 400, description = "Blank status"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp =
        order_service::update_status(&state, &admin, order_id, StatusField::Order, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/update_paymen_status/{order_id}",
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Set payment status (admin only)", body = ApiResponse<Order>),
        (status = 303, description = "Redirect to the catalog for non-admins"),
        (status = 400, description = "Blank status"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn update_paymen_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp =
        order_service::update_status(&state, &admin, order_id, StatusField::Payment, payload)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/buy/{title}",
    params(
        ("title" = String, Path, description = "Product title")
    ),
    responses(
        (status = 200, description = "Order form context", body = ApiResponse<BuyForm>)
    ),
    tag = "Orders"
)]
pub async fn buy_form(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<ApiResponse<BuyForm>>> {
    let resp = order_service::buy_form(&state, title).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/buy/{title}",
    params(
        ("title" = String, Path, description = "Product title")
    ),
    request_body = BuyRequest,
    responses(
        (status = 200, description = "Order placed", body = ApiResponse<Order>),
        (status = 500, description = "Error"),
    ),
    tag = "Orders"
)]
pub async fn buy(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Json(payload): Json<BuyRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::buy(&state, title, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/order_accepted/{order_id}",
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order confirmation", body = ApiResponse<OrderConfirmation>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn order_accepted(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderConfirmation>>> {
    let resp = order_service::get_confirmation(&state, order_id).await?;
    Ok(Json(resp))
}
