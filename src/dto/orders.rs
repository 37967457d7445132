use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Item, Order};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BuyRequest {
    pub client_number: String,
    pub client_name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}

/// Context for the order form shown before buying.
#[derive(Debug, Serialize, ToSchema)]
pub struct BuyForm {
    pub title: String,
    pub item: Option<Item>,
}

/// Customer-facing view of an accepted order; contact details are omitted.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderConfirmation {
    pub id: i32,
    pub product_title: String,
    pub order_status: String,
    pub paymen_status: String,
    pub date: DateTime<Utc>,
}

impl From<Order> for OrderConfirmation {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            product_title: order.product_title,
            order_status: order.order_status,
            paymen_status: order.paymen_status,
            date: order.date,
        }
    }
}
