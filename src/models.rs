use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status value that unlocks catalog and order management.
pub const ADMIN_STATUS: &str = "Admin";
/// Status assigned to self-service registrations.
pub const USER_STATUS: &str = "User";

pub const DEFAULT_ORDER_STATUS: &str = "unprocessed";
pub const DEFAULT_PAYMEN_STATUS: &str = "unpaid";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: i32,
    pub title: String,
    pub price: i64,
    pub is_active: bool,
    pub image_path: Option<String>,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub client_number: String,
    pub client_name: String,
    pub product_title: String,
    pub item_id: Option<i32>,
    pub order_status: String,
    pub paymen_status: String,
    pub date: DateTime<Utc>,
}

/// Account as exposed over the API; the password hash never leaves the service layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub status: String,
}
