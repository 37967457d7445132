use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Only honored when an admin performs the registration.
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub user: Option<User>,
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct UpdateUserStatusRequest {
    pub status: String,
}
