use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Item;

/// Text fields of a new catalog item; the image travels separately.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub title: String,
    pub price: i64,
    #[serde(default)]
    pub is_active: bool,
    pub description: String,
    pub category: String,
}

/// Full replacement of an item's fields.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub title: String,
    pub price: i64,
    #[serde(default)]
    pub is_active: bool,
    pub image_path: Option<String>,
    pub description: String,
    pub category: String,
}

/// Image attached to an upload form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Multipart body accepted by `POST /upload`.
#[derive(Deserialize, ToSchema)]
pub struct UploadItemForm {
    pub title: String,
    pub price: i64,
    #[serde(rename = "isActive")]
    pub is_active: Option<String>,
    pub description: String,
    pub category: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ItemList {
    #[schema(value_type = Vec<Item>)]
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadFormInfo {
    pub fields: Vec<String>,
    pub accepted_extensions: Vec<String>,
    pub max_upload_bytes: usize,
}
