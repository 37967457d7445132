use axum::{
    Json, Router,
    extract::{Multipart, Path, State, multipart::MultipartError},
    routing::{get, post},
};

use crate::{
    dto::items::{
        CreateItemRequest, ItemList, UpdateItemRequest, UploadFormInfo, UploadItemForm,
        UploadedImage,
    },
    error::{AppError, AppResult},
    middleware::auth::RequireAdmin,
    models::Item,
    response::{ApiResponse, Meta},
    services::catalog_service,
    state::AppState,
    storage::IMAGE_EXTENSIONS,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/create", get(manage))
        .route("/upload", get(upload_form).post(upload))
        .route("/delete/{item_id}", post(delete_item))
        .route("/update_order/{item_id}", post(update_item))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Catalog ordered by category", body = ApiResponse<ItemList>)
    ),
    tag = "Catalog"
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ItemList>>> {
    let resp = catalog_service::list_items(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/create",
    responses(
        (status = 200, description = "Catalog management view (admin only)", body = ApiResponse<ItemList>),
        (status = 303, description = "Redirect to the catalog for non-admins"),
    ),
    tag = "Catalog"
)]
pub async fn manage(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<ItemList>>> {
    let resp = catalog_service::list_items(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/upload",
    responses(
        (status = 200, description = "Upload form description (admin only)", body = ApiResponse<UploadFormInfo>),
        (status = 303, description = "Redirect to the catalog for non-admins"),
    ),
    tag = "Catalog"
)]
pub async fn upload_form(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<ApiResponse<UploadFormInfo>> {
    let info = UploadFormInfo {
        fields: ["title", "price", "isActive", "description", "category", "image"]
            .into_iter()
            .map(String::from)
            .collect(),
        accepted_extensions: IMAGE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        max_upload_bytes: state.config.max_upload_bytes,
    };
    Json(ApiResponse::success("Upload form", info, Some(Meta::empty())))
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadItemForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Create item with optional image (admin only)", body = ApiResponse<Item>),
        (status = 303, description = "Redirect to the catalog for non-admins"),
        (status = 400, description = "Missing or invalid field"),
        (status = 500, description = "Error"),
    ),
    tag = "Catalog"
)]
pub async fn upload(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Item>>> {
    let (payload, image) = read_upload_form(multipart).await?;
    let resp = catalog_service::create_item(&state, &admin, payload, image).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/delete/{item_id}",
    params(
        ("item_id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Deleted item (admin only)", body = ApiResponse<serde_json::Value>),
        (status = 303, description = "Redirect to the catalog for non-admins"),
        (status = 404, description = "Item not found"),
    ),
    tag = "Catalog"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(item_id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_item(&state, &admin, item_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/update_order/{item_id}",
    params(
        ("item_id" = i32, Path, description = "Item ID")
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Overwrite item fields (admin only)", body = ApiResponse<Item>),
        (status = 303, description = "Redirect to the catalog for non-admins"),
        (status = 404, description = "Item not found"),
    ),
    tag = "Catalog"
)]
pub async fn update_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(item_id): Path<i32>,
    Json(payload): Json<UpdateItemRequest>,
) -> AppResult<Json<ApiResponse<Item>>> {
    let resp = catalog_service::update_item(&state, &admin, item_id, payload).await?;
    Ok(Json(resp))
}

async fn read_upload_form(
    mut multipart: Multipart,
) -> AppResult<(CreateItemRequest, Option<UploadedImage>)> {
    let mut title = None;
    let mut price = None;
    let mut is_active = false;
    let mut description = None;
    let mut category = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                // Browsers send an empty part when no file was chosen.
                if !file_name.is_empty() && !bytes.is_empty() {
                    image = Some(UploadedImage {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "title" => title = Some(field.text().await.map_err(bad_multipart)?),
            "price" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                let parsed = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| AppError::BadRequest(format!("price is not an integer: {raw}")))?;
                price = Some(parsed);
            }
            "isActive" | "is_active" => {
                is_active = is_checked(&field.text().await.map_err(bad_multipart)?);
            }
            "description" => description = Some(field.text().await.map_err(bad_multipart)?),
            "category" => category = Some(field.text().await.map_err(bad_multipart)?),
            other => tracing::debug!(field = %other, "ignoring unknown upload field"),
        }
    }

    let payload = CreateItemRequest {
        title: required("title", title)?,
        price: required("price", price)?,
        is_active,
        description: required("description", description)?,
        category: required("category", category)?,
    };
    Ok((payload, image))
}

fn required<T>(field: &str, value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| AppError::BadRequest(format!("missing field {field}")))
}

/// HTML checkboxes submit a value only when ticked.
fn is_checked(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !value.eq_ignore_ascii_case("false")
        && !value.eq_ignore_ascii_case("off")
        && value != "0"
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}
