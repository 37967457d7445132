use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;

use crate::{
    dto::items::{CreateItemRequest, ItemList, UpdateItemRequest, UploadedImage},
    entity::{
        items::{ActiveModel, Column, Entity as Items, Model as ItemModel},
        orders::{Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Item,
    response::{ApiResponse, Meta},
    state::AppState,
    storage,
};

/// Every item, grouped by category.
pub async fn list_items(state: &AppState) -> AppResult<ApiResponse<ItemList>> {
    let finder = Items::find()
        .order_by_asc(Column::Category)
        .order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Items",
        ItemList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn create_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateItemRequest,
    image: Option<UploadedImage>,
) -> AppResult<ApiResponse<Item>> {
    ensure_admin(user)?;
    validate_text("title", &payload.title)?;
    validate_text("description", &payload.description)?;
    validate_text("category", &payload.category)?;

    let image_path = match &image {
        Some(image) => Some(
            storage::save_image(&state.config.media_dir, &image.file_name, &image.bytes).await?,
        ),
        None => None,
    };

    let active = ActiveModel {
        id: NotSet,
        title: Set(payload.title),
        price: Set(payload.price),
        is_active: Set(payload.is_active),
        image_path: Set(image_path.clone()),
        description: Set(payload.description),
        category: Set(payload.category),
    };

    let item = match active.insert(&state.orm).await {
        Ok(item) => item,
        Err(err) => {
            if let Some(stored) = image_path.as_deref() {
                storage::remove_image(&state.config.media_dir, stored).await;
            }
            return Err(err.into());
        }
    };

    tracing::info!(
        item_id = item.id,
        user_id = user.user_id,
        image = ?item.image_path,
        "item created"
    );

    Ok(ApiResponse::success(
        "Item created",
        item_from_entity(item),
        Some(Meta::empty()),
    ))
}

/// Overwrite every field of an existing item.
pub async fn update_item(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateItemRequest,
) -> AppResult<ApiResponse<Item>> {
    ensure_admin(user)?;
    validate_text("title", &payload.title)?;
    validate_text("description", &payload.description)?;
    validate_text("category", &payload.category)?;

    let existing = Items::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };

    let previous_image = existing.image_path.clone();
    let mut active: ActiveModel = existing.into();
    active.title = Set(payload.title);
    active.price = Set(payload.price);
    active.is_active = Set(payload.is_active);
    active.image_path = Set(payload.image_path);
    active.description = Set(payload.description);
    active.category = Set(payload.category);

    let item = active.update(&state.orm).await?;
    if let Some(stale) = previous_image.filter(|old| item.image_path.as_ref() != Some(old)) {
        storage::remove_image(&state.config.media_dir, &stale).await;
    }
    tracing::info!(item_id = item.id, user_id = user.user_id, "item updated");

    Ok(ApiResponse::success(
        "Updated",
        item_from_entity(item),
        Some(Meta::empty()),
    ))
}

/// Delete an item and its stored image. Orders that pointed at it keep their
/// title copy but lose the link.
pub async fn delete_item(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;

    let Some(existing) = Items::find_by_id(id).one(&txn).await? else {
        txn.rollback().await?;
        return Err(AppError::NotFound);
    };

    let detached = Orders::update_many()
        .col_expr(OrderCol::ItemId, Expr::value(Option::<i32>::None))
        .filter(OrderCol::ItemId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    let result = Items::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        txn.rollback().await?;
        return Err(AppError::NotFound);
    }

    txn.commit().await?;
    if let Some(stored) = existing.image_path.as_deref() {
        storage::remove_image(&state.config.media_dir, stored).await;
    }
    tracing::info!(item_id = id, user_id = user.user_id, detached, "item deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id, "detached_orders": detached }),
        Some(Meta::empty()),
    ))
}

/// First item carrying exactly this title, by id.
pub async fn find_by_title(state: &AppState, title: &str) -> AppResult<Option<Item>> {
    let item = Items::find()
        .filter(Column::Title.eq(title))
        .order_by_asc(Column::Id)
        .one(&state.orm)
        .await?
        .map(item_from_entity);
    Ok(item)
}

fn validate_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

pub(crate) fn item_from_entity(model: ItemModel) -> Item {
    Item {
        id: model.id,
        title: model.title,
        price: model.price,
        is_active: model.is_active,
        image_path: model.image_path,
        description: model.description,
        category: model.category,
    }
}
