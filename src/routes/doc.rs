use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, SessionView, UpdateUserStatusRequest},
        items::{ItemList, UpdateItemRequest, UploadFormInfo, UploadItemForm},
        orders::{BuyForm, BuyRequest, OrderConfirmation, OrderList, UpdateStatusRequest},
    },
    models::{Item, Order, User},
    response::{ApiResponse, Meta},
    routes::{auth, catalog, health, orders, pages},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalog::index,
        catalog::manage,
        catalog::upload_form,
        catalog::upload,
        catalog::delete_item,
        catalog::update_item,
        orders::list_orders,
        orders::update_order_status,
        orders::update_paymen_status,
        orders::buy_form,
        orders::buy,
        orders::order_accepted,
        auth::login_view,
        auth::register_view,
        auth::register,
        auth::login,
        auth::logout,
        auth::update_user_status,
        pages::about,
        pages::profile
    ),
    components(
        schemas(
            Item,
            Order,
            User,
            ItemList,
            UpdateItemRequest,
            UploadItemForm,
            UploadFormInfo,
            OrderList,
            BuyForm,
            BuyRequest,
            OrderConfirmation,
            UpdateStatusRequest,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            SessionView,
            UpdateUserStatusRequest,
            pages::AboutData,
            health::HealthData,
            Meta,
            ApiResponse<Item>,
            ApiResponse<ItemList>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<User>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Catalog endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Auth", description = "Identity endpoints"),
        (name = "Pages", description = "Static and profile pages"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
