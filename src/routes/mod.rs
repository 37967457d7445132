use axum::{Router, routing::get};

use crate::{middleware::session::session_layer, state::AppState};

pub mod auth;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod orders;
pub mod pages;

// Build the storefront router without binding state; it is provided at the top level.
// Every route sits behind the session layer.
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(catalog::router())
        .merge(orders::router())
        .merge(auth::router())
        .merge(pages::router())
        .layer(session_layer(state.orm.clone(), &state.config))
}
