//! Restaurant API module
//!
//! Owns `/restaurants` and the menu-item routes nested under a
//! restaurant. All routes sit behind the auth middleware.

pub mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::api::menu_items::handler as menu_handler;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/restaurants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id_or_slug}",
            get(handler::get_by_id_or_slug).patch(handler::update),
        )
        .route(
            "/{id_or_slug}/menu-items",
            get(menu_handler::list_for_restaurant).post(menu_handler::create),
        )
        .route(
            "/{id_or_slug}/menu-items/{menu_item_id}",
            patch(menu_handler::update).delete(menu_handler::archive),
        )
}
