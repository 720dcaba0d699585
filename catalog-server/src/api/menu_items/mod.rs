//! Menu item API module
//!
//! Cross-restaurant reads live here; the scoped write routes are wired
//! under `/restaurants/{id_or_slug}/menu-items` by the restaurants module.

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/menu-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{menu_item_id}", get(handler::get_by_id))
}
