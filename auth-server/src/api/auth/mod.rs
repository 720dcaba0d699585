//! Account and token routes
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /auth/signup | POST | Create an account, returns a token |
//! | /auth/login | POST | Exchange credentials for a token |
//! | /auth/validate | POST | Introspect a token (always 200) |

pub mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/auth",
        Router::new()
            .route("/signup", post(handler::signup))
            .route("/login", post(handler::login))
            .route("/validate", post(handler::validate)),
    )
}
