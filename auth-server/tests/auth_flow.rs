//! Signup, login, and validation flow against the in-memory engine

use axum::extract::State;
use axum::http::StatusCode;

use auth_server::api::auth::handler::{
    LoginRequest, SignupRequest, TokenResponse, ValidateRequest, login, signup, validate,
};
use auth_server::api::extract::Json;
use auth_server::core::{Config, ServerState};
use auth_server::db::DbService;
use auth_server::utils::AppError;

async fn state() -> ServerState {
    let db = DbService::memory().await.unwrap();
    ServerState::with_db(Config::for_tests(), db)
}

fn signup_body(email: &str) -> SignupRequest {
    SignupRequest {
        email: email.into(),
        password: "correct-horse".into(),
        name: Some("Alice".into()),
    }
}

async fn do_signup(state: &ServerState, email: &str) -> TokenResponse {
    let (status, Json(body)) = signup(State(state.clone()), Json(signup_body(email)))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn signup_login_validate_flow() {
    let state = state().await;

    let signed_up = do_signup(&state, "alice@example.com").await;
    assert_eq!(signed_up.token_type, "Bearer");
    assert_eq!(signed_up.expires_in, 3600);
    assert_eq!(signed_up.user.email, "alice@example.com");
    assert!(signed_up.user.id.starts_with("user:"));

    let Json(logged_in) = login(
        State(state.clone()),
        Json(LoginRequest {
            email: "alice@example.com".into(),
            password: "correct-horse".into(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(logged_in.user.id, signed_up.user.id);

    let Json(verdict) = validate(
        State(state.clone()),
        Json(ValidateRequest {
            token: logged_in.access_token.clone(),
        }),
    )
    .await
    .unwrap();
    assert!(verdict.valid);
    let user = verdict.user.unwrap();
    assert_eq!(user.id, signed_up.user.id);
    let payload = verdict.payload.unwrap();
    assert_eq!(payload.sub, signed_up.user.id);
    assert_eq!(payload.email.as_deref(), Some("alice@example.com"));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let state = state().await;
    do_signup(&state, "bob@example.com").await;

    let second = signup(State(state.clone()), Json(signup_body("bob@example.com"))).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    // Case and whitespace differences still hit the same account
    let third = signup(
        State(state.clone()),
        Json(signup_body("  BOB@Example.com ")),
    )
    .await;
    assert!(matches!(third, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() {
    let state = state().await;
    do_signup(&state, "carol@example.com").await;

    let wrong_password = login(
        State(state.clone()),
        Json(LoginRequest {
            email: "carol@example.com".into(),
            password: "not-the-password".into(),
        }),
    )
    .await;
    assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));

    let unknown_email = login(
        State(state.clone()),
        Json(LoginRequest {
            email: "nobody@example.com".into(),
            password: "correct-horse".into(),
        }),
    )
    .await;
    assert!(matches!(unknown_email, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn short_password_is_rejected_before_any_write() {
    let state = state().await;
    let result = signup(
        State(state.clone()),
        Json(SignupRequest {
            email: "dave@example.com".into(),
            password: "short".into(),
            name: None,
        }),
    )
    .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(
        state
            .users
            .find_by_email("dave@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn garbage_token_validates_as_invalid() {
    let state = state().await;
    let Json(verdict) = validate(
        State(state.clone()),
        Json(ValidateRequest {
            token: "not.a.token".into(),
        }),
    )
    .await
    .unwrap();
    assert!(!verdict.valid);
    assert!(verdict.user.is_none());
    assert!(verdict.reason.is_some());
}

#[tokio::test]
async fn token_for_a_deleted_user_is_invalid() {
    let state = state().await;
    let signed_up = do_signup(&state, "erin@example.com").await;

    state
        .db
        .db
        .query("DELETE user")
        .await
        .unwrap()
        .check()
        .unwrap();

    let Json(verdict) = validate(
        State(state.clone()),
        Json(ValidateRequest {
            token: signed_up.access_token,
        }),
    )
    .await
    .unwrap();
    assert!(!verdict.valid);
    assert_eq!(verdict.reason.as_deref(), Some("User no longer exists"));
}
