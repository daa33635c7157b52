use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::info;

use super::identity::{IdentityClient, IdentityError, LoginRequest, RegisterRequest};
use super::session::{SessionResolver, SessionState, UnresolvedReason};

/// Shared state for the auth surface: the identity proxy plus the resolver
/// whose cache the mutation endpoints invalidate.
pub struct AuthRuntime<C> {
    pub client: Arc<C>,
    pub resolver: Arc<SessionResolver<C>>,
}

impl<C> AuthRuntime<C>
where
    C: IdentityClient + 'static,
{
    pub fn new(client: Arc<C>) -> Arc<Self> {
        let resolver = Arc::new(SessionResolver::new(client.clone()));
        Arc::new(Self { client, resolver })
    }
}

/// Router builder exposing the session endpoints.
pub fn auth_router<C>(runtime: Arc<AuthRuntime<C>>) -> Router
where
    C: IdentityClient + 'static,
{
    Router::new()
        .route("/auth/me", get(me_handler::<C>))
        .route("/auth/login", post(login_handler::<C>))
        .route("/auth/register", post(register_handler::<C>))
        .route("/auth/logout", post(logout_handler::<C>))
        .with_state(runtime)
}

pub(crate) async fn me_handler<C>(State(runtime): State<Arc<AuthRuntime<C>>>) -> Response
where
    C: IdentityClient + 'static,
{
    match runtime.resolver.resolve().await {
        SessionState::Resolved(principal) => {
            (StatusCode::OK, Json(json!({ "user": principal }))).into_response()
        }
        SessionState::Unresolved(UnresolvedReason::NotAuthenticated) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "not authenticated" })),
        )
            .into_response(),
        SessionState::Unresolved(UnresolvedReason::FetchFailed) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "identity service unavailable" })),
        )
            .into_response(),
        // resolve() never yields Loading; keep the match total anyway.
        SessionState::Loading => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "resolving" })),
        )
            .into_response(),
    }
}

pub(crate) async fn login_handler<C>(
    State(runtime): State<Arc<AuthRuntime<C>>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    C: IdentityClient + 'static,
{
    match runtime.client.login(request).await {
        Ok(principal) => {
            runtime.resolver.invalidate();
            info!(email = %principal.email, "login accepted, session cache invalidated");
            (StatusCode::OK, Json(json!({ "user": principal }))).into_response()
        }
        Err(err) => identity_error_response(err),
    }
}

pub(crate) async fn register_handler<C>(
    State(runtime): State<Arc<AuthRuntime<C>>>,
    Json(request): Json<RegisterRequest>,
) -> Response
where
    C: IdentityClient + 'static,
{
    match runtime.client.register(request).await {
        Ok(principal) => {
            runtime.resolver.invalidate();
            info!(email = %principal.email, "registration accepted, session cache invalidated");
            (StatusCode::CREATED, Json(json!({ "user": principal }))).into_response()
        }
        Err(err) => identity_error_response(err),
    }
}

pub(crate) async fn logout_handler<C>(State(runtime): State<Arc<AuthRuntime<C>>>) -> Response
where
    C: IdentityClient + 'static,
{
    match runtime.client.logout().await {
        Ok(()) => {
            runtime.resolver.invalidate();
            (StatusCode::OK, Json(json!({ "message": "logged out" }))).into_response()
        }
        Err(err) => identity_error_response(err),
    }
}

fn identity_error_response(err: IdentityError) -> Response {
    let (status, message) = match &err {
        IdentityError::NotAuthenticated => {
            (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
        }
        IdentityError::Rejected(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail.clone()),
        IdentityError::Transport(_) | IdentityError::Malformed(_) => {
            (StatusCode::BAD_GATEWAY, err.to_string())
        }
    };

    (status, Json(json!({ "error": message }))).into_response()
}
