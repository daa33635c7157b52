use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;

use realty_console::auth::gate::AccessPolicy;
use realty_console::auth::guard::{self, GuardedArea, RouteGuard};
use realty_console::auth::identity::HttpIdentityClient;
use realty_console::auth::notice::TracingNoticePublisher;
use realty_console::auth::router::{auth_router, AuthRuntime};
use realty_console::console::careers::{career_admin_router, career_board_router, CareerService};
use realty_console::console::contact::{contact_admin_router, contact_router, ContactService};
use realty_console::console::directory::{directory_router, DirectoryService};
use realty_console::console::inquiries::{
    inquiry_admin_router, inquiry_intake_router, InquiryService,
};
use realty_console::console::properties::{
    catalogue_router, management_router, PropertyService,
};

use crate::infra::{
    AppState, InMemoryCatalogue, InMemoryContactCard, InMemoryDirectory, InMemoryInbox,
    InMemoryJobBoard,
};

/// Everything the route table needs, assembled once at startup.
pub(crate) struct ConsoleRuntime {
    pub(crate) auth: Arc<AuthRuntime<HttpIdentityClient>>,
    pub(crate) guard: Arc<RouteGuard<HttpIdentityClient, TracingNoticePublisher>>,
    pub(crate) properties: Arc<PropertyService<InMemoryCatalogue>>,
    pub(crate) careers: Arc<CareerService<InMemoryJobBoard>>,
    pub(crate) inquiries: Arc<InquiryService<InMemoryInbox>>,
    pub(crate) directory: Arc<DirectoryService<InMemoryDirectory>>,
    pub(crate) contact: Arc<ContactService<InMemoryContactCard>>,
}

/// Compose the public surfaces, the shared admin area, and the
/// superadmin-only area, mirroring the original route table.
pub(crate) fn console_router(runtime: &ConsoleRuntime) -> Router {
    let public = Router::new()
        .merge(auth_router(runtime.auth.clone()))
        .merge(catalogue_router(runtime.properties.clone()))
        .merge(career_board_router(runtime.careers.clone()))
        .merge(inquiry_intake_router(runtime.inquiries.clone()))
        .merge(contact_router(runtime.contact.clone()));

    let admin_area = GuardedArea::new(runtime.guard.clone(), AccessPolicy::admin_area());
    let admin = Router::new()
        .merge(management_router(runtime.properties.clone()))
        .merge(inquiry_admin_router(runtime.inquiries.clone()))
        .layer(axum::middleware::from_fn_with_state(
            admin_area,
            guard::enforce::<HttpIdentityClient, TracingNoticePublisher>,
        ));

    let superadmin_area = GuardedArea::new(runtime.guard.clone(), AccessPolicy::superadmin_area());
    let superadmin = Router::new()
        .merge(career_admin_router(runtime.careers.clone()))
        .merge(directory_router(runtime.directory.clone()))
        .merge(contact_admin_router(runtime.contact.clone()))
        .layer(axum::middleware::from_fn_with_state(
            superadmin_area,
            guard::enforce::<HttpIdentityClient, TracingNoticePublisher>,
        ));

    public.merge(admin).merge(superadmin)
}

pub(crate) fn with_operational_routes(router: Router) -> Router {
    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
