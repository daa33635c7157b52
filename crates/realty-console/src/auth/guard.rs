use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::domain::Role;
use super::gate::{decide, AccessPolicy, Decision};
use super::identity::IdentityClient;
use super::notice::{Notice, NoticePublisher};
use super::session::SessionResolver;

/// Route table for applying redirect decisions. The gate itself never sees
/// path strings; this is where the presentation layer pins them down.
#[derive(Debug, Clone)]
pub struct RedirectTargets {
    pub public: String,
    pub admin_home: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self {
            public: "/".to_string(),
            admin_home: "/admin".to_string(),
        }
    }
}

impl RedirectTargets {
    /// Landing route for a role-home redirect.
    pub fn role_home(&self, role: Role) -> &str {
        if role.is_elevated() {
            &self.admin_home
        } else {
            &self.public
        }
    }
}

/// Applies gate decisions to HTTP navigation: renders, waits, or redirects,
/// publishing any attached denial notice along the way.
pub struct RouteGuard<C, N> {
    resolver: Arc<SessionResolver<C>>,
    notices: Arc<N>,
    targets: RedirectTargets,
}

impl<C, N> RouteGuard<C, N>
where
    C: IdentityClient + 'static,
    N: NoticePublisher + 'static,
{
    pub fn new(resolver: Arc<SessionResolver<C>>, notices: Arc<N>, targets: RedirectTargets) -> Self {
        Self {
            resolver,
            notices,
            targets,
        }
    }

    pub fn resolver(&self) -> &Arc<SessionResolver<C>> {
        &self.resolver
    }

    /// Gate one navigation; `Ok` means the inner view may render.
    pub async fn check(&self, policy: &AccessPolicy) -> Result<(), Response> {
        let session = self.resolver.resolve().await;
        match decide(policy, &session) {
            Decision::Render => Ok(()),
            decision => Err(self.apply(decision)),
        }
    }

    /// Translate a decision into its HTTP effect.
    pub fn apply(&self, decision: Decision) -> Response {
        if let Some(message) = decision.notice() {
            self.notices.publish(Notice::error(message));
        }

        match decision {
            Decision::Render => StatusCode::NO_CONTENT.into_response(),
            Decision::Wait => waiting_response(),
            Decision::RedirectPublic { .. } => see_other(&self.targets.public),
            Decision::RedirectRoleHome { role, .. } => see_other(self.targets.role_home(role)),
        }
    }
}

/// A guard bound to one policy, covering a whole route group.
pub struct GuardedArea<C, N> {
    pub guard: Arc<RouteGuard<C, N>>,
    pub policy: AccessPolicy,
}

impl<C, N> GuardedArea<C, N> {
    pub fn new(guard: Arc<RouteGuard<C, N>>, policy: AccessPolicy) -> Arc<Self> {
        Arc::new(Self { guard, policy })
    }
}

/// Middleware enforcing an area's policy on every route beneath it.
///
/// Mount with `axum::middleware::from_fn_with_state(area, guard::enforce)`.
pub async fn enforce<C, N>(
    State(area): State<Arc<GuardedArea<C, N>>>,
    request: Request,
    next: Next,
) -> Response
where
    C: IdentityClient + 'static,
    N: NoticePublisher + 'static,
{
    match area.guard.check(&area.policy).await {
        Ok(()) => next.run(request).await,
        Err(response) => response,
    }
}

fn waiting_response() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        [(header::RETRY_AFTER, "1")],
        Json(json!({ "status": "resolving" })),
    )
        .into_response()
}

fn see_other(location: &str) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}
