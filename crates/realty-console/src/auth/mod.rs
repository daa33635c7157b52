//! Session lifecycle and role-based access control.
//!
//! The session resolver caches the outcome of one identity lookup per
//! invalidation cycle and collapses every failure mode into an unresolved
//! state, so gating always fails closed. The gate itself is a pure decision
//! function; applying a decision (redirect, waiting response, notice) is the
//! guard's job and stays out of the decision logic.

pub mod domain;
pub mod gate;
pub mod guard;
pub mod identity;
pub mod notice;
pub mod router;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{Principal, PrincipalId, Role};
pub use gate::{
    decide, AccessPolicy, Decision, NOTICE_ACCESS_DENIED, NOTICE_ADMIN_ROUTES, NOTICE_OWNER_ROUTES,
};
pub use guard::{GuardedArea, RedirectTargets, RouteGuard};
pub use identity::{
    HttpIdentityClient, IdentityClient, IdentityError, LoginRequest, RegisterRequest,
};
pub use notice::{Notice, NoticePublisher, NoticeSeverity, TracingNoticePublisher};
pub use router::{auth_router, AuthRuntime};
pub use session::{SessionResolver, SessionState, UnresolvedReason};
