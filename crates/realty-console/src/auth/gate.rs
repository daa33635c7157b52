use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::Role;
use super::session::SessionState;

pub const NOTICE_OWNER_ROUTES: &str = "You cannot access owner routes";
pub const NOTICE_ADMIN_ROUTES: &str = "You cannot access admin routes";
pub const NOTICE_ACCESS_DENIED: &str = "Access denied";

/// Per-view declaration of which roles may enter.
///
/// Constructed at route-declaration time and never mutated afterwards. An
/// empty role set means no restriction was declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    allowed_roles: BTreeSet<Role>,
}

impl AccessPolicy {
    /// Policy with no restriction declared.
    pub fn public() -> Self {
        Self::default()
    }

    pub fn allow(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed_roles: roles.into_iter().collect(),
        }
    }

    /// The admin console surface shared by both elevated roles.
    pub fn admin_area() -> Self {
        Self::allow([Role::Admin, Role::Superadmin])
    }

    /// Surfaces reserved for the superadmin alone (directory, settings,
    /// job postings).
    pub fn superadmin_area() -> Self {
        Self::allow([Role::Superadmin])
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allowed_roles.is_empty()
    }

    /// Exact-match membership; no hierarchy between roles is assumed here.
    pub fn permits(&self, role: Role) -> bool {
        self.is_unrestricted() || self.allowed_roles.contains(&role)
    }
}

/// Outcome of gating one navigation against the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Session still resolving; render a neutral waiting state, never a
    /// redirect.
    Wait,
    /// The requested view may render.
    Render,
    /// Send the visitor to the public landing route.
    RedirectPublic { notice: Option<&'static str> },
    /// Send the principal to the home route for its role.
    RedirectRoleHome {
        role: Role,
        notice: Option<&'static str>,
    },
}

impl Decision {
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Decision::Wait | Decision::Render => None,
            Decision::RedirectPublic { notice } => *notice,
            Decision::RedirectRoleHome { notice, .. } => *notice,
        }
    }
}

enum DenialTarget {
    RoleHome,
    Public,
}

struct DenialRule {
    role: Role,
    target: DenialTarget,
    notice: &'static str,
}

/// Denial carve-outs: where a role lands when a policy excludes it. Roles
/// absent from the table (superadmin mismatches, unknown roles) fall through
/// to the generic public deny, so new roles must be added here deliberately.
const DENIAL_RULES: &[DenialRule] = &[
    DenialRule {
        role: Role::Admin,
        target: DenialTarget::RoleHome,
        notice: NOTICE_OWNER_ROUTES,
    },
    DenialRule {
        role: Role::User,
        target: DenialTarget::Public,
        notice: NOTICE_ADMIN_ROUTES,
    },
    DenialRule {
        role: Role::Customer,
        target: DenialTarget::Public,
        notice: NOTICE_ADMIN_ROUTES,
    },
    DenialRule {
        role: Role::Owner,
        target: DenialTarget::Public,
        notice: NOTICE_ADMIN_ROUTES,
    },
];

/// Pure access decision over a declared policy and the current session state.
pub fn decide(policy: &AccessPolicy, session: &SessionState) -> Decision {
    let principal = match session {
        SessionState::Loading => return Decision::Wait,
        SessionState::Unresolved(_) => return Decision::RedirectPublic { notice: None },
        SessionState::Resolved(principal) => principal,
    };

    if policy.permits(principal.role) {
        return Decision::Render;
    }

    match DENIAL_RULES
        .iter()
        .find(|rule| rule.role == principal.role)
    {
        Some(rule) => match rule.target {
            DenialTarget::RoleHome => Decision::RedirectRoleHome {
                role: principal.role,
                notice: Some(rule.notice),
            },
            DenialTarget::Public => Decision::RedirectPublic {
                notice: Some(rule.notice),
            },
        },
        None => Decision::RedirectPublic {
            notice: Some(NOTICE_ACCESS_DENIED),
        },
    }
}
