use serde::{Deserialize, Serialize};

/// Identifier wrapper for identity accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(pub String);

/// Access scope tag carried by every principal.
///
/// The enumeration is closed; wire values outside it land on `Unknown`, which
/// every gate treats as maximally restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Customer,
    Owner,
    Admin,
    Superadmin,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Customer => "customer",
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
            Role::Unknown => "unknown",
        }
    }

    /// Parse a wire value; anything outside the closed set maps to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Role::User,
            "customer" => Role::Customer,
            "owner" => Role::Owner,
            "admin" => Role::Admin,
            "superadmin" => Role::Superadmin,
            _ => Role::Unknown,
        }
    }

    /// Roles whose home surface is the admin console rather than the public
    /// landing page.
    pub const fn is_elevated(self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}

/// The authenticated identity returned by the identity endpoint.
///
/// Owned exclusively by the session resolver; read-only everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(alias = "_id")]
    pub id: PrincipalId,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub role: Role,
}
