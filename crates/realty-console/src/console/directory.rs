//! Account directory: the superadmin's view over identity accounts.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, put};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::domain::{PrincipalId, Role};

/// Read model of an identity account as the console sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(alias = "_id")]
    pub id: PrincipalId,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
}

/// Role change sent from the user administration table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChange {
    pub role: Role,
}

/// Storage abstraction over the account read model.
pub trait DirectoryRepository: Send + Sync {
    fn insert(&self, account: AccountRecord) -> Result<AccountRecord, DirectoryError>;
    fn list(&self) -> Result<Vec<AccountRecord>, DirectoryError>;
    fn fetch(&self, id: &PrincipalId) -> Result<Option<AccountRecord>, DirectoryError>;
    fn update(&self, account: AccountRecord) -> Result<(), DirectoryError>;
    fn remove(&self, id: &PrincipalId) -> Result<(), DirectoryError>;
}

/// Error enumeration for directory storage failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("account already exists")]
    Conflict,
    #[error("account not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Violations raised on account mutations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccountViolation {
    #[error("role is outside the recognized set")]
    UnknownRole,
}

/// Error raised by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryServiceError {
    #[error(transparent)]
    Account(#[from] AccountViolation),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Service over the account read model.
pub struct DirectoryService<R> {
    repository: Arc<R>,
}

impl<R> DirectoryService<R>
where
    R: DirectoryRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Accounts holding an elevated role, for the admins table.
    pub fn admins(&self) -> Result<Vec<AccountRecord>, DirectoryServiceError> {
        let admins = self
            .repository
            .list()?
            .into_iter()
            .filter(|account| account.role.is_elevated())
            .collect();
        Ok(admins)
    }

    /// Account tally per role, zero-filled across the closed enumeration.
    pub fn role_counts(&self) -> Result<BTreeMap<&'static str, usize>, DirectoryServiceError> {
        let mut counts: BTreeMap<&'static str, usize> = [
            Role::User,
            Role::Customer,
            Role::Owner,
            Role::Admin,
            Role::Superadmin,
        ]
        .into_iter()
        .map(|role| (role.label(), 0))
        .collect();

        for account in self.repository.list()? {
            *counts.entry(account.role.label()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Reassign an account's role. Unrecognized roles are never assignable.
    pub fn change_role(
        &self,
        id: &PrincipalId,
        role: Role,
    ) -> Result<AccountRecord, DirectoryServiceError> {
        if role == Role::Unknown {
            return Err(AccountViolation::UnknownRole.into());
        }

        let mut account = self.repository.fetch(id)?.ok_or(DirectoryError::NotFound)?;
        account.role = role;
        self.repository.update(account.clone())?;
        Ok(account)
    }

    pub fn remove_account(&self, id: &PrincipalId) -> Result<(), DirectoryServiceError> {
        self.repository.remove(id)?;
        Ok(())
    }
}

/// Directory administration; mount behind the superadmin gate.
pub fn directory_router<R>(service: Arc<DirectoryService<R>>) -> Router
where
    R: DirectoryRepository + 'static,
{
    Router::new()
        .route("/admin/admins", get(admins_handler::<R>))
        .route("/admin/role-counts", get(role_counts_handler::<R>))
        .route("/admin/users/:account_id/role", put(role_change_handler::<R>))
        .route("/admin/users/:account_id", delete(remove_handler::<R>))
        .with_state(service)
}

pub(crate) async fn admins_handler<R>(State(service): State<Arc<DirectoryService<R>>>) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.admins() {
        Ok(admins) => (StatusCode::OK, axum::Json(json!({ "admins": admins }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn role_counts_handler<R>(
    State(service): State<Arc<DirectoryService<R>>>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.role_counts() {
        Ok(counts) => (StatusCode::OK, axum::Json(json!({ "data": counts }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn role_change_handler<R>(
    State(service): State<Arc<DirectoryService<R>>>,
    Path(account_id): Path<String>,
    axum::Json(change): axum::Json<RoleChange>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.change_role(&PrincipalId(account_id), change.role) {
        Ok(account) => (StatusCode::OK, axum::Json(json!({ "user": account }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_handler<R>(
    State(service): State<Arc<DirectoryService<R>>>,
    Path(account_id): Path<String>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.remove_account(&PrincipalId(account_id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "account removed" })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: DirectoryServiceError) -> Response {
    let status = match &error {
        DirectoryServiceError::Account(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DirectoryServiceError::Directory(DirectoryError::NotFound) => StatusCode::NOT_FOUND,
        DirectoryServiceError::Directory(DirectoryError::Conflict) => StatusCode::CONFLICT,
        DirectoryServiceError::Directory(DirectoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}
