//! Office contact card shown on the public site and edited from settings.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// The single office contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Storage abstraction for the contact card. One record, upsert semantics.
pub trait ContactRepository: Send + Sync {
    fn load(&self) -> Result<Option<ContactInfo>, ContactStoreError>;
    fn store(&self, info: ContactInfo) -> Result<(), ContactStoreError>;
}

/// Error enumeration for contact card storage failures.
#[derive(Debug, thiserror::Error)]
pub enum ContactStoreError {
    #[error("contact card not configured")]
    NotFound,
    #[error("contact store unavailable: {0}")]
    Unavailable(String),
}

/// Violations raised when editing the contact card.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContactViolation {
    #[error("a valid email address is required")]
    InvalidEmail,
    #[error("phone must not be empty")]
    MissingPhone,
    #[error("address must not be empty")]
    MissingAddress,
}

/// Error raised by the contact service.
#[derive(Debug, thiserror::Error)]
pub enum ContactServiceError {
    #[error(transparent)]
    Violation(#[from] ContactViolation),
    #[error(transparent)]
    Store(#[from] ContactStoreError),
}

/// Service over the office contact card.
pub struct ContactService<R> {
    repository: Arc<R>,
}

impl<R> ContactService<R>
where
    R: ContactRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn current(&self) -> Result<ContactInfo, ContactServiceError> {
        let info = self.repository.load()?.ok_or(ContactStoreError::NotFound)?;
        Ok(info)
    }

    pub fn update(&self, info: ContactInfo) -> Result<ContactInfo, ContactServiceError> {
        if !info.email.contains('@') {
            return Err(ContactViolation::InvalidEmail.into());
        }
        if info.phone.trim().is_empty() {
            return Err(ContactViolation::MissingPhone.into());
        }
        if info.address.trim().is_empty() {
            return Err(ContactViolation::MissingAddress.into());
        }

        self.repository.store(info.clone())?;
        Ok(info)
    }
}

/// Public read surface for the contact card.
pub fn contact_router<R>(service: Arc<ContactService<R>>) -> Router
where
    R: ContactRepository + 'static,
{
    Router::new()
        .route("/contact/getContact", get(read_handler::<R>))
        .with_state(service)
}

/// Settings surface; mount behind the superadmin gate.
pub fn contact_admin_router<R>(service: Arc<ContactService<R>>) -> Router
where
    R: ContactRepository + 'static,
{
    Router::new()
        .route("/contact/update", put(update_handler::<R>))
        .with_state(service)
}

pub(crate) async fn read_handler<R>(State(service): State<Arc<ContactService<R>>>) -> Response
where
    R: ContactRepository + 'static,
{
    match service.current() {
        Ok(info) => (StatusCode::OK, axum::Json(json!({ "contact": info }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ContactService<R>>>,
    axum::Json(info): axum::Json<ContactInfo>,
) -> Response
where
    R: ContactRepository + 'static,
{
    match service.update(info) {
        Ok(info) => (StatusCode::OK, axum::Json(json!({ "contact": info }))).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ContactServiceError) -> Response {
    let status = match &error {
        ContactServiceError::Violation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ContactServiceError::Store(ContactStoreError::NotFound) => StatusCode::NOT_FOUND,
        ContactServiceError::Store(ContactStoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}
