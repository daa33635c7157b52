//! Customer inquiries: public intake plus the gated triage board.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::Router;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Identifier wrapper for customer inquiries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub String);

/// Triage state of an inquiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    #[default]
    New,
    InProgress,
    Closed,
}

impl InquiryStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::InProgress => "in_progress",
            InquiryStatus::Closed => "closed",
        }
    }
}

/// Payload submitted through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquirySubmission {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Stored inquiry with triage metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: InquiryStatus,
    pub received_on: NaiveDate,
}

/// Status change sent from the triage board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryStatusChange {
    pub status: InquiryStatus,
}

/// Storage abstraction for the inquiry inbox.
pub trait InquiryRepository: Send + Sync {
    fn insert(&self, inquiry: Inquiry) -> Result<Inquiry, InboxError>;
    fn list(&self) -> Result<Vec<Inquiry>, InboxError>;
    fn fetch(&self, id: &InquiryId) -> Result<Option<Inquiry>, InboxError>;
    fn update(&self, inquiry: Inquiry) -> Result<(), InboxError>;
    fn remove(&self, id: &InquiryId) -> Result<(), InboxError>;
}

/// Error enumeration for inbox storage failures.
#[derive(Debug, thiserror::Error)]
pub enum InboxError {
    #[error("inquiry already exists")]
    Conflict,
    #[error("inquiry not found")]
    NotFound,
    #[error("inbox unavailable: {0}")]
    Unavailable(String),
}

/// Validation raised on inquiry intake.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InquiryViolation {
    #[error("name must not be empty")]
    MissingName,
    #[error("a valid email address is required")]
    InvalidEmail,
    #[error("message must not be empty")]
    MissingMessage,
}

/// Error raised by the inquiry service.
#[derive(Debug, thiserror::Error)]
pub enum InquiryServiceError {
    #[error(transparent)]
    Submission(#[from] InquiryViolation),
    #[error(transparent)]
    Inbox(#[from] InboxError),
}

static INQUIRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_inquiry_id() -> InquiryId {
    let id = INQUIRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InquiryId(format!("query-{id:06}"))
}

/// Service composing intake validation and the inbox store.
pub struct InquiryService<R> {
    repository: Arc<R>,
}

impl<R> InquiryService<R>
where
    R: InquiryRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    fn validate(submission: &InquirySubmission) -> Result<(), InquiryViolation> {
        if submission.full_name.trim().is_empty() {
            return Err(InquiryViolation::MissingName);
        }
        if !submission.email.contains('@') {
            return Err(InquiryViolation::InvalidEmail);
        }
        if submission.message.trim().is_empty() {
            return Err(InquiryViolation::MissingMessage);
        }
        Ok(())
    }

    pub fn submit(
        &self,
        submission: InquirySubmission,
        received_on: NaiveDate,
    ) -> Result<Inquiry, InquiryServiceError> {
        Self::validate(&submission)?;
        let inquiry = Inquiry {
            id: next_inquiry_id(),
            full_name: submission.full_name,
            email: submission.email,
            phone: submission.phone,
            message: submission.message,
            status: InquiryStatus::New,
            received_on,
        };
        let stored = self.repository.insert(inquiry)?;
        Ok(stored)
    }

    pub fn inbox(&self) -> Result<Vec<Inquiry>, InquiryServiceError> {
        let mut inquiries = self.repository.list()?;
        inquiries.sort_by(|a, b| b.received_on.cmp(&a.received_on));
        Ok(inquiries)
    }

    pub fn set_status(
        &self,
        id: &InquiryId,
        status: InquiryStatus,
    ) -> Result<Inquiry, InquiryServiceError> {
        let mut inquiry = self.repository.fetch(id)?.ok_or(InboxError::NotFound)?;
        inquiry.status = status;
        self.repository.update(inquiry.clone())?;
        Ok(inquiry)
    }

    pub fn discard(&self, id: &InquiryId) -> Result<(), InquiryServiceError> {
        self.repository.remove(id)?;
        Ok(())
    }

    /// Open inquiries, the dashboard counter.
    pub fn open_count(&self) -> Result<usize, InquiryServiceError> {
        let open = self
            .repository
            .list()?
            .into_iter()
            .filter(|inquiry| inquiry.status != InquiryStatus::Closed)
            .count();
        Ok(open)
    }
}

/// Public intake surface for the contact form.
pub fn inquiry_intake_router<R>(service: Arc<InquiryService<R>>) -> Router
where
    R: InquiryRepository + 'static,
{
    Router::new()
        .route("/query/create", post(submit_handler::<R>))
        .with_state(service)
}

/// Triage board; mount behind the gate.
pub fn inquiry_admin_router<R>(service: Arc<InquiryService<R>>) -> Router
where
    R: InquiryRepository + 'static,
{
    Router::new()
        .route("/query/fetch", get(inbox_handler::<R>))
        .route("/query/count", get(count_handler::<R>))
        .route("/query/update/:inquiry_id", put(status_handler::<R>))
        .route("/query/delete/:inquiry_id", delete(discard_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<InquiryService<R>>>,
    axum::Json(submission): axum::Json<InquirySubmission>,
) -> Response
where
    R: InquiryRepository + 'static,
{
    let received_on = chrono::Local::now().date_naive();
    match service.submit(submission, received_on) {
        Ok(inquiry) => {
            (StatusCode::CREATED, axum::Json(json!({ "query": inquiry }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn inbox_handler<R>(State(service): State<Arc<InquiryService<R>>>) -> Response
where
    R: InquiryRepository + 'static,
{
    match service.inbox() {
        Ok(inquiries) => {
            (StatusCode::OK, axum::Json(json!({ "queries": inquiries }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn count_handler<R>(State(service): State<Arc<InquiryService<R>>>) -> Response
where
    R: InquiryRepository + 'static,
{
    match service.open_count() {
        Ok(count) => (StatusCode::OK, axum::Json(json!({ "count": count }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<InquiryService<R>>>,
    Path(inquiry_id): Path<String>,
    axum::Json(change): axum::Json<InquiryStatusChange>,
) -> Response
where
    R: InquiryRepository + 'static,
{
    match service.set_status(&InquiryId(inquiry_id), change.status) {
        Ok(inquiry) => (StatusCode::OK, axum::Json(json!({ "query": inquiry }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn discard_handler<R>(
    State(service): State<Arc<InquiryService<R>>>,
    Path(inquiry_id): Path<String>,
) -> Response
where
    R: InquiryRepository + 'static,
{
    match service.discard(&InquiryId(inquiry_id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "query deleted" })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: InquiryServiceError) -> Response {
    let status = match &error {
        InquiryServiceError::Submission(_) => StatusCode::UNPROCESSABLE_ENTITY,
        InquiryServiceError::Inbox(InboxError::NotFound) => StatusCode::NOT_FOUND,
        InquiryServiceError::Inbox(InboxError::Conflict) => StatusCode::CONFLICT,
        InquiryServiceError::Inbox(InboxError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}
