//! Job postings for the careers page and its admin board.

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

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Inbound payload for posting or editing a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    pub position: String,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    #[serde(rename = "experienceRequired")]
    pub experience_required: String,
    #[serde(rename = "roleType")]
    pub role_type: String,
}

/// A published job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    pub position: String,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    #[serde(rename = "experienceRequired")]
    pub experience_required: String,
    #[serde(rename = "roleType")]
    pub role_type: String,
    pub posted_on: NaiveDate,
}

impl JobPosting {
    pub fn from_draft(id: JobId, draft: JobDraft, posted_on: NaiveDate) -> Self {
        Self {
            id,
            job_title: draft.job_title,
            position: draft.position,
            location: draft.location,
            employment_type: draft.employment_type,
            experience_required: draft.experience_required,
            role_type: draft.role_type,
            posted_on,
        }
    }
}

/// Storage abstraction for the job board.
pub trait CareerRepository: Send + Sync {
    fn insert(&self, posting: JobPosting) -> Result<JobPosting, CareerBoardError>;
    fn list(&self) -> Result<Vec<JobPosting>, CareerBoardError>;
    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, CareerBoardError>;
    fn update(&self, posting: JobPosting) -> Result<(), CareerBoardError>;
    fn remove(&self, id: &JobId) -> Result<(), CareerBoardError>;
}

/// Error enumeration for job board failures.
#[derive(Debug, thiserror::Error)]
pub enum CareerBoardError {
    #[error("posting already exists")]
    Conflict,
    #[error("posting not found")]
    NotFound,
    #[error("job board unavailable: {0}")]
    Unavailable(String),
}

/// Validation raised on posting intake.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PostingViolation {
    #[error("job title must not be empty")]
    MissingTitle,
    #[error("position must not be empty")]
    MissingPosition,
    #[error("location must not be empty")]
    MissingLocation,
}

/// Error raised by the career service.
#[derive(Debug, thiserror::Error)]
pub enum CareerServiceError {
    #[error(transparent)]
    Posting(#[from] PostingViolation),
    #[error(transparent)]
    Board(#[from] CareerBoardError),
}

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

/// Service composing posting validation and the job board store.
pub struct CareerService<R> {
    repository: Arc<R>,
}

impl<R> CareerService<R>
where
    R: CareerRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    fn validate(draft: &JobDraft) -> Result<(), PostingViolation> {
        if draft.job_title.trim().is_empty() {
            return Err(PostingViolation::MissingTitle);
        }
        if draft.position.trim().is_empty() {
            return Err(PostingViolation::MissingPosition);
        }
        if draft.location.trim().is_empty() {
            return Err(PostingViolation::MissingLocation);
        }
        Ok(())
    }

    pub fn post(
        &self,
        draft: JobDraft,
        posted_on: NaiveDate,
    ) -> Result<JobPosting, CareerServiceError> {
        Self::validate(&draft)?;
        let posting = JobPosting::from_draft(next_job_id(), draft, posted_on);
        let stored = self.repository.insert(posting)?;
        Ok(stored)
    }

    pub fn listings(&self) -> Result<Vec<JobPosting>, CareerServiceError> {
        let mut postings = self.repository.list()?;
        postings.sort_by(|a, b| b.posted_on.cmp(&a.posted_on));
        Ok(postings)
    }

    /// Replace a posting's attributes, keeping its identity and posting date.
    pub fn update(&self, id: &JobId, draft: JobDraft) -> Result<JobPosting, CareerServiceError> {
        Self::validate(&draft)?;
        let existing = self.repository.fetch(id)?.ok_or(CareerBoardError::NotFound)?;
        let posting = JobPosting::from_draft(existing.id, draft, existing.posted_on);
        self.repository.update(posting.clone())?;
        Ok(posting)
    }

    pub fn withdraw(&self, id: &JobId) -> Result<(), CareerServiceError> {
        self.repository.remove(id)?;
        Ok(())
    }
}

/// Public careers page surface.
pub fn career_board_router<R>(service: Arc<CareerService<R>>) -> Router
where
    R: CareerRepository + 'static,
{
    Router::new()
        .route("/careers/fetch", get(list_handler::<R>))
        .with_state(service)
}

/// Posting management; mount behind the superadmin gate.
pub fn career_admin_router<R>(service: Arc<CareerService<R>>) -> Router
where
    R: CareerRepository + 'static,
{
    Router::new()
        .route("/careers/create", post(create_handler::<R>))
        .route("/careers/update/:job_id", put(update_handler::<R>))
        .route("/careers/delete/:job_id", delete(delete_handler::<R>))
        .with_state(service)
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<CareerService<R>>>) -> Response
where
    R: CareerRepository + 'static,
{
    match service.listings() {
        Ok(postings) => (StatusCode::OK, axum::Json(json!({ "jobs": postings }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<CareerService<R>>>,
    axum::Json(draft): axum::Json<JobDraft>,
) -> Response
where
    R: CareerRepository + 'static,
{
    let posted_on = chrono::Local::now().date_naive();
    match service.post(draft, posted_on) {
        Ok(posting) => {
            (StatusCode::CREATED, axum::Json(json!({ "job": posting }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<CareerService<R>>>,
    Path(job_id): Path<String>,
    axum::Json(draft): axum::Json<JobDraft>,
) -> Response
where
    R: CareerRepository + 'static,
{
    match service.update(&JobId(job_id), draft) {
        Ok(posting) => (StatusCode::OK, axum::Json(json!({ "job": posting }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<CareerService<R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    R: CareerRepository + 'static,
{
    match service.withdraw(&JobId(job_id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "posting deleted" })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CareerServiceError) -> Response {
    let status = match &error {
        CareerServiceError::Posting(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CareerServiceError::Board(CareerBoardError::NotFound) => StatusCode::NOT_FOUND,
        CareerServiceError::Board(CareerBoardError::Conflict) => StatusCode::CONFLICT,
        CareerServiceError::Board(CareerBoardError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}
