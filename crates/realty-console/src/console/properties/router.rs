use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::Router;
use chrono::Local;
use serde_json::json;

use super::domain::{PropertyDraft, PropertyId};
use super::repository::{CatalogueError, PropertyRepository};
use super::service::{PropertyService, PropertyServiceError};

/// Public catalogue surface consumed by the marketing site.
pub fn catalogue_router<R>(service: Arc<PropertyService<R>>) -> Router
where
    R: PropertyRepository + 'static,
{
    Router::new()
        .route("/residential/all", get(public_list_handler::<R>))
        .route("/residential/:property_id", get(public_detail_handler::<R>))
        .with_state(service)
}

/// Management surface; mount behind the admin gate.
pub fn management_router<R>(service: Arc<PropertyService<R>>) -> Router
where
    R: PropertyRepository + 'static,
{
    Router::new()
        .route("/residential/create", post(create_handler::<R>))
        .route("/admin/residential", get(manage_list_handler::<R>))
        .route("/residential/:property_id", put(update_handler::<R>))
        .route("/residential/:property_id", delete(delete_handler::<R>))
        .with_state(service)
}

pub(crate) async fn public_list_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.publicly_visible() {
        Ok(listings) => (StatusCode::OK, axum::Json(json!({ "data": listings }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn public_detail_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    Path(property_id): Path<String>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.get_public(&PropertyId(property_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn manage_list_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.catalogue() {
        Ok(listings) => (StatusCode::OK, axum::Json(json!({ "data": listings }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    axum::Json(draft): axum::Json<PropertyDraft>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let listed_on = Local::now().date_naive();
    match service.create(draft, listed_on) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    Path(property_id): Path<String>,
    axum::Json(draft): axum::Json<PropertyDraft>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.update(&PropertyId(property_id), draft) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    Path(property_id): Path<String>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.delete(&PropertyId(property_id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "listing deleted" })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: PropertyServiceError) -> Response {
    let status = match &error {
        PropertyServiceError::Listing(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PropertyServiceError::Catalogue(CatalogueError::NotFound) => StatusCode::NOT_FOUND,
        PropertyServiceError::Catalogue(CatalogueError::Conflict) => StatusCode::CONFLICT,
        PropertyServiceError::Catalogue(CatalogueError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}
