use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, patch};
use axum::{Json, Router};

use super::entry::{ContentEntry, ContentId};
use super::publication::StatusChange;
use super::service::{ContentService, ContentServiceError};
use crate::accounts::StaffSession;
use crate::shared::http::{created, ok, paginated};
use crate::shared::{ApiError, ApiResponse};

/// `GET {base}` and `GET {base}/:slug`, e.g. `base = "/api/news"`.
pub fn content_public_router<T: ContentEntry>(
    service: Arc<ContentService<T>>,
    base: &str,
) -> Router {
    Router::new()
        .route(base, get(list_handler::<T>))
        .route(&format!("{base}/:slug"), get(detail_handler::<T>))
        .with_state(service)
}

/// Staff CRUD under `base`, e.g. `base = "/api/admin/news"`.
pub fn content_admin_router<T: ContentEntry>(
    service: Arc<ContentService<T>>,
    base: &str,
) -> Router {
    Router::new()
        .route(base, get(admin_list_handler::<T>).post(create_handler::<T>))
        .route(
            &format!("{base}/:id"),
            get(admin_detail_handler::<T>)
                .patch(update_handler::<T>)
                .delete(delete_handler::<T>),
        )
        .route(&format!("{base}/:id/status"), patch(status_handler::<T>))
        .with_state(service)
}

async fn list_handler<T: ContentEntry>(
    State(service): State<Arc<ContentService<T>>>,
    filters: Result<Query<T::Filters>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(filters) = filters?;
    Ok(paginated(service.list_published(&filters)?))
}

async fn detail_handler<T: ContentEntry>(
    State(service): State<Arc<ContentService<T>>>,
    slug: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(slug) = slug?;
    Ok(ok(service.get_public(&slug)?))
}

async fn admin_list_handler<T: ContentEntry>(
    State(service): State<Arc<ContentService<T>>>,
    _session: StaffSession,
) -> Result<Response, ApiError> {
    Ok(ok(service.admin_list()?))
}

async fn admin_detail_handler<T: ContentEntry>(
    State(service): State<Arc<ContentService<T>>>,
    _session: StaffSession,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    Ok(ok(service.admin_get(&ContentId(id))?))
}

async fn create_handler<T: ContentEntry>(
    State(service): State<Arc<ContentService<T>>>,
    session: StaffSession,
    payload: Result<Json<T::Draft>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Json(draft) = payload?;
    Ok(created(service.create(draft)?))
}

async fn update_handler<T: ContentEntry>(
    State(service): State<Arc<ContentService<T>>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<T::Patch>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    let Json(patch) = payload?;
    Ok(ok(service.update(&ContentId(id), patch)?))
}

async fn status_handler<T: ContentEntry>(
    State(service): State<Arc<ContentService<T>>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    let Json(change) = payload?;
    Ok(ok(service.set_status(&ContentId(id), change.status)?))
}

async fn delete_handler<T: ContentEntry>(
    State(service): State<Arc<ContentService<T>>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    service.delete(&ContentId(id))?;
    Ok(ApiResponse::message_only(format!("{} deleted", T::NOUN)).respond(StatusCode::OK))
}

impl From<ContentServiceError> for ApiError {
    fn from(error: ContentServiceError) -> Self {
        match error {
            ContentServiceError::Validation(errors) => errors.into(),
            ContentServiceError::NotFound(_) => ApiError::not_found(error.to_string()),
            ContentServiceError::Repository(source) => {
                ApiError::internal("Failed to process content request", &source)
            }
        }
    }
}
