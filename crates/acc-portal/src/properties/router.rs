use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use super::domain::{DocumentDraft, ImageDraft, PropertyDraft, PropertyFilters, PropertyId, PropertyPatch};
use super::interest::{InterestFilters, InterestId, InterestStatusUpdate, InterestSubmission};
use super::service::{PropertyService, PropertyServiceError};
use crate::accounts::StaffSession;
use crate::rate_limit::{client_ip, enforce, FixedWindowLimiter};
use crate::shared::http::{created, ok, paginated};
use crate::shared::{ApiError, ApiResponse, SIERRA_LEONE_REGIONS};

/// Public listing, detail and EOI endpoints. EOI submission is rate limited.
pub fn property_public_router(
    service: Arc<PropertyService>,
    limiter: Arc<FixedWindowLimiter>,
) -> Router {
    let interest = Router::new()
        .route("/api/properties/:id/interest", post(submit_interest_handler))
        .route_layer(middleware::from_fn_with_state(limiter, enforce));

    Router::new()
        .route("/api/properties", get(list_handler))
        .route("/api/properties/featured", get(featured_handler))
        .route("/api/properties/regions", get(regions_handler))
        .route("/api/properties/:id", get(detail_handler))
        .merge(interest)
        .with_state(service)
}

pub fn property_admin_router(service: Arc<PropertyService>) -> Router {
    Router::new()
        .route(
            "/api/admin/properties",
            get(admin_list_handler).post(create_handler),
        )
        .route(
            "/api/admin/properties/:id",
            get(admin_detail_handler)
                .patch(update_handler)
                .delete(delete_handler),
        )
        .route("/api/admin/properties/:id/images", post(add_image_handler))
        .route(
            "/api/admin/properties/:id/documents",
            post(add_document_handler),
        )
        .route("/api/admin/interests", get(list_interests_handler))
        .route("/api/admin/interests/:id", patch(update_interest_handler))
        .with_state(service)
}

pub(crate) async fn list_handler(
    State(service): State<Arc<PropertyService>>,
    filters: Result<Query<PropertyFilters>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(filters) = filters?;
    Ok(paginated(service.list_published(&filters)?))
}

pub(crate) async fn featured_handler(
    State(service): State<Arc<PropertyService>>,
) -> Result<Response, ApiError> {
    Ok(ok(service.featured()?))
}

pub(crate) async fn regions_handler() -> Response {
    ok(SIERRA_LEONE_REGIONS)
}

pub(crate) async fn detail_handler(
    State(service): State<Arc<PropertyService>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id_or_slug) = id?;
    Ok(ok(service.get_public(&id_or_slug)?))
}

pub(crate) async fn submit_interest_handler(
    State(service): State<Arc<PropertyService>>,
    headers: HeaderMap,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<InterestSubmission>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Json(submission) = payload?;
    let receipt = service.submit_interest(&PropertyId(id), submission, &client_ip(&headers))?;
    Ok(created(receipt))
}

pub(crate) async fn admin_list_handler(
    State(service): State<Arc<PropertyService>>,
    _session: StaffSession,
) -> Result<Response, ApiError> {
    Ok(ok(service.admin_list()?))
}

pub(crate) async fn admin_detail_handler(
    State(service): State<Arc<PropertyService>>,
    _session: StaffSession,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    Ok(ok(service.admin_get(&PropertyId(id))?))
}

pub(crate) async fn create_handler(
    State(service): State<Arc<PropertyService>>,
    session: StaffSession,
    payload: Result<Json<PropertyDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Json(draft) = payload?;
    Ok(created(service.create(draft)?))
}

pub(crate) async fn update_handler(
    State(service): State<Arc<PropertyService>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<PropertyPatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    let Json(patch) = payload?;
    Ok(ok(service.update(&PropertyId(id), patch)?))
}

pub(crate) async fn delete_handler(
    State(service): State<Arc<PropertyService>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    service.delete(&PropertyId(id))?;
    Ok(ApiResponse::message_only("Property deleted").respond(axum::http::StatusCode::OK))
}

pub(crate) async fn add_image_handler(
    State(service): State<Arc<PropertyService>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<ImageDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    let Json(draft) = payload?;
    Ok(created(service.add_image(&PropertyId(id), draft)?))
}

pub(crate) async fn add_document_handler(
    State(service): State<Arc<PropertyService>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<DocumentDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    let Json(draft) = payload?;
    Ok(created(service.add_document(&PropertyId(id), draft)?))
}

pub(crate) async fn list_interests_handler(
    State(service): State<Arc<PropertyService>>,
    _session: StaffSession,
    filters: Result<Query<InterestFilters>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(filters) = filters?;
    Ok(paginated(service.list_interests(&filters)?))
}

pub(crate) async fn update_interest_handler(
    State(service): State<Arc<PropertyService>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<InterestStatusUpdate>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    let Json(update) = payload?;
    Ok(ok(service.update_interest_status(&InterestId(id), update.status)?))
}

impl From<PropertyServiceError> for ApiError {
    fn from(error: PropertyServiceError) -> Self {
        match error {
            PropertyServiceError::Validation(errors) => errors.into(),
            PropertyServiceError::NotFound | PropertyServiceError::InterestNotFound => {
                ApiError::not_found(error.to_string())
            }
            PropertyServiceError::NoLongerAvailable => ApiError::bad_request(error.to_string()),
            PropertyServiceError::Settings(source) => source.into(),
            PropertyServiceError::Repository(source) => {
                ApiError::internal("Failed to process property request", &source)
            }
        }
    }
}
