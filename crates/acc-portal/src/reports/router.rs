use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::domain::{ReportFilters, ReportId, ReportPatch, ReportSubmission};
use super::service::{ReportService, ReportServiceError};
use crate::accounts::StaffSession;
use crate::rate_limit::{client_ip, enforce, FixedWindowLimiter};
use crate::shared::http::{created, ok, paginated};
use crate::shared::ApiError;

/// `POST /api/reports` (rate limited) and `GET /api/reports/track/:reference`.
pub fn report_public_router(service: Arc<ReportService>, limiter: Arc<FixedWindowLimiter>) -> Router {
    let submit = Router::new()
        .route("/api/reports", post(submit_handler))
        .route_layer(middleware::from_fn_with_state(limiter, enforce));

    Router::new()
        .route("/api/reports/track/:reference", get(track_handler))
        .merge(submit)
        .with_state(service)
}

pub fn report_admin_router(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/api/admin/reports", get(list_handler))
        .route(
            "/api/admin/reports/:id",
            get(detail_handler).patch(update_handler),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler(
    State(service): State<Arc<ReportService>>,
    headers: HeaderMap,
    payload: Result<Json<ReportSubmission>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(submission) = payload?;
    Ok(created(service.submit(submission, &client_ip(&headers))?))
}

pub(crate) async fn track_handler(
    State(service): State<Arc<ReportService>>,
    reference: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(reference) = reference?;
    Ok(ok(service.track(&reference)?))
}

pub(crate) async fn list_handler(
    State(service): State<Arc<ReportService>>,
    _session: StaffSession,
    filters: Result<Query<ReportFilters>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(filters) = filters?;
    Ok(paginated(service.admin_list(&filters)?))
}

pub(crate) async fn detail_handler(
    State(service): State<Arc<ReportService>>,
    _session: StaffSession,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    Ok(ok(service.get(&ReportId(id))?))
}

pub(crate) async fn update_handler(
    State(service): State<Arc<ReportService>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<ReportPatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    let Json(patch) = payload?;
    Ok(ok(service.update(&ReportId(id), patch)?))
}

impl From<ReportServiceError> for ApiError {
    fn from(error: ReportServiceError) -> Self {
        match error {
            ReportServiceError::Validation(errors) => errors.into(),
            ReportServiceError::AnonymousDisabled | ReportServiceError::AssigneeNotFound => {
                ApiError::bad_request(error.to_string())
            }
            ReportServiceError::NotFound => ApiError::not_found(error.to_string()),
            ReportServiceError::Settings(source) => source.into(),
            ReportServiceError::Repository(source) => {
                ApiError::internal("Failed to process report", &source)
            }
        }
    }
}
