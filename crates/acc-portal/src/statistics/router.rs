use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use super::domain::{DashboardQuery, StatisticDraft, StatisticId, StatisticPatch};
use super::import::StatisticsImportError;
use super::service::{StatisticsService, StatisticsServiceError};
use crate::accounts::StaffSession;
use crate::shared::http::{created, ok};
use crate::shared::{ApiError, ApiResponse};

pub fn statistics_public_router(service: Arc<StatisticsService>) -> Router {
    Router::new()
        .route("/api/dashboard/stats", get(dashboard_handler))
        .with_state(service)
}

pub fn statistics_admin_router(service: Arc<StatisticsService>) -> Router {
    Router::new()
        .route(
            "/api/admin/statistics",
            get(list_handler).post(create_handler),
        )
        .route("/api/admin/statistics/import", post(import_handler))
        .route(
            "/api/admin/statistics/:id",
            patch(update_handler).delete(delete_handler),
        )
        .with_state(service)
}

async fn dashboard_handler(
    State(service): State<Arc<StatisticsService>>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    Ok(ok(service.dashboard(query.period_type)?))
}

async fn list_handler(
    State(service): State<Arc<StatisticsService>>,
    _session: StaffSession,
) -> Result<Response, ApiError> {
    Ok(ok(service.list()?))
}

async fn create_handler(
    State(service): State<Arc<StatisticsService>>,
    session: StaffSession,
    payload: Result<Json<StatisticDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Json(draft) = payload?;
    Ok(created(service.create(draft)?))
}

async fn update_handler(
    State(service): State<Arc<StatisticsService>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<StatisticPatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    let Json(patch) = payload?;
    Ok(ok(service.update(&StatisticId(id), patch)?))
}

async fn delete_handler(
    State(service): State<Arc<StatisticsService>>,
    session: StaffSession,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Path(id) = id?;
    service.delete(&StatisticId(id))?;
    Ok(ApiResponse::message_only("Statistic deleted").respond(StatusCode::OK))
}

/// Raw CSV request body.
async fn import_handler(
    State(service): State<Arc<StatisticsService>>,
    session: StaffSession,
    body: Bytes,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let summary = service.import_csv(body.as_ref())?;
    Ok(ok(summary))
}

impl From<StatisticsServiceError> for ApiError {
    fn from(error: StatisticsServiceError) -> Self {
        match error {
            StatisticsServiceError::Validation(errors) => errors.into(),
            StatisticsServiceError::Duplicate => ApiError::bad_request(error.to_string()),
            StatisticsServiceError::NotFound => ApiError::not_found(error.to_string()),
            StatisticsServiceError::Repository(source) => {
                ApiError::internal("Failed to process statistics request", &source)
            }
        }
    }
}

impl From<StatisticsImportError> for ApiError {
    fn from(error: StatisticsImportError) -> Self {
        match error {
            StatisticsImportError::Csv(_) | StatisticsImportError::Io(_) => {
                ApiError::bad_request(error.to_string())
            }
            StatisticsImportError::Storage(source) => {
                ApiError::internal("Failed to import statistics", &source)
            }
        }
    }
}
