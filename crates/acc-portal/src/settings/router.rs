use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use super::domain::SettingsPatch;
use super::service::{SettingsService, SettingsServiceError};
use crate::accounts::StaffSession;
use crate::shared::http::ok;
use crate::shared::ApiError;

pub fn settings_public_router(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route("/api/settings", get(public_settings_handler))
        .with_state(service)
}

/// Reading is open to all staff; changing settings is reserved for administrators.
pub fn settings_admin_router(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route(
            "/api/admin/settings",
            get(all_settings_handler).put(update_settings_handler),
        )
        .with_state(service)
}

pub(crate) async fn public_settings_handler(
    State(service): State<Arc<SettingsService>>,
) -> Result<Response, ApiError> {
    Ok(ok(service.public()?))
}

pub(crate) async fn all_settings_handler(
    State(service): State<Arc<SettingsService>>,
    _session: StaffSession,
) -> Result<Response, ApiError> {
    Ok(ok(service.get_all()?))
}

pub(crate) async fn update_settings_handler(
    State(service): State<Arc<SettingsService>>,
    session: StaffSession,
    payload: Result<Json<SettingsPatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_admin()?;
    let Json(patch) = payload?;
    Ok(ok(service.update(patch)?))
}

impl From<SettingsServiceError> for ApiError {
    fn from(error: SettingsServiceError) -> Self {
        match error {
            SettingsServiceError::Validation(errors) => errors.into(),
            SettingsServiceError::Repository(source) => {
                ApiError::internal("Failed to process settings", &source)
            }
        }
    }
}
