use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::domain::{SubscribeRequest, SubscriptionOutcome, UnsubscribeRequest};
use super::service::{SubscriptionService, SubscriptionServiceError};
use crate::accounts::StaffSession;
use crate::rate_limit::{enforce, FixedWindowLimiter};
use crate::shared::http::ok;
use crate::shared::{ApiError, ApiResponse};

/// `POST /api/subscribe` (rate limited) and `POST /api/unsubscribe`.
pub fn subscription_public_router(
    service: Arc<SubscriptionService>,
    limiter: Arc<FixedWindowLimiter>,
) -> Router {
    let subscribe = Router::new()
        .route("/api/subscribe", post(subscribe_handler))
        .route_layer(middleware::from_fn_with_state(limiter, enforce));

    Router::new()
        .route("/api/unsubscribe", post(unsubscribe_handler))
        .merge(subscribe)
        .with_state(service)
}

pub fn subscription_admin_router(service: Arc<SubscriptionService>) -> Router {
    Router::new()
        .route("/api/admin/subscriptions", get(list_handler))
        .with_state(service)
}

async fn subscribe_handler(
    State(service): State<Arc<SubscriptionService>>,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let outcome = service.subscribe(request)?;
    let status = match outcome {
        SubscriptionOutcome::Created => StatusCode::CREATED,
        SubscriptionOutcome::Reactivated => StatusCode::OK,
    };
    Ok(ApiResponse::message_only(outcome.message()).respond(status))
}

async fn unsubscribe_handler(
    State(service): State<Arc<SubscriptionService>>,
    payload: Result<Json<UnsubscribeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    service.unsubscribe(&request.email)?;
    Ok(ApiResponse::message_only("You have been unsubscribed").respond(StatusCode::OK))
}

async fn list_handler(
    State(service): State<Arc<SubscriptionService>>,
    _session: StaffSession,
) -> Result<Response, ApiError> {
    Ok(ok(service.list()?))
}

impl From<SubscriptionServiceError> for ApiError {
    fn from(error: SubscriptionServiceError) -> Self {
        match error {
            SubscriptionServiceError::Validation(errors) => errors.into(),
            SubscriptionServiceError::AlreadySubscribed => ApiError::bad_request(error.to_string()),
            SubscriptionServiceError::NotFound => ApiError::not_found(error.to_string()),
            SubscriptionServiceError::Repository(source) => {
                ApiError::internal("Failed to subscribe", &source)
            }
        }
    }
}
