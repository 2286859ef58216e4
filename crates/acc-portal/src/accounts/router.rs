use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use super::domain::{LoginRequest, NewUser, UserId, UserPatch};
use super::service::{AccountService, AccountServiceError};
use super::session::StaffSession;
use crate::rate_limit::{enforce, FixedWindowLimiter};
use crate::shared::http::{created, ok};
use crate::shared::ApiError;

/// `POST /api/auth/login` (rate limited) and `GET /api/auth/me`.
pub fn auth_router(service: Arc<AccountService>, limiter: Arc<FixedWindowLimiter>) -> Router {
    let login = Router::new()
        .route("/api/auth/login", post(login_handler))
        .route_layer(middleware::from_fn_with_state(limiter, enforce));

    Router::new()
        .route("/api/auth/me", get(me_handler))
        .merge(login)
        .with_state(service)
}

/// User management, administrators only.
pub fn account_admin_router(service: Arc<AccountService>) -> Router {
    Router::new()
        .route(
            "/api/admin/users",
            get(list_users_handler).post(create_user_handler),
        )
        .route(
            "/api/admin/users/:user_id",
            patch(update_user_handler).delete(deactivate_user_handler),
        )
        .with_state(service)
}

pub(crate) async fn login_handler(
    State(service): State<Arc<AccountService>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let outcome = service.login(request)?;
    Ok(ok(outcome))
}

pub(crate) async fn me_handler(
    State(service): State<Arc<AccountService>>,
    session: StaffSession,
) -> Result<Response, ApiError> {
    let user = service.get(&session.user_id)?;
    Ok(ok(user.view()))
}

pub(crate) async fn list_users_handler(
    State(service): State<Arc<AccountService>>,
    session: StaffSession,
) -> Result<Response, ApiError> {
    session.require_admin()?;
    Ok(ok(service.list_users()?))
}

pub(crate) async fn create_user_handler(
    State(service): State<Arc<AccountService>>,
    session: StaffSession,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_admin()?;
    let Json(request) = payload?;
    Ok(created(service.create_user(request)?))
}

pub(crate) async fn update_user_handler(
    State(service): State<Arc<AccountService>>,
    session: StaffSession,
    user_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    session.require_admin()?;
    let Path(user_id) = user_id?;
    let Json(patch) = payload?;
    Ok(ok(service.update_user(&UserId(user_id), patch, &session)?))
}

pub(crate) async fn deactivate_user_handler(
    State(service): State<Arc<AccountService>>,
    session: StaffSession,
    user_id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    session.require_admin()?;
    let Path(user_id) = user_id?;
    Ok(ok(service.deactivate(&UserId(user_id), &session)?))
}

impl From<AccountServiceError> for ApiError {
    fn from(error: AccountServiceError) -> Self {
        match error {
            AccountServiceError::Validation(errors) => errors.into(),
            AccountServiceError::EmailInUse
            | AccountServiceError::SelfDeactivation
            | AccountServiceError::SelfDemotion => ApiError::bad_request(error.to_string()),
            AccountServiceError::InvalidCredentials | AccountServiceError::InactiveAccount => {
                ApiError::unauthorized(error.to_string())
            }
            AccountServiceError::NotFound => ApiError::not_found(error.to_string()),
            AccountServiceError::Token(source) => ApiError::internal("Failed to issue token", &source),
            AccountServiceError::Password(source) => {
                ApiError::internal("Failed to process account request", &source)
            }
            AccountServiceError::Repository(source) => {
                ApiError::internal("Failed to process account request", &source)
            }
        }
    }
}
