use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::warn;

use super::domain::{Role, UserId};
use super::service::AccountServiceError;
use crate::shared::ApiError;

/// Resolves bearer tokens into active staff sessions.
pub trait SessionAuthority: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<StaffSession, AccountServiceError>;
}

/// Authenticated staff member making an admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffSession {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl StaffSession {
    /// Mutating admin routes: editors and administrators only.
    pub fn require_write(&self) -> Result<(), ApiError> {
        if self.role.can_write() {
            Ok(())
        } else {
            warn!(user_id = %self.user_id, "viewer attempted a write");
            Err(ApiError::forbidden("Viewers have read-only access"))
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role.can_manage_users() {
            Ok(())
        } else {
            warn!(user_id = %self.user_id, role = self.role.label(), "non-admin attempted user management");
            Err(ApiError::forbidden("Administrator role required"))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for StaffSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authority = parts
            .extensions
            .get::<Arc<dyn SessionAuthority>>()
            .cloned()
            .ok_or_else(|| {
                ApiError::internal(
                    "Authentication is not configured",
                    &"missing SessionAuthority extension",
                )
            })?;

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        authority.authenticate(token).map_err(|err| match err {
            AccountServiceError::Repository(source) => {
                ApiError::internal("Failed to verify session", &source)
            }
            _ => ApiError::unauthorized("Invalid or expired session"),
        })
    }
}
