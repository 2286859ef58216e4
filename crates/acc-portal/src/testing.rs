//! Helpers shared by router tests across feature modules.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::{Extension, Router};
use serde_json::Value;

use crate::accounts::{AccountServiceError, Role, SessionAuthority, StaffSession, UserId};
use crate::config::{
    AppConfig, AppEnvironment, AuthConfig, RateLimitConfig, ServerConfig, TelemetryConfig,
    UploadConfig,
};

pub(crate) const ADMIN_TOKEN: &str = "admin-token";
pub(crate) const EDITOR_TOKEN: &str = "editor-token";
pub(crate) const VIEWER_TOKEN: &str = "viewer-token";

/// Fixed token table standing in for signed bearer tokens.
pub(crate) struct StaticSessions;

impl StaticSessions {
    pub(crate) fn session(role: Role) -> StaffSession {
        let label = role.label().to_ascii_lowercase();
        StaffSession {
            user_id: UserId(format!("{label}-id")),
            email: format!("{label}@acc.gov.sl"),
            name: format!("Test {label}"),
            role,
        }
    }
}

impl SessionAuthority for StaticSessions {
    fn authenticate(&self, token: &str) -> Result<StaffSession, AccountServiceError> {
        match token {
            ADMIN_TOKEN => Ok(Self::session(Role::Admin)),
            EDITOR_TOKEN => Ok(Self::session(Role::Editor)),
            VIEWER_TOKEN => Ok(Self::session(Role::Viewer)),
            _ => Err(AccountServiceError::InvalidCredentials),
        }
    }
}

/// Install the fixed token table on a router.
pub(crate) fn with_sessions(router: Router) -> Router {
    let authority: Arc<dyn SessionAuthority> = Arc::new(StaticSessions);
    router.layer(Extension(authority))
}

pub(crate) fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request builds")
}

pub(crate) async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Configuration built in code so tests never race on process environment.
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        environment: AppEnvironment::Test,
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        telemetry: TelemetryConfig {
            log_level: "warn".to_string(),
        },
        uploads: UploadConfig {
            directory: std::env::temp_dir().join("acc-portal-test-uploads"),
            max_file_size: 1024 * 1024,
        },
        auth: AuthConfig {
            secret: "test-secret".to_string(),
            token_ttl_minutes: 60,
            password_cost: 4,
            admin_email: "admin@acc.gov.sl".to_string(),
            admin_password: "Admin@123".to_string(),
        },
        rate_limit: RateLimitConfig {
            max_requests: 3,
            window: Duration::from_secs(60),
        },
    }
}
