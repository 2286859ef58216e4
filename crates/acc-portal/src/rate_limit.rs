//! In-process fixed-window limiter keyed by client IP and request path.
//!
//! State lives in one process; several replicas each keep their own windows.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    resets_at: Instant,
}

/// Outcome of a limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after_secs: u64 },
}

#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window)
    }

    pub fn check(&self, key: &str, now: Instant) -> RateDecision {
        let mut guard = self.entries.lock().expect("rate limiter mutex poisoned");

        match guard.get_mut(key) {
            Some(window) if now <= window.resets_at => {
                if window.count >= self.max_requests {
                    let remaining = window.resets_at.saturating_duration_since(now);
                    return RateDecision::Limited {
                        retry_after_secs: ceil_secs(remaining).max(1),
                    };
                }
                window.count += 1;
                RateDecision::Allowed
            }
            _ => {
                guard.insert(
                    key.to_string(),
                    Window {
                        count: 1,
                        resets_at: now + self.window,
                    },
                );
                RateDecision::Allowed
            }
        }
    }

    /// Drop windows that have already expired. Returns how many were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let mut guard = self.entries.lock().expect("rate limiter mutex poisoned");
        let before = guard.len();
        guard.retain(|_, window| now <= window.resets_at);
        before - guard.len()
    }

    pub fn tracked_keys(&self) -> usize {
        self.entries
            .lock()
            .expect("rate limiter mutex poisoned")
            .len()
    }

    /// Background task sweeping expired windows once a minute.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                let removed = limiter.sweep(Instant::now());
                if removed > 0 {
                    debug!(removed, "rate limiter swept expired windows");
                }
            }
        })
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// First hop of `X-Forwarded-For`, or `"unknown"`.
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Middleware rejecting requests over the limit with `429` and `Retry-After`.
pub async fn enforce(
    State(limiter): State<Arc<FixedWindowLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let key = format!("{}:{}", client_ip(request.headers()), request.uri().path());

    match limiter.check(&key, Instant::now()) {
        RateDecision::Allowed => next.run(request).await,
        RateDecision::Limited { retry_after_secs } => {
            warn!(path = request.uri().path(), retry_after_secs, "rate limit exceeded");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "success": false,
                    "error": "Too many requests. Please try again later.",
                })),
            )
                .into_response();
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}
