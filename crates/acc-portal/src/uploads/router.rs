use std::sync::Arc;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::policy::UploadKind;
use super::storage::{UploadError, UploadStore};
use crate::accounts::StaffSession;
use crate::shared::http::ok;
use crate::shared::ApiError;

const BODY_SLACK: usize = 1024 * 1024;
const MAX_FILES_PER_REQUEST: usize = 5;

#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub kind: UploadKind,
    pub dir: Option<String>,
}

/// Per-file outcome; one bad file does not fail the batch.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `POST /api/admin/uploads?kind=image|document|any&dir=…`, multipart.
pub fn upload_router(store: Arc<UploadStore>) -> Router {
    let body_limit = (store.max_file_size() as usize)
        .saturating_mul(MAX_FILES_PER_REQUEST)
        .saturating_add(BODY_SLACK);

    Router::new()
        .route("/api/admin/uploads", post(upload_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(store)
}

async fn upload_handler(
    State(store): State<Arc<UploadStore>>,
    session: StaffSession,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    session.require_write()?;
    let Query(query) = query?;
    let mut multipart =
        multipart.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut results = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let declared = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let result = match store
            .store(
                query.kind,
                query.dir.as_deref(),
                &original_name,
                declared.as_deref(),
                &bytes,
            )
            .await
        {
            Ok(stored) => UploadResult {
                success: true,
                url: Some(stored.url),
                file_name: Some(stored.file_name),
                original_name,
                error: None,
            },
            Err(UploadError::Rejected(reason)) => {
                warn!(%original_name, %reason, "upload rejected");
                UploadResult {
                    success: false,
                    url: None,
                    file_name: None,
                    original_name,
                    error: Some(reason),
                }
            }
            Err(UploadError::Io(source)) => {
                error!(%original_name, error = %source, "upload write failed");
                UploadResult {
                    success: false,
                    url: None,
                    file_name: None,
                    original_name,
                    error: Some("Failed to upload file".to_string()),
                }
            }
        };
        results.push(result);
    }

    if results.is_empty() {
        return Err(ApiError::bad_request("No files provided"));
    }
    Ok(ok(results))
}

fn multipart_error(error: MultipartError) -> ApiError {
    ApiError::new(error.status(), error.body_text())
}
