//! Handlers for `/content` endpoints, passed through to the content store.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/content` | Body: JSON object; returns 201 + `{"content_ref": ...}` |
//! | `GET`    | `/content/{ref}` | Raw JSON payload |
//! | `DELETE` | `/content/{ref}` | 202; removal runs in the background |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use palimpsest_core::{
  content::ContentRef,
  store::{ChainQuery, ContentError, ContentStore},
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct Created {
  pub content_ref: ContentRef,
}

/// `POST /content`
pub async fn create<S, C>(
  State(state): State<ApiState<S, C>>,
  Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  if !payload.is_object() {
    return Err(ApiError::BadRequest("payload must be a JSON object".into()));
  }

  let content_ref = state
    .content
    .store(&payload)
    .await
    .map_err(|e| ApiError::Content(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(Created { content_ref })))
}

/// `GET /content/{ref}`
pub async fn get_one<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(content_ref): Path<ContentRef>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  match state.content.fetch(&content_ref).await {
    Ok(payload) => Ok(Json(payload)),
    Err(e) if e.is_not_found() => {
      Err(ApiError::NotFound(format!("content {content_ref} not found")))
    }
    Err(e) => Err(ApiError::Content(Box::new(e))),
  }
}

/// `DELETE /content/{ref}`. Accepted immediately; failures are only logged.
pub async fn remove<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(content_ref): Path<ContentRef>,
) -> StatusCode
where
  S: ChainQuery,
  C: ContentStore + 'static,
{
  remove_detached(Arc::clone(&state.content), content_ref);
  StatusCode::ACCEPTED
}

/// Remove `content_ref` on a background task. The outcome is logged, never
/// returned.
pub fn remove_detached<C>(content: Arc<C>, content_ref: ContentRef) -> JoinHandle<()>
where
  C: ContentStore + 'static,
{
  tokio::spawn(async move {
    match content.remove(&content_ref).await {
      Ok(()) => debug!(%content_ref, "removed content"),
      Err(err) => warn!(%content_ref, error = %err, "failed to remove content"),
    }
  })
}
