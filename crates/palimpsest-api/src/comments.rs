//! Handlers for `/comments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/comments/:id` | 404 if not found |
//! | `GET`  | `/comments/:id/history` | Prior bodies, oldest first |

use axum::{
  Json,
  extract::{Path, State},
};
use palimpsest_core::{
  entity::{Comment, CommentId},
  store::{ChainQuery, ContentStore},
  view::{CommentHistoryEntry, comment_history},
};

use crate::{ApiState, error::ApiError};

async fn find<S: ChainQuery>(chain: &S, id: CommentId) -> Result<Comment, ApiError> {
  chain
    .comment_by_id(id)
    .await
    .map_err(|e| ApiError::Chain(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("comment {id} not found")))
}

/// `GET /comments/:id`
pub async fn get_one<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(id): Path<CommentId>,
) -> Result<Json<Comment>, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  Ok(Json(find(state.chain.as_ref(), id).await?))
}

/// `GET /comments/:id/history`
pub async fn history<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(id): Path<CommentId>,
) -> Result<Json<Vec<CommentHistoryEntry>>, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  let comment = find(state.chain.as_ref(), id).await?;
  let entries = comment_history(state.content.as_ref(), &comment).await;
  Ok(Json(entries.unwrap_or_default()))
}
