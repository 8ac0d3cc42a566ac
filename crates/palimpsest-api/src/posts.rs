//! Handlers for `/posts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/posts/:id` | [`PostView`]: content, summary, shared original |
//! | `GET`  | `/posts/:id/history` | Oldest first; empty if never edited |

use axum::{
  Json,
  extract::{Path, State},
};
use palimpsest_core::{
  content::PostContent,
  entity::{Post, PostId},
  store::{ChainQuery, ContentStore},
  view::{HistoryEntry, PostView, post_history, post_view},
};

use crate::{ApiState, error::ApiError};

async fn find<S: ChainQuery>(chain: &S, id: PostId) -> Result<Post, ApiError> {
  chain
    .post_by_id(id)
    .await
    .map_err(|e| ApiError::Chain(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))
}

/// `GET /posts/:id`
pub async fn get_one<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(id): Path<PostId>,
) -> Result<Json<PostView>, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  let post = find(state.chain.as_ref(), id).await?;
  let view = post_view(state.chain.as_ref(), state.content.as_ref(), post).await;
  Ok(Json(view))
}

/// `GET /posts/:id/history`
pub async fn history<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(id): Path<PostId>,
) -> Result<Json<Vec<HistoryEntry<PostContent>>>, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  let post = find(state.chain.as_ref(), id).await?;
  let entries = post_history(state.content.as_ref(), &post).await;
  Ok(Json(entries.unwrap_or_default()))
}
