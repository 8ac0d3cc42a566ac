//! Handlers for `/blogs` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/blogs/:id` | 404 if not found |
//! | `GET`  | `/blogs/:id/history` | Oldest first; empty if never edited |

use axum::{
  Json,
  extract::{Path, State},
};
use palimpsest_core::{
  content::BlogContent,
  entity::{Blog, BlogId},
  store::{ChainQuery, ContentStore},
  view::{HistoryEntry, blog_history},
};

use crate::{ApiState, error::ApiError};

async fn find<S: ChainQuery>(chain: &S, id: BlogId) -> Result<Blog, ApiError> {
  chain
    .blog_by_id(id)
    .await
    .map_err(|e| ApiError::Chain(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("blog {id} not found")))
}

/// `GET /blogs/:id`
pub async fn get_one<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(id): Path<BlogId>,
) -> Result<Json<Blog>, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  Ok(Json(find(state.chain.as_ref(), id).await?))
}

/// `GET /blogs/:id/history`
pub async fn history<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(id): Path<BlogId>,
) -> Result<Json<Vec<HistoryEntry<BlogContent>>>, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  let blog = find(state.chain.as_ref(), id).await?;
  let entries = blog_history(state.content.as_ref(), &blog).await;
  Ok(Json(entries.unwrap_or_default()))
}
