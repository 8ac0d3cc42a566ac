//! JSON REST API for Palimpsest.
//!
//! Exposes an axum [`Router`] backed by any [`ChainQuery`] and
//! [`ContentStore`]. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", palimpsest_api::api_router(chain.clone(), content.clone()))
//! ```

pub mod blogs;
pub mod comments;
pub mod content;
pub mod error;
pub mod posts;
pub mod profiles;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use palimpsest_core::store::{ChainQuery, ContentStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S, C> {
  pub chain:   Arc<S>,
  pub content: Arc<C>,
}

impl<S, C> Clone for ApiState<S, C> {
  fn clone(&self) -> Self {
    Self {
      chain:   Arc::clone(&self.chain),
      content: Arc::clone(&self.content),
    }
  }
}

/// Build a fully-materialised API router over `chain` and `content`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, C>(chain: Arc<S>, content: Arc<C>) -> Router<()>
where
  S: ChainQuery + 'static,
  C: ContentStore + 'static,
{
  Router::new()
    // Blogs
    .route("/blogs/{id}", get(blogs::get_one::<S, C>))
    .route("/blogs/{id}/history", get(blogs::history::<S, C>))
    // Posts
    .route("/posts/{id}", get(posts::get_one::<S, C>))
    .route("/posts/{id}/history", get(posts::history::<S, C>))
    // Comments
    .route("/comments/{id}", get(comments::get_one::<S, C>))
    .route("/comments/{id}/history", get(comments::history::<S, C>))
    // Profiles
    .route("/profiles/{account}", get(profiles::get_one::<S, C>))
    .route("/profiles/{account}/history", get(profiles::history::<S, C>))
    // Content
    .route("/content", post(content::create::<S, C>))
    .route(
      "/content/{content_ref}",
      get(content::get_one::<S, C>).delete(content::remove::<S, C>),
    )
    .with_state(ApiState { chain, content })
}
