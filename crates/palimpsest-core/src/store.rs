//! The `ChainQuery` and `ContentStore` traits.
//!
//! `ChainQuery` is implemented by whatever supplies decoded chain state (the
//! in-memory [`MemoryChain`](crate::memory::MemoryChain) here; a chain RPC
//! client elsewhere). `ContentStore` is implemented by `palimpsest-ipfs` and
//! by [`MemoryContentStore`](crate::memory::MemoryContentStore). Higher layers
//! depend on these abstractions, not on any concrete backend.

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
  account::AccountId,
  content::ContentRef,
  entity::{Blog, BlogId, Comment, CommentId, Post, PostId, SocialAccount},
};

// ─── Chain ───────────────────────────────────────────────────────────────────

/// Point lookups of decoded chain state.
///
/// Every lookup returns `Ok(None)` when the entity does not exist; errors are
/// reserved for failures of the backend itself.
pub trait ChainQuery: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn blog_by_id(
    &self,
    id: BlogId,
  ) -> impl Future<Output = Result<Option<Blog>, Self::Error>> + Send + '_;

  fn post_by_id(
    &self,
    id: PostId,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  fn comment_by_id(
    &self,
    id: CommentId,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  /// Profiles live inside the social account; see [`SocialAccount::profile`].
  fn social_account_by_id<'a>(
    &'a self,
    account: &'a AccountId,
  ) -> impl Future<Output = Result<Option<SocialAccount>, Self::Error>> + Send + 'a;
}

// ─── Content ─────────────────────────────────────────────────────────────────

/// An error from a [`ContentStore`] that can tell a missing entry apart from
/// any other failure.
pub trait ContentError: std::error::Error + Send + Sync + 'static {
  fn is_not_found(&self) -> bool;
}

/// A content-addressed store of JSON payloads.
///
/// Callers treat fetch failures as "content unavailable", never as fatal.
pub trait ContentStore: Send + Sync {
  type Error: ContentError;

  /// Fetch and decode the payload stored under `content_ref`.
  fn fetch<'a, T>(
    &'a self,
    content_ref: &'a ContentRef,
  ) -> impl Future<Output = Result<T, Self::Error>> + Send + 'a
  where
    T: DeserializeOwned + Send + 'a;

  /// Store `payload` and return the reference it can be fetched under.
  fn store<'a, T>(
    &'a self,
    payload: &'a T,
  ) -> impl Future<Output = Result<ContentRef, Self::Error>> + Send + 'a
  where
    T: Serialize + Sync + 'a;

  /// Remove the payload stored under `content_ref`.
  fn remove<'a>(
    &'a self,
    content_ref: &'a ContentRef,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
