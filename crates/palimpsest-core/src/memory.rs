//! In-memory implementations of [`ChainQuery`] and [`ContentStore`].
//!
//! [`MemoryChain`] serves lookups from a decoded chain snapshot.
//! [`MemoryContentStore`] keeps payloads in a map keyed by the SHA-256 of
//! their serialised form, so it behaves like a content-addressed store.

use std::{
  collections::{BTreeMap, HashMap},
  sync::Mutex,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};

use crate::{
  Error, Result,
  account::AccountId,
  content::ContentRef,
  entity::{Blog, BlogId, Comment, CommentId, Post, PostId, SocialAccount},
  store::{ChainQuery, ContentStore},
};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Decoded chain state, as loaded from a JSON snapshot file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSnapshot {
  pub blogs:           Vec<Blog>,
  pub posts:           Vec<Post>,
  pub comments:        Vec<Comment>,
  pub social_accounts: BTreeMap<AccountId, SocialAccount>,
}

// ─── Chain ───────────────────────────────────────────────────────────────────

/// A [`ChainQuery`] backed by hash maps. Populate it before sharing; lookups
/// never fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryChain {
  blogs:           HashMap<BlogId, Blog>,
  posts:           HashMap<PostId, Post>,
  comments:        HashMap<CommentId, Comment>,
  social_accounts: HashMap<AccountId, SocialAccount>,
}

impl MemoryChain {
  pub fn new() -> Self { Self::default() }

  pub fn from_snapshot(snapshot: ChainSnapshot) -> Self {
    let mut chain = Self::new();
    for blog in snapshot.blogs {
      chain.insert_blog(blog);
    }
    for post in snapshot.posts {
      chain.insert_post(post);
    }
    for comment in snapshot.comments {
      chain.insert_comment(comment);
    }
    for (account, social) in snapshot.social_accounts {
      chain.insert_social_account(account, social);
    }
    chain
  }

  /// Insert or replace a blog, keyed by its id.
  pub fn insert_blog(&mut self, blog: Blog) { self.blogs.insert(blog.id, blog); }

  /// Insert or replace a post, keyed by its id.
  pub fn insert_post(&mut self, post: Post) { self.posts.insert(post.id, post); }

  /// Insert or replace a comment, keyed by its id.
  pub fn insert_comment(&mut self, comment: Comment) {
    self.comments.insert(comment.id, comment);
  }

  pub fn insert_social_account(&mut self, account: AccountId, social: SocialAccount) {
    self.social_accounts.insert(account, social);
  }
}

impl ChainQuery for MemoryChain {
  type Error = Error;

  async fn blog_by_id(&self, id: BlogId) -> Result<Option<Blog>> {
    Ok(self.blogs.get(&id).cloned())
  }

  async fn post_by_id(&self, id: PostId) -> Result<Option<Post>> {
    Ok(self.posts.get(&id).cloned())
  }

  async fn comment_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
    Ok(self.comments.get(&id).cloned())
  }

  async fn social_account_by_id<'a>(
    &'a self,
    account: &'a AccountId,
  ) -> Result<Option<SocialAccount>> {
    Ok(self.social_accounts.get(account).cloned())
  }
}

// ─── Content ─────────────────────────────────────────────────────────────────

/// A [`ContentStore`] that keeps JSON payloads in memory.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
  entries: Mutex<HashMap<ContentRef, serde_json::Value>>,
}

impl MemoryContentStore {
  pub fn new() -> Self { Self::default() }

  /// The reference a payload is stored under: hex SHA-256 of its JSON.
  pub fn content_ref_for(value: &serde_json::Value) -> Result<ContentRef> {
    let bytes = serde_json::to_vec(value)?;
    Ok(ContentRef(hex::encode(Sha256::digest(&bytes))))
  }

  /// Store a raw JSON value under an explicit reference.
  pub fn insert(&self, content_ref: ContentRef, value: serde_json::Value) -> Result<()> {
    self.entries.lock().map_err(|_| Error::Poisoned)?.insert(content_ref, value);
    Ok(())
  }

  pub fn contains(&self, content_ref: &ContentRef) -> Result<bool> {
    Ok(self.entries.lock().map_err(|_| Error::Poisoned)?.contains_key(content_ref))
  }

  pub fn len(&self) -> Result<usize> {
    Ok(self.entries.lock().map_err(|_| Error::Poisoned)?.len())
  }

  pub fn is_empty(&self) -> Result<bool> { Ok(self.len()? == 0) }
}

impl ContentStore for MemoryContentStore {
  type Error = Error;

  async fn fetch<'a, T>(&'a self, content_ref: &'a ContentRef) -> Result<T>
  where
    T: DeserializeOwned + Send + 'a,
  {
    let value = {
      let entries = self.entries.lock().map_err(|_| Error::Poisoned)?;
      entries.get(content_ref).cloned()
    };
    let value = value.ok_or_else(|| Error::ContentNotFound(content_ref.clone()))?;
    Ok(serde_json::from_value(value)?)
  }

  async fn store<'a, T>(&'a self, payload: &'a T) -> Result<ContentRef>
  where
    T: Serialize + Sync + 'a,
  {
    let value = serde_json::to_value(payload)?;
    let content_ref = Self::content_ref_for(&value)?;
    self.insert(content_ref.clone(), value)?;
    Ok(content_ref)
  }

  async fn remove<'a>(&'a self, content_ref: &'a ContentRef) -> Result<()> {
    let removed = self
      .entries
      .lock()
      .map_err(|_| Error::Poisoned)?
      .remove(content_ref);
    match removed {
      Some(_) => Ok(()),
      None => Err(Error::ContentNotFound(content_ref.clone())),
    }
  }
}
