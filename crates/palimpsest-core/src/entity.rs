//! Decoded chain entities.
//!
//! These are read-only views of on-chain state. Each entity points at its
//! body through a [`ContentRef`] and carries the edit trail recorded by the
//! chain, newest first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  account::{AccountId, Change},
  content::ContentRef,
  history::{
    CommentHistoryRecord, HistoryRecord, ResolvedHistoryRecord, reconstruct_with_current,
  },
};

// ─── Identifiers ─────────────────────────────────────────────────────────────

macro_rules! id_type {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(pub u64);

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
    }

    impl From<u64> for $name {
      fn from(id: u64) -> Self { Self(id) }
    }
  };
}

id_type!(
  /// Identifier of a [`Blog`].
  BlogId
);
id_type!(
  /// Identifier of a [`Post`].
  PostId
);
id_type!(
  /// Identifier of a [`Comment`].
  CommentId
);

// ─── Blogs ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
  pub id:              BlogId,
  pub created:         Change,
  pub updated:         Option<Change>,
  pub writers:         Vec<AccountId>,
  pub slug:            String,
  pub content_ref:     ContentRef,
  pub posts_count:     u32,
  pub followers_count: u32,
  #[serde(default)]
  pub edit_history:    Vec<HistoryRecord>,
}

// ─── Posts ───────────────────────────────────────────────────────────────────

/// What kind of post this is. Shared posts point at the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "original", rename_all = "snake_case")]
pub enum PostExtension {
  #[default]
  RegularPost,
  SharedPost(PostId),
  SharedComment(CommentId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  pub id:              PostId,
  pub blog_id:         BlogId,
  pub created:         Change,
  pub updated:         Option<Change>,
  #[serde(default)]
  pub extension:       PostExtension,
  pub slug:            String,
  pub content_ref:     ContentRef,
  pub comments_count:  u16,
  pub upvotes_count:   u16,
  pub downvotes_count: u16,
  pub shares_count:    u16,
  #[serde(default)]
  pub edit_history:    Vec<HistoryRecord>,
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id:                   CommentId,
  pub parent_id:            Option<CommentId>,
  pub post_id:              PostId,
  pub created:              Change,
  pub updated:              Option<Change>,
  pub content_ref:          ContentRef,
  pub upvotes_count:        u16,
  pub downvotes_count:      u16,
  pub shares_count:         u16,
  pub direct_replies_count: u16,
  #[serde(default)]
  pub edit_history:         Vec<CommentHistoryRecord>,
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub created:      Change,
  pub updated:      Option<Change>,
  pub username:     String,
  pub content_ref:  ContentRef,
  #[serde(default)]
  pub edit_history: Vec<HistoryRecord>,
}

/// Per-account social state. The profile is optional: an account may follow
/// and be followed without ever creating one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccount {
  pub followers_count:          u32,
  pub following_accounts_count: u16,
  pub following_blogs_count:    u16,
  pub reputation:               u32,
  pub profile:                  Option<Profile>,
}

// ─── Editable ────────────────────────────────────────────────────────────────

/// An entity whose content and secondary identifier (slug or username) are
/// tracked by an edit trail.
pub trait Editable {
  /// The edit trail, newest first.
  fn edit_history(&self) -> &[HistoryRecord];

  fn current_content_ref(&self) -> &ContentRef;

  fn current_secondary(&self) -> &str;

  /// The gap-filled trail, oldest first, with never-recorded fields taken
  /// from the current state. `None` if the entity was never edited.
  fn resolved_history(&self) -> Option<Vec<ResolvedHistoryRecord>> {
    reconstruct_with_current(
      self.edit_history(),
      self.current_content_ref(),
      self.current_secondary(),
    )
  }
}

impl Editable for Blog {
  fn edit_history(&self) -> &[HistoryRecord] { &self.edit_history }

  fn current_content_ref(&self) -> &ContentRef { &self.content_ref }

  fn current_secondary(&self) -> &str { &self.slug }
}

impl Editable for Post {
  fn edit_history(&self) -> &[HistoryRecord] { &self.edit_history }

  fn current_content_ref(&self) -> &ContentRef { &self.content_ref }

  fn current_secondary(&self) -> &str { &self.slug }
}

impl Editable for Profile {
  fn edit_history(&self) -> &[HistoryRecord] { &self.edit_history }

  fn current_content_ref(&self) -> &ContentRef { &self.content_ref }

  fn current_secondary(&self) -> &str { &self.username }
}
