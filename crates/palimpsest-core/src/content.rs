//! Off-chain content: the JSON documents that on-chain entities point at.
//!
//! Chain state only stores a [`ContentRef`] per entity. The human-readable
//! body lives in the content store and is fetched on demand. The store is
//! schemaless, so every payload field defaults when missing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of characters kept by [`summarize`] before truncating.
pub const SUMMARY_LIMIT: usize = 150;

// ─── Reference ───────────────────────────────────────────────────────────────

/// Opaque key identifying a payload in the content store (an IPFS hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(pub String);

impl ContentRef {
  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ContentRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ContentRef {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for ContentRef {
  fn from(s: String) -> Self { Self(s) }
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// Body of a blog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogContent {
  pub name:  String,
  pub desc:  String,
  pub image: String,
  pub tags:  Vec<String>,
}

/// Body of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostContent {
  pub title: String,
  /// Markdown.
  pub body:  String,
  pub image: String,
  pub tags:  Vec<String>,
}

/// Body of a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentContent {
  pub body: String,
}

/// Body of a social profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileContent {
  pub fullname:      String,
  pub avatar:        String,
  pub email:         String,
  pub personal_site: String,
  /// Markdown.
  pub about:         String,
  pub facebook:      String,
  pub twitter:       String,
  pub linkedin:      String,
  pub medium:        String,
  pub github:        String,
  pub instagram:     String,
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// Shorten `body` for previews.
///
/// Bodies of at most [`SUMMARY_LIMIT`] characters are returned unchanged;
/// longer ones are cut at that many characters and suffixed with `...`.
pub fn summarize(body: &str) -> String {
  match body.char_indices().nth(SUMMARY_LIMIT) {
    Some((cut, _)) => format!("{}...", &body[..cut]),
    None => body.to_owned(),
  }
}
