//! Read models assembled from chain state and off-chain content.
//!
//! Every view degrades instead of failing: content that cannot be fetched
//! shows up as `None` and is logged, never propagated.

use futures::future::join_all;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
  account::Change,
  content::{BlogContent, CommentContent, ContentRef, PostContent, ProfileContent, summarize},
  entity::{Blog, Comment, Editable, Post, PostExtension, PostId, Profile},
  history::{ResolvedHistoryRecord, SecondaryFieldKind, chronological},
  store::{ChainQuery, ContentStore},
};

// ─── History ─────────────────────────────────────────────────────────────────

/// One resolved snapshot of an entity together with its fetched content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry<T> {
  pub edited:         Change,
  pub content_ref:    Option<ContentRef>,
  pub secondary_kind: SecondaryFieldKind,
  pub secondary:      Option<String>,
  /// `None` when the content ref is unknown or the fetch failed.
  pub content:        Option<T>,
}

/// One prior version of a comment together with its fetched body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentHistoryEntry {
  pub edited:      Change,
  pub content_ref: ContentRef,
  pub content:     Option<CommentContent>,
}

/// Fetch `content_ref`, logging and swallowing any failure.
pub async fn fetch_or_none<C, T>(store: &C, content_ref: &ContentRef) -> Option<T>
where
  C: ContentStore,
  T: DeserializeOwned + Send,
{
  match store.fetch(content_ref).await {
    Ok(content) => Some(content),
    Err(err) => {
      warn!(%content_ref, error = %err, "content unavailable");
      None
    }
  }
}

/// Pair each resolved record with its content. Fetches run concurrently and
/// independently; the output keeps the order of `records`.
pub async fn load_history<C, T>(store: &C, records: Vec<ResolvedHistoryRecord>) -> Vec<HistoryEntry<T>>
where
  C: ContentStore,
  T: DeserializeOwned + Send,
{
  let contents: Vec<Option<T>> = join_all(records.iter().map(|record| async move {
    match &record.previous_content_ref {
      Some(content_ref) => fetch_or_none(store, content_ref).await,
      None => None,
    }
  }))
  .await;

  records
    .into_iter()
    .zip(contents)
    .map(|(record, content)| HistoryEntry {
      edited: record.edited,
      content_ref: record.previous_content_ref,
      secondary_kind: record.secondary_kind,
      secondary: record.previous_secondary,
      content,
    })
    .collect()
}

/// Resolve and load the edit history of any [`Editable`] entity.
/// `None` if the entity was never edited.
pub async fn entity_history<C, E, T>(store: &C, entity: &E) -> Option<Vec<HistoryEntry<T>>>
where
  C: ContentStore,
  E: Editable,
  T: DeserializeOwned + Send,
{
  let records = entity.resolved_history()?;
  Some(load_history(store, records).await)
}

pub async fn blog_history<C: ContentStore>(
  store: &C,
  blog: &Blog,
) -> Option<Vec<HistoryEntry<BlogContent>>> {
  entity_history(store, blog).await
}

pub async fn post_history<C: ContentStore>(
  store: &C,
  post: &Post,
) -> Option<Vec<HistoryEntry<PostContent>>> {
  entity_history(store, post).await
}

pub async fn profile_history<C: ContentStore>(
  store: &C,
  profile: &Profile,
) -> Option<Vec<HistoryEntry<ProfileContent>>> {
  entity_history(store, profile).await
}

/// Load a comment's prior versions, oldest first.
pub async fn comment_history<C: ContentStore>(
  store: &C,
  comment: &Comment,
) -> Option<Vec<CommentHistoryEntry>> {
  let records = chronological(&comment.edit_history)?;
  let contents: Vec<Option<CommentContent>> = join_all(
    records
      .iter()
      .map(|record| fetch_or_none(store, &record.previous_content_ref)),
  )
  .await;

  Some(
    records
      .into_iter()
      .zip(contents)
      .map(|(record, content)| CommentHistoryEntry {
        edited: record.edited,
        content_ref: record.previous_content_ref,
        content,
      })
      .collect(),
  )
}

// ─── Posts ───────────────────────────────────────────────────────────────────

/// The post a shared post points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedOriginal {
  pub post:    Post,
  pub content: Option<PostContent>,
  pub summary: Option<String>,
}

/// A post with its body, a preview summary, and the original if shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
  pub post:    Post,
  pub content: Option<PostContent>,
  pub summary: Option<String>,
  pub shared:  Option<SharedOriginal>,
}

pub async fn post_view<S, C>(chain: &S, store: &C, post: Post) -> PostView
where
  S: ChainQuery,
  C: ContentStore,
{
  let content: Option<PostContent> = fetch_or_none(store, &post.content_ref).await;
  let summary = content.as_ref().map(|c| summarize(&c.body));
  let shared = match post.extension {
    PostExtension::SharedPost(original_id) => shared_original(chain, store, original_id).await,
    PostExtension::RegularPost | PostExtension::SharedComment(_) => None,
  };

  PostView { post, content, summary, shared }
}

async fn shared_original<S, C>(chain: &S, store: &C, original_id: PostId) -> Option<SharedOriginal>
where
  S: ChainQuery,
  C: ContentStore,
{
  let post = match chain.post_by_id(original_id).await {
    Ok(post) => post?,
    Err(err) => {
      warn!(%original_id, error = %err, "failed to look up shared post");
      return None;
    }
  };
  let content: Option<PostContent> = fetch_or_none(store, &post.content_ref).await;
  let summary = content.as_ref().map(|c| summarize(&c.body));
  Some(SharedOriginal { post, content, summary })
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::{
    account::AccountId,
    content::SUMMARY_LIMIT,
    entity::{BlogId, CommentId},
    history::{CommentHistoryRecord, HistoryRecord},
    memory::{MemoryChain, MemoryContentStore},
  };

  fn change(block: u64) -> Change {
    Change {
      account: AccountId::from("5DAAnrj7"),
      block,
      time:    Utc.timestamp_opt(1_600_000_000 + block as i64, 0).unwrap(),
    }
  }

  fn slug_record(block: u64, content: Option<&str>, slug: Option<&str>) -> HistoryRecord {
    HistoryRecord {
      previous_content_ref: content.map(ContentRef::from),
      previous_secondary:   slug.map(str::to_owned),
      secondary_kind:       SecondaryFieldKind::Slug,
      edited:               change(block),
    }
  }

  fn post(id: u64, content_ref: &str, history: Vec<HistoryRecord>) -> Post {
    Post {
      id:              PostId(id),
      blog_id:         BlogId(1),
      created:         change(1),
      updated:         None,
      extension:       PostExtension::RegularPost,
      slug:            "current-slug".into(),
      content_ref:     ContentRef::from(content_ref),
      comments_count:  0,
      upvotes_count:   0,
      downvotes_count: 0,
      shares_count:    0,
      edit_history:    history,
    }
  }

  fn post_content(title: &str, body: &str) -> serde_json::Value {
    serde_json::json!({ "title": title, "body": body })
  }

  fn store_with(entries: &[(&str, serde_json::Value)]) -> MemoryContentStore {
    let store = MemoryContentStore::new();
    for (content_ref, value) in entries {
      store.insert(ContentRef::from(*content_ref), value.clone()).unwrap();
    }
    store
  }

  #[tokio::test]
  async fn never_edited_post_has_no_history() {
    let store = MemoryContentStore::new();
    let entries = post_history(&store, &post(1, "QmNow", Vec::new())).await;
    assert!(entries.is_none());
  }

  #[tokio::test]
  async fn post_history_is_chronological_with_content() {
    let store = store_with(&[
      ("QmV1", post_content("First", "one")),
      ("QmV2", post_content("Second", "two")),
    ]);
    let history = vec![
      slug_record(30, Some("QmV2"), None),
      slug_record(20, Some("QmV1"), Some("old-slug")),
    ];

    let entries = post_history(&store, &post(1, "QmNow", history)).await.unwrap();

    let titles: Vec<_> = entries
      .iter()
      .map(|e| e.content.as_ref().map(|c| c.title.as_str()))
      .collect();
    assert_eq!(titles, vec![Some("First"), Some("Second")]);
    assert_eq!(entries[0].edited.block, 20);
    assert_eq!(entries[0].secondary.as_deref(), Some("old-slug"));
    assert_eq!(entries[1].secondary.as_deref(), Some("old-slug"));
  }

  #[tokio::test]
  async fn one_failed_fetch_leaves_the_others_populated() {
    let store = store_with(&[("QmV1", post_content("First", "one"))]);
    let history = vec![
      slug_record(30, Some("QmGone"), Some("b")),
      slug_record(20, Some("QmV1"), Some("a")),
    ];

    let entries = post_history(&store, &post(1, "QmNow", history)).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].content.as_ref().map(|c| c.title.as_str()), Some("First"));
    assert!(entries[1].content.is_none());
    assert_eq!(entries[1].content_ref, Some(ContentRef::from("QmGone")));
  }

  #[tokio::test]
  async fn unknown_content_ref_is_not_fetched() {
    let store = store_with(&[("QmV1", post_content("First", "one"))]);
    let records = vec![
      ResolvedHistoryRecord {
        previous_content_ref: None,
        previous_secondary:   Some("a".into()),
        secondary_kind:       SecondaryFieldKind::Slug,
        edited:               change(10),
      },
      ResolvedHistoryRecord {
        previous_content_ref: Some(ContentRef::from("QmV1")),
        previous_secondary:   Some("b".into()),
        secondary_kind:       SecondaryFieldKind::Slug,
        edited:               change(20),
      },
    ];

    let entries: Vec<HistoryEntry<PostContent>> = load_history(&store, records).await;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].content_ref, None);
    assert!(entries[0].content.is_none());
    assert_eq!(entries[0].secondary.as_deref(), Some("a"));
    assert_eq!(entries[1].content.as_ref().map(|c| c.title.as_str()), Some("First"));
  }

  #[tokio::test]
  async fn never_recorded_content_falls_back_to_current() {
    let store = store_with(&[("QmNow", post_content("Live", "body"))]);
    let history = vec![slug_record(5, None, Some("renamed-from"))];

    let entries = post_history(&store, &post(1, "QmNow", history)).await.unwrap();

    assert_eq!(entries[0].content_ref, Some(ContentRef::from("QmNow")));
    assert_eq!(entries[0].content.as_ref().map(|c| c.title.as_str()), Some("Live"));
  }

  #[tokio::test]
  async fn comment_history_is_reversed_and_fetched() {
    let store = store_with(&[
      ("QmC1", serde_json::json!({ "body": "first draft" })),
      ("QmC2", serde_json::json!({ "body": "second draft" })),
    ]);
    let comment = Comment {
      id:                   CommentId(9),
      parent_id:            None,
      post_id:              PostId(1),
      created:              change(1),
      updated:              Some(change(3)),
      content_ref:          ContentRef::from("QmC3"),
      upvotes_count:        0,
      downvotes_count:      0,
      shares_count:         0,
      direct_replies_count: 0,
      edit_history:         vec![
        CommentHistoryRecord { previous_content_ref: "QmC2".into(), edited: change(3) },
        CommentHistoryRecord { previous_content_ref: "QmC1".into(), edited: change(2) },
      ],
    };

    let entries = comment_history(&store, &comment).await.unwrap();
    let bodies: Vec<_> = entries
      .iter()
      .map(|e| e.content.as_ref().map(|c| c.body.as_str()))
      .collect();
    assert_eq!(bodies, vec![Some("first draft"), Some("second draft")]);
  }

  #[tokio::test]
  async fn post_view_summarises_long_bodies() {
    let body = "x".repeat(SUMMARY_LIMIT + 50);
    let store = store_with(&[("QmNow", post_content("Long", &body))]);
    let chain = MemoryChain::new();

    let view = post_view(&chain, &store, post(1, "QmNow", Vec::new())).await;

    let summary = view.summary.unwrap();
    assert!(summary.ends_with("..."));
    assert_eq!(summary.chars().count(), SUMMARY_LIMIT + 3);
    assert!(view.shared.is_none());
  }

  #[tokio::test]
  async fn shared_post_view_includes_the_original() {
    let store = store_with(&[
      ("QmOriginal", post_content("Original", "the original body")),
      ("QmShare", post_content("", "look at this")),
    ]);
    let mut chain = MemoryChain::new();
    chain.insert_post(post(1, "QmOriginal", Vec::new()));

    let mut share = post(2, "QmShare", Vec::new());
    share.extension = PostExtension::SharedPost(PostId(1));

    let view = post_view(&chain, &store, share).await;
    let shared = view.shared.unwrap();
    assert_eq!(shared.post.id, PostId(1));
    assert_eq!(shared.summary.as_deref(), Some("the original body"));
  }

  #[tokio::test]
  async fn missing_content_yields_empty_view() {
    let store = MemoryContentStore::new();
    let chain = MemoryChain::new();
    let mut share = post(2, "QmMissing", Vec::new());
    share.extension = PostExtension::SharedPost(PostId(404));

    let view = post_view(&chain, &store, share).await;
    assert!(view.content.is_none());
    assert!(view.summary.is_none());
    assert!(view.shared.is_none());
  }
}
