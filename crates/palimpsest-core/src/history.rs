//! Edit trails and their reconstruction.
//!
//! On-chain storage records a field's previous value only at the edit that
//! changed it. A field that did not change leaves `None` in that edit's
//! record, which means "unchanged here", not "cleared". [`reconstruct`] turns
//! such a sparse, newest-first trail into complete snapshots ordered
//! oldest-first for display.

use serde::{Deserialize, Serialize};

use crate::{account::Change, content::ContentRef};

// ─── Records ─────────────────────────────────────────────────────────────────

/// Which secondary identifying field a history record tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryFieldKind {
  /// Blogs and posts.
  Slug,
  /// Profiles.
  Username,
}

/// One entry in an entity's edit trail, as decoded from chain state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
  /// Content before this edit; `None` if the edit left it unchanged.
  pub previous_content_ref: Option<ContentRef>,
  /// Slug or username before this edit; `None` if unchanged.
  pub previous_secondary:   Option<String>,
  pub secondary_kind:       SecondaryFieldKind,
  pub edited:               Change,
}

/// A [`HistoryRecord`] after gap-filling.
///
/// A field is `None` only when no record of the trail ever carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedHistoryRecord {
  pub previous_content_ref: Option<ContentRef>,
  pub previous_secondary:   Option<String>,
  pub secondary_kind:       SecondaryFieldKind,
  pub edited:               Change,
}

/// One entry in a comment's edit trail. Comment edits always record the
/// previous body, so no gap-filling applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentHistoryRecord {
  pub previous_content_ref: ContentRef,
  pub edited:               Change,
}

// ─── Reconstruction ──────────────────────────────────────────────────────────

/// Gap-fill a newest-first edit trail and return it oldest-first.
///
/// Each field is seeded with the first value present scanning from the most
/// recent record, then carried across the trail from newest to oldest: a
/// record lacking the field takes the carried value, a record carrying it
/// replaces the carried value. The two fields are filled independently.
///
/// Returns `None` for an empty trail (the entity was never edited). The input
/// is not validated for ordering and is never mutated.
pub fn reconstruct(history: &[HistoryRecord]) -> Option<Vec<ResolvedHistoryRecord>> {
  if history.is_empty() {
    return None;
  }

  let mut content = history.iter().find_map(|r| r.previous_content_ref.clone());
  let mut secondary = history.iter().find_map(|r| r.previous_secondary.clone());

  let mut resolved: Vec<ResolvedHistoryRecord> = history
    .iter()
    .map(|record| ResolvedHistoryRecord {
      previous_content_ref: carry(&mut content, &record.previous_content_ref),
      previous_secondary:   carry(&mut secondary, &record.previous_secondary),
      secondary_kind:       record.secondary_kind,
      edited:               record.edited.clone(),
    })
    .collect();

  resolved.reverse();
  Some(resolved)
}

/// [`reconstruct`], then fill any field the trail never recorded with the
/// entity's current value.
///
/// A field that never appears in the trail never changed, so its value before
/// every edit is the live one.
pub fn reconstruct_with_current(
  history: &[HistoryRecord],
  current_content_ref: &ContentRef,
  current_secondary: &str,
) -> Option<Vec<ResolvedHistoryRecord>> {
  let mut resolved = reconstruct(history)?;
  for record in &mut resolved {
    record
      .previous_content_ref
      .get_or_insert_with(|| current_content_ref.clone());
    record
      .previous_secondary
      .get_or_insert_with(|| current_secondary.to_owned());
  }
  Some(resolved)
}

/// Return a newest-first comment trail oldest-first. `None` if empty.
pub fn chronological(history: &[CommentHistoryRecord]) -> Option<Vec<CommentHistoryRecord>> {
  if history.is_empty() {
    return None;
  }
  Some(history.iter().rev().cloned().collect())
}

fn carry<T: Clone>(carried: &mut Option<T>, own: &Option<T>) -> Option<T> {
  if let Some(value) = own {
    *carried = Some(value.clone());
  }
  carried.clone()
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use proptest::prelude::*;

  use super::*;
  use crate::account::AccountId;

  fn change(block: u64) -> Change {
    Change {
      account: AccountId::from("5GrwvaEF"),
      block,
      time:    Utc.timestamp_opt(1_600_000_000 + block as i64 * 6, 0).unwrap(),
    }
  }

  fn record(block: u64, content: Option<&str>, slug: Option<&str>) -> HistoryRecord {
    HistoryRecord {
      previous_content_ref: content.map(ContentRef::from),
      previous_secondary:   slug.map(str::to_owned),
      secondary_kind:       SecondaryFieldKind::Slug,
      edited:               change(block),
    }
  }

  fn fields(resolved: &[ResolvedHistoryRecord]) -> Vec<(Option<&str>, Option<&str>)> {
    resolved
      .iter()
      .map(|r| {
        (
          r.previous_content_ref.as_ref().map(ContentRef::as_str),
          r.previous_secondary.as_deref(),
        )
      })
      .collect()
  }

  // ─── Scenarios ──────────────────────────────────────────────────────────────

  #[test]
  fn empty_history_is_absent() {
    assert!(reconstruct(&[]).is_none());
    assert!(reconstruct_with_current(&[], &ContentRef::from("Qm"), "slug").is_none());
  }

  #[test]
  fn single_complete_record_is_returned_as_is() {
    let history = vec![record(7, Some("R1"), Some("first-slug"))];
    let resolved = reconstruct(&history).unwrap();

    assert_eq!(resolved.len(), 1);
    assert_eq!(fields(&resolved), vec![(Some("R1"), Some("first-slug"))]);
    assert_eq!(resolved[0].edited, history[0].edited);
    assert_eq!(resolved[0].secondary_kind, SecondaryFieldKind::Slug);
  }

  #[test]
  fn sparse_trail_is_filled_then_reversed() {
    // Newest first.
    let history = vec![
      record(30, None, Some("b")),
      record(20, Some("R1"), None),
      record(10, None, Some("a")),
    ];
    let resolved = reconstruct(&history).unwrap();

    // Forward fills: [R1,b], [R1,b], [R1,a]; then oldest first.
    assert_eq!(fields(&resolved), vec![
      (Some("R1"), Some("a")),
      (Some("R1"), Some("b")),
      (Some("R1"), Some("b")),
    ]);
    let blocks: Vec<u64> = resolved.iter().map(|r| r.edited.block).collect();
    assert_eq!(blocks, vec![10, 20, 30]);
  }

  #[test]
  fn older_values_are_carried_from_newer_records() {
    let history = vec![
      record(4, Some("R4"), Some("s4")),
      record(3, None, None),
      record(2, Some("R2"), None),
      record(1, None, None),
    ];
    let resolved = reconstruct(&history).unwrap();

    assert_eq!(fields(&resolved), vec![
      (Some("R2"), Some("s4")),
      (Some("R2"), Some("s4")),
      (Some("R4"), Some("s4")),
      (Some("R4"), Some("s4")),
    ]);
  }

  #[test]
  fn never_recorded_field_stays_absent() {
    let history = vec![record(2, None, Some("b")), record(1, None, Some("a"))];
    let resolved = reconstruct(&history).unwrap();

    assert!(resolved.iter().all(|r| r.previous_content_ref.is_none()));
    assert_eq!(fields(&resolved), vec![(None, Some("a")), (None, Some("b"))]);
  }

  #[test]
  fn current_value_fills_only_never_recorded_fields() {
    let history = vec![record(2, None, Some("b")), record(1, None, None)];
    let resolved =
      reconstruct_with_current(&history, &ContentRef::from("LIVE"), "live-slug").unwrap();

    assert_eq!(fields(&resolved), vec![
      (Some("LIVE"), Some("b")),
      (Some("LIVE"), Some("b")),
    ]);
  }

  #[test]
  fn input_is_left_untouched() {
    let history = vec![record(2, None, None), record(1, Some("R1"), Some("a"))];
    let before = history.clone();
    let _ = reconstruct(&history);
    assert_eq!(history, before);
  }

  #[test]
  fn secondary_kind_is_preserved() {
    let history = vec![HistoryRecord {
      previous_content_ref: Some(ContentRef::from("R")),
      previous_secondary:   Some("alice".into()),
      secondary_kind:       SecondaryFieldKind::Username,
      edited:               change(1),
    }];
    let resolved = reconstruct(&history).unwrap();
    assert_eq!(resolved[0].secondary_kind, SecondaryFieldKind::Username);
  }

  #[test]
  fn comment_trail_is_reversed() {
    let history = vec![
      CommentHistoryRecord { previous_content_ref: "C2".into(), edited: change(2) },
      CommentHistoryRecord { previous_content_ref: "C1".into(), edited: change(1) },
    ];
    let ordered = chronological(&history).unwrap();
    let refs: Vec<&str> = ordered.iter().map(|r| r.previous_content_ref.as_str()).collect();
    assert_eq!(refs, vec!["C1", "C2"]);
    assert!(chronological(&[]).is_none());
  }

  // ─── Properties ─────────────────────────────────────────────────────────────

  fn arb_history() -> impl Strategy<Value = Vec<HistoryRecord>> {
    prop::collection::vec(
      (
        prop::option::of("[A-Z][0-9]"),
        prop::option::of("[a-z]{1,3}"),
      ),
      1..12,
    )
    .prop_map(|entries| {
      let len = entries.len() as u64;
      entries
        .into_iter()
        .enumerate()
        .map(|(i, (content, slug))| {
          record(len - i as u64, content.as_deref(), slug.as_deref())
        })
        .collect()
    })
  }

  proptest! {
    #[test]
    fn length_is_preserved(history in arb_history()) {
      let resolved = reconstruct(&history).unwrap();
      prop_assert_eq!(resolved.len(), history.len());
    }

    #[test]
    fn order_is_reversed(history in arb_history()) {
      let resolved = reconstruct(&history).unwrap();
      let input: Vec<&Change> = history.iter().rev().map(|r| &r.edited).collect();
      let output: Vec<&Change> = resolved.iter().map(|r| &r.edited).collect();
      prop_assert_eq!(output, input);
    }

    #[test]
    fn most_recent_takes_first_present_value(history in arb_history()) {
      let resolved = reconstruct(&history).unwrap();
      let first = history.iter().find_map(|r| r.previous_content_ref.clone());
      let last = resolved.last().and_then(|r| r.previous_content_ref.clone());
      prop_assert_eq!(last, first);
    }

    #[test]
    fn absent_everywhere_stays_absent(history in arb_history()) {
      let stripped: Vec<HistoryRecord> = history
        .into_iter()
        .map(|r| HistoryRecord { previous_content_ref: None, ..r })
        .collect();
      let resolved = reconstruct(&stripped).unwrap();
      prop_assert!(resolved.iter().all(|r| r.previous_content_ref.is_none()));
    }

    #[test]
    fn present_values_are_kept(history in arb_history()) {
      let resolved = reconstruct(&history).unwrap();
      for (own, filled) in history.iter().rev().zip(&resolved) {
        if own.previous_content_ref.is_some() {
          prop_assert_eq!(&own.previous_content_ref, &filled.previous_content_ref);
        }
        if own.previous_secondary.is_some() {
          prop_assert_eq!(&own.previous_secondary, &filled.previous_secondary);
        }
      }
    }

    #[test]
    fn reconstruction_is_idempotent(history in arb_history()) {
      let copy = history.clone();
      prop_assert_eq!(reconstruct(&history), reconstruct(&copy));
    }
  }
}
