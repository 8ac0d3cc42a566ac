//! Accounts and on-chain provenance.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account address as decoded from chain state. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for AccountId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for AccountId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

/// Who performed an on-chain action, and when.
///
/// Attached to entities as `created` / `updated`, and to every history record
/// as `edited`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
  pub account: AccountId,
  pub block:   u64,
  pub time:    DateTime<Utc>,
}
