//! Error types for `palimpsest-core`.

use thiserror::Error;

use crate::{content::ContentRef, store::ContentError};

#[derive(Debug, Error)]
pub enum Error {
  #[error("content not found: {0}")]
  ContentNotFound(ContentRef),

  #[error("in-memory store lock poisoned")]
  Poisoned,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl ContentError for Error {
  fn is_not_found(&self) -> bool { matches!(self, Self::ContentNotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
