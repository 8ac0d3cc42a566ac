//! Error type for `palimpsest-ipfs`.

use palimpsest_core::{content::ContentRef, store::ContentError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("content not found: {0}")]
  NotFound(ContentRef),

  #[error("content store returned HTTP {0}")]
  Status(u16),

  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("invalid content payload: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("content store returned an empty reference")]
  EmptyRef,

  #[error("not a valid content reference: {0:?}")]
  InvalidRef(ContentRef),

  #[error("invalid content store base URL: {0}")]
  BaseUrl(String),
}

impl ContentError for Error {
  fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
