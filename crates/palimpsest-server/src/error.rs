//! Error type for `palimpsest-server`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("failed to read chain snapshot {path:?}: {source}")]
  Snapshot {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("invalid entity reference {0:?}; expected blog:<id>, post:<id>, comment:<id> or profile:<account>")]
  InvalidEntityRef(String),

  #[error("{0} not found")]
  NotFound(String),

  #[error("chain error: {0}")]
  Chain(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
