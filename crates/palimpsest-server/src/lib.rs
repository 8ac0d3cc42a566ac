//! Wiring for the `palimpsest` server binary.
//!
//! Loads a decoded chain snapshot into a [`MemoryChain`], points an
//! [`IpfsClient`](palimpsest_ipfs::IpfsClient) at the content store, and
//! serves [`palimpsest_api`] under `/api`.

pub mod error;

use std::{
  fmt,
  path::{Path, PathBuf},
  str::FromStr,
  sync::Arc,
  time::Duration,
};

use axum::Router;
use palimpsest_core::{
  account::AccountId,
  entity::{BlogId, CommentId, PostId},
  memory::{ChainSnapshot, MemoryChain},
  store::{ChainQuery, ContentStore},
  view::{blog_history, comment_history, post_history, profile_history},
};
use palimpsest_ipfs::IpfsConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::{Error, Result};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PALIMPSEST_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  /// Everything before `/ipfs/...` on the content store.
  pub ipfs_base_url:     String,
  pub ipfs_timeout_secs: u64,
  /// JSON file holding the decoded chain state to serve.
  pub chain_snapshot:    PathBuf,
}

impl ServerConfig {
  /// Layer `file` (optional) and the environment over built-in defaults.
  pub fn load(file: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("ipfs_base_url", "http://localhost:3001/v1")?
      .set_default("ipfs_timeout_secs", 30)?
      .set_default("chain_snapshot", "chain.json")?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("PALIMPSEST"))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  pub fn ipfs(&self) -> IpfsConfig {
    IpfsConfig {
      base_url: self.ipfs_base_url.clone(),
      timeout:  Duration::from_secs(self.ipfs_timeout_secs),
    }
  }
}

/// Read a JSON chain snapshot into a [`MemoryChain`].
pub fn load_chain(path: &Path) -> Result<MemoryChain> {
  let raw = std::fs::read_to_string(path).map_err(|source| Error::Snapshot {
    path: path.to_path_buf(),
    source,
  })?;
  let snapshot: ChainSnapshot = serde_json::from_str(&raw)?;
  tracing::info!(
    blogs = snapshot.blogs.len(),
    posts = snapshot.posts.len(),
    comments = snapshot.comments.len(),
    accounts = snapshot.social_accounts.len(),
    "loaded chain snapshot from {}",
    path.display()
  );
  Ok(MemoryChain::from_snapshot(snapshot))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API nested under `/api`, with request tracing.
pub fn app<S, C>(chain: Arc<S>, content: Arc<C>) -> Router
where
  S: ChainQuery + 'static,
  C: ContentStore + 'static,
{
  Router::new()
    .nest("/api", palimpsest_api::api_router(chain, content))
    .layer(TraceLayer::new_for_http())
}

// ─── One-shot history ─────────────────────────────────────────────────────────

/// An entity addressed on the command line as `<kind>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
  Blog(BlogId),
  Post(PostId),
  Comment(CommentId),
  Profile(AccountId),
}

impl FromStr for EntityRef {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidEntityRef(s.to_owned());
    let (kind, id) = s.split_once(':').ok_or_else(invalid)?;
    let numeric = || id.parse::<u64>().map_err(|_| invalid());
    match kind {
      "blog" => Ok(Self::Blog(BlogId(numeric()?))),
      "post" => Ok(Self::Post(PostId(numeric()?))),
      "comment" => Ok(Self::Comment(CommentId(numeric()?))),
      "profile" if !id.is_empty() => Ok(Self::Profile(AccountId(id.to_owned()))),
      _ => Err(invalid()),
    }
  }
}

impl fmt::Display for EntityRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Blog(id) => write!(f, "blog:{id}"),
      Self::Post(id) => write!(f, "post:{id}"),
      Self::Comment(id) => write!(f, "comment:{id}"),
      Self::Profile(account) => write!(f, "profile:{account}"),
    }
  }
}

/// Resolve one entity's edit history, with content, as JSON.
/// An entity that was never edited yields an empty array.
pub async fn history_json<S, C>(
  chain: &S,
  content: &C,
  entity: &EntityRef,
) -> Result<serde_json::Value>
where
  S: ChainQuery,
  C: ContentStore,
{
  let not_found = || Error::NotFound(entity.to_string());
  let chain_err = |e: S::Error| Error::Chain(Box::new(e));

  let value = match entity {
    EntityRef::Blog(id) => {
      let blog = chain.blog_by_id(*id).await.map_err(chain_err)?.ok_or_else(not_found)?;
      serde_json::to_value(blog_history(content, &blog).await.unwrap_or_default())?
    }
    EntityRef::Post(id) => {
      let post = chain.post_by_id(*id).await.map_err(chain_err)?.ok_or_else(not_found)?;
      serde_json::to_value(post_history(content, &post).await.unwrap_or_default())?
    }
    EntityRef::Comment(id) => {
      let comment = chain.comment_by_id(*id).await.map_err(chain_err)?.ok_or_else(not_found)?;
      serde_json::to_value(comment_history(content, &comment).await.unwrap_or_default())?
    }
    EntityRef::Profile(account) => {
      let profile = chain
        .social_account_by_id(account)
        .await
        .map_err(chain_err)?
        .and_then(|social| social.profile)
        .ok_or_else(not_found)?;
      serde_json::to_value(profile_history(content, &profile).await.unwrap_or_default())?
    }
  };
  Ok(value)
}
