//! Async HTTP client wrapping the content-store API.

use std::time::Duration;

use palimpsest_core::{content::ContentRef, store::ContentStore};
use reqwest::{Client, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{Error, Result};

/// Connection settings for the content store.
#[derive(Debug, Clone)]
pub struct IpfsConfig {
  /// Everything before `/ipfs/...`, e.g. `http://localhost:3001/v1`.
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for IpfsConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:3001/v1".to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Async HTTP client for the content store.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct IpfsClient {
  client: Client,
  base:   Url,
}

impl IpfsClient {
  pub fn new(config: IpfsConfig) -> Result<Self> {
    let invalid = || Error::BaseUrl(config.base_url.clone());
    let base = Url::parse(&config.base_url).map_err(|_| invalid())?;
    if base.cannot_be_a_base() {
      return Err(invalid());
    }
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, base })
  }

  /// `{base}/ipfs/{action}`, with `content_ref` appended as one
  /// percent-encoded path segment.
  fn url(&self, action: &str, content_ref: Option<&ContentRef>) -> Result<Url> {
    if let Some(content_ref) = content_ref {
      check_segment(content_ref)?;
    }
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|()| Error::BaseUrl(self.base.to_string()))?
      .pop_if_empty()
      .push("ipfs")
      .push(action)
      .extend(content_ref.map(ContentRef::as_str));
    Ok(url)
  }
}

impl ContentStore for IpfsClient {
  type Error = Error;

  /// `GET {base}/ipfs/get/{ref}`
  async fn fetch<'a, T>(&'a self, content_ref: &'a ContentRef) -> Result<T>
  where
    T: DeserializeOwned + Send + 'a,
  {
    let resp = self
      .client
      .get(self.url("get", Some(content_ref))?)
      .send()
      .await?;

    match resp.status() {
      StatusCode::NOT_FOUND => return Err(Error::NotFound(content_ref.clone())),
      status if !status.is_success() => return Err(Error::Status(status.as_u16())),
      _ => {}
    }

    let body = resp.bytes().await?;
    debug!(%content_ref, payload = %String::from_utf8_lossy(&body), "fetched content");
    Ok(serde_json::from_slice(&body)?)
  }

  /// `POST {base}/ipfs/add`
  async fn store<'a, T>(&'a self, payload: &'a T) -> Result<ContentRef>
  where
    T: Serialize + Sync + 'a,
  {
    let resp = self.client.post(self.url("add", None)?).json(payload).send().await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status(status.as_u16()));
    }

    let content_ref = parse_content_ref(&resp.text().await?)?;
    debug!(%content_ref, "stored content");
    Ok(content_ref)
  }

  /// `POST {base}/ipfs/remove/{ref}`
  async fn remove<'a>(&'a self, content_ref: &'a ContentRef) -> Result<()> {
    let resp = self
      .client
      .post(self.url("remove", Some(content_ref))?)
      .send()
      .await?;

    match resp.status() {
      StatusCode::NOT_FOUND => Err(Error::NotFound(content_ref.clone())),
      status if !status.is_success() => Err(Error::Status(status.as_u16())),
      _ => Ok(()),
    }
  }
}

/// `.` and `..` would be dropped or resolved by URL path handling, so they
/// cannot address content.
fn check_segment(content_ref: &ContentRef) -> Result<()> {
  match content_ref.as_str() {
    "" | "." | ".." => Err(Error::InvalidRef(content_ref.clone())),
    _ => Ok(()),
  }
}

/// The add endpoint answers with the ref either as a JSON string or as bare
/// text.
pub(crate) fn parse_content_ref(body: &str) -> Result<ContentRef> {
  let raw = serde_json::from_str::<String>(body).unwrap_or_else(|_| body.to_owned());
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(Error::EmptyRef);
  }
  Ok(ContentRef(raw.to_owned()))
}
