//! HTTP client for the off-chain IPFS content store.
//!
//! Implements [`palimpsest_core::store::ContentStore`] against the store's
//! JSON surface:
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `{base}/ipfs/add` | Body: JSON payload; returns the content ref |
//! | `GET`  | `{base}/ipfs/get/{ref}` | Returns the JSON payload |
//! | `POST` | `{base}/ipfs/remove/{ref}` | No response body |

mod client;

pub mod error;

pub use client::{IpfsClient, IpfsConfig};
pub use error::{Error, Result};
