//! Core types and trait definitions for Palimpsest.
//!
//! Holds the decoded chain entities, the edit-history gap-filler, and the two
//! seams the rest of the workspace plugs into: [`store::ChainQuery`] for
//! point lookups of chain state and [`store::ContentStore`] for the off-chain
//! content store. This crate is free of HTTP dependencies.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod content;
pub mod entity;
pub mod error;
pub mod history;
pub mod memory;
pub mod store;
pub mod view;

pub use error::{Error, Result};
