//! Resource fetching and the document load state machine.
//!
//! This crate provides:
//! - [`Fetcher`] — the transport collaborator interface, with [`HttpFetcher`]
//!   (reqwest) and [`FileFetcher`] (local trees) implementations
//! - [`fetch_resource`] — the HTTP GET primitive distinguishing JSON from
//!   text responses
//! - [`DocLoader`] — fetch → convert → link-process → publish, one document
//!   at a time

pub mod fetch;
pub mod loader;

pub use fetch::{
    FetchedResource, Fetcher, FileFetcher, HttpFetcher, build_client, cache_busted,
    fetch_resource,
};
pub use loader::{DocChangedHook, DocLoader, LoadOutcome};
