//! Document index core: group resolution, list rendering, orchestration.
//!
//! This crate provides:
//! - [`groups`] — manifest docs → ordered, id-assigned buckets
//! - [`listing`] — buckets → sections → navigation markup
//! - [`IndexController`] — ingest, render, wire activation and navigation

pub mod controller;
pub mod groups;
pub mod listing;

pub use controller::{IndexController, PostLoadHook};
pub use groups::{GroupBucket, GroupedListing, IndexedDoc, UNGROUPED_KEY, index_docs, resolve};
pub use listing::{ListItem, Section, render_sections, sections_to_html};
