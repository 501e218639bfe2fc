//! Shared types, error model, and configuration for docindex.
//!
//! This crate is the foundation depended on by all other docindex crates.
//! It provides:
//! - [`DocIndexError`] — the unified error type
//! - The manifest model ([`Manifest`], [`DocEntry`], [`DefaultDoc`])
//! - Layered configuration ([`IndexConfig`], [`ConfigOverrides`], [`LinkPolicy`])
//! - The UI output port ([`Surface`], [`AccordionOptions`])

pub mod config;
pub mod error;
pub mod manifest;
pub mod surface;

// Re-export public API at crate root for ergonomic imports.
pub use config::{ConfigOverrides, IndexConfig, LinkPolicy};
pub use error::{DocIndexError, Result};
pub use manifest::{DefaultDoc, DocEntry, FALLBACK_TITLE, Manifest};
pub use surface::{AccordionOptions, RecordingSurface, Surface, SurfaceEvent};
