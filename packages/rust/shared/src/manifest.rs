//! Document index manifest model and validation.
//!
//! The manifest (`docindex.json`) describes the page title, optional group
//! display names, and the ordered list of documents:
//!
//! ```json
//! {
//!   "title": "Crafts, Sports and Historical Gallery",
//!   "groups": { "sports": "World of Sport" },
//!   "docs": [
//!     { "title": "Ted Williams", "urlpath": "ted_williams.md", "grp": "sports" }
//!   ],
//!   "defdoc": 0,
//!   "linkproc": "post"
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LinkPolicy;
use crate::error::{DocIndexError, Result};

/// Display title used when the manifest declares none.
pub const FALLBACK_TITLE: &str = "Misc. Markdown Docs";

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// Validated in-memory representation of a document index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Group key → display name. Absence means a flat, ungrouped listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, String>>,

    /// Ordered document entries. Required.
    pub docs: Vec<DocEntry>,

    /// Document to auto-display once the listing is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defdoc: Option<DefaultDoc>,

    /// Manifest-level `debug` override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// Manifest-level link policy override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkproc: Option<LinkPolicy>,
}

/// One listed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Name of the doc as it appears in the listing.
    pub title: String,

    /// Location of the document content, resolved relative to the manifest.
    pub urlpath: String,

    /// Group the doc falls under, when the manifest uses groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grp: Option<String>,
}

/// Selector for the default document: a 0-based index into `docs`, or a
/// string matched against entry `urlpath`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultDoc {
    Index(usize),
    UrlPath(String),
}

impl Manifest {
    /// Validate and ingest raw manifest JSON.
    ///
    /// A non-object value or a missing/invalid `docs` array is a hard stop,
    /// surfaced to the caller. Absent `groups` is not an error.
    pub fn ingest(raw: serde_json::Value) -> Result<Self> {
        let Some(obj) = raw.as_object() else {
            return Err(DocIndexError::validation(
                "doc index is not in correct (JSON object) format",
            ));
        };

        match obj.get("docs") {
            Some(docs) if docs.is_array() => {}
            _ => {
                return Err(DocIndexError::validation(
                    "no 'docs' section in doc index",
                ));
            }
        }

        let manifest: Manifest = serde_json::from_value(raw)
            .map_err(|e| DocIndexError::validation(format!("malformed doc index: {e}")))?;

        debug!(
            docs = manifest.docs.len(),
            groups = manifest.groups.as_ref().map_or(0, |g| g.len()),
            "doc index ingested"
        );

        Ok(manifest)
    }

    /// The page title, falling back to [`FALLBACK_TITLE`].
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(FALLBACK_TITLE)
    }

    /// Resolve the default-doc selector to a position in `docs`.
    ///
    /// Returns `None` when no selector is set, the index is out of range, or
    /// no entry matches the urlpath.
    pub fn resolve_default(&self) -> Option<usize> {
        match self.defdoc.as_ref()? {
            DefaultDoc::Index(i) if *i < self.docs.len() => Some(*i),
            DefaultDoc::Index(_) => None,
            DefaultDoc::UrlPath(path) => {
                self.docs.iter().position(|d| d.urlpath == *path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ingest_minimal_manifest() {
        let manifest =
            Manifest::ingest(json!({"docs": [{"title": "A", "urlpath": "a.md"}]})).unwrap();
        assert_eq!(manifest.docs.len(), 1);
        assert_eq!(manifest.docs[0].title, "A");
        assert!(manifest.groups.is_none());
        assert_eq!(manifest.display_title(), FALLBACK_TITLE);
    }

    #[test]
    fn ingest_rejects_non_object() {
        let err = Manifest::ingest(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, DocIndexError::Validation { .. }));
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn ingest_rejects_missing_docs() {
        let err = Manifest::ingest(json!({"title": "No docs here"})).unwrap_err();
        assert!(matches!(err, DocIndexError::Validation { .. }));
        assert!(err.to_string().contains("'docs'"));
    }

    #[test]
    fn ingest_rejects_non_array_docs() {
        let err = Manifest::ingest(json!({"docs": "not-a-list"})).unwrap_err();
        assert!(err.to_string().contains("'docs'"));
    }

    #[test]
    fn ingest_rejects_malformed_entries() {
        let err = Manifest::ingest(json!({"docs": [{"title": "A"}]})).unwrap_err();
        assert!(matches!(err, DocIndexError::Validation { .. }));
    }

    #[test]
    fn ingest_reads_overrides() {
        let manifest = Manifest::ingest(json!({
            "docs": [],
            "debug": true,
            "linkproc": "auto"
        }))
        .unwrap();
        assert_eq!(manifest.debug, Some(true));
        assert_eq!(manifest.linkproc, Some(LinkPolicy::Auto));
    }

    #[test]
    fn resolve_default_by_index() {
        let manifest = Manifest::ingest(json!({
            "docs": [
                {"title": "A", "urlpath": "a.md"},
                {"title": "B", "urlpath": "b.md"}
            ],
            "defdoc": 1
        }))
        .unwrap();
        assert_eq!(manifest.resolve_default(), Some(1));
    }

    #[test]
    fn resolve_default_by_urlpath() {
        let manifest = Manifest::ingest(json!({
            "docs": [
                {"title": "A", "urlpath": "a.md"},
                {"title": "B", "urlpath": "b.md"}
            ],
            "defdoc": "b.md"
        }))
        .unwrap();
        assert_eq!(manifest.resolve_default(), Some(1));
    }

    #[test]
    fn resolve_default_out_of_range() {
        let manifest = Manifest::ingest(json!({
            "docs": [{"title": "A", "urlpath": "a.md"}],
            "defdoc": 5
        }))
        .unwrap();
        assert_eq!(manifest.resolve_default(), None);
    }

    #[test]
    fn resolve_default_unmatched_urlpath() {
        let manifest = Manifest::ingest(json!({
            "docs": [{"title": "A", "urlpath": "a.md"}],
            "defdoc": "missing.md"
        }))
        .unwrap();
        assert_eq!(manifest.resolve_default(), None);
    }

    #[test]
    fn manifest_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/docindex.fixture.json")
            .expect("read fixture");
        let raw: serde_json::Value = serde_json::from_str(&fixture).expect("parse fixture");
        let manifest = Manifest::ingest(raw).expect("ingest fixture manifest");

        assert_eq!(manifest.display_title(), "Crafts, Sports and Historical Gallery");
        assert_eq!(manifest.docs.len(), 4);
        assert_eq!(manifest.groups.as_ref().unwrap().len(), 2);
        assert_eq!(manifest.resolve_default(), Some(0));
        assert_eq!(manifest.linkproc, Some(LinkPolicy::Post));
    }
}
