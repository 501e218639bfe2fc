//! Layered controller configuration.
//!
//! The effective config is an explicit immutable value merged from three
//! layers, lowest to highest precedence: built-in defaults, constructor
//! overrides, manifest overrides. Only `debug` and `linkproc` may be
//! overridden at the manifest level.

use serde::{Deserialize, Serialize};

use crate::error::{DocIndexError, Result};

// ---------------------------------------------------------------------------
// LinkPolicy
// ---------------------------------------------------------------------------

/// Bare-URL to HTML-anchor conversion policy.
///
/// - `none` — no processing or conversions are done
/// - `post` — all remaining non-anchor URLs are unconditionally converted
/// - `auto` — convert only when the document contains no anchors already
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    #[default]
    None,
    Post,
    Auto,
}

impl std::fmt::Display for LinkPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Post => "post",
            Self::Auto => "auto",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for LinkPolicy {
    type Err = DocIndexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "post" => Ok(Self::Post),
            "auto" => Ok(Self::Auto),
            other => Err(DocIndexError::config(format!(
                "unknown link policy {other:?} (expected none, post or auto)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// IndexConfig
// ---------------------------------------------------------------------------

/// Effective controller configuration.
///
/// Field names match the wire/config surface (`linkproc`, `doclistid`, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// HTML anchor / link processing policy.
    #[serde(default)]
    pub linkproc: LinkPolicy,

    /// Page title element id inside the host page.
    #[serde(default = "default_pagetitleid")]
    pub pagetitleid: String,

    /// Doc listing sidebar element id.
    #[serde(default = "default_doclistid")]
    pub doclistid: String,

    /// Document HTML content display area element id.
    #[serde(default = "default_docareaid")]
    pub docareaid: String,

    /// Hand the rendered listing to the accordion collaborator.
    #[serde(default)]
    pub acc: bool,

    /// Append a timestamp parameter to document URLs to defeat caching.
    #[serde(default = "default_true")]
    pub avoidcaching: bool,

    /// Produce verbose messages at various parts of execution.
    #[serde(default)]
    pub debug: bool,

    /// Also set the document-level title from the manifest title.
    #[serde(default)]
    pub settitle: bool,

    /// Static sidebar: suppress hide/show of the list region on navigation.
    #[serde(default)]
    pub nosidebarhide: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            linkproc: LinkPolicy::None,
            pagetitleid: default_pagetitleid(),
            doclistid: default_doclistid(),
            docareaid: default_docareaid(),
            acc: false,
            avoidcaching: true,
            debug: false,
            settitle: false,
            nosidebarhide: false,
        }
    }
}

fn default_pagetitleid() -> String {
    "pagetitle".into()
}
fn default_doclistid() -> String {
    "sidebar".into()
}
fn default_docareaid() -> String {
    "doccontent".into()
}
fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Constructor-level configuration overrides. Unset fields keep the default.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub linkproc: Option<LinkPolicy>,
    pub pagetitleid: Option<String>,
    pub doclistid: Option<String>,
    pub docareaid: Option<String>,
    pub acc: Option<bool>,
    pub avoidcaching: Option<bool>,
    pub debug: Option<bool>,
    pub settitle: Option<bool>,
    pub nosidebarhide: Option<bool>,
}

impl IndexConfig {
    /// Merge built-in defaults with constructor overrides.
    pub fn layered(overrides: &ConfigOverrides) -> Self {
        let base = Self::default();
        Self {
            linkproc: overrides.linkproc.unwrap_or(base.linkproc),
            pagetitleid: overrides
                .pagetitleid
                .clone()
                .unwrap_or(base.pagetitleid),
            doclistid: overrides.doclistid.clone().unwrap_or(base.doclistid),
            docareaid: overrides.docareaid.clone().unwrap_or(base.docareaid),
            acc: overrides.acc.unwrap_or(base.acc),
            avoidcaching: overrides.avoidcaching.unwrap_or(base.avoidcaching),
            debug: overrides.debug.unwrap_or(base.debug),
            settitle: overrides.settitle.unwrap_or(base.settitle),
            nosidebarhide: overrides.nosidebarhide.unwrap_or(base.nosidebarhide),
        }
    }

    /// Produce a new config with the manifest-level overrides applied.
    ///
    /// Only `debug` and `linkproc` may be overridden by a manifest.
    pub fn with_manifest_overrides(
        &self,
        debug: Option<bool>,
        linkproc: Option<LinkPolicy>,
    ) -> Self {
        let mut merged = self.clone();
        if let Some(debug) = debug {
            merged.debug = debug;
        }
        if let Some(linkproc) = linkproc {
            merged.linkproc = linkproc;
        }
        merged
    }
}
