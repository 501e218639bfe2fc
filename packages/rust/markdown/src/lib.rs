//! Markdown-to-HTML rendering and link post-processing.
//!
//! This crate provides:
//! - [`MarkdownRenderer`] — the conversion collaborator interface
//! - [`CmarkRenderer`] — the default `pulldown-cmark` implementation
//! - [`apply_link_policy`] — bare-URL to anchor rewriting per [`LinkPolicy`]
//!
//! [`LinkPolicy`]: docindex_shared::LinkPolicy

mod linkpolicy;

use pulldown_cmark::{Options, Parser, html};
use tracing::debug;

pub use linkpolicy::apply_link_policy;

// ---------------------------------------------------------------------------
// MarkdownRenderer
// ---------------------------------------------------------------------------

/// Markdown-to-HTML conversion collaborator.
///
/// Implementations are deterministic and side-effect free; the same input
/// always yields the same HTML.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// Default renderer backed by `pulldown-cmark`, with tables and
/// strikethrough enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkRenderer;

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(markdown, options);

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);

        debug!(
            md_len = markdown.len(),
            html_len = out.len(),
            "markdown converted"
        );
        out
    }
}
