//! Bare-URL to HTML-anchor rewriting.
//!
//! `post` rewrites every bare `http(s)://…` token into an anchor opening in
//! a new browsing context, with the URL as both target and tooltip. `auto`
//! assumes that a document already containing anchors has all the links its
//! author wanted, and rewrites only anchor-free documents.
//!
//! Detection is a heuristic over the HTML text, not a full parse: a
//! candidate URL is skipped when it sits inside a quoted attribute value or
//! is already an anchor's text. Exotic markup (unquoted attributes, URLs
//! split across inline elements) can defeat it; that is a known limitation
//! of this boundary, kept as-is.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use docindex_shared::LinkPolicy;

/// Matches a bare URL token, bounded by whitespace, angle brackets and quotes.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bhttps?://[^\s<>"']+"#).expect("url regex")
});

/// Matches the opening of any anchor element.
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<a\s").expect("anchor regex")
});

/// Post-process rendered HTML according to the link policy.
pub fn apply_link_policy(html: &str, policy: LinkPolicy) -> Cow<'_, str> {
    match policy {
        LinkPolicy::None => Cow::Borrowed(html),
        LinkPolicy::Post => rewrite_bare_urls(html),
        LinkPolicy::Auto if ANCHOR_RE.is_match(html) => {
            debug!("anchors present, auto link policy leaves document alone");
            Cow::Borrowed(html)
        }
        LinkPolicy::Auto => rewrite_bare_urls(html),
    }
}

/// Wrap every bare URL that is not already part of an anchor.
fn rewrite_bare_urls(html: &str) -> Cow<'_, str> {
    let mut out = String::new();
    let mut last = 0;
    let mut rewritten = 0usize;

    for m in URL_RE.find_iter(html) {
        if already_linked(html, m.start(), m.end()) {
            continue;
        }
        let url = m.as_str();
        out.push_str(&html[last..m.start()]);
        out.push_str(&format!(
            "<a target=\"other\" href=\"{url}\" title=\"{url}\">{url}</a>"
        ));
        last = m.end();
        rewritten += 1;
    }

    if rewritten == 0 {
        return Cow::Borrowed(html);
    }

    out.push_str(&html[last..]);
    debug!(rewritten, "bare URLs converted to anchors");
    Cow::Owned(out)
}

/// Heuristic: is this URL already inside an anchor (attribute value or text)?
fn already_linked(html: &str, start: usize, end: usize) -> bool {
    // Attribute value: href="URL", title='URL', or unquoted attr=URL.
    if matches!(
        html[..start].chars().next_back(),
        Some('"') | Some('\'') | Some('=')
    ) {
        return true;
    }
    // Anchor text: >URL</a>
    html[end..].starts_with("</a>")
}
