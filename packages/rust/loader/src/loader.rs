//! Document load state machine.
//!
//! A load runs Fetching → Converting → Displaying, linearly, one document at
//! a time. Each load takes a monotonically increasing generation; a
//! completion whose generation is no longer current is discarded instead of
//! overwriting the display, so concurrent navigations cannot publish a stale
//! document.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, instrument};

use docindex_markdown::{CmarkRenderer, MarkdownRenderer, apply_link_policy};
use docindex_shared::{DocIndexError, IndexConfig, Result, Surface};

use crate::fetch::{FetchedResource, Fetcher, HttpFetcher, cache_busted};

// ---------------------------------------------------------------------------
// LoadOutcome
// ---------------------------------------------------------------------------

/// Result of a completed document load.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// The resolved (possibly cache-busted) URL that was fetched.
    pub url: String,
    /// The final HTML after conversion and link processing.
    pub html: String,
    /// Whether the result reached the surface (false for stale loads).
    pub published: bool,
}

/// Callback invoked with the resolved URL after each displayed document.
pub type DocChangedHook = Box<dyn Fn(&str) + Send + Sync>;

// ---------------------------------------------------------------------------
// DocLoader
// ---------------------------------------------------------------------------

/// Fetches, converts and publishes documents, one at a time.
pub struct DocLoader<R = CmarkRenderer, F = HttpFetcher> {
    renderer: R,
    fetcher: F,
    generation: AtomicU64,
    doc_changed: Option<DocChangedHook>,
}

impl<R: MarkdownRenderer, F: Fetcher> DocLoader<R, F> {
    pub fn new(renderer: R, fetcher: F) -> Self {
        Self {
            renderer,
            fetcher,
            generation: AtomicU64::new(0),
            doc_changed: None,
        }
    }

    /// Attach a doc-change callback, invoked with the resolved URL every
    /// time a document finishes loading and rendering.
    pub fn with_doc_changed(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.doc_changed = Some(Box::new(hook));
        self
    }

    /// Load `urlpath` and publish it into the content region.
    ///
    /// Failures are terminal for this load: no retry, and the content region
    /// is left untouched.
    #[instrument(skip_all, fields(urlpath = %urlpath))]
    pub async fn load<S: Surface>(
        &self,
        urlpath: &str,
        config: &IndexConfig,
        surface: &mut S,
    ) -> Result<LoadOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Fetching
        let url = if config.avoidcaching {
            cache_busted(urlpath)
        } else {
            urlpath.to_string()
        };
        debug!(%url, generation, "fetching document");
        let resource = self.fetcher.fetch(&url).await?;

        let raw = match resource {
            FetchedResource::Text(text) => text,
            FetchedResource::Json(_) => {
                return Err(DocIndexError::Load(format!(
                    "{urlpath}: expected document text, got a JSON response"
                )));
            }
        };

        // Converting. The '.html' urlpath suffix is the only format signal;
        // such documents pass through verbatim.
        let html = if urlpath.ends_with(".html") {
            debug!("'.html' document, skipping markdown conversion");
            raw
        } else {
            self.renderer.render(&raw)
        };
        let html = apply_link_policy(&html, config.linkproc).into_owned();

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "newer load in flight, discarding stale result");
            return Ok(LoadOutcome {
                url,
                html,
                published: false,
            });
        }

        // Displaying
        if let Some(hook) = &self.doc_changed {
            hook(&url);
        }
        surface.set_region_html(&config.docareaid, &html);
        if !config.nosidebarhide {
            surface.hide_region(&config.doclistid);
        }
        surface.show_region(&config.docareaid);

        info!(html_len = html.len(), "document displayed");
        Ok(LoadOutcome {
            url,
            html,
            published: true,
        })
    }
}
