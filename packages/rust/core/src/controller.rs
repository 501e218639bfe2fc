//! Index controller: manifest ingestion, listing render, wired navigation.
//!
//! `initialize` validates and ingests the manifest, applies its config
//! overrides, runs the post-load hook, publishes title and listing, and
//! auto-activates the default doc. `activate` is the handler the host calls
//! when a rendered entry is selected; `show_index` is the "back to index"
//! affordance.

use tracing::{debug, info, instrument, warn};

use docindex_loader::{DocLoader, Fetcher, HttpFetcher};
use docindex_markdown::{CmarkRenderer, MarkdownRenderer};
use docindex_shared::{
    AccordionOptions, ConfigOverrides, IndexConfig, Manifest, Result, Surface,
};

use crate::groups::{self, IndexedDoc};
use crate::listing;

/// Callback run once with the ingested manifest, before any rendering.
/// May mutate the manifest in place, e.g. to filter entries.
pub type PostLoadHook = Box<dyn Fn(&mut Manifest) + Send + Sync>;

// ---------------------------------------------------------------------------
// IndexController
// ---------------------------------------------------------------------------

/// Top-level orchestrator for one document index page.
pub struct IndexController<R = CmarkRenderer, F = HttpFetcher> {
    config: IndexConfig,
    loader: DocLoader<R, F>,
    manifest: Option<Manifest>,
    docs: Vec<IndexedDoc>,
    post_load: Option<PostLoadHook>,
}

impl IndexController {
    /// Controller with the default renderer and HTTP transport.
    pub fn new(overrides: &ConfigOverrides) -> Result<Self> {
        Ok(Self::with_parts(overrides, CmarkRenderer, HttpFetcher::new()?))
    }
}

impl<R: MarkdownRenderer, F: Fetcher> IndexController<R, F> {
    /// Controller over explicit renderer and transport collaborators.
    pub fn with_parts(overrides: &ConfigOverrides, renderer: R, fetcher: F) -> Self {
        Self {
            config: IndexConfig::layered(overrides),
            loader: DocLoader::new(renderer, fetcher),
            manifest: None,
            docs: Vec::new(),
            post_load: None,
        }
    }

    /// Attach the post-load manifest hook.
    pub fn with_post_load(
        mut self,
        hook: impl Fn(&mut Manifest) + Send + Sync + 'static,
    ) -> Self {
        self.post_load = Some(Box::new(hook));
        self
    }

    /// Attach the doc-change callback, invoked with the resolved URL after
    /// every displayed document.
    pub fn with_doc_changed(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.loader = self.loader.with_doc_changed(hook);
        self
    }

    /// The effective configuration (manifest overrides included once
    /// `initialize` has run).
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The ingested manifest, once `initialize` has run.
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// The id-assigned docs, in manifest order.
    pub fn docs(&self) -> &[IndexedDoc] {
        &self.docs
    }

    /// Look an entry up by its assigned id.
    pub fn find_doc_by_id(&self, id: u32) -> Option<&IndexedDoc> {
        self.docs.iter().find(|d| d.id == id)
    }

    /// Validate the manifest and publish the navigable listing.
    ///
    /// Fails fast on an invalid manifest; nothing is rendered in that case.
    #[instrument(skip_all)]
    pub async fn initialize<S: Surface>(
        &mut self,
        raw: serde_json::Value,
        surface: &mut S,
    ) -> Result<()> {
        let mut manifest = Manifest::ingest(raw)?;

        self.config = self
            .config
            .with_manifest_overrides(manifest.debug, manifest.linkproc);
        if self.config.debug {
            debug!(config = ?self.config, "effective configuration");
        }

        if let Some(hook) = &self.post_load {
            hook(&mut manifest);
            debug!(docs = manifest.docs.len(), "post-load hook applied");
        }

        let title = manifest.display_title().to_string();
        surface.set_region_html(&self.config.pagetitleid, &title);
        if self.config.settitle {
            surface.set_document_title(&title);
        }

        // Resolve the default selector against the post-hook doc list.
        let default_pos = manifest.resolve_default();
        if manifest.defdoc.is_some() && default_pos.is_none() {
            warn!("default doc selector matches no entry");
        }

        let grouped = groups::resolve(&manifest);
        let sections = listing::render_sections(&grouped, manifest.groups.as_ref());
        let html = listing::sections_to_html(&sections);
        surface.set_region_html(&self.config.doclistid, &html);

        self.docs = groups::index_docs(&manifest);
        self.manifest = Some(manifest);

        info!(
            docs = self.docs.len(),
            sections = sections.len(),
            "doc listing rendered"
        );

        if self.config.acc {
            let opts = AccordionOptions::default();
            if let Err(e) = surface.install_accordion(&self.config.doclistid, &opts) {
                warn!(error = %e, "accordion unavailable, continuing without it");
            }
        }

        // Auto-activate the default doc, equivalent to a user activation.
        // A load failure here leaves the rendered listing usable.
        if let Some(pos) = default_pos {
            let id = pos as u32 + 1;
            if let Err(e) = self.activate(id, surface).await {
                warn!(id, error = %e, "default doc failed to load");
            }
        }

        Ok(())
    }

    /// Activation handler for a rendered entry. Unknown ids are ignored.
    pub async fn activate<S: Surface>(&self, id: u32, surface: &mut S) -> Result<()> {
        let Some(doc) = self.find_doc_by_id(id) else {
            warn!(id, "activation for unknown doc id ignored");
            return Ok(());
        };
        debug!(id, urlpath = %doc.urlpath, "doc activated");
        self.loader.load(&doc.urlpath, &self.config, surface).await?;
        Ok(())
    }

    /// "Back to index": reveal the listing, hide the content region.
    pub fn show_index<S: Surface>(&self, surface: &mut S) {
        if !self.config.nosidebarhide {
            surface.show_region(&self.config.doclistid);
        }
        surface.hide_region(&self.config.docareaid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use docindex_loader::FileFetcher;
    use docindex_shared::{DocIndexError, LinkPolicy, RecordingSurface, SurfaceEvent};

    fn controller() -> IndexController<CmarkRenderer, FileFetcher> {
        controller_with(&ConfigOverrides::default())
    }

    fn controller_with(
        overrides: &ConfigOverrides,
    ) -> IndexController<CmarkRenderer, FileFetcher> {
        IndexController::with_parts(
            overrides,
            CmarkRenderer,
            FileFetcher::new("../../../fixtures/md"),
        )
    }

    #[tokio::test]
    async fn single_doc_manifest_renders_flat_list() {
        let mut ctrl = controller();
        let mut surface = RecordingSurface::new();
        ctrl.initialize(json!({"docs": [{"title": "A", "urlpath": "a.md"}]}), &mut surface)
            .await
            .unwrap();

        let sidebar = surface.region_html("sidebar").unwrap();
        assert!(sidebar.contains("data-doc-id=\"1\""));
        assert!(!sidebar.contains("<h3>"));
        assert_eq!(ctrl.docs().len(), 1);
        assert_eq!(ctrl.find_doc_by_id(1).unwrap().title, "A");
    }

    #[tokio::test]
    async fn grouped_manifest_renders_sections_with_display_names() {
        let mut ctrl = controller();
        let mut surface = RecordingSurface::new();
        ctrl.initialize(
            json!({
                "groups": {"x": "X Grp"},
                "docs": [
                    {"title": "A", "urlpath": "a.md", "grp": "x"},
                    {"title": "B", "urlpath": "b.md"}
                ]
            }),
            &mut surface,
        )
        .await
        .unwrap();

        let sidebar = surface.region_html("sidebar").unwrap();
        assert!(sidebar.contains("<h3>X Grp</h3>"));
        assert!(sidebar.contains("<h3>ungrouped</h3>"));
    }

    #[tokio::test]
    async fn invalid_manifest_renders_nothing() {
        let mut ctrl = controller();
        let mut surface = RecordingSurface::new();
        let err = ctrl
            .initialize(json!({"title": "no docs"}), &mut surface)
            .await
            .unwrap_err();

        assert!(matches!(err, DocIndexError::Validation { .. }));
        assert!(surface.events.is_empty());
    }

    #[tokio::test]
    async fn title_is_published_and_optionally_set_on_document() {
        let overrides = ConfigOverrides {
            settitle: Some(true),
            ..Default::default()
        };
        let mut ctrl = controller_with(&overrides);
        let mut surface = RecordingSurface::new();
        ctrl.initialize(json!({"title": "My Docs", "docs": []}), &mut surface)
            .await
            .unwrap();

        assert_eq!(surface.region_html("pagetitle"), Some("My Docs"));
        assert!(surface
            .events
            .contains(&SurfaceEvent::DocumentTitle("My Docs".into())));
    }

    #[tokio::test]
    async fn missing_title_falls_back() {
        let mut ctrl = controller();
        let mut surface = RecordingSurface::new();
        ctrl.initialize(json!({"docs": []}), &mut surface).await.unwrap();
        assert_eq!(surface.region_html("pagetitle"), Some("Misc. Markdown Docs"));
    }

    #[tokio::test]
    async fn manifest_overrides_take_effect() {
        let mut ctrl = controller();
        let mut surface = RecordingSurface::new();
        ctrl.initialize(
            json!({"docs": [], "linkproc": "auto", "debug": true}),
            &mut surface,
        )
        .await
        .unwrap();

        assert_eq!(ctrl.config().linkproc, LinkPolicy::Auto);
        assert!(ctrl.config().debug);
    }

    #[tokio::test]
    async fn post_load_hook_filters_before_rendering() {
        let mut ctrl = controller().with_post_load(|manifest| {
            manifest.docs.retain(|d| d.title != "B");
        });
        let mut surface = RecordingSurface::new();
        ctrl.initialize(
            json!({
                "docs": [
                    {"title": "A", "urlpath": "a.md"},
                    {"title": "B", "urlpath": "b.md"}
                ]
            }),
            &mut surface,
        )
        .await
        .unwrap();

        let sidebar = surface.region_html("sidebar").unwrap();
        assert!(sidebar.contains(">A</a>"));
        assert!(!sidebar.contains(">B</a>"));
        assert_eq!(ctrl.docs().len(), 1);
    }

    #[tokio::test]
    async fn default_doc_is_auto_activated() {
        let mut ctrl = controller();
        let mut surface = RecordingSurface::new();
        ctrl.initialize(
            json!({
                "docs": [{"title": "Ted", "urlpath": "ted_williams.md"}],
                "defdoc": 0
            }),
            &mut surface,
        )
        .await
        .unwrap();

        let content = surface.region_html("doccontent").unwrap();
        assert!(content.contains("<h1>Ted Williams</h1>"));
        assert!(surface.events.contains(&SurfaceEvent::Show("doccontent".into())));
    }

    #[tokio::test]
    async fn failing_default_doc_keeps_listing_usable() {
        let mut ctrl = controller();
        let mut surface = RecordingSurface::new();
        ctrl.initialize(
            json!({
                "docs": [{"title": "Gone", "urlpath": "missing.md"}],
                "defdoc": 0
            }),
            &mut surface,
        )
        .await
        .unwrap();

        assert!(surface.region_html("sidebar").is_some());
        assert!(surface.region_html("doccontent").is_none());
    }

    #[tokio::test]
    async fn activation_loads_and_publishes() {
        let mut ctrl = controller();
        let mut surface = RecordingSurface::new();
        ctrl.initialize(
            json!({"docs": [{"title": "Ted", "urlpath": "ted_williams.md"}]}),
            &mut surface,
        )
        .await
        .unwrap();

        ctrl.activate(1, &mut surface).await.unwrap();
        assert!(surface
            .region_html("doccontent")
            .unwrap()
            .contains("Ted Williams"));
    }

    #[tokio::test]
    async fn unknown_activation_is_ignored() {
        let mut ctrl = controller();
        let mut surface = RecordingSurface::new();
        ctrl.initialize(json!({"docs": []}), &mut surface).await.unwrap();

        let events_before = surface.events.len();
        ctrl.activate(42, &mut surface).await.unwrap();
        assert_eq!(surface.events.len(), events_before);
    }

    #[tokio::test]
    async fn accordion_failure_is_non_fatal() {
        let overrides = ConfigOverrides {
            acc: Some(true),
            ..Default::default()
        };
        let mut ctrl = controller_with(&overrides);
        let mut surface = RecordingSurface::new(); // accordion unavailable

        ctrl.initialize(json!({"docs": []}), &mut surface).await.unwrap();
        assert!(!surface
            .events
            .iter()
            .any(|ev| matches!(ev, SurfaceEvent::Accordion { .. })));
    }

    #[tokio::test]
    async fn accordion_installed_when_available() {
        let overrides = ConfigOverrides {
            acc: Some(true),
            ..Default::default()
        };
        let mut ctrl = controller_with(&overrides);
        let mut surface = RecordingSurface {
            accordion_available: true,
            ..Default::default()
        };

        ctrl.initialize(json!({"docs": []}), &mut surface).await.unwrap();
        assert!(surface.events.contains(&SurfaceEvent::Accordion {
            region: "sidebar".into()
        }));
    }

    #[tokio::test]
    async fn show_index_reveals_list_and_hides_content() {
        let ctrl = controller();
        let mut surface = RecordingSurface::new();
        ctrl.show_index(&mut surface);
        assert_eq!(
            surface.events,
            vec![
                SurfaceEvent::Show("sidebar".into()),
                SurfaceEvent::Hide("doccontent".into())
            ]
        );
    }

    #[tokio::test]
    async fn doc_changed_hook_fires_on_activation() {
        use std::sync::{Arc, Mutex};
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let seen_by_hook = seen.clone();

        let mut ctrl = controller().with_doc_changed(move |url| {
            seen_by_hook.lock().unwrap().push(url.to_string());
        });
        let mut surface = RecordingSurface::new();
        ctrl.initialize(
            json!({"docs": [{"title": "Ted", "urlpath": "ted_williams.md"}]}),
            &mut surface,
        )
        .await
        .unwrap();

        ctrl.activate(1, &mut surface).await.unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("ted_williams.md"));
    }
}
