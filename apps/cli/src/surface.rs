//! Static-page surface for the CLI.
//!
//! Collects the controller's region writes in memory and assembles them into
//! a standalone HTML page. No accordion collaborator here; `install_accordion`
//! keeps its refusing default.

use std::collections::{BTreeMap, BTreeSet};

use docindex_shared::{IndexConfig, Surface};

/// Surface that buffers region content for a one-shot page render.
#[derive(Debug, Default)]
pub(crate) struct PageSurface {
    document_title: Option<String>,
    regions: BTreeMap<String, String>,
    hidden: BTreeSet<String>,
}

impl PageSurface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Current content of a region, if any was published.
    pub(crate) fn region(&self, region: &str) -> Option<&str> {
        self.regions.get(region).map(String::as_str)
    }

    /// Assemble the buffered regions into a full static page.
    pub(crate) fn into_page(self, config: &IndexConfig) -> String {
        let title = self
            .document_title
            .clone()
            .or_else(|| self.regions.get(&config.pagetitleid).cloned())
            .unwrap_or_default();

        let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{title}</title>\n"));
        out.push_str("</head>\n<body>\n");

        out.push_str(&self.region_div("h1", &config.pagetitleid));
        out.push_str(&self.region_div("div", &config.doclistid));
        out.push_str(&self.region_div("div", &config.docareaid));

        out.push_str("</body>\n</html>\n");
        out
    }

    fn region_div(&self, tag: &str, region: &str) -> String {
        let content = self.regions.get(region).map(String::as_str).unwrap_or("");
        let style = if self.hidden.contains(region) {
            " style=\"display: none;\""
        } else {
            ""
        };
        format!("<{tag} id=\"{region}\"{style}>\n{content}</{tag}>\n")
    }
}

impl Surface for PageSurface {
    fn set_document_title(&mut self, title: &str) {
        self.document_title = Some(title.to_string());
    }

    fn set_region_html(&mut self, region: &str, html: &str) {
        self.regions.insert(region.to_string(), html.to_string());
    }

    fn show_region(&mut self, region: &str) {
        self.hidden.remove(region);
    }

    fn hide_region(&mut self, region: &str) {
        self.hidden.insert(region.to_string());
    }
}
