//! Output port for UI surfaces.
//!
//! The core produces markup and display decisions; a [`Surface`] applies them
//! to whatever is actually painting (a DOM bridge, a static page writer, a
//! terminal). Regions are addressed by the element ids from [`IndexConfig`].
//!
//! [`IndexConfig`]: crate::config::IndexConfig

use crate::error::{DocIndexError, Result};

// ---------------------------------------------------------------------------
// AccordionOptions
// ---------------------------------------------------------------------------

/// Options handed to the accordion collaborator along with the list region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionOptions {
    /// Height style, `"content"` by default.
    pub height_style: String,
    /// Whether all panels may be collapsed at once.
    pub collapsible: bool,
    /// Whether panels auto-size to the tallest one.
    pub auto_height: bool,
}

impl Default for AccordionOptions {
    fn default() -> Self {
        Self {
            height_style: "content".into(),
            collapsible: true,
            auto_height: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A UI surface the controller publishes into.
pub trait Surface {
    /// Set the document-level (window) title.
    fn set_document_title(&mut self, title: &str);

    /// Replace the inner HTML of the region with the given id.
    fn set_region_html(&mut self, region: &str, html: &str);

    /// Reveal a region.
    fn show_region(&mut self, region: &str);

    /// Hide a region.
    fn hide_region(&mut self, region: &str);

    /// Hand a region to the accordion widget collaborator.
    ///
    /// Surfaces without the widget return an error; callers treat that as a
    /// non-fatal configuration problem.
    fn install_accordion(&mut self, region: &str, opts: &AccordionOptions) -> Result<()> {
        let _ = (region, opts);
        Err(DocIndexError::config(
            "no accordion widget available on this surface",
        ))
    }
}

// ---------------------------------------------------------------------------
// RecordingSurface
// ---------------------------------------------------------------------------

/// One recorded surface interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    DocumentTitle(String),
    RegionHtml { region: String, html: String },
    Show(String),
    Hide(String),
    Accordion { region: String },
}

/// Surface double that records every call, for headless/test usage.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// All interactions, in call order.
    pub events: Vec<SurfaceEvent>,
    /// Whether `install_accordion` should succeed.
    pub accordion_available: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last HTML published to the given region, if any.
    pub fn region_html(&self, region: &str) -> Option<&str> {
        self.events.iter().rev().find_map(|ev| match ev {
            SurfaceEvent::RegionHtml { region: r, html } if r == region => {
                Some(html.as_str())
            }
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn set_document_title(&mut self, title: &str) {
        self.events.push(SurfaceEvent::DocumentTitle(title.into()));
    }

    fn set_region_html(&mut self, region: &str, html: &str) {
        self.events.push(SurfaceEvent::RegionHtml {
            region: region.into(),
            html: html.into(),
        });
    }

    fn show_region(&mut self, region: &str) {
        self.events.push(SurfaceEvent::Show(region.into()));
    }

    fn hide_region(&mut self, region: &str) {
        self.events.push(SurfaceEvent::Hide(region.into()));
    }

    fn install_accordion(&mut self, region: &str, _opts: &AccordionOptions) -> Result<()> {
        if !self.accordion_available {
            return Err(DocIndexError::config(
                "no accordion widget available on this surface",
            ));
        }
        self.events.push(SurfaceEvent::Accordion {
            region: region.into(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accordion_options_defaults() {
        let opts = AccordionOptions::default();
        assert_eq!(opts.height_style, "content");
        assert!(opts.collapsible);
        assert!(!opts.auto_height);
    }

    #[test]
    fn recording_surface_tracks_region_html() {
        let mut surface = RecordingSurface::new();
        surface.set_region_html("doccontent", "<p>one</p>");
        surface.set_region_html("doccontent", "<p>two</p>");
        assert_eq!(surface.region_html("doccontent"), Some("<p>two</p>"));
        assert_eq!(surface.region_html("sidebar"), None);
    }

    #[test]
    fn accordion_unavailable_by_default() {
        let mut surface = RecordingSurface::new();
        let result = surface.install_accordion("sidebar", &AccordionOptions::default());
        assert!(result.is_err());
    }
}
