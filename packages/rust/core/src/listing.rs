//! List renderer: grouped listing → ordered sections → navigation markup.
//!
//! Sections are the abstract output contract; [`sections_to_html`] turns
//! them into the `<h3>`/`<div>` pairs the accordion collaborator consumes,
//! or a bare `<ul>` for the flat case.

use std::collections::BTreeMap;

use crate::groups::{GroupedListing, IndexedDoc};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One navigable entry in the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: u32,
    pub title: String,
    pub urlpath: String,
}

/// An ordered run of entries, optionally under a section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// `None` for the flat (ungrouped) case — no section wrapper.
    pub display_name: Option<String>,
    pub items: Vec<ListItem>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Turn a grouped listing into ordered sections.
///
/// Display names come from the manifest's `groups` map, falling back to the
/// raw bucket key when no name is defined.
pub fn render_sections(
    listing: &GroupedListing,
    group_names: Option<&BTreeMap<String, String>>,
) -> Vec<Section> {
    match listing {
        GroupedListing::Flat(docs) => vec![Section {
            display_name: None,
            items: docs.iter().map(list_item).collect(),
        }],
        GroupedListing::Grouped(buckets) => buckets
            .iter()
            .map(|bucket| {
                let display_name = group_names
                    .and_then(|names| names.get(&bucket.key))
                    .cloned()
                    .unwrap_or_else(|| bucket.key.clone());
                Section {
                    display_name: Some(display_name),
                    items: bucket.docs.iter().map(list_item).collect(),
                }
            })
            .collect(),
    }
}

/// Render sections to the navigation-area markup.
pub fn sections_to_html(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        match &section.display_name {
            Some(name) => {
                out.push_str(&format!("<h3>{}</h3>\n\n", escape_html(name)));
                out.push_str("<div>\n");
                out.push_str(&doc_list_html(&section.items));
                out.push_str("</div>\n");
            }
            None => out.push_str(&doc_list_html(&section.items)),
        }
    }
    out
}

/// A single `<ul>` of doc links.
///
/// Each link carries its `urlpath` as href and its assigned id as
/// `data-doc-id`, for lookup when an activation comes back from the host.
fn doc_list_html(items: &[ListItem]) -> String {
    let mut out = String::from("<ul>\n");
    for item in items {
        out.push_str(&format!(
            "<li><a class=\"dlink\" data-doc-id=\"{}\" href=\"{}\">{}</a></li>\n",
            item.id,
            escape_html(&item.urlpath),
            escape_html(&item.title),
        ));
    }
    out.push_str("</ul>\n");
    out
}

fn list_item(doc: &IndexedDoc) -> ListItem {
    ListItem {
        id: doc.id,
        title: doc.title.clone(),
        urlpath: doc.urlpath.clone(),
    }
}

/// Minimal escaping for text and attribute values.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::resolve;
    use docindex_shared::Manifest;
    use serde_json::json;

    fn manifest(value: serde_json::Value) -> Manifest {
        Manifest::ingest(value).expect("valid manifest")
    }

    #[test]
    fn flat_listing_renders_single_unsectioned_list() {
        let m = manifest(json!({"docs": [{"title": "A", "urlpath": "a.md"}]}));
        let sections = render_sections(&resolve(&m), m.groups.as_ref());

        assert_eq!(sections.len(), 1);
        assert!(sections[0].display_name.is_none());
        assert_eq!(sections[0].items.len(), 1);
        assert_eq!(sections[0].items[0].id, 1);

        let html = sections_to_html(&sections);
        assert!(html.starts_with("<ul>"));
        assert!(!html.contains("<h3>"));
        assert!(html.contains(
            "<li><a class=\"dlink\" data-doc-id=\"1\" href=\"a.md\">A</a></li>"
        ));
    }

    #[test]
    fn grouped_listing_renders_headed_sections() {
        let m = manifest(json!({
            "groups": {"x": "X Grp"},
            "docs": [
                {"title": "A", "urlpath": "a.md", "grp": "x"},
                {"title": "B", "urlpath": "b.md"}
            ]
        }));
        let sections = render_sections(&resolve(&m), m.groups.as_ref());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].display_name.as_deref(), Some("X Grp"));
        // No display name defined for the ungrouped bucket: raw key shows.
        assert_eq!(sections[1].display_name.as_deref(), Some("ungrouped"));

        let html = sections_to_html(&sections);
        assert!(html.contains("<h3>X Grp</h3>"));
        assert!(html.contains("<h3>ungrouped</h3>"));
        assert!(html.contains("<div>\n<ul>"));
    }

    #[test]
    fn unknown_group_key_falls_back_to_raw_key() {
        let m = manifest(json!({
            "groups": {"x": "X Grp"},
            "docs": [{"title": "A", "urlpath": "a.md", "grp": "mystery"}]
        }));
        let sections = render_sections(&resolve(&m), m.groups.as_ref());
        assert_eq!(sections[0].display_name.as_deref(), Some("mystery"));
    }

    #[test]
    fn markup_escapes_titles_and_urlpaths() {
        let m = manifest(json!({
            "docs": [{"title": "Fish & Chips <fast>", "urlpath": "a\"b.md"}]
        }));
        let html = sections_to_html(&render_sections(&resolve(&m), None));
        assert!(html.contains("Fish &amp; Chips &lt;fast&gt;"));
        assert!(html.contains("href=\"a&quot;b.md\""));
    }

    #[test]
    fn empty_docs_render_empty_list() {
        let m = manifest(json!({"docs": []}));
        let html = sections_to_html(&render_sections(&resolve(&m), None));
        assert_eq!(html, "<ul>\n</ul>\n");
    }
}
