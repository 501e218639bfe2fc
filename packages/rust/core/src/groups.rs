//! Group resolution: manifest docs → ordered, id-assigned buckets.
//!
//! Ids are 1-based and sequential in manifest order, assigned onto fresh
//! [`IndexedDoc`] copies; the caller's manifest is never touched. The same
//! ordered input always yields the same ids.

use tracing::debug;

use docindex_shared::Manifest;

/// Bucket key for docs with no `grp` when the manifest declares groups.
///
/// No display name is usually defined for it, so it renders under its raw
/// key. Degenerate but harmless, kept that way on purpose.
pub const UNGROUPED_KEY: &str = "ungrouped";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An id-augmented copy of one manifest doc entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDoc {
    /// 1-based position in manifest order, unique per manifest instance.
    pub id: u32,
    pub title: String,
    pub urlpath: String,
    pub grp: Option<String>,
}

/// One group's worth of docs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBucket {
    /// Group key ([`UNGROUPED_KEY`] for docs without one).
    pub key: String,
    pub docs: Vec<IndexedDoc>,
}

/// Grouping derived from a manifest, rebuilt on every resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupedListing {
    /// Manifest has no `groups`: all docs, manifest order, no sections.
    Flat(Vec<IndexedDoc>),
    /// Buckets in first-seen order of `grp` values while scanning `docs`.
    Grouped(Vec<GroupBucket>),
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Assign ids 1..N to the manifest docs, in order.
pub fn index_docs(manifest: &Manifest) -> Vec<IndexedDoc> {
    manifest
        .docs
        .iter()
        .enumerate()
        .map(|(i, doc)| IndexedDoc {
            id: i as u32 + 1,
            title: doc.title.clone(),
            urlpath: doc.urlpath.clone(),
            grp: doc.grp.clone(),
        })
        .collect()
}

/// Derive the grouping for a manifest.
pub fn resolve(manifest: &Manifest) -> GroupedListing {
    let docs = index_docs(manifest);

    if manifest.groups.is_none() {
        debug!(docs = docs.len(), "no groups declared, flat listing");
        return GroupedListing::Flat(docs);
    }

    let mut buckets: Vec<GroupBucket> = Vec::new();
    for doc in docs {
        let key = doc
            .grp
            .clone()
            .unwrap_or_else(|| UNGROUPED_KEY.to_string());
        match buckets.iter_mut().find(|b| b.key == key) {
            Some(bucket) => bucket.docs.push(doc),
            None => buckets.push(GroupBucket {
                key,
                docs: vec![doc],
            }),
        }
    }

    debug!(buckets = buckets.len(), "docs grouped");
    GroupedListing::Grouped(buckets)
}
