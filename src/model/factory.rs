use super::{Attr, Element, ElementId};
use ahash::AHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Creates document elements with fresh, document-unique identities.
///
/// Ids are handed out from a shared counter so elements synthesized by the resolver
/// never collide with elements imported into the same document.
#[derive(Debug, Default)]
pub struct ElementFactory {
    next_id: AtomicU64,
}

impl ElementFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> ElementId {
        ElementId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Makes sure ids handed out from now on are greater than `id`.
    pub fn reserve_past(&self, id: ElementId) {
        self.next_id.fetch_max(id.0 + 1, Ordering::Relaxed);
    }

    /// Creates an empty element of the given type.
    pub fn create(&self, kind: &str) -> Element {
        self.create_with(kind, AHashMap::new())
    }

    /// Creates an element of the given type with initial attributes.
    /// `Null` values are dropped, matching how an unset attribute reads back.
    pub fn create_with(&self, kind: &str, attrs: AHashMap<String, Attr>) -> Element {
        let attrs = attrs
            .into_iter()
            .filter(|(_, attr)| !matches!(attr, Attr::Value(v) if v.is_null()))
            .collect();
        Element {
            id: self.next_id(),
            kind: kind.to_string(),
            attrs,
        }
    }
}
