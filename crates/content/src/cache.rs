use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::render_tree::RenderedDocument;

/// Rendered documents keyed by document identity (e.g. article id).
///
/// An entry only counts as a hit while the markup it was rendered from is
/// unchanged, so edited posts re-render even under the same id. Least
/// recently used entries are evicted once `capacity` is reached.
pub struct DocumentCache {
    entries: LruCache<String, CacheEntry>,
}

struct CacheEntry {
    content_hash: blake3::Hash,
    document: Arc<RenderedDocument>,
}

impl DocumentCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Cached rendering of `markup` for `document_id`, if still fresh
    pub fn get(&mut self, document_id: &str, markup: &str) -> Option<Arc<RenderedDocument>> {
        let hash = hash_markup(markup);
        self.entries
            .get(document_id)
            .filter(|entry| entry.content_hash == hash)
            .map(|entry| Arc::clone(&entry.document))
    }

    /// Return the cached document, rendering and storing it on a miss
    pub fn get_or_render<F>(
        &mut self,
        document_id: &str,
        markup: &str,
        render: F,
    ) -> Arc<RenderedDocument>
    where
        F: FnOnce(&str) -> RenderedDocument,
    {
        if let Some(document) = self.get(document_id, markup) {
            return document;
        }

        log::debug!("Rendering document {}", document_id);
        let document = Arc::new(render(markup));
        self.entries.put(
            document_id.to_string(),
            CacheEntry {
                content_hash: hash_markup(markup),
                document: Arc::clone(&document),
            },
        );

        document
    }

    /// Drop the entry for a document, returning whether one existed
    pub fn invalidate(&mut self, document_id: &str) -> bool {
        self.entries.pop(document_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

/// Compute Blake3 hash of a document body
pub fn hash_markup(markup: &str) -> blake3::Hash {
    blake3::hash(markup.as_bytes())
}
