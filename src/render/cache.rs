//! LRU cache of rendered galleries.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use super::request::RenderParams;
use super::types::PageGallery;

/// Cache key for rendered galleries. The target size fully determines the
/// raster, so (page, size) identifies a gallery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Page number (1-indexed)
    pub page: u32,
    /// Target size in pixels
    pub target_size: u32,
}

impl CacheKey {
    #[must_use]
    pub fn from_params(page: u32, params: &RenderParams) -> Self {
        Self {
            page,
            target_size: params.size.value,
        }
    }
}

/// LRU cache of rendered page galleries.
pub struct GalleryCache {
    cache: LruCache<CacheKey, Arc<PageGallery>>,
}

impl GalleryCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).expect("1 is non-zero")),
            ),
        }
    }

    /// Get a cached gallery, promoting it in the LRU order.
    #[must_use]
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<PageGallery>> {
        self.cache.get(key).cloned()
    }

    /// Check for a key without promoting it.
    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache.contains(key)
    }

    /// Insert a gallery, returning the shared handle.
    pub fn insert(&mut self, key: CacheKey, data: Arc<PageGallery>) -> Arc<PageGallery> {
        self.cache.put(key, Arc::clone(&data));
        data
    }

    /// Drop everything.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_gallery(page: u32) -> Arc<PageGallery> {
        Arc::new(PageGallery {
            page_number: page,
            target_size: 350,
            scale: 0.5,
            natural_width: 612.0,
            natural_height: 792.0,
            surfaces: vec![],
        })
    }

    fn params(target_size: u32) -> RenderParams {
        let mut size = crate::scale::SizeControl::default();
        size.set(target_size);
        RenderParams { size }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let mut cache = GalleryCache::new(4);
        let key = CacheKey::from_params(1, &params(350));

        cache.insert(key, test_gallery(1));

        assert!(cache.contains(&key));
        assert_eq!(cache.get(&key).unwrap().page_number, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn size_change_misses() {
        let mut cache = GalleryCache::new(4);
        cache.insert(CacheKey::from_params(1, &params(350)), test_gallery(1));

        assert!(!cache.contains(&CacheKey::from_params(1, &params(400))));
    }

    #[test]
    fn lru_evicts_oldest() {
        let mut cache = GalleryCache::new(2);
        for page in 1..=3 {
            cache.insert(CacheKey::from_params(page, &params(350)), test_gallery(page));
        }

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&CacheKey::from_params(1, &params(350))));
        assert!(cache.contains(&CacheKey::from_params(2, &params(350))));
        assert!(cache.contains(&CacheKey::from_params(3, &params(350))));
    }

    #[test]
    fn invalidate_all_empties() {
        let mut cache = GalleryCache::new(4);
        for page in 1..=3 {
            cache.insert(CacheKey::from_params(page, &params(350)), test_gallery(page));
        }

        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
