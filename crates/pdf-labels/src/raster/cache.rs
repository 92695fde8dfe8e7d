//! Fingerprint-keyed page cache for interactive hosts
//!
//! A host that re-renders the same document after every settings change
//! wraps its rasterizer in [`CachingRasterizer`] so unchanged bytes are only
//! decoded once. The core pipeline never caches on its own.

use image::RgbImage;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::fmt;

use super::{DocumentMetadata, Rasterizer};
use crate::constants::MAX_CACHED_PAGES;
use crate::types::Result;

/// SHA-256 of a source document's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceFingerprint([u8; 32]);

impl SourceFingerprint {
    pub fn of(document: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(document);
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        Self(digest)
    }
}

impl fmt::Display for SourceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

type CacheKey = (SourceFingerprint, u64, usize);

/// Rasterizer decorator that keeps recently rendered pages in memory.
///
/// Entries are keyed by document fingerprint, resolution and page number and
/// evicted least-recently-used once `capacity` pages are held.
pub struct CachingRasterizer<R> {
    inner: R,
    capacity: usize,
    pages: HashMap<CacheKey, RgbImage>,
    order: VecDeque<CacheKey>,
    hits: usize,
    misses: usize,
}

impl<R: Rasterizer> CachingRasterizer<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, MAX_CACHED_PAGES)
    }

    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            pages: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Pages currently held
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// (hits, misses) counted per page
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Drop every cached page of one document
    pub fn evict_document(&mut self, fingerprint: SourceFingerprint) {
        self.order.retain(|(fp, _, _)| *fp != fingerprint);
        self.pages.retain(|(fp, _, _), _| *fp != fingerprint);
    }

    pub fn clear(&mut self) {
        self.pages.clear();
        self.order.clear();
    }

    fn get(&mut self, key: &CacheKey) -> Option<RgbImage> {
        let page = self.pages.get(key)?.clone();
        self.order.retain(|k| k != key);
        self.order.push_back(*key);
        Some(page)
    }

    fn insert(&mut self, key: CacheKey, page: RgbImage) {
        if self.pages.contains_key(&key) {
            self.order.retain(|k| k != &key);
        }

        while self.order.len() >= self.capacity {
            if let Some(old_key) = self.order.pop_front() {
                self.pages.remove(&old_key);
            }
        }

        self.pages.insert(key, page);
        self.order.push_back(key);
    }
}

impl<R: Rasterizer> Rasterizer for CachingRasterizer<R> {
    fn page_count(&self, document: &[u8]) -> Result<usize> {
        self.inner.page_count(document)
    }

    fn metadata(&self, document: &[u8]) -> Result<DocumentMetadata> {
        self.inner.metadata(document)
    }

    fn rasterize(
        &mut self,
        document: &[u8],
        first_page: usize,
        last_page: usize,
        dpi: f64,
    ) -> Result<Vec<RgbImage>> {
        let fingerprint = SourceFingerprint::of(document);
        let dpi_key = dpi.to_bits();

        let mut found: Vec<Option<RgbImage>> = (first_page..=last_page)
            .map(|page| self.get(&(fingerprint, dpi_key, page)))
            .collect();

        let missing: Vec<usize> = found
            .iter()
            .enumerate()
            .filter(|(_, page)| page.is_none())
            .map(|(i, _)| first_page + i)
            .collect();
        self.hits += found.len() - missing.len();
        self.misses += missing.len();

        if let (Some(&lo), Some(&hi)) = (missing.first(), missing.last()) {
            log::debug!("Cache miss for pages {}..={} of {}", lo, hi, fingerprint);
            let rendered = self.inner.rasterize(document, lo, hi, dpi)?;
            for (page, raster) in (lo..=hi).zip(rendered) {
                self.insert((fingerprint, dpi_key, page), raster.clone());
                found[page - first_page] = Some(raster);
            }
        }

        Ok(found.into_iter().flatten().collect())
    }
}
