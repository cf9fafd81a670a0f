#![forbid(unsafe_code)]

//! Text-measurement capability and caching.
//!
//! Measurement is injected: the rendering host owns the font metrics (a
//! canvas context, a glyph atlas, ...), the engine only asks "how wide is
//! this string at this font". [`MeasuredWidthCache`] wraps any measurer
//! with an LRU cache keyed by a 64-bit hash of text, family, and size.

use lru::LruCache;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use unicode_width::UnicodeWidthStr;

/// Default measurement-cache capacity.
pub const DEFAULT_MEASURE_CACHE_CAPACITY: usize = 4096;

/// Average glyph advance as a fraction of font size, used by the
/// heuristic fallback measurer.
const HEURISTIC_ADVANCE_RATIO: f64 = 0.6;

/// Injected text-measurement capability.
///
/// `&mut self` because real measurers cache; a plain closure
/// `FnMut(&str, &str, f64) -> f64` satisfies the trait via the blanket
/// impl, so callers can inject a bare function.
pub trait TextMeasurer {
    /// Pixel width of `text` rendered in `font_family` at `font_size`.
    fn text_width(&mut self, text: &str, font_family: &str, font_size: f64) -> f64;
}

impl<F> TextMeasurer for F
where
    F: FnMut(&str, &str, f64) -> f64,
{
    fn text_width(&mut self, text: &str, font_family: &str, font_size: f64) -> f64 {
        self(text, font_family, font_size)
    }
}

/// Fallback measurer approximating pixel width from Unicode display width.
///
/// `width ≈ display_width(text) × font_size × advance_ratio`. Wide (CJK)
/// glyphs count double via their display width. Good enough for layout
/// previews and tests; rendering hosts should inject real metrics.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicMeasurer {
    advance_ratio: f64,
}

impl HeuristicMeasurer {
    /// Create a measurer with a custom advance ratio.
    #[must_use]
    pub fn new(advance_ratio: f64) -> Self {
        Self { advance_ratio }
    }
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self::new(HEURISTIC_ADVANCE_RATIO)
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn text_width(&mut self, text: &str, _font_family: &str, font_size: f64) -> f64 {
        text.width() as f64 * font_size * self.advance_ratio
    }
}

/// Statistics about measurement-cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasureCacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl MeasureCacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache over an inner [`TextMeasurer`].
///
/// Keys are 64-bit FxHash values over (text, family, size bits) rather than
/// owned strings, trading theoretical collision-correctness for memory;
/// with a 64-bit hash the collision probability is negligible for the
/// token populations a plan produces.
///
/// Not thread-safe; one cache per layout invocation (or wrap in a mutex).
#[derive(Debug)]
pub struct MeasuredWidthCache<M> {
    inner: M,
    cache: LruCache<u64, f64>,
    hits: u64,
    misses: u64,
}

impl<M: TextMeasurer> MeasuredWidthCache<M> {
    /// Wrap a measurer with a cache of the given capacity.
    ///
    /// A zero capacity is bumped to 1.
    #[must_use]
    pub fn new(inner: M, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            inner,
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Wrap a measurer with the default capacity.
    #[must_use]
    pub fn with_default_capacity(inner: M) -> Self {
        Self::new(inner, DEFAULT_MEASURE_CACHE_CAPACITY)
    }

    /// Cache statistics.
    #[must_use]
    pub fn stats(&self) -> MeasureCacheStats {
        MeasureCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    /// Drop all cached widths.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Recover the wrapped measurer.
    #[must_use]
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: TextMeasurer> TextMeasurer for MeasuredWidthCache<M> {
    fn text_width(&mut self, text: &str, font_family: &str, font_size: f64) -> f64 {
        let key = measure_key(text, font_family, font_size);
        if let Some(&width) = self.cache.get(&key) {
            self.hits += 1;
            return width;
        }
        self.misses += 1;
        let width = self.inner.text_width(text, font_family, font_size);
        self.cache.put(key, width);
        width
    }
}

/// Hash a measurement request into a cache key.
#[inline]
fn measure_key(text: &str, font_family: &str, font_size: f64) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    font_family.hash(&mut hasher);
    font_size.to_bits().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_calls() -> (impl FnMut(&str, &str, f64) -> f64, std::rc::Rc<std::cell::Cell<u32>>) {
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let calls2 = calls.clone();
        let measurer = move |text: &str, _family: &str, size: f64| {
            calls2.set(calls2.get() + 1);
            text.len() as f64 * size
        };
        (measurer, calls)
    }

    #[test]
    fn closure_satisfies_measurer() {
        let mut m = |text: &str, _f: &str, size: f64| text.len() as f64 * size;
        assert_eq!(m.text_width("abcd", "mono", 10.0), 40.0);
    }

    #[test]
    fn heuristic_scales_with_font_size() {
        let mut m = HeuristicMeasurer::default();
        let small = m.text_width("hello", "sans", 10.0);
        let large = m.text_width("hello", "sans", 20.0);
        assert!((large - small * 2.0).abs() < 1e-9);
    }

    #[test]
    fn heuristic_counts_wide_glyphs_double() {
        let mut m = HeuristicMeasurer::default();
        let ascii = m.text_width("ab", "sans", 10.0);
        let cjk = m.text_width("你", "sans", 10.0);
        assert_eq!(ascii, cjk);
    }

    #[test]
    fn cache_hits_avoid_inner_calls() {
        let (inner, calls) = count_calls();
        let mut cache = MeasuredWidthCache::new(inner, 16);

        let w1 = cache.text_width("MATCH", "sans", 10.0);
        let w2 = cache.text_width("MATCH", "sans", 10.0);
        assert_eq!(w1, w2);
        assert_eq!(calls.get(), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn different_sizes_are_distinct_entries() {
        let (inner, calls) = count_calls();
        let mut cache = MeasuredWidthCache::new(inner, 16);

        cache.text_width("n", "sans", 10.0);
        cache.text_width("n", "sans", 11.0);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn lru_evicts_oldest() {
        let (inner, calls) = count_calls();
        let mut cache = MeasuredWidthCache::new(inner, 2);

        cache.text_width("a", "sans", 10.0);
        cache.text_width("b", "sans", 10.0);
        cache.text_width("c", "sans", 10.0); // evicts "a"
        cache.text_width("a", "sans", 10.0); // recomputes
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn clear_forces_recompute() {
        let (inner, calls) = count_calls();
        let mut cache = MeasuredWidthCache::new(inner, 16);

        cache.text_width("x", "sans", 10.0);
        cache.clear();
        cache.text_width("x", "sans", 10.0);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn zero_capacity_is_bumped() {
        let cache = MeasuredWidthCache::new(HeuristicMeasurer::default(), 0);
        assert_eq!(cache.stats().capacity, 1);
    }

    #[test]
    fn hit_rate() {
        let stats = MeasureCacheStats {
            hits: 3,
            misses: 1,
            size: 1,
            capacity: 16,
        };
        assert!((stats.hit_rate() - 0.75).abs() < 1e-9);
        assert_eq!(MeasureCacheStats::default().hit_rate(), 0.0);
    }
}
