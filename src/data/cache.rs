//! Single-entry memo slots keyed by input fingerprint.

use std::sync::Arc;

/// Hit/miss counters across all slots of a data manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups served from cache.
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

/// Holds the most recent `(fingerprint, result)` pair.
#[derive(Debug)]
pub(crate) struct CacheSlot<T: ?Sized> {
    entry: Option<(u64, Arc<T>)>,
}

impl<T: ?Sized> Default for CacheSlot<T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<T: ?Sized> CacheSlot<T> {
    /// Return the stored result when `fingerprint` matches, otherwise compute,
    /// store and return a fresh one. The flag reports a hit.
    pub(crate) fn get_or_compute(
        &mut self,
        fingerprint: u64,
        compute: impl FnOnce() -> Arc<T>,
    ) -> (Arc<T>, bool) {
        if let Some((stored, value)) = &self.entry
            && *stored == fingerprint
        {
            return (Arc::clone(value), true);
        }
        let value = compute();
        self.entry = Some((fingerprint, Arc::clone(&value)));
        (value, false)
    }

    pub(crate) fn clear(&mut self) {
        self.entry = None;
    }

    pub(crate) const fn is_filled(&self) -> bool {
        self.entry.is_some()
    }
}
