use std::collections::{HashMap, VecDeque};

use super::{compute_mosaic, MosaicConfig, MosaicLayout};

/// Bit patterns of the aspect ratios plus the clamped gap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    ratios: Vec<u64>,
    gap: u64,
}

impl CacheKey {
    fn new(aspect_ratios: &[f64], gap: f64) -> Self {
        Self {
            ratios: aspect_ratios.iter().map(|ar| ar.to_bits()).collect(),
            gap: gap.to_bits(),
        }
    }
}

/// Galleries kept by [`MosaicCache::new`] before the oldest is evicted.
pub const DEFAULT_CACHE_LIMIT: usize = 512;

/// Memoizes mosaics so a feed only searches each distinct gallery once.
///
/// Holds at most `limit` layouts; inserting past that evicts the oldest entry.
#[derive(Debug)]
pub struct MosaicCache {
    config: MosaicConfig,
    entries: HashMap<CacheKey, MosaicLayout>,
    /// Insertion order, oldest first
    order: VecDeque<CacheKey>,
    limit: usize,
    hits: u64,
    misses: u64,
}

impl Default for MosaicCache {
    fn default() -> Self {
        Self::new(MosaicConfig::default())
    }
}

impl MosaicCache {
    pub fn new(config: MosaicConfig) -> Self {
        Self::with_limit(config, DEFAULT_CACHE_LIMIT)
    }

    /// A cache holding at most `limit` layouts (at least one).
    pub fn with_limit(config: MosaicConfig, limit: usize) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            order: VecDeque::new(),
            limit: limit.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached layout for `aspect_ratios`, computing it on first use.
    /// Empty input yields `None` and is never stored.
    pub fn get_or_compute(&mut self, aspect_ratios: &[f64]) -> Option<&MosaicLayout> {
        if aspect_ratios.is_empty() {
            return None;
        }

        let key = CacheKey::new(aspect_ratios, self.config.clamped_gap());
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let layout = compute_mosaic(aspect_ratios, &self.config)?;
            while self.entries.len() >= self.limit {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.entries.remove(&oldest);
            }
            self.order.push_back(key.clone());
            self.entries.insert(key.clone(), layout);
        }
        self.entries.get(&key)
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_galleries_hit_the_cache() {
        let mut cache = MosaicCache::new(MosaicConfig::default());
        let first = cache.get_or_compute(&[1.0, 1.5]).cloned();
        let second = cache.get_or_compute(&[1.0, 1.5]).cloned();
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn different_ratios_are_separate_entries() {
        let mut cache = MosaicCache::default();
        cache.get_or_compute(&[1.0]);
        cache.get_or_compute(&[1.0, 1.0]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn cached_layout_matches_direct_computation() {
        let config = MosaicConfig::with_gap(0.03);
        let mut cache = MosaicCache::new(config.clone());
        let ratios = [0.8, 1.2, 1.0];
        assert_eq!(
            cache.get_or_compute(&ratios),
            compute_mosaic(&ratios, &config).as_ref()
        );
    }

    #[test]
    fn limit_bounds_the_entry_count() {
        let mut cache = MosaicCache::with_limit(MosaicConfig::default(), 3);
        for i in 1..=10 {
            cache.get_or_compute(&[i as f64]);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.limit(), 3);
        assert_eq!(cache.misses(), 10);
    }

    #[test]
    fn oldest_entry_is_evicted_first() {
        let mut cache = MosaicCache::with_limit(MosaicConfig::default(), 2);
        cache.get_or_compute(&[1.0]);
        cache.get_or_compute(&[2.0]);
        cache.get_or_compute(&[3.0]);

        // 2.0 and 3.0 survive, 1.0 was evicted
        cache.get_or_compute(&[3.0]);
        cache.get_or_compute(&[2.0]);
        assert_eq!((cache.hits(), cache.misses()), (2, 3));
        cache.get_or_compute(&[1.0]);
        assert_eq!(cache.misses(), 4);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_limit_still_keeps_one_entry() {
        let mut cache = MosaicCache::with_limit(MosaicConfig::default(), 0);
        cache.get_or_compute(&[1.0]);
        cache.get_or_compute(&[1.0]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn negative_zero_gap_shares_entries_with_zero() {
        let ratios = [1.0, 2.0];
        let zero = CacheKey::new(&ratios, MosaicConfig::with_gap(0.0).clamped_gap());
        let negative = CacheKey::new(&ratios, MosaicConfig::with_gap(-0.0).clamped_gap());
        assert_eq!(zero, negative);
    }

    #[test]
    fn empty_input_is_not_cached() {
        let mut cache = MosaicCache::default();
        assert!(cache.get_or_compute(&[]).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut cache = MosaicCache::default();
        cache.get_or_compute(&[2.0]);
        cache.get_or_compute(&[2.0]);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!((cache.hits(), cache.misses()), (0, 0));
        assert_eq!(cache.config().gap, crate::layout::DEFAULT_GAP);
    }
}
