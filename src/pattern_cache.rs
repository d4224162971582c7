/// Pattern cache module for reusing parsed patterns
///
/// Case lists are usually static text evaluated against many subjects, so the
/// same pattern string is parsed over and over. This cache keeps the parsed,
/// immutable [`Pattern`] behind an `Arc` and hands out clones of the handle.
///
/// # Architecture
///
/// Cache Key: (trimmed pattern text, marker, max depth)
/// Cache Value: `Arc<Pattern>`
///
/// Parse errors are never cached.
///
/// # Configuration
///
/// Environment variables:
/// - `SHAPEMATCH_PATTERN_CACHE_ENABLED` (default: true)
/// - `SHAPEMATCH_PATTERN_CACHE_MAX_ENTRIES` (default: 1000)
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::{ConfigError, MatchConfig};
use crate::pattern_parser::{ParserConfig, Pattern, PatternParser, PatternSyntaxError};

/// Key for cache lookup
///
/// Parser settings are part of the key: the same text can parse differently
/// (or not at all) under another marker or nesting limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternCacheKey {
    /// Pattern text with surrounding whitespace removed
    pub text: String,
    pub marker: String,
    pub max_depth: usize,
}

impl PatternCacheKey {
    pub fn new(text: &str, config: &ParserConfig) -> Self {
        PatternCacheKey {
            text: text.trim().to_string(),
            marker: config.marker.clone(),
            max_depth: config.max_depth,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    pattern: Arc<Pattern>,
    /// Logical clock value of the last access (for LRU)
    last_accessed: u64,
    access_count: u64,
}

/// Configuration for pattern cache
#[derive(Debug, Clone)]
pub struct PatternCacheConfig {
    /// Enable or disable caching
    pub enabled: bool,
    /// Maximum number of entries (LRU eviction)
    pub max_entries: usize,
}

impl Default for PatternCacheConfig {
    fn default() -> Self {
        PatternCacheConfig {
            enabled: true,
            max_entries: 1000,
        }
    }
}

impl PatternCacheConfig {
    /// Load configuration from environment variables
    ///
    /// Reads the same variables as [`MatchConfig::from_env`] and fails on the
    /// same unparsable or out-of-range values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(MatchConfig::from_env()?.cache_config())
    }
}

/// Parsed-pattern cache with LRU eviction
pub struct PatternCache {
    cache: Mutex<HashMap<PatternCacheKey, CacheEntry>>,
    config: PatternCacheConfig,
    clock: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl PatternCache {
    pub fn new(config: PatternCacheConfig) -> Self {
        PatternCache {
            cache: Mutex::new(HashMap::new()),
            config,
            clock: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(PatternCacheConfig::default())
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(PatternCacheConfig::from_env()?))
    }

    // Entries are immutable once inserted, so a poisoned lock still holds valid data
    fn lock(&self) -> MutexGuard<'_, HashMap<PatternCacheKey, CacheEntry>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Get a parsed pattern from cache
    pub fn get(&self, key: &PatternCacheKey) -> Option<Arc<Pattern>> {
        if !self.config.enabled {
            return None;
        }

        let now = self.tick();
        let mut cache = self.lock();
        if let Some(entry) = cache.get_mut(key) {
            entry.last_accessed = now;
            entry.access_count += 1;
            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(Arc::clone(&entry.pattern))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    /// Insert a parsed pattern
    ///
    /// May trigger LRU eviction if cache is full
    pub fn insert(&self, key: PatternCacheKey, pattern: Arc<Pattern>) {
        if !self.config.enabled || self.config.max_entries == 0 {
            return;
        }

        let entry = CacheEntry {
            pattern,
            last_accessed: self.tick(),
            access_count: 0,
        };

        let mut cache = self.lock();
        if !cache.contains_key(&key) && cache.len() >= self.config.max_entries {
            self.evict_lru(&mut cache);
        }
        cache.insert(key, entry);
    }

    /// Return the cached pattern for `text`, parsing and caching it on a miss.
    pub fn get_or_parse(
        &self,
        text: &str,
        parser: &PatternParser,
    ) -> Result<Arc<Pattern>, PatternSyntaxError> {
        let key = PatternCacheKey::new(text, parser.config());
        if let Some(pattern) = self.get(&key) {
            log::trace!("Pattern cache HIT: {}", key.text);
            return Ok(pattern);
        }

        log::trace!("Pattern cache MISS: {}", key.text);
        let pattern = Arc::new(parser.parse(text)?);
        self.insert(key, Arc::clone(&pattern));
        Ok(pattern)
    }

    fn evict_lru(&self, cache: &mut HashMap<PatternCacheKey, CacheEntry>) {
        if let Some((key, _)) = cache.iter().min_by_key(|(_, entry)| entry.last_accessed) {
            let key = key.clone();
            cache.remove(&key);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn metrics(&self) -> CacheMetrics {
        let cache = self.lock();
        CacheMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            size: cache.len(),
            max_entries: self.config.max_entries,
        }
    }
}

/// Cache metrics for monitoring
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub size: usize,
    pub max_entries: usize,
}

impl CacheMetrics {
    /// Calculate cache hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
