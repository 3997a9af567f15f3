//! Caller-owned memo for parsed words.
//!
//! Parsing stays a pure function; callers that re-parse the same vocabulary
//! keep one of these next to their parser. Entries are keyed by the
//! ASCII-lowercased word and evicted least-recently-used once `capacity`
//! is reached.
//!
//! A cache belongs to one affix table. The first parser it serves binds it;
//! a later parser with a different table is rejected instead of being
//! handed results parsed under the other table.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use moka::policy::EvictionPolicy;
use moka::sync::Cache;

use crate::error::{LexicaError, Result};
use crate::morpheme::AffixTable;
use crate::parser::MorphologicalParser;
use crate::types::ParsedWord;

/// Bounded LRU cache of [`ParsedWord`]s
pub struct ParseCache {
    inner: Cache<String, ParsedWord>,
    capacity: usize,
    table: OnceLock<Arc<AffixTable>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ParseCache {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LexicaError::configuration(
                "parse cache capacity must be greater than zero",
            ));
        }

        let inner: Cache<String, ParsedWord> = Cache::builder()
            .max_capacity(capacity as u64)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(|key: Arc<String>, _value, cause| {
                tracing::trace!(word = %key, ?cause, "removed parse cache entry");
            })
            .build();

        Ok(Self {
            inner,
            capacity,
            table: OnceLock::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Return the cached parse of `word`, parsing and storing it on a miss.
    ///
    /// The returned record's `original` is always `word` itself, even when
    /// the hit was stored under a differently cased spelling. Failed parses
    /// are not cached. A parser whose affix table differs from the one this
    /// cache is bound to gets a `Configuration` error.
    pub fn get_or_parse(&self, parser: &MorphologicalParser, word: &str) -> Result<ParsedWord> {
        self.check_table(parser.table())?;

        let key = word.to_ascii_lowercase();
        if let Some(mut parsed) = self.inner.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            if parsed.original != word {
                parsed.original = word.to_string();
            }
            return Ok(parsed);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let parsed = parser.parse_word(word)?;
        self.inner.insert(key, parsed.clone());
        Ok(parsed)
    }

    fn check_table(&self, table: &Arc<AffixTable>) -> Result<()> {
        let bound = self.table.get_or_init(|| Arc::clone(table));
        if Arc::ptr_eq(bound, table) || **bound == **table {
            Ok(())
        } else {
            Err(LexicaError::configuration(
                "parse cache is bound to a different affix table",
            ))
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.inner.contains_key(&word.to_ascii_lowercase())
    }

    /// Number of live entries, after applying pending evictions.
    pub fn len(&self) -> usize {
        self.inner.run_pending_tasks();
        self.inner.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
    }
}

impl std::fmt::Debug for ParseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseCache")
            .field("capacity", &self.capacity)
            .field("entry_count", &self.inner.entry_count())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}
