//! Affix-table morpheme analysis.
//!
//! A word is split into at most one prefix, a root and at most one suffix.
//! Affix tables are ordered lists and the first key that matches wins, so
//! declaration order decides between competing affixes (`"reundoing"` takes
//! `re`, never `un`). No longest-match rule is applied; this mirrors the
//! behaviour existing callers depend on, even where a later, longer affix
//! would be the better linguistic split.

use std::sync::Arc;

use ahash::AHashMap;
use rayon::prelude::*;

use crate::error::{LexicaError, Result};
use crate::types::{FrequencyIndex, Morpheme};

const ENGLISH_PREFIXES: &[(&str, &str)] = &[
    ("un", "not"),
    ("re", "again"),
    ("dis", "not, opposite of"),
    ("pre", "before"),
    ("post", "after"),
    ("anti", "against"),
    ("sub", "under"),
    ("inter", "between"),
    ("trans", "across"),
    ("super", "above"),
];

const ENGLISH_SUFFIXES: &[(&str, &str)] = &[
    ("ing", "continuous action"),
    ("ed", "past tense"),
    ("ly", "in a manner of"),
    ("tion", "act or process"),
    ("ment", "state of"),
    ("ness", "state of being"),
    ("able", "capable of"),
    ("ible", "capable of"),
    ("ful", "full of"),
    ("less", "without"),
];

/// An affix key with its gloss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affix {
    pub text: String,
    pub meaning: String,
}

/// Ordered prefix and suffix tables. Keys are lowercase and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixTable {
    prefixes: Vec<Affix>,
    suffixes: Vec<Affix>,
}

impl AffixTable {
    pub fn new<P, S>(prefixes: P, suffixes: S) -> Result<Self>
    where
        P: IntoIterator<Item = (String, String)>,
        S: IntoIterator<Item = (String, String)>,
    {
        Ok(Self {
            prefixes: Self::build("prefix", prefixes)?,
            suffixes: Self::build("suffix", suffixes)?,
        })
    }

    /// The built-in English table.
    pub fn english() -> Self {
        let to_affixes = |entries: &[(&str, &str)]| {
            entries
                .iter()
                .map(|(text, meaning)| Affix {
                    text: text.to_string(),
                    meaning: meaning.to_string(),
                })
                .collect()
        };
        Self {
            prefixes: to_affixes(ENGLISH_PREFIXES),
            suffixes: to_affixes(ENGLISH_SUFFIXES),
        }
    }

    fn build<I>(label: &str, entries: I) -> Result<Vec<Affix>>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        entries
            .into_iter()
            .map(|(text, meaning)| {
                if text.is_empty() {
                    return Err(LexicaError::configuration(format!(
                        "{label} table contains an empty key"
                    )));
                }
                Ok(Affix {
                    text: text.to_ascii_lowercase(),
                    meaning,
                })
            })
            .collect()
    }

    pub fn prefixes(&self) -> &[Affix] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[Affix] {
        &self.suffixes
    }

    /// First prefix, in declaration order, that starts `lowered`.
    pub fn match_prefix(&self, lowered: &str) -> Option<&Affix> {
        self.prefixes.iter().find(|a| lowered.starts_with(&a.text))
    }

    /// First suffix, in declaration order, that ends `lowered`.
    pub fn match_suffix(&self, lowered: &str) -> Option<&Affix> {
        self.suffixes.iter().find(|a| lowered.ends_with(&a.text))
    }

    /// Gloss for an affix text, prefixes first.
    pub fn meaning_of(&self, text: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .chain(&self.suffixes)
            .find(|a| a.text == text)
            .map(|a| a.meaning.as_str())
    }
}

impl Default for AffixTable {
    fn default() -> Self {
        Self::english()
    }
}

/// Prefix / root / suffix segmentation over a shared affix table
#[derive(Debug, Clone, Default)]
pub struct MorphemeAnalyzer {
    table: Arc<AffixTable>,
}

impl MorphemeAnalyzer {
    pub fn new(table: Arc<AffixTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<AffixTable> {
        &self.table
    }

    pub fn find_prefix(&self, word: &str) -> Option<Morpheme> {
        self.table
            .match_prefix(&word.to_ascii_lowercase())
            .map(|a| Morpheme::prefix(a.text.as_str(), a.meaning.as_str()))
    }

    pub fn find_suffix(&self, word: &str) -> Option<Morpheme> {
        self.table
            .match_suffix(&word.to_ascii_lowercase())
            .map(|a| Morpheme::suffix(a.text.as_str(), a.meaning.as_str()))
    }

    /// Split `word` into morphemes in positional order.
    ///
    /// The root keeps the caller's casing and is dropped when empty, which
    /// happens when the prefix and suffix cover (or overlap across) the
    /// whole word.
    pub fn segment(&self, word: &str) -> Vec<Morpheme> {
        let lowered = word.to_ascii_lowercase();
        let prefix = self.table.match_prefix(&lowered);
        let suffix = self.table.match_suffix(&lowered);

        // ASCII lowercasing keeps byte offsets, so spans on `lowered` are
        // char boundaries in `word` too.
        let start = prefix.map_or(0, |a| a.text.len());
        let end = suffix.map_or(word.len(), |a| word.len() - a.text.len());

        let mut morphemes = Vec::with_capacity(3);
        if let Some(a) = prefix {
            morphemes.push(Morpheme::prefix(a.text.as_str(), a.meaning.as_str()));
        }
        if start < end {
            morphemes.push(Morpheme::root(&word[start..end]));
        }
        if let Some(a) = suffix {
            morphemes.push(Morpheme::suffix(a.text.as_str(), a.meaning.as_str()));
        }
        morphemes
    }

    /// Segment many words in parallel; output order matches input.
    pub fn segment_many<S>(&self, words: &[S]) -> Vec<Vec<Morpheme>>
    where
        S: AsRef<str> + Sync,
    {
        words.par_iter().map(|w| self.segment(w.as_ref())).collect()
    }

    /// Count (kind, text) occurrences across all words. Duplicates count.
    pub fn frequency<S>(&self, words: &[S]) -> FrequencyIndex
    where
        S: AsRef<str> + Sync,
    {
        words
            .par_iter()
            .fold(FrequencyIndex::new, |mut index, word| {
                for morpheme in self.segment(word.as_ref()) {
                    index.record(&morpheme);
                }
                index
            })
            .reduce(FrequencyIndex::new, |mut a, b| {
                a.merge(b);
                a
            })
    }

    /// Group words sharing a morpheme (same text and kind) with `target`.
    ///
    /// Keys are the target's morpheme texts; each bucket keeps the input
    /// order of `words` and lists a given occurrence at most once. Words
    /// textually equal to `target` are skipped.
    pub fn related<S>(&self, target: &str, words: &[S]) -> AHashMap<String, Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        let target_morphemes = self.segment(target);
        let segmented: Vec<(&str, Vec<Morpheme>)> = words
            .par_iter()
            .map(|w| AsRef::<str>::as_ref(w))
            .filter(|w| *w != target)
            .map(|w| (w, self.segment(w)))
            .collect();

        let mut related: AHashMap<String, Vec<String>> = AHashMap::new();
        for (word, morphemes) in segmented {
            let mut filled: Vec<&str> = Vec::new();
            for t in &target_morphemes {
                if filled.contains(&t.text.as_str()) {
                    continue;
                }
                if morphemes.iter().any(|m| m.text == t.text && m.kind == t.kind) {
                    related
                        .entry(t.text.clone())
                        .or_default()
                        .push(word.to_string());
                    filled.push(t.text.as_str());
                }
            }
        }

        tracing::trace!(
            word = target,
            buckets = related.len(),
            "collected related words"
        );
        related
    }
}
