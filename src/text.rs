//! Text utilities used around the scorer: accent-folding normalization,
//! delimiter tokenization, multi-pattern search and character / word
//! statistics.

use ahash::AHashMap;
use aho_corasick::AhoCorasick;
use rayon::prelude::*;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{LexicaError, Result};

/// Character and word statistics for a text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringStats {
    pub char_count: usize,
    pub word_count: usize,
    pub unique_chars: usize,
    pub unique_words: usize,
    pub char_frequencies: AHashMap<char, usize>,
    pub word_frequencies: AHashMap<String, usize>,
}

/// NFD-decompose, drop combining marks, lowercase.
pub fn normalize_text(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Split on runs of any character in `delimiters`, dropping empty tokens.
pub fn tokenize(text: &str, delimiters: &str) -> Result<Vec<String>> {
    if delimiters.is_empty() {
        return Ok(if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        });
    }

    let class: String = delimiters
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    let pattern = Regex::new(&format!("[{class}]+"))
        .map_err(|e| LexicaError::validation(format!("bad delimiter set: {e}")))?;

    Ok(pattern
        .split(text)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

/// Find every pattern in `text` with a single Aho-Corasick pass.
///
/// Maps each pattern that occurs to the byte offsets where its matches
/// start. Matches are non-overlapping, scanned left to right; when several
/// patterns match at one position the earliest-listed pattern wins.
pub fn find_patterns<P>(text: &str, patterns: &[P]) -> Result<AHashMap<String, Vec<usize>>>
where
    P: AsRef<str>,
{
    let automaton = AhoCorasick::new(patterns.iter().map(|p| -> &str { p.as_ref() }))
        .map_err(|e| LexicaError::validation(format!("bad pattern set: {e}")))?;

    let mut matches: AHashMap<String, Vec<usize>> = AHashMap::new();
    for mat in automaton.find_iter(text) {
        let pattern = patterns[mat.pattern().as_usize()].as_ref();
        matches
            .entry(pattern.to_string())
            .or_default()
            .push(mat.start());
    }
    Ok(matches)
}

/// Character and Unicode-word statistics
pub fn string_stats(text: &str) -> StringStats {
    let mut char_frequencies: AHashMap<char, usize> = AHashMap::new();
    let mut char_count = 0;
    for c in text.chars() {
        *char_frequencies.entry(c).or_insert(0) += 1;
        char_count += 1;
    }

    let mut word_frequencies: AHashMap<String, usize> = AHashMap::new();
    let mut word_count = 0;
    for word in text.unicode_words() {
        *word_frequencies.entry(word.to_string()).or_insert(0) += 1;
        word_count += 1;
    }

    StringStats {
        char_count,
        word_count,
        unique_chars: char_frequencies.len(),
        unique_words: word_frequencies.len(),
        char_frequencies,
        word_frequencies,
    }
}

/// [`string_stats`] for many texts in parallel, input order kept
pub fn batch_string_stats<S>(texts: &[S]) -> Vec<StringStats>
where
    S: AsRef<str> + Sync,
{
    texts.par_iter().map(|t| string_stats(t.as_ref())).collect()
}
