//! Shared data structures for the lexical kernel.

use std::fmt;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{LexicaError, Result};

/// Gap sentinel used in aligned strings
pub const GAP: char = '-';

/// Scores from a single word-pair comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognateScore {
    pub word1: String,
    pub word2: String,
    pub similarity_score: f64,
    pub consonant_similarity: f64,
    pub alignment_score: f64,
    pub combined_score: f64,
    pub is_cognate: bool,
}

/// Output of candidate ranking: full scores or just the candidate words
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RankedCandidates {
    Scores(Vec<CognateScore>),
    Words(Vec<String>),
}

impl RankedCandidates {
    pub fn len(&self) -> usize {
        match self {
            RankedCandidates::Scores(s) => s.len(),
            RankedCandidates::Words(w) => w.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidate words in ranked order, regardless of variant.
    pub fn words(&self) -> Vec<&str> {
        match self {
            RankedCandidates::Scores(s) => s.iter().map(|s| s.word2.as_str()).collect(),
            RankedCandidates::Words(w) => w.iter().map(String::as_str).collect(),
        }
    }
}

/// Edit operation in sequence alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOp {
    Match,
    Substitute,
    /// Gap in the first sequence
    Insert,
    /// Gap in the second sequence
    Delete,
}

/// Result of a global alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub aligned_a: String,
    pub aligned_b: String,
    /// `true` where both columns hold the same character
    pub mask: Vec<bool>,
    pub operations: Vec<EditOp>,
    /// Unit-cost edit distance of the alignment
    pub cost: usize,
}

impl Alignment {
    pub fn empty() -> Self {
        Self {
            aligned_a: String::new(),
            aligned_b: String::new(),
            mask: Vec::new(),
            operations: Vec::new(),
            cost: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Fraction of exactly matching columns; 0.0 for an empty alignment.
    pub fn score(&self) -> f64 {
        if self.mask.is_empty() {
            return 0.0;
        }
        let matches = self.mask.iter().filter(|&&m| m).count();
        matches as f64 / self.mask.len() as f64
    }
}

/// Position of a morpheme within a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphemeKind {
    Prefix,
    Root,
    Suffix,
}

impl MorphemeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MorphemeKind::Prefix => "prefix",
            MorphemeKind::Root => "root",
            MorphemeKind::Suffix => "suffix",
        }
    }
}

impl fmt::Display for MorphemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single morpheme in a segmentation. Roots never carry a meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Morpheme {
    pub text: String,
    pub kind: MorphemeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl Morpheme {
    pub fn prefix(text: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MorphemeKind::Prefix,
            meaning: Some(meaning.into()),
        }
    }

    pub fn root(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MorphemeKind::Root,
            meaning: None,
        }
    }

    pub fn suffix(text: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MorphemeKind::Suffix,
            meaning: Some(meaning.into()),
        }
    }
}

/// Occurrence counts: kind -> (morpheme text -> count)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyIndex {
    counts: AHashMap<MorphemeKind, AHashMap<String, usize>>,
}

impl FrequencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, morpheme: &Morpheme) {
        *self
            .counts
            .entry(morpheme.kind)
            .or_default()
            .entry(morpheme.text.clone())
            .or_insert(0) += 1;
    }

    /// Fold another index's counts into this one.
    pub fn merge(&mut self, other: FrequencyIndex) {
        for (kind, texts) in other.counts {
            let slot = self.counts.entry(kind).or_default();
            for (text, count) in texts {
                *slot.entry(text).or_insert(0) += count;
            }
        }
    }

    /// Count for a (kind, text) pair; 0 when never seen.
    pub fn count(&self, kind: MorphemeKind, text: &str) -> usize {
        self.counts
            .get(&kind)
            .and_then(|m| m.get(text))
            .copied()
            .unwrap_or(0)
    }

    pub fn kind(&self, kind: MorphemeKind) -> Option<&AHashMap<String, usize>> {
        self.counts.get(&kind)
    }

    /// Number of distinct morpheme texts seen for `kind`
    pub fn distinct(&self, kind: MorphemeKind) -> usize {
        self.counts.get(&kind).map_or(0, |m| m.len())
    }

    pub fn total(&self) -> usize {
        self.counts.values().flat_map(|m| m.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Morpheme with its character position inside the normalized word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMorpheme {
    pub text: String,
    pub kind: MorphemeKind,
    pub position: usize,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl ParsedMorpheme {
    /// Build a morpheme record, rejecting inconsistent spans.
    pub fn new(
        text: impl Into<String>,
        kind: MorphemeKind,
        position: usize,
        length: usize,
        meaning: Option<String>,
    ) -> Result<Self> {
        let text = text.into();
        if length == 0 {
            return Err(LexicaError::validation(format!(
                "{kind} at position {position} has zero length"
            )));
        }
        let actual = text.chars().count();
        if actual != length {
            return Err(LexicaError::validation(format!(
                "{kind} '{text}' has {actual} characters but declares length {length}"
            )));
        }
        Ok(Self {
            text,
            kind,
            position,
            length,
            meaning,
        })
    }

    pub fn end(&self) -> usize {
        self.position + self.length
    }
}

/// Positional analysis of a single word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedWord {
    pub original: String,
    pub normalized: String,
    pub morphemes: Vec<ParsedMorpheme>,
    pub confidence: f64,
}

impl ParsedWord {
    pub fn new(
        original: impl Into<String>,
        normalized: impl Into<String>,
        morphemes: Vec<ParsedMorpheme>,
        confidence: f64,
    ) -> Result<Self> {
        let original = original.into();
        let normalized = normalized.into();
        if original.is_empty() {
            return Err(LexicaError::validation("original word cannot be empty"));
        }
        if normalized.is_empty() {
            return Err(LexicaError::validation("normalized word cannot be empty"));
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(LexicaError::validation(format!(
                "confidence must lie in [0, 1], got {confidence}"
            )));
        }
        Ok(Self {
            original,
            normalized,
            morphemes,
            confidence,
        })
    }

    pub fn morpheme(&self, kind: MorphemeKind) -> Option<&ParsedMorpheme> {
        self.morphemes.iter().find(|m| m.kind == kind)
    }
}
