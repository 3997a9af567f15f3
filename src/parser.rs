//! Positional morphological parser.
//!
//! Produces [`ParsedWord`] records that carry character positions, lengths
//! and a confidence that drops by [`AFFIX_CONFIDENCE_FACTOR`] for every affix
//! found. Matching uses the same first-match-wins affix tables as
//! [`crate::morpheme::MorphemeAnalyzer`]. Records are validated as they are
//! built; a validation failure here means the parser itself is wrong.

use std::sync::Arc;

use rayon::prelude::*;

use crate::error::{LexicaError, Result};
use crate::morpheme::{Affix, AffixTable};
use crate::types::{MorphemeKind, ParsedMorpheme, ParsedWord};

/// Confidence multiplier applied once per matched affix
pub const AFFIX_CONFIDENCE_FACTOR: f64 = 0.9;

#[derive(Debug, Clone, Default)]
pub struct MorphologicalParser {
    table: Arc<AffixTable>,
}

impl MorphologicalParser {
    pub fn new(table: Arc<AffixTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<AffixTable> {
        &self.table
    }

    /// Parse a single non-empty word.
    pub fn parse_word(&self, word: &str) -> Result<ParsedWord> {
        if word.is_empty() {
            return Err(LexicaError::validation("word must be a non-empty string"));
        }

        let normalized = word.to_ascii_lowercase();
        let total_chars = normalized.chars().count();
        let mut morphemes = Vec::with_capacity(3);
        let mut confidence = 1.0;

        let prefix = self.table.match_prefix(&normalized);
        let suffix = self.table.match_suffix(&normalized);

        let mut root_start = 0;
        let mut root_start_byte = 0;
        if let Some(affix) = prefix {
            let length = affix.text.chars().count();
            morphemes.push(affix_morpheme(affix, MorphemeKind::Prefix, 0, length)?);
            root_start = length;
            root_start_byte = affix.text.len();
            confidence *= AFFIX_CONFIDENCE_FACTOR;
        }

        let mut root_end = total_chars;
        let mut root_end_byte = normalized.len();
        if let Some(affix) = suffix {
            let length = affix.text.chars().count();
            let position = total_chars - length;
            morphemes.push(affix_morpheme(affix, MorphemeKind::Suffix, position, length)?);
            root_end = position;
            root_end_byte = normalized.len() - affix.text.len();
            confidence *= AFFIX_CONFIDENCE_FACTOR;
        }

        if root_start < root_end {
            morphemes.push(ParsedMorpheme::new(
                &normalized[root_start_byte..root_end_byte],
                MorphemeKind::Root,
                root_start,
                root_end - root_start,
                None,
            )?);
        }

        morphemes.sort_by_key(|m| m.position);

        ParsedWord::new(word, normalized, morphemes, confidence)
    }

    /// Parse many words in parallel. Output order matches input; on failure
    /// the error of the earliest failing word is returned.
    pub fn batch_parse<S>(&self, words: &[S]) -> Result<Vec<ParsedWord>>
    where
        S: AsRef<str> + Sync,
    {
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let results: Vec<Result<ParsedWord>> = words
            .par_iter()
            .map(|w| self.parse_word(w.as_ref()))
            .collect();

        tracing::debug!(words = words.len(), "batch parsed words");
        results.into_iter().collect()
    }

    /// [`Self::batch_parse`] on a dedicated worker pool.
    pub fn batch_parse_in<S>(&self, pool: &rayon::ThreadPool, words: &[S]) -> Result<Vec<ParsedWord>>
    where
        S: AsRef<str> + Sync,
    {
        pool.install(|| self.batch_parse(words))
    }
}

fn affix_morpheme(
    affix: &Affix,
    kind: MorphemeKind,
    position: usize,
    length: usize,
) -> Result<ParsedMorpheme> {
    ParsedMorpheme::new(
        affix.text.as_str(),
        kind,
        position,
        length,
        Some(affix.meaning.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> MorphologicalParser {
        MorphologicalParser::default()
    }

    #[test]
    fn test_parse_full_word() {
        let parsed = parser().parse_word("Unhappiness").unwrap();
        assert_eq!(parsed.original, "Unhappiness");
        assert_eq!(parsed.normalized, "unhappiness");
        assert!((parsed.confidence - 0.81).abs() < 1e-12);

        let spans: Vec<(&str, MorphemeKind, usize, usize)> = parsed
            .morphemes
            .iter()
            .map(|m| (m.text.as_str(), m.kind, m.position, m.length))
            .collect();
        assert_eq!(
            spans,
            vec![
                ("un", MorphemeKind::Prefix, 0, 2),
                ("happi", MorphemeKind::Root, 2, 5),
                ("ness", MorphemeKind::Suffix, 7, 4),
            ]
        );
        assert_eq!(parsed.morphemes[0].meaning.as_deref(), Some("not"));
        assert_eq!(parsed.morphemes[1].meaning, None);
    }

    #[test]
    fn test_parse_plain_word() {
        let parsed = parser().parse_word("cat").unwrap();
        assert_eq!(parsed.confidence, 1.0);
        assert_eq!(parsed.morphemes.len(), 1);
        assert_eq!(parsed.morphemes[0].kind, MorphemeKind::Root);
    }

    #[test]
    fn test_parse_suffix_only_positions() {
        let parsed = parser().parse_word("walking").unwrap();
        assert_eq!(parsed.morphemes[0].text, "walk");
        assert_eq!(parsed.morphemes[1].position, 4);
        assert_eq!(parsed.morphemes[1].end(), 7);
    }

    #[test]
    fn test_parse_empty_word() {
        let err = parser().parse_word("").unwrap_err();
        assert!(matches!(err, LexicaError::Validation(_)));
    }

    #[test]
    fn test_non_ascii_positions_are_characters() {
        let parsed = parser().parse_word("rebâtiment").unwrap();
        let root = parsed.morpheme(MorphemeKind::Root).unwrap();
        assert_eq!(root.text, "bâti");
        assert_eq!(root.position, 2);
        assert_eq!(root.length, 4);
        let suffix = parsed.morpheme(MorphemeKind::Suffix).unwrap();
        assert_eq!(suffix.position, 6);
    }

    #[test]
    fn test_batch_parse_preserves_order() {
        let words = ["rebuild", "cat", "unhappiness", "walking"];
        let parsed = parser().batch_parse(&words).unwrap();
        let originals: Vec<&str> = parsed.iter().map(|p| p.original.as_str()).collect();
        assert_eq!(originals, words);
    }

    #[test]
    fn test_batch_parse_reports_failure() {
        assert!(parser().batch_parse(&["cat", ""]).is_err());
        assert!(parser().batch_parse::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_batch_parse_in_pool() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let parsed = parser().batch_parse_in(&pool, &["redo", "undo"]).unwrap();
        assert_eq!(parsed.len(), 2);
    }
}
