//! Cognate scoring and candidate ranking.
//!
//! A comparison blends three signals computed on the ASCII-lowercased
//! words: normalized edit similarity, similarity of the consonant skeletons,
//! and the match fraction of the optimal alignment. The weighted sum is the
//! combined score; a pair is a cognate when it reaches the threshold.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rayon::prelude::*;

use crate::config::{DetectorConfig, DEFAULT_SIMILARITY_THRESHOLD};
use crate::distance::consonant_skeleton;
use crate::error::Result;
use crate::kernel::{FastKernel, SimilarityKernel};
use crate::types::{CognateScore, RankedCandidates};

/// Default `min_confidence` for candidate ranking
pub const DEFAULT_MIN_CONFIDENCE: f64 = DEFAULT_SIMILARITY_THRESHOLD;

/// Weighted multi-signal cognate detector
#[derive(Debug, Clone)]
pub struct CognateDetector<K: SimilarityKernel = FastKernel> {
    config: DetectorConfig,
    kernel: K,
}

impl CognateDetector<FastKernel> {
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_kernel(config, FastKernel)
    }

    /// Build from raw parameters; fails when the weights do not sum to 1.0.
    pub fn from_params(
        similarity_threshold: f64,
        consonant_weight: f64,
        alignment_weight: f64,
        levenshtein_weight: f64,
    ) -> Result<Self> {
        let config = DetectorConfig::from_parts(
            similarity_threshold,
            consonant_weight,
            alignment_weight,
            levenshtein_weight,
        )?;
        Ok(Self::new(config))
    }
}

impl Default for CognateDetector<FastKernel> {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl<K: SimilarityKernel> CognateDetector<K> {
    pub fn with_kernel(config: DetectorConfig, kernel: K) -> Self {
        tracing::debug!(
            kernel = kernel.name(),
            threshold = config.similarity_threshold(),
            consonant_weight = config.weights().consonant(),
            alignment_weight = config.weights().alignment(),
            levenshtein_weight = config.weights().levenshtein(),
            "built cognate detector"
        );
        Self { config, kernel }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Score one word pair.
    pub fn compare(&self, word1: &str, word2: &str) -> CognateScore {
        let lower1 = word1.to_ascii_lowercase();
        let lower2 = word2.to_ascii_lowercase();

        let similarity_score = self.kernel.similarity(&lower1, &lower2);
        let consonant_similarity = self
            .kernel
            .similarity(&consonant_skeleton(&lower1), &consonant_skeleton(&lower2));
        let alignment_score = self.kernel.align(&lower1, &lower2).score();

        let combined_score = self.config.weights().combine(
            consonant_similarity,
            alignment_score,
            similarity_score,
        );

        CognateScore {
            word1: word1.to_string(),
            word2: word2.to_string(),
            similarity_score,
            consonant_similarity,
            alignment_score,
            combined_score,
            is_cognate: combined_score >= self.config.similarity_threshold(),
        }
    }

    /// Score `target` against every candidate in parallel; output order
    /// matches `candidates`.
    pub fn compare_many<S>(&self, target: &str, candidates: &[S]) -> Vec<CognateScore>
    where
        S: AsRef<str> + Sync,
    {
        candidates
            .par_iter()
            .map(|candidate| self.compare(target, candidate.as_ref()))
            .collect()
    }

    /// Rank candidates that clear this detector's threshold.
    ///
    /// Candidates textually identical to `target` are skipped. Ordering is
    /// by combined score descending; equal scores keep input order.
    pub fn rank_candidates<S>(
        &self,
        target: &str,
        candidates: &[S],
        return_scores: bool,
    ) -> RankedCandidates
    where
        S: AsRef<str> + Sync,
    {
        let pool: Vec<&str> = candidates
            .iter()
            .map(AsRef::as_ref)
            .filter(|candidate| *candidate != target)
            .collect();

        let mut cognates: Vec<CognateScore> = self
            .compare_many(target, pool.as_slice())
            .into_iter()
            .filter(|score| score.is_cognate)
            .collect();

        // sort_by_key is stable
        cognates.sort_by_key(|score| Reverse(OrderedFloat(score.combined_score)));

        tracing::debug!(
            word = target,
            candidates = candidates.len(),
            scored = pool.len(),
            retained = cognates.len(),
            "ranked cognate candidates"
        );

        if return_scores {
            RankedCandidates::Scores(cognates)
        } else {
            RankedCandidates::Words(cognates.into_iter().map(|score| score.word2).collect())
        }
    }
}

/// Rank `candidates` against `target` with a detector whose threshold is
/// `min_confidence` and whose weights are the defaults.
pub fn rank_candidates<S>(
    target: &str,
    candidates: &[S],
    min_confidence: f64,
    return_scores: bool,
) -> Result<RankedCandidates>
where
    S: AsRef<str> + Sync,
{
    let config = DetectorConfig::default().with_threshold(min_confidence)?;
    Ok(CognateDetector::new(config).rank_candidates(target, candidates, return_scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexicaError;
    use crate::kernel::ReferenceKernel;

    fn default_detector() -> CognateDetector {
        CognateDetector::default()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_detector_defaults() {
        let detector = default_detector();
        assert_eq!(detector.config().similarity_threshold(), 0.7);
        assert_eq!(detector.config().weights().consonant(), 0.4);
        assert_eq!(detector.config().weights().alignment(), 0.3);
        assert_eq!(detector.config().weights().levenshtein(), 0.3);
    }

    #[test]
    fn test_invalid_weights() {
        let err = CognateDetector::from_params(0.7, 0.5, 0.5, 0.5).unwrap_err();
        assert!(matches!(err, LexicaError::Configuration(_)));
    }

    #[test]
    fn test_water_wasser_signals() {
        let score = default_detector().compare("water", "wasser");
        assert_eq!(score.word1, "water");
        assert_eq!(score.word2, "wasser");
        assert!(close(score.similarity_score, 2.0 / 3.0));
        assert!(close(score.consonant_similarity, 0.5));
        assert!(close(score.alignment_score, 2.0 / 3.0));
        assert!(close(score.combined_score, 0.6));
        assert!(!score.is_cognate);

        let lenient = CognateDetector::from_params(0.55, 0.4, 0.3, 0.3).unwrap();
        assert!(lenient.compare("water", "wasser").is_cognate);
    }

    #[test]
    fn test_non_cognates() {
        let detector = default_detector();
        let score = detector.compare("water", "fire");
        assert!(!score.is_cognate);
        assert!(score.combined_score < 0.7);

        let score = detector.compare("xyz", "abc");
        assert_eq!(score.combined_score, 0.0);
    }

    #[test]
    fn test_identical_words() {
        let detector = default_detector();
        for word in ["water", "a", "WaTeR"] {
            let score = detector.compare(word, word);
            assert_eq!(score.combined_score, 1.0);
            assert!(score.is_cognate);
        }
    }

    #[test]
    fn test_identical_words_with_weights_near_tolerance() {
        for levenshtein in [0.3 + 5e-10, 0.3 - 5e-10] {
            let detector = CognateDetector::from_params(1.0, 0.4, 0.3, levenshtein).unwrap();
            let score = detector.compare("water", "water");
            assert_eq!(score.combined_score, 1.0);
            assert!(score.is_cognate);

            let score = detector.compare("water", "fire");
            assert!((0.0..=1.0).contains(&score.combined_score));
        }
    }

    #[test]
    fn test_case_insensitive() {
        let detector = default_detector();
        let score = detector.compare("WaTeR", "wAtEr");
        assert_eq!(score.combined_score, 1.0);
        assert_eq!(score.word1, "WaTeR");
    }

    #[test]
    fn test_empty_pair() {
        // empty alignment contributes 0.0, the other two signals 1.0
        let score = default_detector().compare("", "");
        assert!(close(score.combined_score, 0.7));
        assert_eq!(score.alignment_score, 0.0);
    }

    #[test]
    fn test_rank_candidates_order() {
        let detector = CognateDetector::from_params(0.45, 0.4, 0.3, 0.3).unwrap();
        let candidates = ["water", "wasser", "eau", "fire", "wassir", "waters"];

        let ranked = detector.rank_candidates("water", &candidates, false);
        assert_eq!(ranked, RankedCandidates::Words(vec![
            "waters".to_string(),
            "wasser".to_string(),
            "wassir".to_string(),
        ]));

        match detector.rank_candidates("water", &candidates, true) {
            RankedCandidates::Scores(scores) => {
                assert_eq!(scores.len(), 3);
                assert!(scores
                    .windows(2)
                    .all(|w| w[0].combined_score >= w[1].combined_score));
            }
            RankedCandidates::Words(_) => panic!("expected scores"),
        }
    }

    #[test]
    fn test_rank_skips_exact_target_only() {
        let ranked = rank_candidates("water", &["water", "Water"], 0.7, false).unwrap();
        assert_eq!(ranked.words(), vec!["Water"]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let ranked = rank_candidates("abc", &["abd", "abx", "abz"], 0.1, false).unwrap();
        assert_eq!(ranked.words(), vec!["abd", "abx", "abz"]);
    }

    #[test]
    fn test_rank_invalid_confidence() {
        assert!(rank_candidates("water", &["wasser"], 1.5, true).is_err());
    }

    #[test]
    fn test_kernels_produce_identical_scores() {
        let fast = default_detector();
        let reference = CognateDetector::with_kernel(DetectorConfig::default(), ReferenceKernel);
        for (a, b) in [("water", "wasser"), ("night", "nacht"), ("Vater", "father"), ("", "x")] {
            assert_eq!(fast.compare(a, b), reference.compare(a, b));
        }
    }
}
