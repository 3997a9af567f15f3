//! String distance and alignment primitives.
//!
//! Free functions here use [`FastKernel`]; code that needs a specific
//! kernel goes through [`SimilarityKernel`] directly.

use crate::kernel::{FastKernel, SimilarityKernel};
use crate::types::Alignment;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Unit-cost Levenshtein distance in characters
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    FastKernel.distance(a, b)
}

/// Normalized similarity in [0, 1]; 1.0 when both strings are empty
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    FastKernel.similarity(a, b)
}

/// Drop the vowels a, e, i, o, u (either case), keeping order.
pub fn consonant_skeleton(s: &str) -> String {
    s.chars()
        .filter(|c| !VOWELS.contains(&c.to_ascii_lowercase()))
        .collect()
}

/// Global alignment with traceback
pub fn align(a: &str, b: &str) -> Alignment {
    FastKernel.align(a, b)
}

/// Fraction of exactly matching alignment columns
pub fn alignment_score(a: &str, b: &str) -> f64 {
    align(a, b).score()
}
