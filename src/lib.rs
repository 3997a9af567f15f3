//! LexicaForge core: lexical similarity and morphological decomposition.
//!
//! Provides:
//! - Edit-distance and alignment primitives over two interchangeable kernels
//! - Weighted cognate scoring and candidate ranking
//! - Affix-table morpheme segmentation with frequency / relatedness queries
//! - A positional parser with a caller-owned LRU cache
//! - Optional Python bindings (feature `python`)

pub mod cache;
pub mod cognate;
pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod kernel;
pub mod morpheme;
pub mod parser;
pub mod text;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use cache::ParseCache;
pub use cognate::{rank_candidates, CognateDetector, DEFAULT_MIN_CONFIDENCE};
pub use config::{DetectorConfig, EngineConfig, ScoreWeights};
pub use distance::{align, consonant_skeleton, levenshtein_distance, normalized_similarity};
pub use engine::LexicaEngine;
pub use error::{LexicaError, Result};
pub use kernel::{FastKernel, ReferenceKernel, SimilarityKernel};
pub use morpheme::{AffixTable, MorphemeAnalyzer};
pub use parser::MorphologicalParser;
pub use types::{
    Alignment, CognateScore, EditOp, FrequencyIndex, Morpheme, MorphemeKind, ParsedMorpheme,
    ParsedWord, RankedCandidates,
};
