//! Validated configuration for the cognate detector and the engine facade.
//!
//! Weights are checked when a config is built (or deserialized), so a
//! `DetectorConfig` in hand always satisfies the sum-to-one invariant.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexicaError, Result};

/// Tolerance used when checking that the signal weights sum to 1.0
pub const WEIGHT_EPSILON: f64 = 1e-9;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_CONSONANT_WEIGHT: f64 = 0.4;
pub const DEFAULT_ALIGNMENT_WEIGHT: f64 = 0.3;
pub const DEFAULT_LEVENSHTEIN_WEIGHT: f64 = 0.3;
pub const DEFAULT_PARSE_CACHE_CAPACITY: usize = 1024;

/// Weights of the three similarity signals, summing to 1.0 within
/// [`WEIGHT_EPSILON`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    consonant: f64,
    alignment: f64,
    levenshtein: f64,
    /// `consonant + alignment + levenshtein`, summed in that order
    #[serde(skip)]
    total: f64,
}

impl ScoreWeights {
    pub fn new(consonant: f64, alignment: f64, levenshtein: f64) -> Result<Self> {
        for (name, w) in [
            ("consonant_weight", consonant),
            ("alignment_weight", alignment),
            ("levenshtein_weight", levenshtein),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(LexicaError::configuration(format!(
                    "{name} must be a finite non-negative number, got {w}"
                )));
            }
        }

        let sum = consonant + alignment + levenshtein;
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(LexicaError::configuration(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }

        Ok(Self {
            consonant,
            alignment,
            levenshtein,
            total: sum,
        })
    }

    /// Weighted mean of the three signals.
    ///
    /// The numerator is summed in the same order as `total`, so signals in
    /// [0, 1] give a result in [0, 1] and three 1.0 signals give exactly 1.0,
    /// even when the weights are off from 1.0 by less than the tolerance.
    pub fn combine(&self, consonant: f64, alignment: f64, levenshtein: f64) -> f64 {
        let weighted =
            self.consonant * consonant + self.alignment * alignment + self.levenshtein * levenshtein;
        weighted / self.total
    }

    pub fn consonant(&self) -> f64 {
        self.consonant
    }

    pub fn alignment(&self) -> f64 {
        self.alignment
    }

    pub fn levenshtein(&self) -> f64 {
        self.levenshtein
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            consonant: DEFAULT_CONSONANT_WEIGHT,
            alignment: DEFAULT_ALIGNMENT_WEIGHT,
            levenshtein: DEFAULT_LEVENSHTEIN_WEIGHT,
            total: DEFAULT_CONSONANT_WEIGHT + DEFAULT_ALIGNMENT_WEIGHT + DEFAULT_LEVENSHTEIN_WEIGHT,
        }
    }
}

/// Flat on-disk shape of a detector config; every field is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDetectorConfig {
    similarity_threshold: f64,
    consonant_weight: f64,
    alignment_weight: f64,
    levenshtein_weight: f64,
}

impl Default for RawDetectorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            consonant_weight: DEFAULT_CONSONANT_WEIGHT,
            alignment_weight: DEFAULT_ALIGNMENT_WEIGHT,
            levenshtein_weight: DEFAULT_LEVENSHTEIN_WEIGHT,
        }
    }
}

impl TryFrom<RawDetectorConfig> for DetectorConfig {
    type Error = LexicaError;

    fn try_from(raw: RawDetectorConfig) -> Result<Self> {
        let weights = ScoreWeights::new(
            raw.consonant_weight,
            raw.alignment_weight,
            raw.levenshtein_weight,
        )?;
        DetectorConfig::new(raw.similarity_threshold, weights)
    }
}

/// Cognate detector configuration
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawDetectorConfig")]
pub struct DetectorConfig {
    similarity_threshold: f64,
    weights: ScoreWeights,
}

impl DetectorConfig {
    pub fn new(similarity_threshold: f64, weights: ScoreWeights) -> Result<Self> {
        if !(0.0..=1.0).contains(&similarity_threshold) {
            return Err(LexicaError::configuration(format!(
                "similarity_threshold must lie in [0, 1], got {similarity_threshold}"
            )));
        }
        Ok(Self {
            similarity_threshold,
            weights,
        })
    }

    /// Build from the four raw parameters in one step.
    pub fn from_parts(
        similarity_threshold: f64,
        consonant_weight: f64,
        alignment_weight: f64,
        levenshtein_weight: f64,
    ) -> Result<Self> {
        let weights = ScoreWeights::new(consonant_weight, alignment_weight, levenshtein_weight)?;
        Self::new(similarity_threshold, weights)
    }

    /// Same weights, different threshold.
    pub fn with_threshold(&self, similarity_threshold: f64) -> Result<Self> {
        Self::new(similarity_threshold, self.weights)
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            weights: ScoreWeights::default(),
        }
    }
}

/// Top-level configuration for [`crate::engine::LexicaEngine`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub detector: DetectorConfig,
    pub parse_cache_capacity: usize,
    /// Size of a dedicated worker pool for batch calls. `None` uses the
    /// global rayon pool.
    pub worker_threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            parse_cache_capacity: DEFAULT_PARSE_CACHE_CAPACITY,
            worker_threads: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            threshold = config.detector.similarity_threshold(),
            cache_capacity = config.parse_cache_capacity,
            "loaded engine configuration"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.parse_cache_capacity == 0 {
            return Err(LexicaError::configuration(
                "parse_cache_capacity must be greater than zero",
            ));
        }
        if self.worker_threads == Some(0) {
            return Err(LexicaError::configuration(
                "worker_threads must be greater than zero when set",
            ));
        }
        Ok(())
    }

    /// Build the dedicated worker pool, if one is configured.
    pub fn build_thread_pool(&self) -> Result<Option<rayon::ThreadPool>> {
        match self.worker_threads {
            None => Ok(None),
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .thread_name(|i| format!("lexica-worker-{i}"))
                .build()
                .map(Some)
                .map_err(|e| LexicaError::configuration(format!("thread pool: {e}"))),
        }
    }
}
