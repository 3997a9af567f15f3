//! Boundary facade used by the API and ingestion layers.
//!
//! Bundles a detector, an analyzer and a parser built from one
//! [`EngineConfig`], and runs batch calls on the configured worker pool.

use std::sync::Arc;

use ahash::AHashMap;

use crate::cache::ParseCache;
use crate::cognate::CognateDetector;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::morpheme::{AffixTable, MorphemeAnalyzer};
use crate::parser::MorphologicalParser;
use crate::types::{CognateScore, FrequencyIndex, Morpheme, ParsedWord, RankedCandidates};

pub struct LexicaEngine {
    detector: CognateDetector,
    analyzer: MorphemeAnalyzer,
    parser: MorphologicalParser,
    pool: Option<rayon::ThreadPool>,
    parse_cache_capacity: usize,
}

impl LexicaEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_table(config, Arc::new(AffixTable::english()))
    }

    pub fn with_table(config: EngineConfig, table: Arc<AffixTable>) -> Result<Self> {
        config.validate()?;
        let pool = config.build_thread_pool()?;
        tracing::debug!(
            worker_threads = ?config.worker_threads,
            parse_cache_capacity = config.parse_cache_capacity,
            "built lexica engine"
        );
        Ok(Self {
            detector: CognateDetector::new(config.detector),
            analyzer: MorphemeAnalyzer::new(Arc::clone(&table)),
            parser: MorphologicalParser::new(table),
            pool,
            parse_cache_capacity: config.parse_cache_capacity,
        })
    }

    pub fn detector(&self) -> &CognateDetector {
        &self.detector
    }

    pub fn analyzer(&self) -> &MorphemeAnalyzer {
        &self.analyzer
    }

    pub fn parser(&self) -> &MorphologicalParser {
        &self.parser
    }

    fn install<R, F>(&self, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }

    pub fn compare(&self, word1: &str, word2: &str) -> CognateScore {
        self.detector.compare(word1, word2)
    }

    /// Rank with the engine's weights and `min_confidence` as threshold.
    pub fn rank_candidates<S>(
        &self,
        target: &str,
        candidates: &[S],
        min_confidence: f64,
        return_scores: bool,
    ) -> Result<RankedCandidates>
    where
        S: AsRef<str> + Sync,
    {
        let config = self.detector.config().with_threshold(min_confidence)?;
        let detector = CognateDetector::new(config);
        Ok(self.install(|| detector.rank_candidates(target, candidates, return_scores)))
    }

    pub fn segment(&self, word: &str) -> Vec<Morpheme> {
        self.analyzer.segment(word)
    }

    pub fn frequency<S>(&self, words: &[S]) -> FrequencyIndex
    where
        S: AsRef<str> + Sync,
    {
        self.install(|| self.analyzer.frequency(words))
    }

    pub fn related<S>(&self, target: &str, words: &[S]) -> AHashMap<String, Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        self.install(|| self.analyzer.related(target, words))
    }

    pub fn parse_word(&self, word: &str) -> Result<ParsedWord> {
        self.parser.parse_word(word)
    }

    pub fn batch_parse<S>(&self, words: &[S]) -> Result<Vec<ParsedWord>>
    where
        S: AsRef<str> + Sync,
    {
        self.install(|| self.parser.batch_parse(words))
    }

    /// A fresh cache sized from the engine configuration.
    pub fn new_parse_cache(&self) -> Result<ParseCache> {
        ParseCache::new(self.parse_cache_capacity)
    }
}
