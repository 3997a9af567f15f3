//! Python bindings via PyO3 (feature `python`).

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cognate::{self, CognateDetector};
use crate::distance;
use crate::error::LexicaError;
use crate::morpheme::MorphemeAnalyzer;
use crate::parser::MorphologicalParser;
use crate::text::{self, StringStats};
use crate::types::{CognateScore, Morpheme, MorphemeKind, ParsedWord, RankedCandidates};

impl From<LexicaError> for PyErr {
    fn from(err: LexicaError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

// ============================================================================
// DISTANCE FUNCTIONS
// ============================================================================

#[pyfunction]
fn levenshtein_distance(a: &str, b: &str) -> usize {
    distance::levenshtein_distance(a, b)
}

#[pyfunction]
fn normalized_similarity(a: &str, b: &str) -> f64 {
    distance::normalized_similarity(a, b)
}

#[pyfunction]
fn consonant_skeleton(word: &str) -> String {
    distance::consonant_skeleton(word)
}

#[pyfunction]
fn align_sequences(a: &str, b: &str) -> (String, String, Vec<bool>) {
    let alignment = distance::align(a, b);
    (alignment.aligned_a, alignment.aligned_b, alignment.mask)
}

// ============================================================================
// COGNATE FUNCTIONS
// ============================================================================

#[pyfunction]
#[pyo3(signature = (
    word1,
    word2,
    similarity_threshold = 0.7,
    consonant_weight = 0.4,
    alignment_weight = 0.3,
    levenshtein_weight = 0.3
))]
fn compare(
    word1: &str,
    word2: &str,
    similarity_threshold: f64,
    consonant_weight: f64,
    alignment_weight: f64,
    levenshtein_weight: f64,
) -> PyResult<PyCognateScore> {
    let detector = CognateDetector::from_params(
        similarity_threshold,
        consonant_weight,
        alignment_weight,
        levenshtein_weight,
    )?;
    Ok(PyCognateScore::from(detector.compare(word1, word2)))
}

#[pyfunction]
#[pyo3(signature = (target, candidates, min_confidence = 0.7, return_scores = false))]
fn rank_candidates(
    py: Python<'_>,
    target: &str,
    candidates: Vec<String>,
    min_confidence: f64,
    return_scores: bool,
) -> PyResult<PyObject> {
    let ranked = py.allow_threads(|| {
        cognate::rank_candidates(target, &candidates, min_confidence, return_scores)
    })?;
    Ok(match ranked {
        RankedCandidates::Scores(scores) => scores
            .into_iter()
            .map(PyCognateScore::from)
            .collect::<Vec<_>>()
            .into_py(py),
        RankedCandidates::Words(words) => words.into_py(py),
    })
}

// ============================================================================
// MORPHEME FUNCTIONS
// ============================================================================

#[pyfunction]
fn segment(word: &str) -> Vec<PyMorpheme> {
    MorphemeAnalyzer::default()
        .segment(word)
        .into_iter()
        .map(PyMorpheme::from)
        .collect()
}

#[pyfunction]
fn morpheme_frequency(words: Vec<String>) -> HashMap<String, HashMap<String, usize>> {
    let index = MorphemeAnalyzer::default().frequency(&words);
    let mut out = HashMap::new();
    for kind in [MorphemeKind::Prefix, MorphemeKind::Root, MorphemeKind::Suffix] {
        if let Some(counts) = index.kind(kind) {
            let counts: HashMap<String, usize> =
                counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
            out.insert(kind.to_string(), counts);
        }
    }
    out
}

#[pyfunction]
fn find_related_words(target: &str, words: Vec<String>) -> HashMap<String, Vec<String>> {
    MorphemeAnalyzer::default()
        .related(target, &words)
        .into_iter()
        .collect()
}

#[pyfunction]
fn parse_words(py: Python<'_>, words: Vec<String>) -> PyResult<Vec<PyParsedWord>> {
    let parsed = py.allow_threads(|| MorphologicalParser::default().batch_parse(&words))?;
    Ok(parsed.into_iter().map(PyParsedWord::from).collect())
}

// ============================================================================
// TEXT FUNCTIONS
// ============================================================================

#[pyfunction]
fn normalize_string(s: &str) -> String {
    text::normalize_text(s)
}

#[pyfunction]
fn tokenize(text: &str, delimiters: &str) -> PyResult<Vec<String>> {
    Ok(text::tokenize(text, delimiters)?)
}

#[pyfunction]
fn find_patterns(text: &str, patterns: Vec<String>) -> PyResult<HashMap<String, Vec<usize>>> {
    Ok(text::find_patterns(text, &patterns)?.into_iter().collect())
}

#[pyfunction]
fn calculate_string_stats(text: &str) -> PyStringStats {
    PyStringStats::from(text::string_stats(text))
}

#[pyfunction]
fn process_text_batch(py: Python<'_>, texts: Vec<String>) -> Vec<PyStringStats> {
    py.allow_threads(|| text::batch_string_stats(&texts))
        .into_iter()
        .map(PyStringStats::from)
        .collect()
}

// ============================================================================
// PYTHON WRAPPER TYPES
// ============================================================================

#[pyclass]
struct PyCognateScore {
    #[pyo3(get)]
    word1: String,
    #[pyo3(get)]
    word2: String,
    #[pyo3(get)]
    similarity_score: f64,
    #[pyo3(get)]
    consonant_similarity: f64,
    #[pyo3(get)]
    alignment_score: f64,
    #[pyo3(get)]
    combined_score: f64,
    #[pyo3(get)]
    is_cognate: bool,
}

impl From<CognateScore> for PyCognateScore {
    fn from(score: CognateScore) -> Self {
        Self {
            word1: score.word1,
            word2: score.word2,
            similarity_score: score.similarity_score,
            consonant_similarity: score.consonant_similarity,
            alignment_score: score.alignment_score,
            combined_score: score.combined_score,
            is_cognate: score.is_cognate,
        }
    }
}

#[pyclass]
#[derive(Clone)]
struct PyMorpheme {
    #[pyo3(get)]
    text: String,
    #[pyo3(get)]
    kind: String,
    #[pyo3(get)]
    meaning: Option<String>,
}

impl From<Morpheme> for PyMorpheme {
    fn from(m: Morpheme) -> Self {
        Self {
            text: m.text,
            kind: m.kind.to_string(),
            meaning: m.meaning,
        }
    }
}

#[pymethods]
impl PyMorpheme {
    fn __repr__(&self) -> String {
        format!("Morpheme({:?}, {}, {:?})", self.text, self.kind, self.meaning)
    }
}

#[pyclass]
struct PyParsedWord {
    #[pyo3(get)]
    original: String,
    #[pyo3(get)]
    normalized: String,
    #[pyo3(get)]
    morphemes: Vec<(String, String, usize, usize)>,
    #[pyo3(get)]
    confidence: f64,
}

impl From<ParsedWord> for PyParsedWord {
    fn from(parsed: ParsedWord) -> Self {
        Self {
            original: parsed.original,
            normalized: parsed.normalized,
            morphemes: parsed
                .morphemes
                .into_iter()
                .map(|m| (m.text, m.kind.to_string(), m.position, m.length))
                .collect(),
            confidence: parsed.confidence,
        }
    }
}

#[pyclass]
struct PyStringStats {
    #[pyo3(get)]
    char_count: usize,
    #[pyo3(get)]
    word_count: usize,
    #[pyo3(get)]
    unique_chars: usize,
    #[pyo3(get)]
    unique_words: usize,
    #[pyo3(get)]
    char_frequencies: HashMap<char, usize>,
    #[pyo3(get)]
    word_frequencies: HashMap<String, usize>,
}

impl From<StringStats> for PyStringStats {
    fn from(stats: StringStats) -> Self {
        Self {
            char_count: stats.char_count,
            word_count: stats.word_count,
            unique_chars: stats.unique_chars,
            unique_words: stats.unique_words,
            char_frequencies: stats.char_frequencies.into_iter().collect(),
            word_frequencies: stats.word_frequencies.into_iter().collect(),
        }
    }
}

// ============================================================================
// MODULE DEFINITION
// ============================================================================

#[pymodule]
fn lexica_core(_py: Python, m: &PyModule) -> PyResult<()> {
    // Distance functions
    m.add_function(wrap_pyfunction!(levenshtein_distance, m)?)?;
    m.add_function(wrap_pyfunction!(normalized_similarity, m)?)?;
    m.add_function(wrap_pyfunction!(consonant_skeleton, m)?)?;
    m.add_function(wrap_pyfunction!(align_sequences, m)?)?;

    // Cognate functions
    m.add_function(wrap_pyfunction!(compare, m)?)?;
    m.add_function(wrap_pyfunction!(rank_candidates, m)?)?;

    // Morpheme functions
    m.add_function(wrap_pyfunction!(segment, m)?)?;
    m.add_function(wrap_pyfunction!(morpheme_frequency, m)?)?;
    m.add_function(wrap_pyfunction!(find_related_words, m)?)?;
    m.add_function(wrap_pyfunction!(parse_words, m)?)?;

    // Text functions
    m.add_function(wrap_pyfunction!(normalize_string, m)?)?;
    m.add_function(wrap_pyfunction!(tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(find_patterns, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_string_stats, m)?)?;
    m.add_function(wrap_pyfunction!(process_text_batch, m)?)?;

    // Classes
    m.add_class::<PyCognateScore>()?;
    m.add_class::<PyMorpheme>()?;
    m.add_class::<PyParsedWord>()?;
    m.add_class::<PyStringStats>()?;

    Ok(())
}
