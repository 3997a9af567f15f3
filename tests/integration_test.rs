use std::sync::Once;

use lexica_core::*;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[test]
fn test_distance_basics() {
    assert_eq!(levenshtein_distance("water", "water"), 0);
    assert_eq!(normalized_similarity("", ""), 1.0);
    assert_eq!(normalized_similarity("", "abc"), 0.0);
    assert_eq!(consonant_skeleton("water"), "wtr");
    assert_eq!(consonant_skeleton("aeiou"), "");
}

#[test]
fn test_water_wasser_alignment() {
    let alignment = align("water", "wasser");
    assert_eq!(alignment.aligned_a, "wa-ter");
    assert_eq!(alignment.aligned_b, "wasser");
    assert_eq!(alignment.mask, vec![true, true, false, false, true, true]);
    assert_eq!(alignment.len(), alignment.aligned_b.chars().count());
}

#[test]
fn test_cognate_verdicts() {
    init_tracing();
    let detector = CognateDetector::new(DetectorConfig::default());

    let score = detector.compare("water", "fire");
    assert!(!score.is_cognate);

    let score = detector.compare("water", "waters");
    assert!(score.is_cognate);
    assert!(score.combined_score > 0.7);

    let score = detector.compare("Mutter", "mutter");
    assert_eq!(score.combined_score, 1.0);
}

#[test]
fn test_weights_must_sum_to_one() {
    let err = DetectorConfig::from_parts(0.7, 0.5, 0.5, 0.5).unwrap_err();
    assert!(matches!(err, LexicaError::Configuration(_)));
}

#[test]
fn test_rank_candidates_scenario() {
    init_tracing();
    let pool = ["water", "wasser", "eau", "fire", "wassir"];

    let words = rank_candidates("water", &pool, 0.45, false).unwrap();
    assert_eq!(words.words(), vec!["wasser", "wassir"]);

    let scores = match rank_candidates("water", &pool, 0.45, true).unwrap() {
        RankedCandidates::Scores(scores) => scores,
        RankedCandidates::Words(_) => panic!("expected scores"),
    };
    assert!(scores[0].combined_score >= scores[1].combined_score);
    assert!(scores.iter().all(|s| s.word1 == "water"));

    let strict = rank_candidates("water", &pool, DEFAULT_MIN_CONFIDENCE, false).unwrap();
    assert!(strict.is_empty());
}

#[test]
fn test_segmentation_examples() {
    let analyzer = MorphemeAnalyzer::default();

    let morphemes = analyzer.segment("unhappiness");
    let triples: Vec<(&str, MorphemeKind, Option<&str>)> = morphemes
        .iter()
        .map(|m| (m.text.as_str(), m.kind, m.meaning.as_deref()))
        .collect();
    assert_eq!(
        triples,
        vec![
            ("un", MorphemeKind::Prefix, Some("not")),
            ("happi", MorphemeKind::Root, None),
            ("ness", MorphemeKind::Suffix, Some("state of being")),
        ]
    );

    assert_eq!(analyzer.segment("happy"), vec![Morpheme::root("happy")]);
    assert!(analyzer.segment("").is_empty());
    assert_eq!(analyzer.segment("unhappiness"), morphemes);
}

#[test]
fn test_frequency_and_related() {
    let analyzer = MorphemeAnalyzer::default();

    let index = analyzer.frequency(&["unhappy", "happiness", "rebuild", "building"]);
    assert_eq!(index.count(MorphemeKind::Prefix, "un"), 1);
    assert_eq!(index.count(MorphemeKind::Prefix, "re"), 1);
    assert_eq!(index.count(MorphemeKind::Suffix, "ness"), 1);
    assert_eq!(index.count(MorphemeKind::Suffix, "ing"), 1);
    let roots = index.kind(MorphemeKind::Root).unwrap();
    assert!(roots.contains_key("happy"));
    assert!(roots.contains_key("build"));

    let related = analyzer.related(
        "unhappiness",
        &["unhappy", "happiness", "rebuild", "building", "cat"],
    );
    assert!(related["happi"].contains(&"happiness".to_string()));
    assert!(!related.values().flatten().any(|w| w == "cat"));
}

#[test]
fn test_parser_with_cache() {
    init_tracing();
    let engine = LexicaEngine::new(EngineConfig::default()).unwrap();
    let cache = engine.new_parse_cache().unwrap();

    let first = cache.get_or_parse(engine.parser(), "Rebuilding").unwrap();
    assert_eq!(first.normalized, "rebuilding");
    assert_eq!(first.morphemes.len(), 3);
    assert!((first.confidence - 0.81).abs() < 1e-12);

    let again = cache.get_or_parse(engine.parser(), "rebuilding").unwrap();
    assert_eq!(again.morphemes, first.morphemes);
    assert_eq!(cache.hits(), 1);
}

#[test]
fn test_batch_calls_preserve_order() {
    let engine = LexicaEngine::new(EngineConfig {
        worker_threads: Some(3),
        ..EngineConfig::default()
    })
    .unwrap();

    let words: Vec<String> = (0..64).map(|i| format!("re{i}ing")).collect();
    let parsed = engine.batch_parse(&words).unwrap();
    for (word, parsed) in words.iter().zip(&parsed) {
        assert_eq!(&parsed.original, word);
    }

    let scores = engine.detector().compare_many("water", &words);
    assert_eq!(scores.len(), words.len());
    for (word, score) in words.iter().zip(&scores) {
        assert_eq!(&score.word2, word);
    }
}

#[test]
fn test_text_utilities() {
    assert_eq!(text::normalize_text("Wässer"), "wasser");
    let tokens = text::tokenize("water\twasser\n eau", " \t\n").unwrap();
    assert_eq!(tokens, vec!["water", "wasser", "eau"]);

    let found = text::find_patterns("unhappiness and happiness", &["happi", "ness"]).unwrap();
    assert_eq!(found["happi"], vec![2, 16]);
    assert_eq!(found["ness"], vec![7, 21]);
}
