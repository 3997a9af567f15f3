use lexica_core::*;
use proptest::prelude::*;

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{0,12}"
}

fn arb_mixed_word() -> impl Strategy<Value = String> {
    "[a-zA-Zäöüéçß]{0,10}"
}

proptest! {
    #[test]
    fn distance_is_a_metric(a in arb_word(), b in arb_word()) {
        prop_assert_eq!(levenshtein_distance(&a, &a), 0);
        prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));
        let longest = a.chars().count().max(b.chars().count());
        prop_assert!(levenshtein_distance(&a, &b) <= longest);
    }

    #[test]
    fn similarity_is_bounded(a in arb_mixed_word(), b in arb_mixed_word()) {
        let similarity = normalized_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&similarity));
    }

    #[test]
    fn alignment_shape(a in arb_word(), b in arb_word()) {
        let alignment = align(&a, &b);
        let len = alignment.aligned_a.chars().count();

        prop_assert_eq!(len, alignment.aligned_b.chars().count());
        prop_assert_eq!(len, alignment.mask.len());
        prop_assert_eq!(len, alignment.operations.len());
        prop_assert_eq!(alignment.aligned_a.replace('-', ""), a.clone());
        prop_assert_eq!(alignment.aligned_b.replace('-', ""), b.clone());
        prop_assert_eq!(alignment.cost, levenshtein_distance(&a, &b));
    }

    #[test]
    fn kernels_agree(a in arb_mixed_word(), b in arb_mixed_word()) {
        prop_assert_eq!(FastKernel.distance(&a, &b), ReferenceKernel.distance(&a, &b));
        prop_assert_eq!(FastKernel.align(&a, &b), ReferenceKernel.align(&a, &b));
    }

    #[test]
    fn combined_score_is_bounded(a in arb_word(), b in arb_word()) {
        let score = CognateDetector::new(DetectorConfig::default()).compare(&a, &b);
        prop_assert!(score.combined_score >= 0.0);
        prop_assert!(score.combined_score <= 1.0 + 1e-12);
        prop_assert_eq!(score.is_cognate, score.combined_score >= 0.7);
    }

    #[test]
    fn identical_words_score_one(a in "[a-z]{1,12}") {
        let score = CognateDetector::new(DetectorConfig::default()).compare(&a, &a);
        prop_assert_eq!(score.combined_score, 1.0);
    }

    #[test]
    fn segmentation_is_deterministic(word in arb_word()) {
        let analyzer = MorphemeAnalyzer::default();
        let morphemes = analyzer.segment(&word);
        prop_assert_eq!(&morphemes, &analyzer.segment(&word));
        prop_assert!(morphemes.len() <= 3);

        if morphemes.iter().any(|m| m.kind == MorphemeKind::Root) {
            let joined: String = morphemes.iter().map(|m| m.text.as_str()).collect();
            prop_assert_eq!(joined, word);
        }
    }

    #[test]
    fn parsed_spans_cover_word(word in "[a-z]{1,12}") {
        let parsed = MorphologicalParser::default().parse_word(&word).unwrap();
        let total = word.chars().count();
        for m in &parsed.morphemes {
            prop_assert!(m.end() <= total);
            prop_assert_eq!(m.text.chars().count(), m.length);
        }
        prop_assert!(parsed.confidence > 0.0 && parsed.confidence <= 1.0);
    }
}
