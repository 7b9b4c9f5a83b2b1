use approx::assert_relative_eq;
use llm_eval_core::{BleuScore, BleuScorer, EvalError};
use llm_eval_metrics::calculators::{tokenize_13a, BleuCalculator, SmoothingMethod};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn single_refs(items: &[&str]) -> Vec<Vec<String>> {
    items.iter().map(|s| vec![s.to_string()]).collect()
}

// ===== Tokenizer Tests =====

#[rstest]
#[case("Hello, world.", vec!["Hello", ",", "world", "."])]
#[case("1. [OnClick]", vec!["1", ".", "[", "OnClick", "]"])]
#[case("pi is 3.14", vec!["pi", "is", "3.14"])]
#[case("9-5 = 4", vec!["9", "-", "5", "=", "4"])]
#[case("well-known", vec!["well-known"])]
#[case("a &amp; b", vec!["a", "&", "b"])]
#[case("   ", vec![])]
fn test_tokenize_13a(#[case] input: &str, #[case] expected: Vec<&str>) {
    assert_eq!(tokenize_13a(input), expected);
}

#[test]
fn test_tokenize_ignores_trailing_padding() {
    assert_eq!(tokenize_13a("a b      "), tokenize_13a("a b"));
}

// ===== Corpus BLEU Tests =====

#[test]
fn test_bleu_perfect_match() {
    let calculator = BleuCalculator::default();
    let score = calculator
        .compute_bleu(
            &lines(&["the cat sat on the mat"]),
            &single_refs(&["the cat sat on the mat"]),
        )
        .unwrap();

    assert_relative_eq!(score.bleu, 1.0, epsilon = 1e-12);
    assert_eq!(score.precisions, vec![1.0; 4]);
    assert_relative_eq!(score.brevity_penalty, 1.0);
    assert_relative_eq!(score.length_ratio, 1.0);
    assert_eq!(score.translation_length, 6);
    assert_eq!(score.reference_length, 6);
}

#[test]
fn test_bleu_no_match() {
    let calculator = BleuCalculator::default();
    let score = calculator
        .compute_bleu(&lines(&["hello world"]), &single_refs(&["goodbye universe"]))
        .unwrap();

    assert_eq!(score.bleu, 0.0);
    assert_eq!(score.precisions[0], 0.0);
}

#[test]
fn test_bleu_short_lines_have_no_higher_order_ngrams() {
    let text = ["Line 1", "Line 2", "Line 3", "Line 4"];
    let calculator = BleuCalculator::default();
    let score = calculator.compute_bleu(&lines(&text), &single_refs(&text)).unwrap();

    assert_eq!(score.precisions, vec![1.0, 1.0, 0.0, 0.0]);
    assert_eq!(score.bleu, 0.0);
}

#[test]
fn test_bleu_add1_smoothing_rescues_short_lines() {
    let text = ["Line 1", "Line 2", "Line 3", "Line 4"];
    let calculator = BleuCalculator::default().with_smoothing(SmoothingMethod::Add1);
    let score = calculator.compute_bleu(&lines(&text), &single_refs(&text)).unwrap();

    assert_eq!(score.precisions, vec![1.0; 4]);
    assert_relative_eq!(score.bleu, 1.0, epsilon = 1e-12);
}

#[test]
fn test_bleu_brevity_penalty() {
    let calculator = BleuCalculator::new(2);
    let score = calculator
        .compute_bleu(&lines(&["the cat"]), &single_refs(&["the cat sat on the mat"]))
        .unwrap();

    assert_eq!(score.precisions, vec![1.0, 1.0]);
    assert_relative_eq!(score.length_ratio, 2.0 / 6.0, epsilon = 1e-12);
    assert_relative_eq!(score.brevity_penalty, (-2.0f64).exp(), epsilon = 1e-12);
    assert_relative_eq!(score.bleu, (-2.0f64).exp(), epsilon = 1e-12);
}

#[test]
fn test_bleu_no_penalty_for_longer_translation() {
    let calculator = BleuCalculator::new(1);
    let score = calculator
        .compute_bleu(&lines(&["the cat sat down"]), &single_refs(&["the cat sat"]))
        .unwrap();

    assert_relative_eq!(score.brevity_penalty, 1.0);
    assert_relative_eq!(score.bleu, 0.75, epsilon = 1e-12);
}

#[test]
fn test_bleu_clips_against_best_reference() {
    let calculator = BleuCalculator::new(1);
    let score = calculator
        .compute_bleu(
            &lines(&["the the the the"]),
            &[vec!["the cat".to_string(), "the the".to_string()]],
        )
        .unwrap();

    assert_relative_eq!(score.precisions[0], 0.5, epsilon = 1e-12);
    assert_eq!(score.reference_length, 2);
    assert_relative_eq!(score.bleu, 0.5, epsilon = 1e-12);
}

#[test]
fn test_bleu_accumulates_over_corpus() {
    let calculator = BleuCalculator::new(1);
    let score = calculator
        .compute_bleu(
            &lines(&["a b c d", "w x y z"]),
            &single_refs(&["a b c d", "q r s t"]),
        )
        .unwrap();

    assert_relative_eq!(score.precisions[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(score.bleu, 0.5, epsilon = 1e-12);
    assert_eq!(score.translation_length, 8);
}

#[test]
fn test_bleu_empty_corpus_is_zero() {
    let calculator = BleuCalculator::default();
    let score = calculator.compute_bleu(&[], &[]).unwrap();

    assert_eq!(score, BleuScore::zero(4));
}

#[test]
fn test_bleu_rejects_unparallel_input() {
    let calculator = BleuCalculator::default();
    let result = calculator.compute_bleu(&lines(&["a", "b"]), &single_refs(&["a"]));

    assert!(matches!(result, Err(EvalError::MetricComputation(_))));
}

#[test]
fn test_bleu_rejects_zero_order() {
    let calculator = BleuCalculator::new(0);
    let result = calculator.compute_bleu(&lines(&["a"]), &single_refs(&["a"]));

    assert!(matches!(result, Err(EvalError::MetricComputation(_))));
}
