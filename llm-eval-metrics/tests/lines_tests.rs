use llm_eval_metrics::lines::{normalize, AlignedPair, LineSequence};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ===== Parsing =====

#[test]
fn test_parse_trims_and_drops_blank_lines() {
    let lines = LineSequence::parse("\n   first line  \n\t\n second\n\n");
    assert_eq!(lines.as_slice(), ["first line", "second"]);
}

#[test]
fn test_parse_empty_text() {
    assert!(LineSequence::parse("").is_empty());
    assert!(LineSequence::parse(" \n\t\r\n ").is_empty());
}

// ===== Alignment =====

#[test]
fn test_align_truncates_to_shorter_side() {
    let pair = AlignedPair::align(LineSequence::parse("A\nB"), LineSequence::parse("A\nB\nC"));
    assert_eq!(pair.len(), 2);
    assert_eq!(pair.predicted(), ["A", "B"]);
    assert_eq!(pair.reference(), ["A", "B"]);
}

#[test]
fn test_align_with_empty_side_is_empty() {
    let pair = AlignedPair::align(LineSequence::parse("A\nB"), LineSequence::parse(""));
    assert!(pair.is_empty());
    assert!(pair.reference().is_empty());
}

// ===== Padding =====

#[test]
fn test_pad_to_longest_line_across_both_sides() {
    let pair = normalize("a\nbbb", "cc\nd");
    assert_eq!(pair.width(), 3);
    assert_eq!(pair.predicted(), ["a  ", "bbb"]);
    assert_eq!(pair.reference(), ["cc ", "d  "]);
}

#[test]
fn test_pad_ignores_truncated_tail() {
    // The long reference line is dropped before padding.
    let pair = normalize("a", "b\na much longer line");
    assert_eq!(pair.width(), 1);
}

#[test]
fn test_pad_empty_has_zero_width() {
    let pair = normalize("", "");
    assert_eq!(pair.width(), 0);
    assert!(pair.is_empty());
}

#[test]
fn test_single_references_wrap_each_line() {
    let pair = normalize("x\ny", "p\nq");
    assert_eq!(
        pair.single_references(),
        vec![vec!["p".to_string()], vec!["q".to_string()]]
    );
}

// ===== Properties =====

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[ a-zA-Z0-9.,]{0,12}", 0..8).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn test_scored_lines_equal_shorter_side(predicted in text_strategy(), reference in text_strategy()) {
        let m = LineSequence::parse(&predicted).len();
        let n = LineSequence::parse(&reference).len();
        let pair = normalize(&predicted, &reference);
        prop_assert_eq!(pair.len(), m.min(n));
        prop_assert_eq!(pair.predicted().len(), pair.reference().len());
    }

    #[test]
    fn test_padded_lines_share_the_longest_width(predicted in text_strategy(), reference in text_strategy()) {
        let aligned = AlignedPair::align(LineSequence::parse(&predicted), LineSequence::parse(&reference));
        let longest = aligned
            .predicted()
            .iter()
            .chain(aligned.reference())
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);

        let padded = aligned.pad();
        prop_assert_eq!(padded.width(), longest);
        for line in padded.predicted().iter().chain(padded.reference()) {
            prop_assert_eq!(line.chars().count(), longest);
        }
    }
}
