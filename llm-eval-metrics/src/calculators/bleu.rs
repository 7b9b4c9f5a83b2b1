use llm_eval_core::{BleuScore, BleuScorer, EvalError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMethod {
    #[default]
    None,
    /// Add-one smoothing on every order (Lin and Och, 2004).
    Add1,
}

/// Corpus BLEU with the WMT `13a` tokenizer.
#[derive(Debug, Clone)]
pub struct BleuCalculator {
    pub max_order: usize,
    pub smoothing: SmoothingMethod,
}

impl BleuCalculator {
    pub fn new(max_order: usize) -> Self {
        Self {
            max_order,
            smoothing: SmoothingMethod::None,
        }
    }

    pub fn with_smoothing(mut self, smoothing: SmoothingMethod) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Count every n-gram of order `1..=max_order` in a token sequence.
    fn count_ngrams<'a>(&self, tokens: &'a [String]) -> HashMap<&'a [String], usize> {
        let mut counts = HashMap::new();
        for n in 1..=self.max_order {
            for window in tokens.windows(n) {
                *counts.entry(window).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Precision for one order from clipped matches and possible matches.
    fn precision(&self, matches: usize, possible: usize) -> f64 {
        match self.smoothing {
            SmoothingMethod::Add1 => (matches as f64 + 1.0) / (possible as f64 + 1.0),
            SmoothingMethod::None if possible > 0 => matches as f64 / possible as f64,
            SmoothingMethod::None => 0.0,
        }
    }

    /// Calculate brevity penalty from the corpus length ratio
    fn brevity_penalty(&self, ratio: f64) -> f64 {
        if ratio > 1.0 {
            1.0
        } else if ratio <= 0.0 {
            0.0
        } else {
            (1.0 - 1.0 / ratio).exp()
        }
    }

    /// Calculate corpus BLEU over tokenized segments.
    pub fn calculate_bleu(&self, candidates: &[Vec<String>], references: &[Vec<Vec<String>>]) -> BleuScore {
        if candidates.is_empty() {
            return BleuScore::zero(self.max_order);
        }

        let mut matches_by_order = vec![0usize; self.max_order];
        let mut possible_by_order = vec![0usize; self.max_order];
        let mut translation_length = 0;
        let mut reference_length = 0;

        for (translation, refs) in candidates.iter().zip(references) {
            reference_length += refs.iter().map(Vec::len).min().unwrap_or(0);
            translation_length += translation.len();

            // Clip against the per-n-gram maximum over all references.
            let mut merged_ref_counts: HashMap<&[String], usize> = HashMap::new();
            for reference in refs {
                for (ngram, count) in self.count_ngrams(reference) {
                    let entry = merged_ref_counts.entry(ngram).or_insert(0);
                    *entry = (*entry).max(count);
                }
            }

            for (ngram, count) in self.count_ngrams(translation) {
                let clipped = count.min(merged_ref_counts.get(ngram).copied().unwrap_or(0));
                matches_by_order[ngram.len() - 1] += clipped;
            }

            for order in 1..=self.max_order {
                if translation.len() >= order {
                    possible_by_order[order - 1] += translation.len() - order + 1;
                }
            }
        }

        let precisions: Vec<f64> = matches_by_order
            .iter()
            .zip(&possible_by_order)
            .map(|(&matches, &possible)| self.precision(matches, possible))
            .collect();

        let geometric_mean = if precisions.iter().all(|&p| p > 0.0) {
            let log_sum: f64 = precisions.iter().map(|p| p.ln()).sum();
            (log_sum / self.max_order as f64).exp()
        } else {
            0.0
        };

        let length_ratio = if reference_length > 0 {
            translation_length as f64 / reference_length as f64
        } else {
            0.0
        };
        let brevity_penalty = self.brevity_penalty(length_ratio);

        BleuScore {
            bleu: geometric_mean * brevity_penalty,
            precisions,
            brevity_penalty,
            length_ratio,
            translation_length,
            reference_length,
        }
    }
}

impl Default for BleuCalculator {
    fn default() -> Self {
        Self::new(4)
    }
}

impl BleuScorer for BleuCalculator {
    fn compute_bleu(&self, candidates: &[String], references: &[Vec<String>]) -> Result<BleuScore> {
        if self.max_order == 0 {
            return Err(EvalError::MetricComputation(
                "BLEU max_order must be at least 1".to_string(),
            ));
        }
        if candidates.len() != references.len() {
            return Err(EvalError::MetricComputation(format!(
                "BLEU expects parallel inputs, got {} candidates and {} references",
                candidates.len(),
                references.len()
            )));
        }

        let candidate_tokens: Vec<Vec<String>> = candidates.iter().map(|c| tokenize_13a(c)).collect();
        let reference_tokens: Vec<Vec<Vec<String>>> = references
            .iter()
            .map(|refs| refs.iter().map(|r| tokenize_13a(r)).collect())
            .collect();

        let score = self.calculate_bleu(&candidate_tokens, &reference_tokens);
        tracing::debug!(
            bleu = score.bleu,
            translation_length = score.translation_length,
            reference_length = score.reference_length,
            "computed BLEU"
        );
        Ok(score)
    }
}

static TOKENIZER_13A_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // Symbols and punctuation other than period, comma, hyphen and apostrophe.
        (r"([\x7B-\x7E\x5B-\x60\x20-\x26\x28-\x2B\x3A-\x40\x2F])", " ${1} "),
        // Period and comma unless preceded by a digit.
        (r"([^0-9])([.,])", "${1} ${2} "),
        // Period and comma unless followed by a digit.
        (r"([.,])([^0-9])", " ${1} ${2}"),
        // Dash when preceded by a digit.
        (r"([0-9])(-)", "${1} ${2} "),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("13a tokenizer pattern is valid"),
            replacement,
        )
    })
    .collect()
});

/// Tokenize a segment the way mteval-v13a does.
pub fn tokenize_13a(line: &str) -> Vec<String> {
    let mut line = line
        .replace("<skipped>", "")
        .replace("-\n", "")
        .replace('\n', " ");
    if line.contains('&') {
        line = line
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">");
    }

    let mut line = format!(" {line} ");
    for (pattern, replacement) in TOKENIZER_13A_RULES.iter() {
        line = pattern.replace_all(&line, *replacement).into_owned();
    }

    line.split_whitespace().map(str::to_string).collect()
}
