use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Corpus BLEU together with the statistics it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BleuScore {
    pub bleu: f64,
    /// Modified n-gram precision for orders `1..=max_order`.
    pub precisions: Vec<f64>,
    pub brevity_penalty: f64,
    pub length_ratio: f64,
    pub translation_length: usize,
    pub reference_length: usize,
}

impl BleuScore {
    /// Score reported for an empty corpus: every statistic is zero.
    pub fn zero(max_order: usize) -> Self {
        Self {
            bleu: 0.0,
            precisions: vec![0.0; max_order],
            brevity_penalty: 0.0,
            length_ratio: 0.0,
            translation_length: 0,
            reference_length: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RougeScore {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

impl RougeScore {
    pub fn new(precision: f64, recall: f64) -> Self {
        let fmeasure = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            fmeasure,
        }
    }
}

/// ROUGE results keyed by variant name (`rouge1`, `rouge2`, `rougeL`, `rougeLsum`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RougeReport {
    scores: BTreeMap<String, RougeScore>,
}

impl RougeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variant: impl Into<String>, score: RougeScore) {
        self.scores.insert(variant.into(), score);
    }

    pub fn get(&self, variant: &str) -> Option<&RougeScore> {
        self.scores.get(variant)
    }

    /// F-measure of a variant, the headline number for ROUGE.
    pub fn fmeasure(&self, variant: &str) -> Option<f64> {
        self.scores.get(variant).map(|s| s.fmeasure)
    }

    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RougeScore)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Output of one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    #[serde(rename = "BLEU")]
    pub bleu: BleuScore,

    #[serde(rename = "ROUGE")]
    pub rouge: RougeReport,

    #[serde(rename = "MED (Average)")]
    pub med_average: f64,

    /// Number of aligned line pairs that were scored.
    #[serde(skip)]
    pub lines_scored: usize,
}
