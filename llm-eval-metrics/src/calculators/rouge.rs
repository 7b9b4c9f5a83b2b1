use llm_eval_core::{EvalError, Result, RougeReport, RougeScore, RougeScorer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum RougeVariant {
    RougeN { n: usize },
    RougeL,
    /// Summary-level LCS over newline-separated sentences.
    RougeLsum,
}

impl RougeVariant {
    pub const DEFAULT_SET: [RougeVariant; 4] = [
        RougeVariant::RougeN { n: 1 },
        RougeVariant::RougeN { n: 2 },
        RougeVariant::RougeL,
        RougeVariant::RougeLsum,
    ];
}

impl fmt::Display for RougeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RougeN { n } => write!(f, "rouge{}", n),
            Self::RougeL => write!(f, "rougeL"),
            Self::RougeLsum => write!(f, "rougeLsum"),
        }
    }
}

impl FromStr for RougeVariant {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rougeL" => Ok(Self::RougeL),
            "rougeLsum" => Ok(Self::RougeLsum),
            other => other
                .strip_prefix("rouge")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| (1..=9).contains(n))
                .map(|n| Self::RougeN { n })
                .ok_or_else(|| EvalError::Configuration(format!("Unknown ROUGE variant: {}", other))),
        }
    }
}

impl TryFrom<String> for RougeVariant {
    type Error = EvalError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RougeVariant> for String {
    fn from(variant: RougeVariant) -> Self {
        variant.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct RougeCalculator {
    pub variants: Vec<RougeVariant>,
}

impl RougeCalculator {
    pub fn new(variants: Vec<RougeVariant>) -> Self {
        Self { variants }
    }

    pub fn rouge_1() -> Self {
        Self::new(vec![RougeVariant::RougeN { n: 1 }])
    }

    pub fn rouge_2() -> Self {
        Self::new(vec![RougeVariant::RougeN { n: 2 }])
    }

    pub fn rouge_l() -> Self {
        Self::new(vec![RougeVariant::RougeL])
    }

    /// Score a single prediction against its reference for one variant.
    pub fn score(&self, variant: RougeVariant, predicted: &str, reference: &str) -> RougeScore {
        match variant {
            RougeVariant::RougeN { n } => rouge_n(&tokenize(predicted), &tokenize(reference), n),
            RougeVariant::RougeL => rouge_l(&tokenize(predicted), &tokenize(reference)),
            RougeVariant::RougeLsum => {
                let sentences = |text: &str| -> Vec<Vec<String>> {
                    text.split('\n')
                        .filter(|s| !s.is_empty())
                        .map(tokenize)
                        .collect()
                };
                rouge_lsum(&sentences(predicted), &sentences(reference))
            }
        }
    }
}

impl Default for RougeCalculator {
    fn default() -> Self {
        Self::new(RougeVariant::DEFAULT_SET.to_vec())
    }
}

impl RougeScorer for RougeCalculator {
    /// Averages per-pair precision, recall and F-measure for every variant.
    fn compute_rouge(&self, candidates: &[String], references: &[String]) -> Result<RougeReport> {
        if candidates.len() != references.len() {
            return Err(EvalError::MetricComputation(format!(
                "ROUGE expects parallel inputs, got {} predictions and {} references",
                candidates.len(),
                references.len()
            )));
        }

        let mut report = RougeReport::new();
        for &variant in &self.variants {
            let mut sums = (0.0, 0.0, 0.0);
            for (predicted, reference) in candidates.iter().zip(references) {
                let score = self.score(variant, predicted, reference);
                sums.0 += score.precision;
                sums.1 += score.recall;
                sums.2 += score.fmeasure;
            }

            let aggregated = if candidates.is_empty() {
                RougeScore::default()
            } else {
                let count = candidates.len() as f64;
                RougeScore {
                    precision: sums.0 / count,
                    recall: sums.1 / count,
                    fmeasure: sums.2 / count,
                }
            };
            tracing::debug!(variant = %variant, fmeasure = aggregated.fmeasure, "computed ROUGE");
            report.insert(variant.to_string(), aggregated);
        }

        Ok(report)
    }
}

/// Lowercase, keep ASCII alphanumerics, split on everything else.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn count_ngrams(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if n == 0 {
        return counts;
    }
    for window in tokens.windows(n) {
        *counts.entry(window).or_insert(0) += 1;
    }
    counts
}

fn rouge_n(predicted: &[String], reference: &[String], n: usize) -> RougeScore {
    let pred_counts = count_ngrams(predicted, n);
    let ref_counts = count_ngrams(reference, n);

    let overlap: usize = ref_counts
        .iter()
        .map(|(ngram, ref_count)| (*ref_count).min(pred_counts.get(ngram).copied().unwrap_or(0)))
        .sum();

    let pred_total: usize = pred_counts.values().sum();
    let ref_total: usize = ref_counts.values().sum();

    RougeScore::new(
        overlap as f64 / pred_total.max(1) as f64,
        overlap as f64 / ref_total.max(1) as f64,
    )
}

fn lcs_table(reference: &[String], candidate: &[String]) -> Vec<Vec<usize>> {
    let rows = reference.len();
    let cols = candidate.len();
    let mut table = vec![vec![0; cols + 1]; rows + 1];

    for i in 1..=rows {
        for j in 1..=cols {
            table[i][j] = if reference[i - 1] == candidate[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    table
}

fn rouge_l(predicted: &[String], reference: &[String]) -> RougeScore {
    if predicted.is_empty() || reference.is_empty() {
        return RougeScore::default();
    }

    let lcs = lcs_table(reference, predicted)[reference.len()][predicted.len()];
    RougeScore::new(
        lcs as f64 / predicted.len() as f64,
        lcs as f64 / reference.len() as f64,
    )
}

/// Indices into `reference` of one longest common subsequence with `candidate`.
fn lcs_indices(reference: &[String], candidate: &[String]) -> Vec<usize> {
    let table = lcs_table(reference, candidate);
    let (mut i, mut j) = (reference.len(), candidate.len());
    let mut indices = Vec::new();

    while i > 0 && j > 0 {
        if reference[i - 1] == candidate[j - 1] {
            indices.push(i - 1);
            i -= 1;
            j -= 1;
        } else if table[i][j - 1] > table[i - 1][j] {
            j -= 1;
        } else {
            i -= 1;
        }
    }

    indices.reverse();
    indices
}

fn rouge_lsum(predicted: &[Vec<String>], reference: &[Vec<String>]) -> RougeScore {
    let pred_total: usize = predicted.iter().map(Vec::len).sum();
    let ref_total: usize = reference.iter().map(Vec::len).sum();
    if pred_total == 0 || ref_total == 0 {
        return RougeScore::default();
    }

    let mut pred_counts: HashMap<&str, usize> = HashMap::new();
    let mut ref_counts: HashMap<&str, usize> = HashMap::new();
    for token in predicted.iter().flatten() {
        *pred_counts.entry(token.as_str()).or_insert(0) += 1;
    }
    for token in reference.iter().flatten() {
        *ref_counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut hits = 0usize;
    for ref_sentence in reference {
        let union: BTreeSet<usize> = predicted
            .iter()
            .flat_map(|candidate| lcs_indices(ref_sentence, candidate))
            .collect();

        for index in union {
            let token = ref_sentence[index].as_str();
            let (Some(p), Some(r)) = (pred_counts.get_mut(token), ref_counts.get_mut(token)) else {
                continue;
            };
            if *p > 0 && *r > 0 {
                hits += 1;
                *p -= 1;
                *r -= 1;
            }
        }
    }

    RougeScore::new(
        hits as f64 / pred_total as f64,
        hits as f64 / ref_total as f64,
    )
}
