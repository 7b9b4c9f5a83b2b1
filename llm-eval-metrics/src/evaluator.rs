//! The metric evaluation pipeline: validate, normalize, score.

use llm_eval_core::{BleuScorer, EvalError, MetricReport, Result, RougeScorer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculators::{
    average_edit_distance, BleuCalculator, RougeCalculator, RougeVariant, SmoothingMethod,
};
use crate::lines::normalize;

/// Scorer settings, usually loaded from the `[metrics]` configuration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub bleu_max_order: usize,
    pub bleu_smooth: bool,
    pub rouge_types: Vec<RougeVariant>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            bleu_max_order: 4,
            bleu_smooth: false,
            rouge_types: RougeVariant::DEFAULT_SET.to_vec(),
        }
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bleu_max_order == 0 {
            return Err(EvalError::Configuration(
                "metrics.bleu_max_order must be at least 1".to_string(),
            ));
        }
        if self.rouge_types.is_empty() {
            return Err(EvalError::Configuration(
                "metrics.rouge_types must name at least one variant".to_string(),
            ));
        }
        Ok(())
    }
}

/// Accept only textual values for both sides of an evaluation.
pub fn validate_inputs<'a>(predictions: &'a Value, references: &'a Value) -> Result<(&'a str, &'a str)> {
    match (predictions.as_str(), references.as_str()) {
        (Some(p), Some(r)) => Ok((p, r)),
        _ => Err(EvalError::non_string_input()),
    }
}

/// Accept only UTF-8 byte buffers for both sides of an evaluation.
pub fn validate_bytes<'a>(predictions: &'a [u8], references: &'a [u8]) -> Result<(&'a str, &'a str)> {
    match (std::str::from_utf8(predictions), std::str::from_utf8(references)) {
        (Ok(p), Ok(r)) => Ok((p, r)),
        _ => Err(EvalError::non_string_input()),
    }
}

/// Computes BLEU, ROUGE and average edit distance between two texts.
#[derive(Debug, Clone, Default)]
pub struct MetricEvaluator<B = BleuCalculator, R = RougeCalculator> {
    bleu: B,
    rouge: R,
}

impl MetricEvaluator {
    pub fn new() -> Self {
        Self::with_scorers(BleuCalculator::default(), RougeCalculator::default())
    }

    pub fn from_config(config: &MetricsConfig) -> Result<Self> {
        config.validate()?;

        let smoothing = if config.bleu_smooth {
            SmoothingMethod::Add1
        } else {
            SmoothingMethod::None
        };

        Ok(Self {
            bleu: BleuCalculator::new(config.bleu_max_order).with_smoothing(smoothing),
            rouge: RougeCalculator::new(config.rouge_types.clone()),
        })
    }
}

impl<B: BleuScorer, R: RougeScorer> MetricEvaluator<B, R> {
    pub fn with_scorers(bleu: B, rouge: R) -> Self {
        Self { bleu, rouge }
    }

    /// Score `predicted` against `reference` line by line.
    ///
    /// Lines are aligned by position and the longer text's tail is ignored.
    /// Scorer failures are returned as-is.
    pub fn evaluate(&self, predicted: &str, reference: &str) -> Result<MetricReport> {
        let pair = normalize(predicted, reference);
        tracing::debug!(
            lines = pair.len(),
            width = pair.width(),
            "normalized evaluation input"
        );

        let bleu = self
            .bleu
            .compute_bleu(pair.predicted(), &pair.single_references())?;
        let rouge = self.rouge.compute_rouge(pair.predicted(), pair.reference())?;
        let med_average = average_edit_distance(pair.predicted(), pair.reference());

        tracing::debug!(
            bleu = bleu.bleu,
            med_average,
            "evaluation complete"
        );

        Ok(MetricReport {
            bleu,
            rouge,
            med_average,
            lines_scored: pair.len(),
        })
    }

    /// Validate untyped values, then evaluate.
    pub fn evaluate_json(&self, predictions: &Value, references: &Value) -> Result<MetricReport> {
        let (predicted, reference) = validate_inputs(predictions, references)?;
        self.evaluate(predicted, reference)
    }

    /// Validate raw bytes as UTF-8, then evaluate.
    pub fn evaluate_bytes(&self, predictions: &[u8], references: &[u8]) -> Result<MetricReport> {
        let (predicted, reference) = validate_bytes(predictions, references)?;
        self.evaluate(predicted, reference)
    }
}

/// Evaluate with the default BLEU-4 and ROUGE-1/2/L/Lsum calculators.
pub fn compute_metrics(predicted: &str, reference: &str) -> Result<MetricReport> {
    MetricEvaluator::new().evaluate(predicted, reference)
}

/// [`compute_metrics`] for values whose type is only known at runtime.
pub fn compute_metrics_json(predictions: &Value, references: &Value) -> Result<MetricReport> {
    MetricEvaluator::new().evaluate_json(predictions, references)
}
