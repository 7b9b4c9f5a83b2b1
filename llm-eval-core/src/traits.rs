use async_trait::async_trait;

use crate::domain::{BleuScore, GenerationParams, RougeReport};
use crate::error::Result;

/// Corpus-level BLEU over parallel candidate/reference lists.
///
/// `references[i]` holds every acceptable reference for `candidates[i]`.
pub trait BleuScorer {
    fn compute_bleu(&self, candidates: &[String], references: &[Vec<String>]) -> Result<BleuScore>;
}

/// ROUGE over parallel prediction/reference lists, one reference per prediction.
pub trait RougeScorer {
    fn compute_rouge(&self, candidates: &[String], references: &[String]) -> Result<RougeReport>;
}

/// A model-serving backend that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}
