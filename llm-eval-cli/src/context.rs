//! CLI execution context

use anyhow::{Context as _, Result};
use llm_eval_inference::{HttpTextGenerator, PromptTemplate};
use llm_eval_metrics::MetricEvaluator;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::output::OutputWriter;

/// Execution context for CLI commands
pub struct Context {
    /// Loaded configuration, with command-line overrides applied
    pub config: AppConfig,

    /// Output writer
    pub output: OutputWriter,

    /// Evaluator built from the `[metrics]` settings
    pub evaluator: MetricEvaluator,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = AppConfig::load(cli.config.as_deref())?;
        if let Some(endpoint) = &cli.endpoint {
            config.inference.endpoint = endpoint.clone();
        }

        let evaluator = MetricEvaluator::from_config(&config.metrics)?;
        let output = OutputWriter::new(cli.output, cli.no_color);

        Ok(Self {
            config,
            output,
            evaluator,
        })
    }

    /// Instruction template, from the configured file or the built-in default
    pub fn template(&self) -> Result<PromptTemplate> {
        match &self.config.inference.instructions_file {
            Some(path) => Ok(PromptTemplate::from_file(path)?),
            None => Ok(PromptTemplate::default()),
        }
    }

    /// HTTP client for the configured model server
    pub fn generator(&self) -> Result<HttpTextGenerator> {
        HttpTextGenerator::new(self.config.inference.clone())
            .with_context(|| format!("Failed to create model client for {}", self.config.inference.endpoint))
    }
}
