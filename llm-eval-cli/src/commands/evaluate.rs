//! Evaluate command

use anyhow::{bail, Context as _, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::Context;

/// Score a predicted text against an expected text
#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Predicted (model) output
    #[arg(short, long, conflicts_with = "predicted_file")]
    pub predicted: Option<String>,

    /// Read the predicted output from a file
    #[arg(long, value_name = "FILE")]
    pub predicted_file: Option<PathBuf>,

    /// Expected (reference) output
    #[arg(short, long, conflicts_with = "expected_file")]
    pub expected: Option<String>,

    /// Read the expected output from a file
    #[arg(long, value_name = "FILE")]
    pub expected_file: Option<PathBuf>,

    /// JSON document with `predicted` and `expected` fields
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["predicted", "predicted_file", "expected", "expected_file"]
    )]
    pub request: Option<PathBuf>,
}

/// Execute the evaluate command
pub async fn execute(ctx: &Context, args: EvaluateArgs) -> Result<()> {
    let report = match &args.request {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read request from {:?}", path))?;
            let request: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse request from {:?}", path))?;
            ctx.evaluator
                .evaluate_json(&request["predicted"], &request["expected"])?
        }
        None => {
            let predicted = read_text(args.predicted, args.predicted_file.as_deref(), "predicted")?;
            let expected = read_text(args.expected, args.expected_file.as_deref(), "expected")?;
            ctx.evaluator.evaluate_bytes(&predicted, &expected)?
        }
    };

    tracing::info!(lines_scored = report.lines_scored, "evaluation finished");
    ctx.output.write(&report)
}

/// Raw bytes of an inline value or a file; UTF-8 is checked by the evaluator.
pub(crate) fn read_text(inline: Option<String>, file: Option<&Path>, name: &str) -> Result<Vec<u8>> {
    match (inline, file) {
        (Some(text), _) => Ok(text.into_bytes()),
        (None, Some(path)) => {
            fs::read(path).with_context(|| format!("Failed to read {} text from {:?}", name, path))
        }
        (None, None) => bail!("Provide --{0} or --{0}-file", name),
    }
}
