//! Generate and run commands

use anyhow::Result;
use clap::Args;
use llm_eval_inference::llm_inference;
use std::path::PathBuf;

use crate::commands::evaluate::read_text;
use crate::context::Context;

/// Generate a response from the model server
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// User request to turn into a node sequence
    pub input: String,
}

/// Generate a response and score it
#[derive(Debug, Args)]
pub struct RunArgs {
    /// User request to turn into a node sequence
    pub input: String,

    /// Expected (reference) output
    #[arg(short, long, conflicts_with = "expected_file")]
    pub expected: Option<String>,

    /// Read the expected output from a file
    #[arg(long, value_name = "FILE")]
    pub expected_file: Option<PathBuf>,
}

/// Execute the generate command
pub async fn execute(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let text = generate(ctx, &args.input).await?;
    ctx.output.write_generation(&text)
}

/// Execute the run command
pub async fn execute_run(ctx: &Context, args: RunArgs) -> Result<()> {
    let expected = read_text(args.expected, args.expected_file.as_deref(), "expected")?;
    let predicted = generate(ctx, &args.input).await?;
    ctx.output.info(&format!("Response:\n{}", predicted));

    let report = ctx.evaluator.evaluate_bytes(predicted.as_bytes(), &expected)?;
    ctx.output.write(&report)
}

pub(crate) async fn generate(ctx: &Context, input: &str) -> Result<String> {
    let generator = ctx.generator()?;
    let template = ctx.template()?;
    let params = ctx.config.inference.generation_params();

    let spinner = ctx.output.spinner("Generating response...");
    let result = llm_inference(input, &generator, &template, &params).await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    Ok(result?)
}
