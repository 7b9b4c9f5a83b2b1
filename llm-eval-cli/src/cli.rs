//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{evaluate::EvaluateArgs, generate::GenerateArgs, generate::RunArgs};
use crate::output::OutputFormat;

/// Score LLM output against reference text with BLEU, ROUGE and edit distance
#[derive(Debug, Parser)]
#[command(name = "llm-eval", version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Additional configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Model server URL, overriding the configured endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a predicted text against an expected text
    Evaluate(EvaluateArgs),

    /// Generate a response from the model server
    Generate(GenerateArgs),

    /// Generate a response and score it against an expected text
    Run(RunArgs),

    /// Menu-driven session: generate, evaluate, clear
    Interactive,
}
