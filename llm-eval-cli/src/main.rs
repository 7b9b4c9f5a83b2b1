use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod context;
mod output;

use cli::{Cli, Commands};
use context::Context;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::new(&cli)?;
    init_tracing(&ctx.config.log_level, ctx.config.log_json, cli.verbose);
    tracing::debug!(command = ?cli.command, "starting llm-eval");

    match cli.command {
        Commands::Evaluate(args) => commands::evaluate::execute(&ctx, args).await,
        Commands::Generate(args) => commands::generate::execute(&ctx, args).await,
        Commands::Run(args) => commands::generate::execute_run(&ctx, args).await,
        Commands::Interactive => commands::interactive::execute(&ctx).await,
    }
}

/// Logs go to stderr so machine-readable output on stdout stays clean.
fn init_tracing(level: &str, json: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default = if verbose { "debug" } else { level };
        EnvFilter::new(format!("warn,llm_eval_cli={0},llm_eval_metrics={0},llm_eval_inference={0}", default))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
