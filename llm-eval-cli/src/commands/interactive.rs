//! Menu-driven session mirroring the input / predicted / expected form

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Editor, Input, Select};

use crate::commands::generate::generate;
use crate::context::Context;
use crate::output::TableDisplay;

const ACTIONS: [&str; 4] = ["Generate response", "Evaluate", "Clear", "Quit"];

/// The three text fields of a session
#[derive(Debug, Default)]
struct Fields {
    input: String,
    predicted: String,
    expected: String,
}

impl Fields {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Execute the interactive command
pub async fn execute(ctx: &Context) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut fields = Fields::default();

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("LLM interface with evaluation")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                fields.input = Input::<String>::with_theme(&theme)
                    .with_prompt("Input text")
                    .with_initial_text(fields.input.clone())
                    .interact_text()?;

                match generate(ctx, &fields.input).await {
                    Ok(text) => {
                        println!("{}", text);
                        fields.predicted = text;
                    }
                    Err(err) => ctx.output.error(&format!("Error in generation: {:#}", err)),
                }
            }
            1 => {
                fields.predicted = edit(&fields.predicted, "Predicted output")?;
                fields.expected = edit(&fields.expected, "Expected output")?;
                println!("{}", evaluate_response(ctx, &fields.predicted, &fields.expected));
            }
            2 => {
                fields.clear();
                ctx.output.info("Cleared input, predicted and expected text.");
            }
            _ => return Ok(()),
        }
    }
}

/// Open the user's editor on a field, keeping the old value if the edit is aborted
fn edit(current: &str, label: &str) -> Result<String> {
    println!("Opening editor for {}...", label);
    let edited = Editor::new().extension(".txt").edit(current)?;
    Ok(edited.unwrap_or_else(|| current.to_string()))
}

/// Metrics block, or the error message when evaluation fails
fn evaluate_response(ctx: &Context, predicted: &str, expected: &str) -> String {
    match ctx.evaluator.evaluate(predicted, expected) {
        Ok(report) => report.to_text(),
        Err(err) => format!("Error in evaluation: {}", err),
    }
}
