//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use llm_eval_core::MetricReport;
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain `Metrics:` block
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Output writer that handles different formats
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format }
    }

    /// Write a single item
    pub fn write<T: Serialize + TableDisplay>(&self, item: &T) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                item.display_single();
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(item)?;
                println!("{}", json);
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(item)?;
                print!("{}", yaml);
            }
            OutputFormat::Text => {
                println!("{}", item.to_text());
            }
        }
        Ok(())
    }

    /// Write generated text: raw in table/text mode, wrapped otherwise
    pub fn write_generation(&self, text: &str) -> Result<()> {
        match self.format {
            OutputFormat::Table | OutputFormat::Text => println!("{}", text),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "generated_text": text }))?)
            }
            OutputFormat::Yaml => {
                print!("{}", serde_yaml::to_string(&serde_json::json!({ "generated_text": text }))?)
            }
        }
        Ok(())
    }

    /// Write an error message
    pub fn error(&self, message: &str) {
        if self.format == OutputFormat::Table {
            eprintln!("{} {}", "✗".red(), message);
        } else {
            eprintln!("Error: {}", message);
        }
    }

    /// Write an info message
    pub fn info(&self, message: &str) {
        if self.format == OutputFormat::Table {
            eprintln!("{} {}", "ℹ".blue(), message);
        }
    }

    /// Start a spinner for long operations
    pub fn spinner(&self, message: &str) -> Option<indicatif::ProgressBar> {
        if self.format == OutputFormat::Table {
            let pb = indicatif::ProgressBar::new_spinner();
            if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                pb.set_style(style);
            }
            pb.set_message(message.to_string());
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        }
    }
}

/// Trait for displaying items outside of serde formats
pub trait TableDisplay {
    /// Display a single item in detail
    fn display_single(&self);

    /// Plain-text rendering
    fn to_text(&self) -> String;
}

impl TableDisplay for MetricReport {
    fn display_single(&self) {
        print_section("BLEU");
        let precisions: Vec<String> = self.bleu.precisions.iter().map(|p| format!("{:.4}", p)).collect();
        print_field("Score", &format!("{:.4}", self.bleu.bleu));
        print_field("Precisions", &precisions.join(" / "));
        print_field("Brevity penalty", &format!("{:.4}", self.bleu.brevity_penalty));
        print_field("Length ratio", &format!("{:.4}", self.bleu.length_ratio));
        print_field(
            "Lengths",
            &format!(
                "{} translation / {} reference",
                self.bleu.translation_length, self.bleu.reference_length
            ),
        );

        print_section("ROUGE");
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.apply_modifier(UTF8_ROUND_CORNERS);
        table.set_header(
            ["Variant", "Precision", "Recall", "F-measure"]
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
        for (variant, score) in self.rouge.iter() {
            table.add_row(vec![
                Cell::new(variant),
                Cell::new(format!("{:.4}", score.precision)),
                Cell::new(format!("{:.4}", score.recall)),
                Cell::new(format!("{:.4}", score.fmeasure)).fg(Color::Green),
            ]);
        }
        println!("{table}");

        print_section("Edit distance");
        print_field("MED (Average)", &format!("{:.4}", self.med_average));
        print_field("Lines scored", &self.lines_scored.to_string());
    }

    fn to_text(&self) -> String {
        let bleu = serde_json::to_string(&self.bleu).unwrap_or_default();
        let rouge: serde_json::Map<String, serde_json::Value> = self
            .rouge
            .iter()
            .map(|(variant, score)| (variant.to_string(), serde_json::json!(score.fmeasure)))
            .collect();
        format!(
            "Metrics:\nBLEU: {}\nROUGE: {}\nMED (Average): {}",
            bleu,
            serde_json::Value::Object(rouge),
            self.med_average
        )
    }
}

/// Print a key-value pair in detail format
pub fn print_field(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_eval_metrics::compute_metrics;

    #[test]
    fn test_text_rendering() {
        let report = compute_metrics("abc", "abd").unwrap();
        let text = report.to_text();

        assert!(text.starts_with("Metrics:\nBLEU: {"));
        assert!(text.contains("\nROUGE: {\"rouge1\":"));
        assert!(text.ends_with("\nMED (Average): 1"));
    }
}
