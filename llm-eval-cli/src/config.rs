//! Layered configuration: project files, user file, explicit file, environment

use anyhow::{Context as _, Result};
use config::{Config as ConfigLoader, Environment, File};
use directories::ProjectDirs;
use llm_eval_inference::InferenceConfig;
use llm_eval_metrics::MetricsConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `LLM_EVAL_METRICS__BLEU_SMOOTH=true`
pub const ENV_PREFIX: &str = "LLM_EVAL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_json: bool,
    pub metrics: MetricsConfig,
    pub inference: InferenceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics: MetricsConfig::default(),
            inference: InferenceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Later sources override earlier ones; every source is optional except
    /// an explicitly requested file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = Self::user_config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("metrics.rouge_types"),
            )
            .build()
            .context("Failed to load configuration")?;

        let app: AppConfig = config
            .try_deserialize()
            .context("Invalid configuration")?;
        app.metrics.validate()?;

        Ok(app)
    }

    /// `config.toml` in the platform configuration directory
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "llm-eval", "llm-eval").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
