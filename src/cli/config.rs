use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::{error::GroundingError, grounding::config::GroundingConfig};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-grounding",
    version,
    about = "Bind vision-model form elements to live DOM elements"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-grounding.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Ground visual elements on the rayon thread pool (ignored when a trace file is set)
    #[arg(long, global = true)]
    pub parallel: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ground every visual element against a DOM snapshot
    Ground {
        /// Perception output or visual descriptor array (JSON)
        #[arg(long)]
        visual: String,

        /// DOM snapshot array (JSON)
        #[arg(long)]
        dom: String,

        /// Output format: console, json
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Append JSONL trace events to this file
        #[arg(long)]
        trace: Option<String>,
    },

    /// Show how every DOM candidate scores against one visual element
    Explain {
        /// Perception output or visual descriptor array (JSON)
        #[arg(long)]
        visual: String,

        /// DOM snapshot array (JSON)
        #[arg(long)]
        dom: String,

        /// Zero-based index of the visual element to explain
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-grounding.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub grounding: GroundingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub trace_file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_console(),
            trace_file: None,
        }
    }
}

fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-grounding.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content),
        Err(_) => AppConfig::default(),
    }
}

/// Parse YAML config text, falling back to defaults when it does not parse.
pub fn parse_config(content: &str) -> AppConfig {
    try_parse_config(content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default config");
        AppConfig::default()
    })
}

pub fn try_parse_config(content: &str) -> Result<AppConfig, GroundingError> {
    serde_yaml::from_str(content).map_err(|source| GroundingError::YamlParse {
        context: "config file".to_string(),
        source,
    })
}

/// CLI flag wins over config file, config file over the built-in default.
pub fn resolve_format(cli: Option<&str>, config: &AppConfig) -> String {
    cli.map(|s| s.to_string())
        .unwrap_or_else(|| config.output.format.clone())
}

pub fn resolve_trace_file(cli: Option<&str>, config: &AppConfig) -> Option<String> {
    cli.map(|s| s.to_string())
        .or_else(|| config.output.trace_file.clone())
}
