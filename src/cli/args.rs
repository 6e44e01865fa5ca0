//! Command line argument parsing
//!
//! This module handles CLI argument parsing with subcommands:
//! - `generate`: Generate text through the provider fallback chain
//! - `enhance`: Rewrite a prompt with the master prompt and report the improvement
//! - `score`: Numeric quality summary
//! - `heatmap`: Per-dimension quality report with suggestions
//! - `classify`: Category and intent detection
//! - `variations`: Generate concise/detailed/structured rewrites
//! - `show-config`: Show configuration discovery information

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

/// Prompt argument value that means "read standard input"
pub const STDIN_MARKER: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "promptx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prompt enhancement and scoring across multiple LLM providers with automatic fallback")]
#[command(long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate text from a prompt using the first provider that succeeds
    Generate {
        /// Prompt text, or '-' to read stdin
        prompt: String,
        /// Output token budget
        #[arg(long = "max-tokens", value_name = "N")]
        max_tokens: Option<u32>,
    },
    /// Rewrite a prompt into a structured, high-quality prompt
    Enhance {
        /// Prompt text, or '-' to read stdin
        prompt: String,
    },
    /// Score a prompt (total, percentage, label)
    Score {
        /// Prompt text, or '-' to read stdin
        prompt: String,
    },
    /// Per-dimension quality heatmap with suggestions
    Heatmap {
        /// Prompt text, or '-' to read stdin
        prompt: String,
    },
    /// Detect the prompt's category and intent
    Classify {
        /// Prompt text, or '-' to read stdin
        prompt: String,
    },
    /// Generate concise, detailed and structured variations
    Variations {
        /// Prompt text, or '-' to read stdin
        prompt: String,
        /// Skip scoring and best-variation selection
        #[arg(long = "no-compare")]
        no_compare: bool,
    },
    /// Show configuration discovery information
    ShowConfig,
}

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Prompt carried by the subcommand, if any
    pub fn prompt_arg(&self) -> Option<&str> {
        match &self.command {
            Commands::Generate { prompt, .. }
            | Commands::Enhance { prompt }
            | Commands::Score { prompt }
            | Commands::Heatmap { prompt }
            | Commands::Classify { prompt }
            | Commands::Variations { prompt, .. } => Some(prompt),
            Commands::ShowConfig => None,
        }
    }

    /// Whether the subcommand needs provider adapters
    pub fn needs_providers(&self) -> bool {
        matches!(
            self.command,
            Commands::Generate { .. } | Commands::Enhance { .. } | Commands::Variations { .. }
        )
    }
}

/// Resolve a prompt argument, reading `reader` to the end when it is `-`.
pub fn resolve_prompt<R: Read>(arg: &str, mut reader: R) -> std::io::Result<String> {
    if arg != STDIN_MARKER {
        return Ok(arg.to_string());
    }
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    Ok(buffer)
}
