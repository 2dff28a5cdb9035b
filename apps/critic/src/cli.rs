use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::analysis::model::LlmCritiqueModel;
use crate::analysis::{analyze_file, parse_critique_file};
use crate::config::Config;
use crate::critique::CritiqueParser;
use crate::errors::AppError;

#[derive(Debug, Parser)]
#[command(
    name = "critic",
    about = "Critiques a resume and parses the critique into scores and sections",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a resume, have the model critique it, and print the report
    Analyze {
        /// Path to a .pdf, .txt or .md resume
        resume: PathBuf,
    },

    /// Parse an existing critique file without calling the model
    Parse {
        /// Path to a free-text critique
        critique: PathBuf,
    },
}

/// Runs one command and returns the pretty-printed JSON to print on stdout.
pub async fn run(command: Command, config: &Config) -> Result<String, AppError> {
    let parser = CritiqueParser::new(config.score_policy);
    info!("Critique parser initialized (score policy: {})", parser.policy());

    match command {
        Command::Analyze { resume } => {
            let model = LlmCritiqueModel::from_settings(config.llm_settings()?)?;
            info!("LLM client initialized (model: {})", model.model());
            let report = analyze_file(&resume, &model, &parser, rand::thread_rng).await?;
            to_pretty_json(&report)
        }
        Command::Parse { critique } => {
            let parsed = parse_critique_file(&critique, &parser, &mut rand::thread_rng())?;
            to_pretty_json(&parsed)
        }
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    Ok(json)
}
