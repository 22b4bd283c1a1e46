//! Configuration management for the resume evaluator

use crate::error::{Result, ResumeEvaluatorError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Characters of resume text echoed back in reports
    pub preview_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub enable_cache: bool,
    pub resume_extensions: Vec<String>,
    pub job_extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig { preview_chars: 500 },
            input: InputConfig {
                enable_cache: true,
                resume_extensions: ["pdf", "doc", "docx", "txt", "md"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                job_extensions: ["txt", "md"].iter().map(|s| s.to_string()).collect(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing the defaults on first run.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeEvaluatorError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeEvaluatorError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Overwrite `config_path` with the defaults and return them.
    pub fn reset(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-evaluator")
            .join("config.toml")
    }

    /// Set a value by dotted key, e.g. `output.format` or `analysis.preview_chars`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "analysis.preview_chars" => {
                self.analysis.preview_chars = value.trim().parse().map_err(|_| {
                    ResumeEvaluatorError::Configuration(format!(
                        "preview_chars must be a non-negative integer, got '{}'",
                        value
                    ))
                })?;
            }
            "input.enable_cache" => self.input.enable_cache = parse_bool(key, value)?,
            "output.detailed" => self.output.detailed = parse_bool(key, value)?,
            "output.color_output" => self.output.color_output = parse_bool(key, value)?,
            "output.format" => {
                self.output.format = OutputFormat::parse(value)
                    .map_err(ResumeEvaluatorError::Configuration)?;
            }
            _ => {
                return Err(ResumeEvaluatorError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

impl OutputFormat {
    pub fn parse(format: &str) -> std::result::Result<Self, String> {
        match format.trim().to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid output format: {}. Supported: console, json, markdown",
                format
            )),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ResumeEvaluatorError::Configuration(format!(
            "{} expects a boolean, got '{}'",
            key, value
        ))),
    }
}
