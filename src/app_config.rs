use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::language_utils;
use crate::subtitle_processor::ConversionOptions;

/// Application configuration module
/// This module handles loading and validating the conversion defaults that
/// can be kept in a JSON file next to the transcripts.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Language tag written to the `Language:` header, empty for none
    #[serde(default)]
    pub language: String,

    /// Prefix cue text with the speaker name
    #[serde(default)]
    pub speakers: bool,

    /// Preserve noise such as laughter or silence
    #[serde(default)]
    pub noise: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load a configuration file, or the defaults if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.language.chars().any(char::is_whitespace) {
            return Err(AppError::Config(format!(
                "Language tag must not contain whitespace: {:?}",
                self.language
            ))
            .into());
        }

        // Any tag is passed through, but a typo is worth pointing out
        if !self.language.is_empty() && language_utils::validate_language_code(&self.language).is_err() {
            warn!("Language tag '{}' is not an ISO 639 code, writing it as is", self.language);
        }

        Ok(())
    }

    /// Switches for the converter
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            language: self.language.clone(),
            add_speakers: self.speakers,
            preserve_noise: self.noise,
        }
    }
}
