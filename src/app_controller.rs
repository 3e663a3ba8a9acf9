use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::io::Write;
use std::path::Path;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::subtitle_processor;
use crate::transcript::Transcript;

// @module: Application controller for transcript conversion

/// Main application controller: one read, one conversion, one write
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        if let Ok(name) = language_utils::get_language_name(&config.language) {
            info!("Captions labelled as {} ({})", name, config.language);
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read a TRS file and return its WebVTT rendering
    pub fn convert_file<P: AsRef<Path>>(&self, input_file: P) -> Result<String> {
        let input_file = input_file.as_ref();
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let xml = FileManager::read_transcript(input_file)?;
        let transcript = Transcript::parse(&xml)
            .with_context(|| format!("Failed to read transcript: {:?}", input_file))?;
        debug!(
            "Parsed {:?}: {} section(s), {} turn(s)",
            input_file,
            transcript.sections.len(),
            transcript.turns().count()
        );

        let vtt = subtitle_processor::convert(&transcript, &self.config.conversion_options())
            .with_context(|| format!("Failed to convert transcript: {:?}", input_file))?;

        Ok(vtt)
    }

    /// Convert `input_file` and write the result to `output_file`, or stdout when `None`
    pub fn run<P: AsRef<Path>>(&self, input_file: P, output_file: Option<&Path>, force_overwrite: bool) -> Result<()> {
        // Refuse before doing any work
        if let Some(output_file) = output_file {
            if output_file.exists() && !force_overwrite {
                return Err(anyhow!(
                    "Output file already exists: {:?}. Use -f to force overwrite.",
                    output_file
                ));
            }
        }

        let vtt = self.convert_file(input_file.as_ref())?;

        match output_file {
            Some(output_file) => {
                FileManager::write_to_file(output_file, &vtt)?;
                info!("Success: {:?}", output_file);
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(vtt.as_bytes())
                    .context("Failed to write to stdout")?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}
