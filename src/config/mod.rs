use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::midi::reduce::{DEFAULT_DURATION_MS, DEFAULT_MAX_NOTES, ReduceOptions};

/// Highest pin number accepted for the tone output (Arduino Mega range)
const MAX_PIN: u8 = 53;

/// Conversion settings: where the files live and how the sketch plays
///
/// Loaded from an optional YAML file; every field except `input` has a
/// default matching the reference behavior, and CLI flags override the
/// file afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// Folder holding the input MIDI file and the generated sketch
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Input MIDI file name, relative to `base_dir`
    #[serde(default)]
    pub input: String,

    /// Output sketch file name, relative to `base_dir`
    #[serde(default = "default_output")]
    pub output: String,

    /// Arduino pin wired to the buzzer
    #[serde(default = "default_pin")]
    pub pin: u8,

    /// Cap on the number of emitted notes
    #[serde(default = "default_max_notes")]
    pub max_notes: usize,

    /// Substitute duration for notes that convert to 0 ms
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u32,

    /// Factor applied to each note's delay() for audible separation
    #[serde(default = "default_gap_multiplier")]
    pub gap_multiplier: f32,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            input: String::new(),
            output: default_output(),
            pin: default_pin(),
            max_notes: default_max_notes(),
            default_duration_ms: default_duration_ms(),
            gap_multiplier: default_gap_multiplier(),
        }
    }
}

impl ConvertConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ConvertConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration
    /// Called after CLI overrides have been applied
    pub fn validate(&self) -> Result<()> {
        if self.input.is_empty() {
            return Err(anyhow!(
                "No input MIDI file configured (set `input` in the config or pass --input)"
            ));
        }
        if self.output.is_empty() {
            return Err(anyhow!("Output file name must not be empty"));
        }
        if self.pin > MAX_PIN {
            return Err(anyhow!("Pin must be between 0 and {}", MAX_PIN));
        }
        if self.max_notes == 0 {
            return Err(anyhow!("max_notes must be at least 1"));
        }
        if self.default_duration_ms == 0 {
            return Err(anyhow!("default_duration_ms must be at least 1"));
        }
        if self.gap_multiplier < 1.0 || self.gap_multiplier > 4.0 {
            return Err(anyhow!("gap_multiplier must be between 1.0 and 4.0"));
        }
        Ok(())
    }

    /// Full path of the input MIDI file
    pub fn midi_path(&self) -> PathBuf {
        self.base_dir.join(&self.input)
    }

    /// Full path of the generated sketch
    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output)
    }

    /// Reduction knobs for the MIDI scan
    pub fn reduce_options(&self) -> ReduceOptions {
        ReduceOptions {
            max_notes: self.max_notes,
            default_duration_ms: self.default_duration_ms,
        }
    }
}

// Default value functions for serde
fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output() -> String {
    "melody.ino".to_string()
}

fn default_pin() -> u8 {
    4
}

fn default_max_notes() -> usize {
    DEFAULT_MAX_NOTES
}

fn default_duration_ms() -> u32 {
    DEFAULT_DURATION_MS
}

fn default_gap_multiplier() -> f32 {
    1.1
}
