//! Configuration file parsing
//!
//! `config.txt` holds one `key value` pair per line; `#` starts a comment.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use log::{debug, warn};

use crate::analysis::AnalysisOptions;
use crate::error::InsightsError;
use crate::units::GlucoseUnit;

const APP_DIR: &str = "glucose-insights";
const CONFIG_FILE: &str = "config.txt";

/// Largest accepted duplicate window: one day
pub const MAX_DUPLICATE_WINDOW_MINUTES: i64 = 24 * 60;

const DEFAULT_CONFIG: &str = "\
# glucose-insights configuration
# Range thresholds in mg/dL
very_low_threshold 54
low_threshold 70
high_threshold 180
very_high_threshold 250

# Readings closer than this are treated as duplicates
duplicate_window_minutes 5

# Hourly profile confidence: medium from this count, high from twice it
minimum_readings_per_hour 3

# Hour-of-day grouping zone: local, or an offset such as +02:00
utc_offset local

# Display unit for reports: mg/dL or mmol/L
unit mg/dL
";

/// Configuration loaded from config.txt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub options: AnalysisOptions,
    pub unit: GlucoseUnit,
}

impl Config {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InsightsError> {
        let file = File::open(path.as_ref())?;
        debug!("Loading config from {}", path.as_ref().display());
        Self::from_reader(BufReader::new(file))
    }

    /// Try the OS config directory, then the working directory
    pub fn load_default() -> Result<Self, InsightsError> {
        Self::load_first(&[config_file_path(), PathBuf::from(CONFIG_FILE)])
    }

    /// Load the first candidate that exists.
    ///
    /// Only a missing file moves on to the next candidate; any other error is
    /// returned. When none exist, the last `NotFound` error is returned.
    pub fn load_first<P: AsRef<Path>>(candidates: &[P]) -> Result<Self, InsightsError> {
        let mut last_missing = None;
        for path in candidates {
            match Self::load(path) {
                Err(InsightsError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                    debug!("No config at {}", path.as_ref().display());
                    last_missing = Some(e);
                }
                result => return result,
            }
        }
        Err(InsightsError::Io(
            last_missing.unwrap_or_else(|| std::io::Error::new(ErrorKind::NotFound, "no config candidates")),
        ))
    }

    /// Whether an error only means that no config file exists
    pub fn is_missing(error: &InsightsError) -> bool {
        matches!(error, InsightsError::Io(e) if e.kind() == ErrorKind::NotFound)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, InsightsError> {
        let mut config = Config::default();

        for line in reader.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse "key value" or "key value # comment"
            if let Some((key, rest)) = Self::parse_line(line) {
                let value = rest.split('#').next().unwrap_or("").trim();
                config.apply(key, value)?;
            }
        }

        Ok(config)
    }

    /// Write a commented default config, creating parent directories
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<(), InsightsError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(DEFAULT_CONFIG.as_bytes())?;
        Ok(())
    }

    /// Parse a single config line, returning (key, value)
    fn parse_line(line: &str) -> Option<(&str, &str)> {
        // Find first whitespace to separate key from value
        let mut parts = line.splitn(2, |c: char| c.is_whitespace());
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();

        if key.is_empty() || value.is_empty() {
            return None;
        }

        Some((key, value))
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), InsightsError> {
        match key {
            "very_low_threshold" => self.options.thresholds.very_low_threshold = parse_number(key, value)?,
            "low_threshold" => self.options.thresholds.low_threshold = parse_number(key, value)?,
            "high_threshold" => self.options.thresholds.high_threshold = parse_number(key, value)?,
            "very_high_threshold" => self.options.thresholds.very_high_threshold = parse_number(key, value)?,
            "duplicate_window_minutes" => {
                let minutes: i64 = parse_number(key, value)?;
                if !(0..=MAX_DUPLICATE_WINDOW_MINUTES).contains(&minutes) {
                    return Err(InsightsError::Config(format!(
                        "duplicate_window_minutes must be between 0 and {}, got {}",
                        MAX_DUPLICATE_WINDOW_MINUTES, minutes
                    )));
                }
                self.options.duplicate_window_minutes = minutes
            }
            "minimum_readings_per_hour" => self.options.minimum_readings_per_hour = parse_number(key, value)?,
            "utc_offset" => self.options.utc_offset = parse_offset(value)?,
            "unit" => {
                self.unit = GlucoseUnit::parse(value)
                    .ok_or_else(|| InsightsError::Config(format!("unknown unit '{}'", value)))?
            }
            _ => warn!("Ignoring unknown config key '{}'", key),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, InsightsError> {
    value
        .parse()
        .map_err(|_| InsightsError::Config(format!("invalid value '{}' for {}", value, key)))
}

/// `local` means no fixed offset
pub fn parse_offset(value: &str) -> Result<Option<FixedOffset>, InsightsError> {
    match value {
        "local" => Ok(None),
        "Z" | "UTC" | "utc" => Ok(FixedOffset::east_opt(0)),
        _ => value
            .parse::<FixedOffset>()
            .map(Some)
            .map_err(|_| InsightsError::Config(format!("invalid utc_offset '{}'", value))),
    }
}

/// OS-specific configuration directory for this tool
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn config_file_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}
