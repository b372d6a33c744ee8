use std::path::PathBuf;

use chrono::{Datelike, Local};

use crate::error::ConfigError;
use crate::profile::{self, PatternProfile};

pub const DEFAULT_SERVER_NAME: &str = "fukuoka";
pub const DEFAULT_SERVER_TYPE: &str = "sp";

const DIAGNOSTICS_FILE: &str = "unusual.txt";
const INVALID_FILE: &str = "invalid.txt";

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root of the access log tree.
    pub log_dir: PathBuf,
    /// Target month, 1-12.
    pub month: u32,
    pub server_name: String,
    pub server_type: String,
    /// Where the report and the rejected-line files go.
    pub output_dir: PathBuf,
    /// Also write unmatched lines to `invalid.txt`.
    pub collect_invalid: bool,
}

impl Config {
    pub fn new<P: Into<PathBuf>>(log_dir: P) -> Config {
        Config {
            log_dir: log_dir.into(),
            month: previous_month(Local::now().month()),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_type: DEFAULT_SERVER_TYPE.to_string(),
            output_dir: PathBuf::from("./"),
            collect_invalid: false,
        }
    }

    pub fn parse_month(value: &str) -> Result<u32, ConfigError> {
        match value.trim().parse::<u32>() {
            Ok(month) if (1..=12).contains(&month) => Ok(month),
            _ => Err(ConfigError::InvalidMonth(value.to_string())),
        }
    }

    /// Checks everything that must hold before the first line is read and returns the
    /// profile to analyse with.
    pub fn validate(&self) -> Result<&'static PatternProfile, ConfigError> {
        if !(1..=12).contains(&self.month) {
            return Err(ConfigError::InvalidMonth(self.month.to_string()));
        }
        let profile = profile::resolve(&self.server_name, &self.server_type)?;
        if !self.log_dir.exists() {
            return Err(ConfigError::MissingInput(self.log_dir.clone()));
        }
        Ok(profile)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}-{}-{}.json",
            self.server_name, self.server_type, self.month
        ))
    }

    pub fn diagnostics_path(&self) -> PathBuf {
        self.output_dir.join(DIAGNOSTICS_FILE)
    }

    pub fn invalid_path(&self) -> PathBuf {
        self.output_dir.join(INVALID_FILE)
    }
}

fn previous_month(month: u32) -> u32 {
    if month == 1 {
        12
    } else {
        month - 1
    }
}
