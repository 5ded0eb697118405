//! Settings that control how the updater treats missing and existing records.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::Error;

/// What to do when yesterday's record does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPreviousPolicy {
    /// Open today with zero gold, silver and cash.
    #[default]
    ZeroFill,
    /// Write nothing and warn.
    Skip,
}

/// What to do when today's record already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExistingRecordPolicy {
    /// Leave the existing record untouched.
    #[default]
    Skip,
    /// Replace the existing record with a freshly carried forward one.
    Overwrite,
}

/// The timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Configuration for a single carry-forward run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Policy for a missing previous record.
    pub on_missing_previous: MissingPreviousPolicy,
    /// Policy for an existing record for today.
    pub on_existing: ExistingRecordPolicy,
    /// The canonical timezone name, e.g. "Pacific/Auckland", in which
    /// calendar days are counted.
    pub timezone: String,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            on_missing_previous: MissingPreviousPolicy::default(),
            on_existing: ExistingRecordPolicy::default(),
            timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }
}

impl UpdaterConfig {
    /// Parse a configuration from JSON text. Missing fields take their
    /// default values.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|error| Error::InvalidConfig(error.to_string()))
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|error| Error::InvalidConfig(format!("could not read {path:?}: {error}")))?;

        Self::from_json(&text)
    }

    /// Replace the values that were given on the command line.
    pub fn with_overrides(
        mut self,
        on_missing_previous: Option<MissingPreviousPolicy>,
        on_existing: Option<ExistingRecordPolicy>,
        timezone: Option<&str>,
    ) -> Self {
        if let Some(policy) = on_missing_previous {
            self.on_missing_previous = policy;
        }

        if let Some(policy) = on_existing {
            self.on_existing = policy;
        }

        if let Some(timezone) = timezone {
            self.timezone = timezone.to_owned();
        }

        self
    }
}
