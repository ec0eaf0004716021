//! Data access settings loaded via OrthoConfig.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Open-data endpoint serving San Francisco street names.
pub const DEFAULT_STREET_NAMES_URI: &str = "http://data.sfgov.org/resource/6d9h-4u5v.json";
const DEFAULT_MAX_POLLS: u32 = 600;

/// Which controller the demo binary drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerVariant {
    /// Fetch in the controller, swallow failures.
    Bad,
    /// Fetch in the controller, settle on every outcome.
    SimpleGood,
    /// Delegate to the loading-status registry.
    #[default]
    Better,
}

impl fmt::Display for ControllerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bad => "bad",
            Self::SimpleGood => "simple-good",
            Self::Better => "better",
        })
    }
}

impl FromStr for ControllerVariant {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bad" => Ok(Self::Bad),
            "simple-good" | "simple_good" => Ok(Self::SimpleGood),
            "better" => Ok(Self::Better),
            _ => Err(SettingsError::UnknownVariant {
                value: value.to_owned(),
            }),
        }
    }
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The configured street-names URI is not a valid URL.
    #[error("invalid street names uri {value:?}: {message}")]
    InvalidUri {
        /// Raw configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The configured controller variant is not recognised.
    #[error("unknown controller variant {value:?}; expected bad, simple-good or better")]
    UnknownVariant {
        /// Raw configured value.
        value: String,
    },
}

/// Configuration values for the street-name demo.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATA_ACCESS")]
pub struct DataAccessSettings {
    /// Override for the street-names endpoint.
    pub street_names_uri: Option<String>,
    /// Optional per-request timeout in milliseconds; unset means none.
    pub request_timeout_ms: Option<u64>,
    /// Controller variant: `bad`, `simple-good` or `better`.
    pub variant: Option<String>,
    /// Interval between view polls in milliseconds.
    #[ortho_config(default = 100)]
    pub poll_interval_ms: u64,
    /// Upper bound on view polls before the demo gives up.
    pub max_polls: Option<u32>,
}

impl DataAccessSettings {
    /// Return the configured endpoint, falling back to the SF open-data URI.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUri`] when the value does not parse.
    pub fn street_names_uri(&self) -> Result<Url, SettingsError> {
        let raw = self
            .street_names_uri
            .as_deref()
            .unwrap_or(DEFAULT_STREET_NAMES_URI);
        Url::parse(raw).map_err(|error| SettingsError::InvalidUri {
            value: raw.to_owned(),
            message: error.to_string(),
        })
    }

    /// Return the request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Return the configured controller variant, defaulting to `better`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownVariant`] for unrecognised values.
    pub fn variant(&self) -> Result<ControllerVariant, SettingsError> {
        self.variant
            .as_deref()
            .map_or(Ok(ControllerVariant::default()), str::parse)
    }

    /// Return the view poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Return the maximum number of view polls.
    pub fn max_polls(&self) -> u32 {
        self.max_polls.unwrap_or(DEFAULT_MAX_POLLS).max(1)
    }
}
