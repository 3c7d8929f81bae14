use jass_net::DEFAULT_PORT;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

/// Fewest search iterations accepted for a simulated seat.
pub const MIN_ITERATIONS: usize = 10;
const DEFAULT_ITERATIONS: usize = 10_000;
const DEFAULT_PACING_MS: u64 = 2_000;
const DEFAULT_TRICK_DELAY_MS: u64 = 1_000;
const DEFAULT_READ_TIMEOUT_MS: u64 = 60_000;

/// Table settings loaded from YAML; every field falls back to its default.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub names: [String; 4],
    pub iterations: usize,
    pub host: String,
    pub port: u16,
    /// Minimum time a simulated seat takes to play a card.
    pub pacing_ms: u64,
    pub trick_delay_ms: u64,
    /// How long a remote seat may take to answer; zero waits forever.
    pub read_timeout_ms: u64,
    pub logging: LoggingConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            names: ["Aline", "Bastien", "Colette", "David"].map(String::from),
            iterations: DEFAULT_ITERATIONS,
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            pacing_ms: DEFAULT_PACING_MS,
            trick_delay_ms: DEFAULT_TRICK_DELAY_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            logging: LoggingConfig::default(),
        }
    }
}

impl TableConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let mut cfg: TableConfig =
            serde_yaml::from_reader(BufReader::new(file)).map_err(|source| {
                ConfigError::Parse {
                    source,
                    path: path_buf.clone(),
                }
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    pub fn validate(&mut self) -> Result<(), ValidationError> {
        for (seat, name) in self.names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: format!("names[{seat}]"),
                    message: "seat name must not be empty".to_string(),
                });
            }
        }

        if self.iterations < MIN_ITERATIONS {
            return Err(ValidationError::InvalidField {
                field: "iterations".to_string(),
                message: format!("at least {MIN_ITERATIONS} iterations are required"),
            });
        }

        if self.host.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "host".to_string(),
                message: "host must not be empty".to_string(),
            });
        }

        if self.port == 0 {
            return Err(ValidationError::InvalidField {
                field: "port".to_string(),
                message: "port must be greater than zero".to_string(),
            });
        }

        self.logging.validate()
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn trick_delay(&self) -> Duration {
        Duration::from_millis(self.trick_delay_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }
}

/// Console level plus an optional JSON-lines log file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_file: None,
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.level.trim().is_empty() {
            self.level = LoggingConfig::default().level;
        }
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: format!("unknown level '{}'", self.level),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
