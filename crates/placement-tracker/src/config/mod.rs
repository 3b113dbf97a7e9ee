use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::workflows::placement::PlacementPolicy;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
    pub policy: PlacementPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = env::var("APP_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = PlacementPolicy::default();
        let policy = PlacementPolicy {
            max_postings_per_representative: limit_var(
                "PLACEMENT_MAX_POSTINGS",
                defaults.max_postings_per_representative,
            )?,
            max_pending_applications: limit_var(
                "PLACEMENT_MAX_PENDING_APPLICATIONS",
                defaults.max_pending_applications,
            )?,
            max_slots: limit_var("PLACEMENT_MAX_SLOTS", defaults.max_slots)?,
        };

        Ok(Self {
            environment,
            storage: StorageConfig {
                data_dir: PathBuf::from(data_dir),
            },
            telemetry: TelemetryConfig { log_level },
            policy,
        })
    }
}

/// Reads a positive integer override, falling back to `default` when unset.
fn limit_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + From<u8>,
{
    match env::var(var) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value != T::from(0) => Ok(value),
            _ => Err(ConfigError::InvalidLimit { var, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

/// Location of the CSV data directory.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLimit { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLimit { var, value } => {
                write!(f, "{var} must be a positive integer (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serializes tests that read or write process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}
