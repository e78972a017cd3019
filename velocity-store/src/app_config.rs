use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub forecasting: ForecastingConfig,
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub rates: RateConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Tunables of the history aggregation and demand forecasting stages
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ForecastingConfig {
    /// How far back booking history is read
    pub lookback_days: i64,
    /// Minimum bookings in the lookback window before any forecast is attempted
    pub min_history_bookings: usize,
    /// Minimum daily points a room type needs to be forecast
    pub min_series_points: usize,
    pub default_days_ahead: u32,
    pub weekend_multiplier: f64,
    /// Floor for the predicted ADR
    pub min_rate: f64,
    pub confidence_start: f64,
    pub confidence_decay: f64,
    pub confidence_floor: f64,
}

impl Default for ForecastingConfig {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            min_history_bookings: 10,
            min_series_points: 5,
            default_days_ahead: 30,
            weekend_multiplier: 1.3,
            min_rate: 50.0,
            confidence_start: 0.9,
            confidence_decay: 0.01,
            confidence_floor: 0.3,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AllocationConfig {
    pub default_days_ahead: u32,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self { default_days_ahead: 30 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RateConfig {
    pub default_days_ahead: u32,
    /// Used when the hotel has no room of the forecast's type
    pub default_current_rate: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            default_days_ahead: 7,
            default_current_rate: 100.0,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `VELOCITY_SERVER__PORT=9000` sets `server.port`
            .add_source(config::Environment::with_prefix("VELOCITY").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
