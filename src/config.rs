//! Configuration management for the inventory service.
//!
//! Settings come from environment variables with defaults. A value that is present but
//! malformed is an error naming the variable; it is never replaced by the default.
//!
//! | variable | default |
//! |---|---|
//! | `INVENTORY_BIND_ADDR` | `0.0.0.0:3000` |
//! | `INVENTORY_CHANNEL_CAPACITY` | `32` |
//! | `INVENTORY_DEFAULT_LOW_STOCK_THRESHOLD` | `10` |
//! | `INVENTORY_LOG_FORMAT` | `compact` (or `json`) |

use std::net::SocketAddr;
use std::str::FromStr;

pub const BIND_ADDR_VAR: &str = "INVENTORY_BIND_ADDR";
pub const CHANNEL_CAPACITY_VAR: &str = "INVENTORY_CHANNEL_CAPACITY";
pub const LOW_STOCK_THRESHOLD_VAR: &str = "INVENTORY_DEFAULT_LOW_STOCK_THRESHOLD";
pub const LOG_FORMAT_VAR: &str = "INVENTORY_LOG_FORMAT";

/// Threshold given to products created without one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Capacity of the product actor's request channel. Always at least 1.
    pub channel_capacity: usize,
    /// Threshold applied when a create request omits `low_stock_threshold`.
    pub default_low_stock_threshold: u32,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            channel_capacity: 32,
            default_low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            log_format: LogFormat::Compact,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let channel_capacity = parse_or(&lookup, CHANNEL_CAPACITY_VAR, defaults.channel_capacity)?;
        if channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: CHANNEL_CAPACITY_VAR,
                value: "0".to_string(),
            });
        }

        Ok(Self {
            bind_addr: parse_or(&lookup, BIND_ADDR_VAR, defaults.bind_addr)?,
            channel_capacity,
            default_low_stock_threshold: parse_or(
                &lookup,
                LOW_STOCK_THRESHOLD_VAR,
                defaults.default_low_stock_threshold,
            )?,
            log_format: parse_or(&lookup, LOG_FORMAT_VAR, defaults.log_format)?,
        })
    }

    #[must_use]
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Sets the actor channel capacity. Zero is raised to one.
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_default_low_stock_threshold(mut self, threshold: u32) -> Self {
        self.default_low_stock_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}

fn parse_or<F, V>(lookup: &F, key: &'static str, default: V) -> Result<V, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    V: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
