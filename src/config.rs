use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Upper bound for the dead-timeout sentinel, in milliseconds.
pub const MAX_DEAD_TIMEOUT_MS: f64 = 10_000.0;

pub const DEFAULT_TIMEOUT_MS: u64 = 150;
pub const DEFAULT_INTERVAL_SECS: f64 = 0.1;
pub const DEFAULT_DEAD_TIMEOUT_MS: f64 = 500.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn label(self) -> &'static str {
        match self {
            AddressFamily::V4 => "IPv4",
            AddressFamily::V6 => "IPv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("interval must be a finite, non-negative number of seconds (got {value})")]
    InvalidInterval { value: f64 },
    #[error(
        "dead timeout {value} ms out of range: must be between the timeout ({timeout_ms} ms) and 10000 ms"
    )]
    DeadTimeoutOutOfRange { value: f64, timeout_ms: u64 },
}

/// Session settings. Immutable once the monitor has started.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    pub timeout: Duration,
    pub interval: Duration,
    pub dead_timeout_ms: f64,
    pub family: AddressFamily,
}

impl MonitorConfig {
    pub fn new(
        timeout_ms: u64,
        interval_secs: f64,
        dead_timeout_ms: f64,
        family: AddressFamily,
    ) -> Result<Self, ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !interval_secs.is_finite() || interval_secs < 0.0 {
            return Err(ConfigError::InvalidInterval {
                value: interval_secs,
            });
        }
        if !dead_timeout_ms.is_finite()
            || dead_timeout_ms > MAX_DEAD_TIMEOUT_MS
            || dead_timeout_ms < timeout_ms as f64
        {
            return Err(ConfigError::DeadTimeoutOutOfRange {
                value: dead_timeout_ms,
                timeout_ms,
            });
        }

        Ok(Self {
            timeout: Duration::from_millis(timeout_ms),
            interval: Duration::from_secs_f64(interval_secs),
            dead_timeout_ms,
            family,
        })
    }

    pub fn timeout_ms(&self) -> f64 {
        self.timeout.as_secs_f64() * 1000.0
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            interval: Duration::from_secs_f64(DEFAULT_INTERVAL_SECS),
            dead_timeout_ms: DEFAULT_DEAD_TIMEOUT_MS,
            family: AddressFamily::V4,
        }
    }
}
