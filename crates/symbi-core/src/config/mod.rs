//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SYMBI_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DRIFT_ALPHA, DEFAULT_DRIFT_CONTROL_LIMIT, DEFAULT_DRIFT_WINDOW,
    DEFAULT_PROCESSING_TIMEOUT_MS, DRIFT_MIN_POINTS, MAX_DRIFT_WINDOW,
};
use crate::drift::DriftConfig;
use crate::pipeline::PipelineConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SYMBI_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory for the file-backed record store. `None` keeps records in memory.
    pub storage_path: Option<PathBuf>,

    /// Background scoring timeout in milliseconds. Default: `30_000`.
    pub processing_timeout_ms: u64,

    /// Complete records in the drift window, newest included. Default: `10`.
    pub drift_window: usize,

    /// EWMA smoothing factor. Default: `0.3`.
    pub drift_alpha: f64,

    /// Control-limit multiplier. Default: `3.0`.
    pub drift_control_limit: f64,

    /// Mounts the debug routes when `true`. Default: `false`.
    pub debug_routes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            storage_path: None,
            processing_timeout_ms: DEFAULT_PROCESSING_TIMEOUT_MS,
            drift_window: DEFAULT_DRIFT_WINDOW,
            drift_alpha: DEFAULT_DRIFT_ALPHA,
            drift_control_limit: DEFAULT_DRIFT_CONTROL_LIMIT,
            debug_routes: false,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SYMBI_PORT";
    const ENV_BIND_ADDR: &'static str = "SYMBI_BIND_ADDR";
    const ENV_STORAGE_PATH: &'static str = "SYMBI_STORAGE_PATH";
    const ENV_PROCESSING_TIMEOUT_MS: &'static str = "SYMBI_PROCESSING_TIMEOUT_MS";
    const ENV_DRIFT_WINDOW: &'static str = "SYMBI_DRIFT_WINDOW";
    const ENV_DRIFT_ALPHA: &'static str = "SYMBI_DRIFT_ALPHA";
    const ENV_DRIFT_CONTROL_LIMIT: &'static str = "SYMBI_DRIFT_CONTROL_LIMIT";
    const ENV_DEBUG_ROUTES: &'static str = "SYMBI_DEBUG_ROUTES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let storage_path = Self::parse_optional_path_from_env(Self::ENV_STORAGE_PATH);
        let processing_timeout_ms = Self::parse_u64_from_env(
            Self::ENV_PROCESSING_TIMEOUT_MS,
            defaults.processing_timeout_ms,
        )?;
        let drift_window = Self::parse_u64_from_env(
            Self::ENV_DRIFT_WINDOW,
            defaults.drift_window as u64,
        )? as usize;
        let drift_alpha = Self::parse_f64_from_env(Self::ENV_DRIFT_ALPHA, defaults.drift_alpha)?;
        let drift_control_limit = Self::parse_f64_from_env(
            Self::ENV_DRIFT_CONTROL_LIMIT,
            defaults.drift_control_limit,
        )?;
        let debug_routes = Self::parse_bool_from_env(Self::ENV_DEBUG_ROUTES, defaults.debug_routes);

        Ok(Self {
            port,
            bind_addr,
            storage_path,
            processing_timeout_ms,
            drift_window,
            drift_alpha,
            drift_control_limit,
            debug_routes,
        })
    }

    /// Validates paths and numeric invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.storage_path {
            if path.exists() && !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.processing_timeout_ms == 0 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_PROCESSING_TIMEOUT_MS,
                value: self.processing_timeout_ms.to_string(),
                expected: "greater than 0",
            });
        }

        if self.drift_window < DRIFT_MIN_POINTS || self.drift_window > MAX_DRIFT_WINDOW {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_DRIFT_WINDOW,
                value: self.drift_window.to_string(),
                expected: "between 3 and 500",
            });
        }

        if !(self.drift_alpha > 0.0 && self.drift_alpha <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_DRIFT_ALPHA,
                value: self.drift_alpha.to_string(),
                expected: "in (0, 1]",
            });
        }

        if !(self.drift_control_limit > 0.0 && self.drift_control_limit.is_finite()) {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_DRIFT_CONTROL_LIMIT,
                value: self.drift_control_limit.to_string(),
                expected: "a finite value greater than 0",
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Builds the orchestrator settings from this config.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            processing_timeout: Duration::from_millis(self.processing_timeout_ms),
            drift_window: self.drift_window,
            drift: DriftConfig {
                alpha: self.drift_alpha,
                control_limit: self.drift_control_limit,
            },
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::IntParseError {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_f64_from_env(var_name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::FloatParseError {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(default)
    }
}
