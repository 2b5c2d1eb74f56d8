//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CREDENCE_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::DEFAULT_LLM_MODEL;
use crate::ratelimit::MAX_REFILL_INTERVAL;

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CREDENCE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// CSV files making up the domain reliability dataset.
    pub dataset_paths: Vec<PathBuf>,

    /// Model identifier passed to the LLM client. Default: `gemini-2.0-flash`.
    pub llm_model: String,

    /// Upper bound on a single LLM call.
    pub llm_timeout: Duration,

    /// Google Custom Search API key. Search fails closed when unset.
    pub search_api_key: Option<String>,

    /// Google Custom Search engine id (`cx`).
    pub search_engine_id: Option<String>,

    pub search_timeout: Duration,

    pub fetch_timeout: Duration,

    /// Token refill interval for verifier calls. Zero disables limiting.
    pub rate_limit_interval: Duration,

    /// Tokens the verifier may spend back-to-back.
    pub rate_limit_burst: u32,

    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
}

pub const DEFAULT_DATASET_PATHS: [&str; 2] =
    ["filtered_mbfc_fact_1.csv", "filtered_mbfc_fact_2.csv"];

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            dataset_paths: DEFAULT_DATASET_PATHS.iter().map(PathBuf::from).collect(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout: Duration::from_secs(60),
            search_api_key: None,
            search_engine_id: None,
            search_timeout: Duration::from_secs(10),
            fetch_timeout: Duration::from_secs(5),
            rate_limit_interval: Duration::from_millis(2000),
            rate_limit_burst: 1,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "CREDENCE_PORT";
    const ENV_BIND_ADDR: &'static str = "CREDENCE_BIND_ADDR";
    const ENV_DATASET_PATHS: &'static str = "CREDENCE_DATASET_PATHS";
    const ENV_LLM_MODEL: &'static str = "CREDENCE_LLM_MODEL";
    const ENV_LLM_TIMEOUT_SECS: &'static str = "CREDENCE_LLM_TIMEOUT_SECS";
    const ENV_SEARCH_API_KEY: &'static str = "CREDENCE_SEARCH_API_KEY";
    const ENV_SEARCH_ENGINE_ID: &'static str = "CREDENCE_SEARCH_ENGINE_ID";
    const ENV_SEARCH_TIMEOUT_SECS: &'static str = "CREDENCE_SEARCH_TIMEOUT_SECS";
    const ENV_FETCH_TIMEOUT_SECS: &'static str = "CREDENCE_FETCH_TIMEOUT_SECS";
    const ENV_RATE_LIMIT_INTERVAL_MS: &'static str = "CREDENCE_RATE_LIMIT_INTERVAL_MS";
    const ENV_RATE_LIMIT_BURST: &'static str = "CREDENCE_RATE_LIMIT_BURST";
    const ENV_CORS_ORIGINS: &'static str = "CREDENCE_CORS_ORIGINS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let dataset_paths = Self::parse_list_from_env(Self::ENV_DATASET_PATHS)
            .map(|items| items.into_iter().map(PathBuf::from).collect())
            .unwrap_or(defaults.dataset_paths);
        let llm_model = Self::parse_string_from_env(Self::ENV_LLM_MODEL, defaults.llm_model);
        let llm_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_LLM_TIMEOUT_SECS,
            defaults.llm_timeout.as_secs(),
        ));
        let search_api_key = Self::parse_optional_string_from_env(Self::ENV_SEARCH_API_KEY);
        let search_engine_id = Self::parse_optional_string_from_env(Self::ENV_SEARCH_ENGINE_ID);
        let search_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_SEARCH_TIMEOUT_SECS,
            defaults.search_timeout.as_secs(),
        ));
        let fetch_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_FETCH_TIMEOUT_SECS,
            defaults.fetch_timeout.as_secs(),
        ));
        let rate_limit_interval = Duration::from_millis(Self::parse_u64_from_env(
            Self::ENV_RATE_LIMIT_INTERVAL_MS,
            defaults.rate_limit_interval.as_millis() as u64,
        ));
        let rate_limit_burst = Self::parse_u32_from_env(
            Self::ENV_RATE_LIMIT_BURST,
            defaults.rate_limit_burst,
        )?;
        let cors_origins =
            Self::parse_list_from_env(Self::ENV_CORS_ORIGINS).unwrap_or(defaults.cors_origins);

        Ok(Self {
            port,
            bind_addr,
            dataset_paths,
            llm_model,
            llm_timeout,
            search_api_key,
            search_engine_id,
            search_timeout,
            fetch_timeout,
            rate_limit_interval,
            rate_limit_burst,
            cors_origins,
        })
    }

    /// Validates basic invariants. Dataset files are checked at load time, not here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_LLM_MODEL,
                reason: "model name cannot be empty".to_string(),
            });
        }

        if self.llm_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_LLM_TIMEOUT_SECS,
                reason: "timeout must be at least one second".to_string(),
            });
        }

        if self.fetch_timeout.is_zero() || self.search_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_FETCH_TIMEOUT_SECS,
                reason: "network timeouts must be at least one second".to_string(),
            });
        }

        if self.rate_limit_interval > MAX_REFILL_INTERVAL {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_RATE_LIMIT_INTERVAL_MS,
                reason: format!(
                    "interval must not exceed {} ms",
                    MAX_REFILL_INTERVAL.as_millis()
                ),
            });
        }

        if self.rate_limit_burst == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_RATE_LIMIT_BURST,
                reason: "burst must be at least 1".to_string(),
            });
        }

        for path in &self.dataset_paths {
            if path.exists() && !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Returns `true` when both search credentials are present.
    pub fn search_configured(&self) -> bool {
        self.search_api_key.is_some() && self.search_engine_id.is_some()
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

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_list_from_env(var_name: &str) -> Option<Vec<String>> {
        let items: Vec<String> = env::var(var_name)
            .ok()?
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();

        if items.is_empty() { None } else { Some(items) }
    }

    /// Values that parse but do not fit in a `u32` are rejected rather than truncated.
    fn parse_u32_from_env(var_name: &'static str, default: u32) -> Result<u32, ConfigError> {
        let Some(value) = env::var(var_name).ok().and_then(|v| v.parse::<u64>().ok()) else {
            return Ok(default);
        };

        u32::try_from(value).map_err(|_| ConfigError::InvalidValue {
            name: var_name,
            reason: format!("{value} exceeds the maximum of {}", u32::MAX),
        })
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
