/// Configuration management for distcalc
///
/// Handles server binding, per-operator simulated durations, and agent settings.
/// Everything is read from environment variables once at start-up, after an
/// optional `.env` file has been merged in; unset or malformed values fall back
/// to defaults with a warning.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback simulated duration for any operator, in milliseconds
pub const DEFAULT_OPERATION_TIME_MS: u64 = 1000;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Simulated execution time per operator
    pub operation_times: OperationTimes,
    /// Worker process configuration
    pub agent: AgentConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Per-operator simulated durations handed to agents with every task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTimes {
    pub addition_ms: u64,
    pub subtraction_ms: u64,
    pub multiplication_ms: u64,
    pub division_ms: u64,
}

/// Agent (worker) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the orchestrator, e.g. "http://localhost:8080"
    pub orchestrator_url: String,
    /// Number of concurrent workers
    pub computing_power: usize,
    /// Delay between polls when no task is available or the orchestrator is unreachable
    pub poll_interval_ms: u64,
}

impl Default for OperationTimes {
    fn default() -> Self {
        Self {
            addition_ms: DEFAULT_OPERATION_TIME_MS,
            subtraction_ms: DEFAULT_OPERATION_TIME_MS,
            multiplication_ms: DEFAULT_OPERATION_TIME_MS,
            division_ms: DEFAULT_OPERATION_TIME_MS,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", 8080u16, |_| true);

        Self {
            server: ServerConfig {
                host: lookup("DISTCALC_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
            },
            operation_times: OperationTimes {
                addition_ms: operation_time(&lookup, "TIME_ADDITION_MS"),
                subtraction_ms: operation_time(&lookup, "TIME_SUBTRACTION_MS"),
                multiplication_ms: operation_time(&lookup, "TIME_MULTIPLICATIONS_MS"),
                division_ms: operation_time(&lookup, "TIME_DIVISIONS_MS"),
            },
            agent: AgentConfig {
                orchestrator_url: lookup("ORCHESTRATOR_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| format!("http://localhost:{}", port)),
                computing_power: parse_or(&lookup, "COMPUTING_POWER", 1usize, |n| *n > 0),
                poll_interval_ms: parse_or(&lookup, "AGENT_POLL_INTERVAL_MS", 5000u64, |_| true),
            },
        }
    }
}

/// Merge `.env` from the working directory (or a parent) into the environment
///
/// Variables already set in the process win. A missing file is normal; any other
/// problem is logged and start-up continues.
pub fn load_dotenv() -> bool {
    report_dotenv(dotenvy::dotenv().map(|path| path.display().to_string()))
}

/// Merge a specific env file into the environment
pub fn load_env_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    report_dotenv(dotenvy::from_path(path).map(|()| path.display().to_string()))
}

fn report_dotenv(outcome: dotenvy::Result<String>) -> bool {
    match outcome {
        Ok(path) => {
            tracing::info!("📄 Loaded environment from {}", path);
            true
        }
        Err(e) if e.not_found() => false,
        Err(e) => {
            tracing::warn!("⚠️ Failed to load .env file: {}", e);
            false
        }
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self::from_env()
    }
}

fn operation_time<F>(lookup: &F, key: &str) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(lookup, key, DEFAULT_OPERATION_TIME_MS, |_| true)
}

/// Parse `key` or fall back to `default` when it is unset, malformed or rejected
fn parse_or<F, T, V>(lookup: &F, key: &str, default: T, valid: V) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy,
    V: Fn(&T) -> bool,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            tracing::warn!("⚠️ {} has invalid value {:?}, using default {}", key, raw, default);
            default
        }
    }
}
