//! Loader configuration structures.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`LoaderConfig::concurrency_limit`].
pub const ENV_CONCURRENCY_LIMIT: &str = "GROUP_LOADER_CONCURRENCY_LIMIT";
/// Environment variable overriding [`LoaderConfig::max_retry_times`].
pub const ENV_MAX_RETRY_TIMES: &str = "GROUP_LOADER_MAX_RETRY_TIMES";
/// Environment variable overriding [`LoaderConfig::dispatch_policy`].
pub const ENV_DISPATCH_POLICY: &str = "GROUP_LOADER_DISPATCH_POLICY";

/// How the fair queue moves between groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Serve a different group on each pick.
    #[default]
    RoundRobin,
    /// Stay on a group until its pending items are exhausted.
    Sticky,
}

impl FromStr for DispatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round_robin" | "round-robin" => Ok(Self::RoundRobin),
            "sticky" => Ok(Self::Sticky),
            other => Err(format!("unknown dispatch policy `{other}`")),
        }
    }
}

/// Loader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Maximum outstanding backend loads.
    pub concurrency_limit: usize,
    /// An item is abandoned once its attempt counter exceeds this value.
    pub max_retry_times: u32,
    /// Group selection policy.
    pub dispatch_policy: DispatchPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 2,
            max_retry_times: 3,
            dispatch_policy: DispatchPolicy::RoundRobin,
        }
    }
}

impl LoaderConfig {
    /// Start from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency limit.
    #[must_use]
    pub const fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit;
        self
    }

    /// Set the retry budget.
    #[must_use]
    pub const fn with_max_retry_times(mut self, times: u32) -> Self {
        self.max_retry_times = times;
        self
    }

    /// Set the dispatch policy.
    #[must_use]
    pub const fn with_dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch_policy = policy;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency_limit == 0 {
            return Err("concurrency_limit must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from defaults overridden by the environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();
        if let Some(limit) = read_env::<usize>(ENV_CONCURRENCY_LIMIT)? {
            cfg.concurrency_limit = limit;
        }
        if let Some(times) = read_env::<u32>(ENV_MAX_RETRY_TIMES)? {
            cfg.max_retry_times = times;
        }
        if let Some(policy) = read_env::<DispatchPolicy>(ENV_DISPATCH_POLICY)? {
            cfg.dispatch_policy = policy;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn read_env<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("{key}: {e}")),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(format!("{key}: {e}")),
    }
}
