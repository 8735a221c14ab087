// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Random-walk configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_MAX_RESPONSE_SIZE, DEFAULT_USER_AGENT};

/// Random-walk sampler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Distinct pages to save across all walks
    pub target_count: usize,
    /// Probability of a random jump on an HTML page
    pub jump_probability: f64,
    /// Independent walks, each started from its own seed
    pub walks: usize,
    /// Fetches in flight across all walks
    pub concurrency: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Largest body accepted, in bytes
    pub max_response_size: usize,
    /// Steps after which a walk stops regardless of progress
    pub max_steps: usize,
    /// Where saved pages go
    pub storage_dir: PathBuf,
    /// Seed for reproducible walks
    pub rng_seed: Option<u64>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            target_count: 10,
            jump_probability: 1.0 / 7.0,
            walks: 1,
            concurrency: 16,
            timeout_secs: 30,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            max_steps: 10_000,
            storage_dir: PathBuf::from("html/randomsample/"),
            rng_seed: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl WalkConfig {
    /// Create a default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set target count
    pub fn target_count(mut self, count: usize) -> Self {
        self.target_count = count;
        self
    }

    /// Set jump probability
    pub fn jump_probability(mut self, probability: f64) -> Self {
        self.jump_probability = probability;
        self
    }

    /// Set number of walks
    pub fn walks(mut self, walks: usize) -> Self {
        self.walks = walks;
        self
    }

    /// Set concurrency limit
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set request timeout, in whole seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Set maximum response size
    pub fn max_response_size(mut self, size: usize) -> Self {
        self.max_response_size = size;
        self
    }

    /// Set the per-walk step bound
    pub fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }

    /// Set storage directory
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set RNG seed
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.jump_probability) {
            return Err(Error::config(format!(
                "jump_probability must be within [0, 1], got {}",
                self.jump_probability
            )));
        }
        if self.concurrency == 0 {
            return Err(Error::config("concurrency must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be at least 1"));
        }
        if self.walks == 0 {
            return Err(Error::config("walks must be at least 1"));
        }
        if self.max_steps == 0 {
            return Err(Error::config("max_steps must be at least 1"));
        }
        Ok(())
    }

    /// HTTP client settings for this walk
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::default()
            .timeout(self.request_timeout())
            .max_response_size(self.max_response_size)
            .user_agent(self.user_agent.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WalkConfig::default();
        assert_eq!(config.target_count, 10);
        assert!((config.jump_probability - 1.0 / 7.0).abs() < f64::EPSILON);
        assert_eq!(config.walks, 1);
        assert_eq!(config.storage_dir, PathBuf::from("html/randomsample/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(WalkConfig::new().jump_probability(1.5).validate().is_err());
        assert!(WalkConfig::new().jump_probability(-0.1).validate().is_err());
        assert!(WalkConfig::new().concurrency(0).validate().is_err());
        assert!(WalkConfig::new().walks(0).validate().is_err());
        assert!(WalkConfig::new().max_steps(0).validate().is_err());
        assert!(WalkConfig::new()
            .timeout(Duration::from_millis(500))
            .validate()
            .is_err());
        assert!(WalkConfig::new().jump_probability(0.0).validate().is_ok());
        assert!(WalkConfig::new().jump_probability(1.0).validate().is_ok());
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"target_count": 500, "walks": 4, "rng_seed": 7}}"#).unwrap();

        let config = WalkConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.target_count, 500);
        assert_eq!(config.walks, 4);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.concurrency, 16);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"jump_probability": 2.0}}"#).unwrap();
        let err = WalkConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_http_config() {
        let config = WalkConfig::new()
            .timeout(Duration::from_secs(5))
            .max_response_size(1024);
        let http = config.http_config();
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.max_response_size, 1024);
    }
}
