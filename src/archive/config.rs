// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Archive scraper configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_MAX_RESPONSE_SIZE, DEFAULT_USER_AGENT};

/// Archive scraper configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// First listing page
    pub start_url: String,
    /// Only links on this domain or its subdomains are followed
    pub allowed_domain: String,
    /// Listing pages to visit, unbounded when absent
    pub max_listing_pages: Option<usize>,
    /// Detail pages fetched at once
    pub concurrency: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub max_response_size: usize,
    /// Where downloaded mirrors go
    pub storage_dir: PathBuf,
    /// Download the mirror pages of kept items
    pub download_mirrors: bool,
    pub user_agent: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            start_url: "http://www.xssed.com/archive".to_string(),
            allowed_domain: "xssed.com".to_string(),
            max_listing_pages: None,
            concurrency: 8,
            timeout_secs: 30,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            storage_dir: PathBuf::from("html/xssed/"),
            download_mirrors: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ArchiveConfig {
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

    pub fn start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = url.into();
        self
    }

    pub fn allowed_domain(mut self, domain: impl Into<String>) -> Self {
        self.allowed_domain = domain.into();
        self
    }

    pub fn max_listing_pages(mut self, pages: usize) -> Self {
        self.max_listing_pages = Some(pages);
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn download_mirrors(mut self, download: bool) -> Self {
        self.download_mirrors = download;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.start_url)?;
        if self.concurrency == 0 {
            return Err(Error::config("concurrency must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be at least 1"));
        }
        if self.allowed_domain.trim().is_empty() {
            return Err(Error::config("allowed_domain must not be empty"));
        }
        Ok(())
    }

    /// HTTP client settings for the scraper
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::default()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_response_size(self.max_response_size)
            .user_agent(self.user_agent.clone())
    }

    /// Whether a URL's host is the allowed domain or one of its subdomains
    pub fn is_allowed(&self, url: &Url) -> bool {
        let domain = self.allowed_domain.trim_start_matches('.').to_ascii_lowercase();
        match url.host_str() {
            Some(host) => {
                let host = host.to_ascii_lowercase();
                host == domain || host.ends_with(&format!(".{}", domain))
            }
            None => false,
        }
    }
}
