// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use bytes::BytesMut;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::response::Response;
use super::{DEFAULT_MAX_RESPONSE_SIZE, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Per-request timeout, covering connect and body download
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Maximum body size; larger responses are a fetch error
    pub max_response_size: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "accept",
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        default_headers.insert(
            "accept-language",
            HeaderValue::from_static("en-US,en;q=0.5"),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            accept_invalid_certs: false,
            default_headers,
        }
    }
}

impl HttpClientConfig {
    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set maximum body size
    pub fn max_response_size(mut self, size: usize) -> Self {
        self.max_response_size = size;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Bounded GET client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Execute a GET request.
    ///
    /// Non-2xx statuses, timeouts and bodies over `max_response_size` are
    /// all reported as errors.
    pub async fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        let url = Url::parse(url.as_ref())?;
        let start = Instant::now();

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_err(e, &url))?;

        let status = response.status();
        let final_url = response.url().clone();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: final_url.to_string(),
                status: status.as_u16(),
            });
        }

        let limit = self.config.max_response_size;
        if response.content_length().is_some_and(|len| len as usize > limit) {
            return Err(Error::ResponseTooLarge {
                url: final_url.to_string(),
                limit,
            });
        }

        let headers = response.headers().clone();
        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_err(e, &url))? {
            if body.len() + chunk.len() > limit {
                return Err(Error::ResponseTooLarge {
                    url: final_url.to_string(),
                    limit,
                });
            }
            body.extend_from_slice(&chunk);
        }

        let response_time = start.elapsed().as_millis() as u64;
        debug!(url = %final_url, status = status.as_u16(), bytes = body.len(), "fetched");

        Ok(Response::new(
            status,
            headers,
            body.freeze(),
            final_url,
            response_time,
        ))
    }

    fn map_err(&self, err: reqwest::Error, url: &Url) -> Error {
        if err.is_timeout() {
            Error::timeout(url.as_str(), self.config.timeout.as_millis() as u64)
        } else {
            Error::Http(err)
        }
    }
}
