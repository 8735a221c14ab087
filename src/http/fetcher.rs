// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetch abstraction used by the crawlers

use async_trait::async_trait;

use super::client::HttpClient;
use super::response::Response;
use crate::error::Result;

/// Something that can GET a URL.
///
/// Implementations must bound their own time and size; every error returned
/// is treated by the sampler as a fetch failure.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a URL
    async fn fetch(&self, url: &str) -> Result<Response>;
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<Response> {
        self.get(url).await
    }
}
