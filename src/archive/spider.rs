// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Paginated archive crawl

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use url::Url;

use super::config::ArchiveConfig;
use super::scraper::{parse_detail, parse_listing};
use super::{ArchiveFile, ArchiveItem};
use crate::crawl::{sha256_hex, PageStore};
use crate::error::Result;
use crate::http::{Fetcher, HttpClient};

/// Walks the archive listing and scrapes every detail page it links to
pub struct ArchiveSpider {
    config: ArchiveConfig,
    fetcher: Arc<dyn Fetcher>,
    store: PageStore,
}

impl ArchiveSpider {
    pub fn new(config: ArchiveConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;
        let store = PageStore::new(&config.storage_dir);
        Ok(Self {
            config,
            fetcher,
            store,
        })
    }

    /// Create a spider that fetches over HTTP
    pub fn with_http(config: ArchiveConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http_config())?;
        Self::new(config, Arc::new(client))
    }

    /// Crawl the listing and return the kept items in listing order.
    ///
    /// Fetch failures of single pages are logged and skipped.
    pub async fn run(&self) -> Result<Vec<ArchiveItem>> {
        let mut next = Some(Url::parse(&self.config.start_url)?);
        let mut seen_listings = HashSet::new();
        let mut seen_details = HashSet::new();
        let mut items = Vec::new();
        let mut pages = 0usize;

        while let Some(listing_url) = next.take() {
            if self
                .config
                .max_listing_pages
                .is_some_and(|max| pages >= max)
            {
                debug!(pages, "listing page limit reached");
                break;
            }
            if !seen_listings.insert(listing_url.to_string()) {
                break;
            }
            pages += 1;

            let response = match self.fetcher.fetch(listing_url.as_str()).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(url = %listing_url, error = %e, "listing page failed, stopping");
                    break;
                }
            };
            let listing = parse_listing(&response.text_lossy(), &response.url)?;

            let details: Vec<Url> = listing
                .details
                .into_iter()
                .filter(|url| self.config.is_allowed(url))
                .filter(|url| seen_details.insert(url.to_string()))
                .collect();

            let scraped: Vec<Option<ArchiveItem>> = stream::iter(details)
                .map(|url| self.scrape_detail(url))
                .buffered(self.config.concurrency)
                .collect()
                .await;
            items.extend(scraped.into_iter().flatten());

            next = listing.next.filter(|url| self.config.is_allowed(url));
        }

        info!(pages, items = items.len(), "archive scrape finished");
        Ok(items)
    }

    async fn scrape_detail(&self, url: Url) -> Option<ArchiveItem> {
        let response = match self.fetcher.fetch(url.as_str()).await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "detail page failed");
                return None;
            }
        };

        let mut item = match parse_detail(&response.text_lossy(), &response.url) {
            Ok(item) => item?,
            Err(e) => {
                warn!(url = %url, error = %e, "detail page unparseable");
                return None;
            }
        };

        if self.config.download_mirrors {
            for file_url in item.file_urls.clone() {
                if let Some(file) = self.download(&file_url).await {
                    item.files.push(file);
                }
            }
        }
        Some(item)
    }

    async fn download(&self, url: &str) -> Option<ArchiveFile> {
        let response = match self.fetcher.fetch(url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "mirror download failed");
                return None;
            }
        };
        match self.store.save(url, &response.body).await {
            Ok(path) => Some(ArchiveFile {
                url: url.to_string(),
                path: path.to_string_lossy().into_owned(),
                checksum: sha256_hex(&response.body),
            }),
            Err(e) => {
                warn!(url = %url, error = %e, "could not store mirror");
                None
            }
        }
    }
}
