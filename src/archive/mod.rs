// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! XSS archive scraper
//!
//! Follows the paginated archive listing, scrapes each detail page into an
//! [`ArchiveItem`] and downloads its mirror. Only `XSS` items are kept.

pub mod config;
pub mod scraper;
pub mod spider;

use serde::{Deserialize, Serialize};

pub use config::ArchiveConfig;
pub use scraper::{extract_item, item_id, parse_detail, parse_listing, Listing};
pub use spider::ArchiveSpider;

/// A downloaded mirror page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveFile {
    pub url: String,
    /// Local path, keyed by the SHA-256 of `url`
    pub path: String,
    /// SHA-256 of the content
    pub checksum: String,
}

/// Metadata of one archived vulnerability
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveItem {
    pub id: String,
    pub date: String,
    pub status: String,
    pub domain: String,
    pub category: String,
    pub pagerank: String,
    /// The vulnerable URL
    pub url: String,
    pub file_urls: Vec<String>,
    pub files: Vec<ArchiveFile>,
}
