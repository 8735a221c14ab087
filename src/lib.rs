// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # xssdata - XSS Classifier Dataset Builder
//!
//! Collects benign and known-XSS pages and turns them into fixed-schema
//! feature rows for training an XSS classifier.
//!
//! ## Components
//!
//! - Random-walk sampler: near-uniform sampling of the web by random walk
//!   with random jump ([`crawl`])
//! - Archive scraper: paginated scrape of the xssed.com archive ([`archive`])
//! - Feature extraction for HTML, JavaScript and URLs ([`features`])
//! - Dataset assembly into CSV with a schema-drift check ([`dataset`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use xssdata::features::{parse_html, parse_js, parse_url, FeatureRecord};
//!
//! let analysis = parse_html("<img src=x onerror=alert(document.cookie)>");
//! let js = parse_js(&analysis.script_text());
//! let record = FeatureRecord::new()
//!     .with(&parse_url("http://example.com/?q=%3Cimg%3E"))
//!     .with(&analysis.features)
//!     .with(&js);
//!
//! assert_eq!(record.get_int("js_method_alert"), Some(1));
//! ```

pub mod archive;
pub mod crawl;
pub mod dataset;
pub mod dom;
pub mod error;
pub mod features;
pub mod http;

// Re-exports for convenience

// Sampling
pub use crawl::{Sampler, SavedPage, WalkConfig, WalkSummary};

// Archive
pub use archive::{ArchiveConfig, ArchiveItem, ArchiveSpider};

// Features
pub use features::{
    parse_html, parse_js, parse_url, FeatureFragment, FeatureRecord, FeatureValue, HtmlFeatures,
    JsFeatures, UrlFeatures,
};

// Dataset
pub use dataset::{assemble, generate, write_csv, ClassLabel, GenerateOptions};

// HTTP
pub use http::{Fetcher, HttpClient, HttpClientConfig, Response};

// Errors
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
