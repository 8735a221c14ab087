// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer
//!
//! A size- and time-bounded GET client plus the [`Fetcher`] seam the
//! random-walk sampler is written against.

mod client;
mod fetcher;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use fetcher::Fetcher;
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default cap on a downloaded body (5 MiB)
pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024;
