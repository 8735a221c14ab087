// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Feature extraction
//!
//! Pure extractors for URLs, HTML documents and JavaScript, each producing
//! a fixed-schema [`FeatureFragment`].

pub mod html;
pub mod js;
pub mod record;
pub mod url;

pub use html::{parse_html, parse_html_file, HtmlAnalysis, HtmlFeatures};
pub use js::{parse_js, JsFeatures};
pub use record::{FeatureFragment, FeatureRecord, FeatureValue};
pub use url::{parse_url, UrlFeatures};
