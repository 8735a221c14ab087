// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL features
//!
//! Pure, independent heuristics over the percent-decoded URL string.

use lazy_static::lazy_static;
use regex::Regex;

use super::record::{FeatureFragment, FeatureValue};

/// DOM properties and calls that redirect the browser
pub const REDIRECTION_SINKS: &[&str] = &[
    "window.location",
    "window.history.back",
    "window.history.go",
    "window.navigate",
    "window.open",
    "document.location",
    "document.URL",
    "document.documentURI",
    "document.URLUnencoded",
    "document.baseURI",
    "document.referrer",
    "location.href",
    "location.replace",
    "location.assign",
];

/// Words counted by `url_number_keywords` (case-insensitive)
pub const URL_KEYWORDS: &[&str] = &[
    "login", "signup", "contact", "paypal", "password", "xss", "banking", "free", "lucky",
];

lazy_static! {
    static ref SCRIPT_TAG: Regex = Regex::new(r"(?i)<\s*/?\s*script").unwrap();
    static ref DOMAIN_NAME: Regex =
        Regex::new(r"(?i)(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}").unwrap();
}

/// Features of one URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFeatures {
    /// Length of the decoded URL in characters
    pub length: usize,
    /// Contains `<<` or `>>`
    pub duplicated_characters: bool,
    /// Contains `"`, `'` or `>`
    pub special_characters: bool,
    /// Contains an opening or closing script tag
    pub script_tag: bool,
    /// Contains `document.cookie`
    pub cookie: bool,
    /// Contains a redirection sink
    pub redirection: bool,
    /// Keyword occurrences
    pub number_keywords: usize,
    /// Domain-name-shaped substrings
    pub number_domain: usize,
}

/// Percent-decode a URL, replacing invalid UTF-8 sequences
pub fn decode_url(url: &str) -> String {
    match urlencoding::decode(url) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(url.as_bytes())).into_owned(),
    }
}

/// Extract features from a raw (possibly percent-encoded) URL
pub fn parse_url(url: &str) -> UrlFeatures {
    let decoded = decode_url(url);
    let lower = decoded.to_lowercase();

    UrlFeatures {
        length: decoded.chars().count(),
        duplicated_characters: decoded.contains("<<") || decoded.contains(">>"),
        special_characters: decoded.contains(['"', '\'', '>']),
        script_tag: SCRIPT_TAG.is_match(&decoded),
        cookie: decoded.contains("document.cookie"),
        redirection: REDIRECTION_SINKS.iter().any(|sink| decoded.contains(sink)),
        number_keywords: URL_KEYWORDS
            .iter()
            .map(|keyword| lower.matches(keyword).count())
            .sum(),
        number_domain: DOMAIN_NAME.find_iter(&decoded).count(),
    }
}

impl FeatureFragment for UrlFeatures {
    fn fields(&self) -> Vec<(String, FeatureValue)> {
        vec![
            ("url_length".into(), self.length.into()),
            ("url_duplicated_characters".into(), self.duplicated_characters.into()),
            ("url_special_characters".into(), self.special_characters.into()),
            ("url_script_tag".into(), self.script_tag.into()),
            ("url_cookie".into(), self.cookie.into()),
            ("url_redirection".into(), self.redirection.into()),
            ("url_number_keywords".into(), self.number_keywords.into()),
            ("url_number_domain".into(), self.number_domain.into()),
        ]
    }
}
