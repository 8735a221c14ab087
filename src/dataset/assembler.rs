// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Row assembly

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::{
    parse_html_file, parse_js, parse_url, FeatureFragment, FeatureRecord, FeatureValue,
    HtmlFeatures, JsFeatures, UrlFeatures,
};

/// Class label of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassLabel {
    Benign,
    Xss,
}

impl ClassLabel {
    pub fn value(self) -> i64 {
        match self {
            ClassLabel::Benign => 0,
            ClassLabel::Xss => 1,
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FeatureFragment for ClassLabel {
    fn fields(&self) -> Vec<(String, FeatureValue)> {
        vec![("class".to_string(), self.value().into())]
    }
}

/// Merge a label and feature fragments into one row.
///
/// Returns `None` when there is no HTML fragment: the page file was missing
/// and the row is skipped. Leaving out the JS fragment drops its columns.
pub fn assemble(
    label: ClassLabel,
    url: &UrlFeatures,
    html: Option<&HtmlFeatures>,
    js: Option<&JsFeatures>,
) -> Option<FeatureRecord> {
    let html = html?;
    let mut record = FeatureRecord::new().with(&label).with(url).with(html);
    if let Some(js) = js {
        record.merge(js);
    }
    Some(record)
}

/// Extract every feature of a saved page.
///
/// `Ok(None)` when the page file does not exist.
pub fn extract_page(label: ClassLabel, url: &str, html_path: &Path) -> Result<Option<FeatureRecord>> {
    let Some(analysis) = parse_html_file(html_path)? else {
        return Ok(None);
    };
    let js = parse_js(&analysis.script_text());
    Ok(assemble(label, &parse_url(url), Some(&analysis.features), Some(&js)))
}
