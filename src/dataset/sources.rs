// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Crawl metadata inputs

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::assembler::ClassLabel;
use crate::archive::ArchiveItem;
use crate::error::Result;

/// Archive categories expected in the XSS class
pub const XSS_CATEGORIES: &[&str] = &["XSS", "Script Insertion"];

/// A page saved by the random walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkRecord {
    pub url: String,
    pub file_path: PathBuf,
}

/// One page to turn into a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageJob {
    pub label: ClassLabel,
    pub url: String,
    pub html_path: PathBuf,
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path)?;
    let items: Vec<T> = serde_json::from_str(&text)?;
    debug!(path = %path.display(), count = items.len(), "loaded records");
    Ok(items)
}

/// Load the random-walk metadata (`randomwalk.json`)
pub fn load_walk_records(path: impl AsRef<Path>) -> Result<Vec<WalkRecord>> {
    load_json(path.as_ref())
}

/// Load the archive metadata (`xssed.json`)
pub fn load_archive_items(path: impl AsRef<Path>) -> Result<Vec<ArchiveItem>> {
    load_json(path.as_ref())
}

/// Benign jobs, one per saved page
pub fn walk_jobs(records: &[WalkRecord], base_dir: &Path) -> Vec<PageJob> {
    records
        .iter()
        .map(|record| PageJob {
            label: ClassLabel::Benign,
            url: record.url.clone(),
            html_path: base_dir.join(&record.file_path),
        })
        .collect()
}

/// XSS jobs from archive items; the page is the first downloaded mirror.
///
/// Items without a downloaded mirror are skipped.
pub fn archive_jobs(items: &[ArchiveItem], base_dir: &Path) -> Vec<PageJob> {
    items
        .iter()
        .filter_map(|item| {
            if !XSS_CATEGORIES.contains(&item.category.as_str()) {
                warn!(url = %item.url, category = %item.category, "non-XSS item imported, check whether it belongs in the dataset");
            }
            let Some(file) = item.files.first() else {
                warn!(url = %item.url, id = %item.id, "item has no downloaded mirror, skipping");
                return None;
            };
            Some(PageJob {
                label: ClassLabel::Xss,
                url: item.url.clone(),
                html_path: base_dir.join(&file.path),
            })
        })
        .collect()
}
