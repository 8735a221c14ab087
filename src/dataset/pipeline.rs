// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Dataset generation from crawl outputs

use std::path::PathBuf;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use super::assembler::{extract_page, ClassLabel};
use super::sources::{archive_jobs, load_archive_items, load_walk_records, walk_jobs, PageJob};
use super::writer::write_csv;
use crate::error::Result;
use crate::features::FeatureRecord;

/// Inputs and output of a dataset build
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Random-walk metadata, class 0
    pub walk_json: Option<PathBuf>,
    /// Archive metadata, class 1
    pub archive_json: Option<PathBuf>,
    /// Directory relative page paths are resolved against
    pub base_dir: PathBuf,
    pub output: PathBuf,
    /// Pages parsed at once
    pub concurrency: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            walk_json: Some(PathBuf::from("randomwalk.json")),
            archive_json: Some(PathBuf::from("xssed.json")),
            base_dir: PathBuf::from("."),
            output: PathBuf::from("data.csv"),
            concurrency: 8,
        }
    }
}

/// Outcome of a dataset build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub benign: usize,
    pub xss: usize,
    /// Jobs whose page file was missing
    pub skipped: usize,
}

impl GenerateReport {
    pub fn rows(&self) -> usize {
        self.benign + self.xss
    }
}

/// Extract rows for a set of pages on the blocking pool.
///
/// Row order follows job order; missing pages leave no row.
pub async fn extract_all(jobs: Vec<PageJob>, concurrency: usize) -> Result<Vec<FeatureRecord>> {
    let rows: Vec<Option<FeatureRecord>> = stream::iter(jobs)
        .map(|job| async move {
            tokio::task::spawn_blocking(move || extract_page(job.label, &job.url, &job.html_path))
                .await?
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;
    Ok(rows.into_iter().flatten().collect())
}

/// Build the dataset and write it as CSV
pub async fn generate(options: &GenerateOptions) -> Result<GenerateReport> {
    let mut jobs = Vec::new();
    if let Some(path) = &options.walk_json {
        jobs.extend(walk_jobs(&load_walk_records(path)?, &options.base_dir));
    }
    if let Some(path) = &options.archive_json {
        jobs.extend(archive_jobs(&load_archive_items(path)?, &options.base_dir));
    }
    let total = jobs.len();

    let records = extract_all(jobs, options.concurrency).await?;
    let xss = records
        .iter()
        .filter(|r| r.get_int("class") == Some(ClassLabel::Xss.value()))
        .count();
    let report = GenerateReport {
        benign: records.len() - xss,
        xss,
        skipped: total - records.len(),
    };

    write_csv(&records, &options.output)?;
    info!(
        benign = report.benign,
        xss = report.xss,
        skipped = report.skipped,
        output = %options.output.display(),
        "dataset generated"
    );
    Ok(report)
}
