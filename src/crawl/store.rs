// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content-addressed page storage

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;

/// Hex SHA-256 of a string
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(data.as_ref()))
}

/// Saves page bodies under `dir/<sha256(url)>`
#[derive(Debug, Clone)]
pub struct PageStore {
    dir: PathBuf,
}

impl PageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a URL is stored under
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(sha256_hex(url))
    }

    /// Write a body, creating the directory if needed
    pub async fn save(&self, url: &str, body: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(url);
        tokio::fs::write(&path, body).await?;
        debug!(url = %url, path = %path.display(), bytes = body.len(), "saved page");
        Ok(path)
    }
}
