// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Near-uniform web sampling with concurrent random walks

use std::collections::HashSet;
use std::sync::Arc;

use futures::future;
use futures::stream::{self, Stream, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use super::config::WalkConfig;
use super::seeds::select_start_seeds;
use super::store::PageStore;
use super::walker::{RandomWalk, SavedPage, WalkContext, WalkEvent};
use crate::error::{Error, Result};
use crate::http::{Fetcher, HttpClient};

/// Runs independent random walks and merges what they save
pub struct Sampler {
    config: WalkConfig,
    fetcher: Arc<dyn Fetcher>,
    seeds: Arc<Vec<String>>,
}

impl Sampler {
    /// Create a sampler over a seed pool
    pub fn new(config: WalkConfig, fetcher: Arc<dyn Fetcher>, seeds: Vec<String>) -> Result<Self> {
        config.validate()?;
        if seeds.is_empty() {
            return Err(Error::config("seed pool is empty"));
        }
        Ok(Self {
            config,
            fetcher,
            seeds: Arc::new(seeds),
        })
    }

    /// Create a sampler that fetches over HTTP
    pub fn with_http(config: WalkConfig, seeds: Vec<String>) -> Result<Self> {
        let client = HttpClient::with_config(config.http_config())?;
        Self::new(config, Arc::new(client), seeds)
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Start the walks.
    ///
    /// The stream is lazy and ends once `target_count` distinct pages were
    /// saved or every walk stopped on its own. A page another walk already
    /// yielded is dropped. Dropping the stream cancels the remaining walks.
    pub fn run(&self) -> Result<impl Stream<Item = SavedPage> + Send> {
        let mut master = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let starts = select_start_seeds(&self.seeds, self.config.walks, &mut master);

        let ctx = WalkContext {
            fetcher: self.fetcher.clone(),
            seeds: self.seeds.clone(),
            store: PageStore::new(&self.config.storage_dir),
            limiter: Arc::new(Semaphore::new(self.config.concurrency)),
        };

        let mut walks = Vec::with_capacity(starts.len());
        for (id, start) in starts.into_iter().enumerate() {
            info!(walk = id, start = %start, "starting walk");
            let walk = RandomWalk::new(
                id,
                ctx.clone(),
                StdRng::seed_from_u64(master.gen()),
                self.config.jump_probability,
                self.config.target_count,
                self.config.max_steps,
            )?;
            walks.push(walk.into_stream(start).boxed());
        }

        let mut emitted = HashSet::new();
        Ok(stream::select_all(walks)
            .filter_map(move |event| {
                future::ready(match event {
                    WalkEvent::Saved(page) if emitted.insert(page.url.clone()) => Some(page),
                    WalkEvent::Saved(page) => {
                        debug!(url = %page.url, "already saved by another walk");
                        None
                    }
                    WalkEvent::Finished(_) => None,
                })
            })
            .take(self.config.target_count))
    }

    /// Run to completion and collect the saved pages
    pub async fn collect(&self) -> Result<Vec<SavedPage>> {
        let pages: Vec<SavedPage> = self.run()?.collect().await;
        info!(saved = pages.len(), target = self.config.target_count, "sampling finished");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::walker::tests::small_web;

    fn seeds() -> Vec<String> {
        vec!["http://a.test/".to_string(), "http://b.test/".to_string()]
    }

    #[tokio::test]
    async fn test_target_is_global() {
        let dir = tempfile::tempdir().unwrap();
        let config = WalkConfig::new()
            .walks(2)
            .target_count(2)
            .jump_probability(0.0)
            .rng_seed(1)
            .storage_dir(dir.path());

        let sampler = Sampler::new(config, Arc::new(small_web()), seeds()).unwrap();
        let pages = sampler.collect().await.unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[tokio::test]
    async fn test_walks_yield_distinct_pages() {
        for rng_seed in 0..8 {
            let dir = tempfile::tempdir().unwrap();
            let config = WalkConfig::new()
                .walks(2)
                .target_count(3)
                .jump_probability(0.0)
                .rng_seed(rng_seed)
                .storage_dir(dir.path());

            let sampler = Sampler::new(config, Arc::new(small_web()), seeds()).unwrap();
            let pages = sampler.collect().await.unwrap();
            let urls: HashSet<&str> = pages.iter().map(|p| p.url.as_str()).collect();
            assert_eq!(urls.len(), pages.len(), "duplicate page with rng seed {}", rng_seed);
            assert_eq!(pages.len(), 3);
        }
    }

    #[tokio::test]
    async fn test_stops_when_walks_exhaust_steps() {
        let dir = tempfile::tempdir().unwrap();
        let config = WalkConfig::new()
            .walks(1)
            .target_count(50)
            .max_steps(20)
            .rng_seed(5)
            .storage_dir(dir.path());

        let sampler = Sampler::new(config, Arc::new(small_web()), seeds()).unwrap();
        let pages = sampler.collect().await.unwrap();
        assert!(pages.len() <= 3);
    }

    #[test]
    fn test_rejects_empty_seeds() {
        let result = Sampler::new(WalkConfig::default(), Arc::new(small_web()), vec![]);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
