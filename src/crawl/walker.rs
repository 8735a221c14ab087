// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! A single random walk with restart
//!
//! The walk is a state machine (awaiting fetch, deciding, terminated)
//! driven as a lazy stream. Dropping the stream cancels the walk along with
//! any fetch it has in flight.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, Stream};
use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::store::PageStore;
use super::visited::{random_restart, VisitedSet};
use crate::dom::{extract_links, parse_html};
use crate::error::{Error, Result};
use crate::http::{Fetcher, Response};

/// A page the walk decided to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPage {
    pub url: String,
    pub file_path: PathBuf,
    pub fetched_at: DateTime<Utc>,
}

/// Why a walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Saved its target number of pages
    TargetReached,
    /// Hit the step bound
    StepLimit,
    /// Seed pool and visited set are both empty
    NoRestartPoint,
    /// The shared fetch limiter was closed
    LimiterClosed,
}

/// Counters of one finished walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    pub walk: usize,
    /// Fetches attempted
    pub steps: usize,
    pub saved: usize,
    pub jumps: usize,
    pub failures: usize,
    pub non_html: usize,
    /// HTML pages without a usable outbound link
    pub dead_ends: usize,
    pub reason: StopReason,
}

/// What a walk stream yields
#[derive(Debug, Clone)]
pub enum WalkEvent {
    Saved(SavedPage),
    /// Always the last event of a walk
    Finished(WalkSummary),
}

enum WalkState {
    AwaitingFetch(String),
    Deciding(Response),
    Terminated(StopReason),
}

/// Settings a walk shares with its siblings
#[derive(Clone)]
pub struct WalkContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub seeds: Arc<Vec<String>>,
    pub store: PageStore,
    pub limiter: Arc<Semaphore>,
}

/// One walk. Owns its visited set and RNG.
pub struct RandomWalk {
    id: usize,
    ctx: WalkContext,
    visited: VisitedSet,
    rng: StdRng,
    jump: Bernoulli,
    target: usize,
    max_steps: usize,
    steps: usize,
    saved: usize,
    jumps: usize,
    failures: usize,
    non_html: usize,
    dead_ends: usize,
}

impl RandomWalk {
    /// Create a walk. Fails if `jump_probability` is outside [0, 1].
    pub fn new(
        id: usize,
        ctx: WalkContext,
        rng: StdRng,
        jump_probability: f64,
        target: usize,
        max_steps: usize,
    ) -> Result<Self> {
        let jump = Bernoulli::new(jump_probability)
            .map_err(|e| Error::config(format!("jump_probability {}: {}", jump_probability, e)))?;
        Ok(Self {
            id,
            ctx,
            visited: VisitedSet::new(),
            rng,
            jump,
            target,
            max_steps,
            steps: 0,
            saved: 0,
            jumps: 0,
            failures: 0,
            non_html: 0,
            dead_ends: 0,
        })
    }

    /// Run the walk from `start`, yielding saved pages and a final summary
    pub fn into_stream(self, start: impl Into<String>) -> impl Stream<Item = WalkEvent> + Send {
        let initial = if self.target == 0 {
            WalkState::Terminated(StopReason::TargetReached)
        } else {
            WalkState::AwaitingFetch(start.into())
        };

        stream::unfold(Some((self, initial)), |slot| async move {
            let (mut walk, mut state) = slot?;
            loop {
                state = match state {
                    WalkState::AwaitingFetch(url) => walk.fetch(url).await,
                    WalkState::Deciding(response) => {
                        let (saved, next) = walk.decide(response).await;
                        if let Some(page) = saved {
                            return Some((WalkEvent::Saved(page), Some((walk, next))));
                        }
                        next
                    }
                    WalkState::Terminated(reason) => {
                        return Some((WalkEvent::Finished(walk.finish(reason)), None));
                    }
                };
            }
        })
    }

    async fn fetch(&mut self, url: String) -> WalkState {
        if self.steps >= self.max_steps {
            return WalkState::Terminated(StopReason::StepLimit);
        }
        self.steps += 1;

        let result = {
            let Ok(_permit) = self.ctx.limiter.acquire().await else {
                return WalkState::Terminated(StopReason::LimiterClosed);
            };
            self.ctx.fetcher.fetch(&url).await
        };

        match result {
            Ok(response) => WalkState::Deciding(response),
            Err(e) => {
                self.failures += 1;
                warn!(walk = self.id, url = %url, error = %e, "fetch failed, random restart");
                self.restart()
            }
        }
    }

    async fn decide(&mut self, response: Response) -> (Option<SavedPage>, WalkState) {
        let url = response.url_str().to_string();

        if !response.is_html() {
            self.non_html += 1;
            debug!(walk = self.id, url = %url, content_type = ?response.content_type(), "not HTML, random restart");
            return (None, self.restart());
        }

        if self.jump.sample(&mut self.rng) {
            self.jumps += 1;
            let next = self.restart();
            if let WalkState::AwaitingFetch(to) = &next {
                debug!(walk = self.id, from = %url, to = %to, "random jump");
            }
            return (None, next);
        }

        let mut saved = None;
        if !self.visited.contains(&url) {
            match self.ctx.store.save(&url, &response.body).await {
                Ok(file_path) => {
                    self.visited.push(url.clone());
                    self.saved += 1;
                    saved = Some(SavedPage {
                        url: url.clone(),
                        file_path,
                        fetched_at: Utc::now(),
                    });
                }
                Err(e) => warn!(walk = self.id, url = %url, error = %e, "could not store page"),
            }
        }

        if saved.is_some() && self.saved >= self.target {
            return (saved, WalkState::Terminated(StopReason::TargetReached));
        }

        let links = outbound_links(&response);
        let next = match links.choose(&mut self.rng) {
            Some(link) => {
                debug!(walk = self.id, from = %url, to = %link, "following link");
                WalkState::AwaitingFetch(link.clone())
            }
            None => {
                self.dead_ends += 1;
                debug!(walk = self.id, url = %url, "no link to follow, random restart");
                self.restart()
            }
        };
        (saved, next)
    }

    fn restart(&mut self) -> WalkState {
        match random_restart(&self.ctx.seeds, &self.visited, &mut self.rng) {
            Some(url) => WalkState::AwaitingFetch(url.to_string()),
            None => WalkState::Terminated(StopReason::NoRestartPoint),
        }
    }

    fn finish(&self, reason: StopReason) -> WalkSummary {
        let summary = WalkSummary {
            walk: self.id,
            steps: self.steps,
            saved: self.saved,
            jumps: self.jumps,
            failures: self.failures,
            non_html: self.non_html,
            dead_ends: self.dead_ends,
            reason,
        };
        info!(
            walk = summary.walk,
            steps = summary.steps,
            saved = summary.saved,
            jumps = summary.jumps,
            failures = summary.failures,
            non_html = summary.non_html,
            dead_ends = summary.dead_ends,
            reason = ?summary.reason,
            "walk finished"
        );
        summary
    }
}

// Kept synchronous: the parsed tree is not Send and must not live across an await.
fn outbound_links(response: &Response) -> Vec<String> {
    match parse_html(&response.text_lossy()) {
        Ok(doc) => extract_links(&doc, &response.url),
        Err(e) => {
            debug!(url = %response.url, error = %e, "unparseable page, no links");
            Vec::new()
        }
    }
}
