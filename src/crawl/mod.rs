// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Random-walk web sampler
//!
//! Random walk with random jump (Henzinger et al., "On near-uniform URL
//! sampling"). Each walk follows a random outbound link of every HTML page
//! it reaches, and with a fixed probability teleports to a page drawn
//! uniformly from the seed pool and the pages it already saved. Fetch
//! failures, non-HTML responses and dead ends teleport as well.

pub mod config;
pub mod sampler;
pub mod seeds;
pub mod store;
pub mod visited;
pub mod walker;

pub use config::WalkConfig;
pub use sampler::Sampler;
pub use seeds::{load_seeds, normalize_seed, select_start_seeds};
pub use store::{sha256_hex, PageStore};
pub use visited::{random_restart, VisitedSet};
pub use walker::{RandomWalk, SavedPage, StopReason, WalkContext, WalkEvent, WalkSummary};
