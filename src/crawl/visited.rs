// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-walk visited set and random restart

use std::collections::HashSet;

use rand::Rng;

/// URLs saved by one walk, in save order. Append-only.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    order: Vec<String>,
    index: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains(url)
    }

    /// Append a URL; returns false if it was already present
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.index.contains(&url) {
            return false;
        }
        self.index.insert(url.clone());
        self.order.push(url);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.order.get(i).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Draw uniformly from seeds ∪ visited without building the union.
///
/// Returns `None` only when both pools are empty.
pub fn random_restart<'a, R: Rng + ?Sized>(
    seeds: &'a [String],
    visited: &'a VisitedSet,
    rng: &mut R,
) -> Option<&'a str> {
    let total = seeds.len() + visited.len();
    if total == 0 {
        return None;
    }
    let i = rng.gen_range(0..total);
    if i < seeds.len() {
        Some(seeds[i].as_str())
    } else {
        visited.get(i - seeds.len())
    }
}
