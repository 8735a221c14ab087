// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Seed pool loading

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};

/// Load seeds from a file.
///
/// `.csv` files hold `rank,domain` rows without a header. Anything else is
/// one URL or domain per line, with blank lines and `#` comments skipped.
pub fn load_seeds(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let seeds = if is_csv {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        let mut seeds = Vec::new();
        for row in reader.records() {
            let row = row?;
            // a single column is a bare domain list
            let domain = row.get(1).or_else(|| row.get(0)).unwrap_or_default();
            if !domain.is_empty() {
                seeds.push(normalize_seed(domain));
            }
        }
        seeds
    } else {
        std::fs::read_to_string(path)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(normalize_seed)
            .collect()
    };

    if seeds.is_empty() {
        return Err(Error::config(format!("no seeds in {}", path.display())));
    }
    debug!(count = seeds.len(), path = %path.display(), "loaded seeds");
    Ok(seeds)
}

/// Give bare domains an `http://` scheme
pub fn normalize_seed(seed: &str) -> String {
    let seed = seed.trim();
    if seed.contains("://") {
        seed.to_string()
    } else {
        format!("http://{}", seed)
    }
}

/// Pick `n` distinct start seeds at random
pub fn select_start_seeds<R: Rng + ?Sized>(seeds: &[String], n: usize, rng: &mut R) -> Vec<String> {
    seeds.choose_multiple(rng, n.min(seeds.len())).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn test_load_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.csv");
        std::fs::write(&path, "1,google.com\n2,youtube.com\n3, https://example.org/\n").unwrap();

        let seeds = load_seeds(&path).unwrap();
        assert_eq!(
            seeds,
            vec!["http://google.com", "http://youtube.com", "https://example.org/"]
        );
    }

    #[test]
    fn test_load_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# seeds").unwrap();
        writeln!(file, "example.com").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  https://a.test/start  ").unwrap();

        let seeds = load_seeds(file.path()).unwrap();
        assert_eq!(seeds, vec!["http://example.com", "https://a.test/start"]);
    }

    #[test]
    fn test_empty_is_config_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(load_seeds(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(load_seeds("/nonexistent/seeds.txt"), Err(Error::Io(_))));
    }

    #[test]
    fn test_select_start_seeds() {
        let seeds: Vec<String> = (0..10).map(|i| format!("http://s{}.test", i)).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let picked = select_start_seeds(&seeds, 4, &mut rng);
        assert_eq!(picked.len(), 4);
        assert_eq!(picked.iter().collect::<HashSet<_>>().len(), 4);
        assert!(picked.iter().all(|s| seeds.contains(s)));

        assert_eq!(select_start_seeds(&seeds, 50, &mut rng).len(), 10);
    }
}
