// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! xssdata CLI
//!
//! Crawls benign and known-XSS pages and turns them into a labelled feature
//! dataset.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xssdata::archive::{ArchiveConfig, ArchiveSpider};
use xssdata::crawl::{load_seeds, normalize_seed, Sampler, WalkConfig};
use xssdata::dataset::{generate, generate_payloads, GenerateOptions};
use xssdata::features::{parse_html, parse_js, parse_url, FeatureRecord};
use xssdata::http::HttpClient;

#[derive(Parser, Debug)]
#[command(name = "xssdata")]
#[command(about = "Build a labelled XSS classifier dataset from crawled pages")]
#[command(version)]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample benign pages with a random walk
    Walk(WalkArgs),
    /// Scrape the XSS archive
    Archive(ArchiveArgs),
    /// Build the dataset from crawl outputs
    Generate(GenerateArgs),
    /// Build attack rows from a payload list
    Payloads {
        #[arg(short, long, default_value = "payloads.json")]
        input: PathBuf,
        #[arg(short, long, default_value = "attacks.csv")]
        output: PathBuf,
    },
    /// Print the features of a URL or a local HTML file as JSON
    Features {
        /// http(s) URL to fetch, or path of a saved page
        target: String,
        /// URL to compute URL features from when the target is a file
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Args, Debug)]
struct WalkArgs {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed file (`rank,domain` CSV or one URL per line)
    #[arg(short, long)]
    seeds: Option<PathBuf>,
    /// Seed URL or domain, repeatable
    #[arg(long = "seed")]
    seed: Vec<String>,
    #[arg(short = 'n', long)]
    target_count: Option<usize>,
    #[arg(short, long)]
    jump_probability: Option<f64>,
    #[arg(short, long)]
    walks: Option<usize>,
    #[arg(long)]
    concurrency: Option<usize>,
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    #[arg(long)]
    max_response_size: Option<usize>,
    #[arg(long)]
    max_steps: Option<usize>,
    #[arg(long)]
    storage_dir: Option<PathBuf>,
    #[arg(long)]
    rng_seed: Option<u64>,
    /// Saved page metadata
    #[arg(short, long, default_value = "randomwalk.json")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ArchiveArgs {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    start_url: Option<String>,
    #[arg(long)]
    max_pages: Option<usize>,
    #[arg(long)]
    concurrency: Option<usize>,
    #[arg(long)]
    storage_dir: Option<PathBuf>,
    /// Keep metadata only
    #[arg(long)]
    no_download: bool,
    #[arg(short, long, default_value = "xssed.json")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, default_value = "randomwalk.json")]
    walk_json: PathBuf,
    #[arg(long, default_value = "xssed.json")]
    archive_json: PathBuf,
    /// Leave out the random-walk pages
    #[arg(long)]
    no_walk: bool,
    /// Leave out the archive pages
    #[arg(long)]
    no_archive: bool,
    /// Directory page paths are relative to
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,
    #[arg(short, long, default_value = "data.csv")]
    output: PathBuf,
    #[arg(long, default_value = "8")]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let directive = if cli.verbose { "xssdata=debug" } else { "xssdata=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(
            directive.parse().expect("static directive is valid"),
        ))
        .init();

    let result = match cli.command {
        Command::Walk(args) => walk(args).await,
        Command::Archive(args) => archive(args).await,
        Command::Generate(args) => generate_dataset(args).await,
        Command::Payloads { input, output } => payloads(&input, &output),
        Command::Features { target, url } => features(&target, url).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn walk(args: WalkArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => WalkConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => WalkConfig::default(),
    };
    if let Some(v) = args.target_count {
        config = config.target_count(v);
    }
    if let Some(v) = args.jump_probability {
        config = config.jump_probability(v);
    }
    if let Some(v) = args.walks {
        config = config.walks(v);
    }
    if let Some(v) = args.concurrency {
        config = config.concurrency(v);
    }
    if let Some(v) = args.timeout {
        config = config.timeout(Duration::from_secs(v));
    }
    if let Some(v) = args.max_response_size {
        config = config.max_response_size(v);
    }
    if let Some(v) = args.max_steps {
        config = config.max_steps(v);
    }
    if let Some(v) = args.storage_dir {
        config = config.storage_dir(v);
    }
    if let Some(v) = args.rng_seed {
        config = config.rng_seed(v);
    }

    let mut seeds: Vec<String> = args.seed.iter().map(|s| normalize_seed(s)).collect();
    if let Some(path) = &args.seeds {
        seeds.extend(load_seeds(path).with_context(|| format!("loading {}", path.display()))?);
    }
    if seeds.is_empty() {
        anyhow::bail!("no seeds given, use --seeds <file> or --seed <url>");
    }

    let sampler = Sampler::with_http(config, seeds)?;
    let pages = sampler.collect().await?;
    write_json(&args.output, &pages)?;
    info!(pages = pages.len(), output = %args.output.display(), "walk metadata written");
    Ok(())
}

async fn archive(args: ArchiveArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ArchiveConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ArchiveConfig::default(),
    };
    if let Some(v) = args.start_url {
        config = config.start_url(v);
    }
    if let Some(v) = args.max_pages {
        config = config.max_listing_pages(v);
    }
    if let Some(v) = args.concurrency {
        config = config.concurrency(v);
    }
    if let Some(v) = args.storage_dir {
        config = config.storage_dir(v);
    }
    if args.no_download {
        config = config.download_mirrors(false);
    }

    let items = ArchiveSpider::with_http(config)?.run().await?;
    write_json(&args.output, &items)?;
    info!(items = items.len(), output = %args.output.display(), "archive metadata written");
    Ok(())
}

async fn generate_dataset(args: GenerateArgs) -> anyhow::Result<()> {
    let options = GenerateOptions {
        walk_json: (!args.no_walk).then_some(args.walk_json),
        archive_json: (!args.no_archive).then_some(args.archive_json),
        base_dir: args.base_dir,
        output: args.output,
        concurrency: args.concurrency,
    };
    let report = generate(&options).await?;
    println!(
        "{} rows ({} benign, {} xss), {} pages skipped",
        report.rows(),
        report.benign,
        report.xss,
        report.skipped
    );
    Ok(())
}

fn payloads(input: &Path, output: &Path) -> anyhow::Result<()> {
    let rows = generate_payloads(input, output)
        .with_context(|| format!("building {} from {}", output.display(), input.display()))?;
    println!("{} rows written to {}", rows, output.display());
    Ok(())
}

async fn features(target: &str, url: Option<String>) -> anyhow::Result<()> {
    let (page_url, html) = if target.starts_with("http://") || target.starts_with("https://") {
        let response = HttpClient::new()?.get(target).await?;
        (target.to_string(), response.text_lossy())
    } else {
        let bytes = std::fs::read(target).with_context(|| format!("reading {}", target))?;
        (url.unwrap_or_default(), String::from_utf8_lossy(&bytes).into_owned())
    };

    let analysis = parse_html(&html);
    let js = parse_js(&analysis.script_text());
    let record = FeatureRecord::new()
        .with(&parse_url(&page_url))
        .with(&analysis.features)
        .with(&js);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    Ok(())
}
