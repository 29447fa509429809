use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kolmatch_analyzer::OllamaClient;
use kolmatch_core::{BrandProfile, FacebookPageData, WebsiteData};
use kolmatch_match::MatchEngine;
use kolmatch_search::{ApifyClient, KolRetriever};

#[derive(Debug, Parser)]
#[command(name = "kolmatch")]
#[command(about = "Match a brand with TikTok KOLs for the Thai market")]
struct Cli {
    /// Path to a previously extracted brand profile JSON.
    #[arg(long, conflicts_with_all = ["fb_data", "website_data"])]
    brand_profile: Option<PathBuf>,

    /// Path to pre-fetched Facebook page data JSON (requires --website-data).
    #[arg(long, requires = "website_data")]
    fb_data: Option<PathBuf>,

    /// Path to pre-fetched website data JSON (requires --fb-data).
    #[arg(long, requires = "fb_data")]
    website_data: Option<PathBuf>,

    /// Number of KOLs to return.
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Write the ranked results to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = kolmatch_core::load_app_config_from_env()
        .context("failed to load configuration from environment")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let analyzer = OllamaClient::new(
        &config.ollama_url,
        &config.ollama_model,
        config.request_timeout_secs,
    )
    .context("failed to build analysis client")?;

    let brand = load_brand_profile(&cli, &analyzer).await?;
    if brand.is_empty() {
        anyhow::bail!(
            "no usable brand profile could be derived (no industry, themes, or keywords)"
        );
    }
    tracing::info!(industry = %brand.industry, "starting KOL matching run");

    let search = ApifyClient::new(
        &config.apify_token,
        &config.apify_actor,
        &config.search_region,
        config.request_timeout_secs,
    )
    .context("failed to build search client")?;

    let retriever = KolRetriever::new(search, config.search_results_per_page);
    let engine = MatchEngine::new(retriever, analyzer, config.max_concurrent_scoring);

    let results = engine.find_matching_kols(&brand, cli.count).await;
    tracing::info!(count = results.len(), "matching complete");

    let rendered =
        serde_json::to_string_pretty(&results).context("failed to serialize results")?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write results to {}", path.display()))?;
            println!("Found {} matching KOLs. Results saved to {}", results.len(), path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Load the brand profile from a file, or extract one from pre-fetched
/// Facebook/website data via the analyzer.
async fn load_brand_profile(cli: &Cli, analyzer: &OllamaClient) -> anyhow::Result<BrandProfile> {
    if let Some(path) = &cli.brand_profile {
        return read_json(path);
    }

    match (&cli.fb_data, &cli.website_data) {
        (Some(fb_path), Some(website_path)) => {
            let fb: FacebookPageData = read_json(fb_path)?;
            let website: WebsiteData = read_json(website_path)?;
            analyzer
                .extract_brand_profile(&fb, &website)
                .await
                .context("brand profile extraction failed")
        }
        _ => anyhow::bail!("provide either --brand-profile or both --fb-data and --website-data"),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
