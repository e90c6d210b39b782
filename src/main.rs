use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use techpulse::analyzer::{LifecycleAnalyzer, LifecycleOptions};
use techpulse::config::{load_config, region_code, timeframe_code, AppConfig};
use techpulse::presenter::{AnalysisRequest, Assembler, Renderer};
use techpulse::scraper::{RetailSearch, TrendsApiClient, TrendsSource, ZapClient};
use techpulse::utils::split_keywords;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "techpulse", version, about = "Product lifecycle analysis from search interest")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, env = "TECHPULSE_CONFIG", default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare interest over time for comma-separated products.
    Trends {
        keywords: String,
        /// Trends timeframe code or preset label ("Last 12 Months").
        #[arg(long)]
        timeframe: Option<String>,
        /// Region code or preset (us, il, gb, worldwide).
        #[arg(long)]
        geo: Option<String>,
    },
    /// Search the retail site for a product.
    Search {
        query: String,
        /// Return every candidate instead of only exact-title matches.
        #[arg(long)]
        no_strict: bool,
    },
    /// Scrape a rendered trends comparison with a headless browser.
    Scrape {
        queries: String,
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Peak-to-decline lifecycle per product.
    Lifecycle {
        keywords: String,
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long)]
        geo: Option<String>,
        /// Interest level below which a product counts as declining.
        #[arg(long)]
        threshold: Option<f64>,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries only rendered output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match resolve_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, &config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Loads the config file, falling back to defaults when it does not exist.
fn resolve_config(path: &Path) -> Result<AppConfig, Box<dyn std::error::Error>> {
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    Ok(load_config(path)?)
}

async fn run(command: Command, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = Renderer::new(config.presentation.clone());

    match command {
        Command::Trends { keywords, timeframe, geo } => {
            let keywords = split_keywords(&keywords);
            if keywords.is_empty() {
                return Err("Please enter at least one search term.".into());
            }
            let (timeframe, region) = window(config, timeframe, geo);
            let trends = TrendsApiClient::new(&config.trends)?;
            let table = trends.fetch(&keywords, &timeframe, &region).await;
            if table.is_empty() {
                println!("No data was returned.");
                return Ok(());
            }
            print!("{}", renderer.trends_chart(&table));
            println!();
            print!("{}", renderer.table(&table));
        }

        Command::Search { query, no_strict } => {
            let retail = ZapClient::new(&config.retail)?;
            let strict = config.retail.strict_filter && !no_strict;
            let results = retail.search(&query, strict).await;
            if results.is_empty() {
                println!("No results found, or the site changed its layout.");
                return Ok(());
            }
            for product in &results {
                print!("{}", renderer.product(product));
                println!("---");
            }
        }

        Command::Scrape { queries, threshold } => {
            scrape(config, &renderer, &queries, threshold).await?;
        }

        Command::Lifecycle {
            keywords,
            timeframe,
            geo,
            threshold,
        } => {
            let (timeframe, region) = window(config, timeframe, geo);
            let request = AnalysisRequest {
                keywords: split_keywords(&keywords),
                timeframe,
                region,
                threshold: threshold.unwrap_or(config.lifecycle.threshold),
            };

            let trends = TrendsApiClient::new(&config.trends)?;
            let retail = ZapClient::new(&config.retail)?;
            let analyzer = LifecycleAnalyzer::new(LifecycleOptions::from(&config.lifecycle));
            let assembler = Assembler::new(&retail, config.retail.strict_filter, analyzer);

            info!("🧠 Analyzing {} products...", request.keywords.len());
            let report = assembler.analyze(&trends, &request).await?;
            print!("{}", renderer.lifecycle(&report));
        }
    }
    Ok(())
}

fn window(config: &AppConfig, timeframe: Option<String>, geo: Option<String>) -> (String, String) {
    let timeframe = timeframe.unwrap_or_else(|| config.trends.timeframe.clone());
    let geo = geo.unwrap_or_else(|| config.trends.geo.clone());
    (timeframe_code(&timeframe).to_string(), region_code(&geo).to_string())
}

#[cfg(feature = "browser")]
async fn scrape(
    config: &AppConfig,
    renderer: &Renderer,
    queries: &str,
    threshold: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    use techpulse::analyzer::format_duration_with;
    use techpulse::normalizer::rows_to_table;
    use techpulse::scraper::{ChromiumDriver, RenderedTrendsScraper};

    let Some(first) = split_keywords(queries).into_iter().next() else {
        return Err("Please enter at least one search term.".into());
    };

    let scraper = RenderedTrendsScraper::new(&config.browser)?;
    let driver = ChromiumDriver::launch(&config.browser).await?;
    let rows = scraper.scrape(&driver, queries).await;
    if rows.is_empty() {
        println!("No data was returned, or the page layout changed.");
        return Ok(());
    }
    print!("{}", renderer.scraped_rows(&rows));

    let table = rows_to_table(&first, &rows)?;
    if table.is_empty() {
        println!("\nNone of the scraped dates could be read in the page language '{}'.", config.browser.lang);
        return Ok(());
    }
    let threshold = threshold.unwrap_or(config.lifecycle.threshold);
    let analyzer = LifecycleAnalyzer::new(LifecycleOptions::from(&config.lifecycle));
    match analyzer.analyze(&table, threshold).remove(&first).flatten() {
        Some(res) => println!(
            "\n{}: peak {} -> below {} on {} ({})",
            first,
            res.peak_date,
            threshold,
            res.decline_date,
            format_duration_with(res.duration, &config.presentation.duration_labels)
        ),
        None => println!("\n{}: no date found where interest fell below {}.", first, threshold),
    }
    Ok(())
}

#[cfg(not(feature = "browser"))]
async fn scrape(
    _config: &AppConfig,
    _renderer: &Renderer,
    _queries: &str,
    _threshold: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Browser scraping is not available: rebuild with `--features browser`.");
    Ok(())
}
