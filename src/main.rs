// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env, then parse command-line arguments (and env vars) using clap
// 2. Validate the seed URL and generation count before any network work
// 3. Run the crawl, cancelling on Ctrl-C or the optional deadline
// 4. Write wiki_links.csv / wiki_links.json and print a summary
// 5. Exit with proper code:
//      0 = all pages crawled
//      1 = finished, but some pages were skipped (best-effort policy)
//      2 = error (nothing written)
//    130 = cancelled (nothing written)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cli::Cli;
use wiki_crawler::config::CrawlConfig;
use wiki_crawler::telemetry::init_telemetry;
use wiki_crawler::{
    CrawlError, CrawlReport, CrawlRequest, GenerationalCrawler, HttpLinkFetcher, LinkValidator,
    PageLinkCollector, ReportWriter,
};

const EXIT_OK: i32 = 0;
const EXIT_PARTIAL: i32 = 1;
const EXIT_ERROR: i32 = 2;
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    // A .env file in the working directory fills in env vars that aren't
    // already set; clap then reads them as flag defaults.
    // No .env file is fine, so the error is ignored.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_telemetry(cli.verbose);

    let config = cli.to_config();
    config.validate()?;

    // Everything the user typed is checked here, before the first request
    let validator = LinkValidator::new(&config.site_domain)?;
    let request = CrawlRequest::new(
        &config.seed_url,
        config.generations,
        config.max_links_per_page,
        &validator,
    )?;

    let fetcher = HttpLinkFetcher::new(config.request_timeout, &config.user_agent)
        .context("failed to build HTTP client")?;
    let collector = PageLinkCollector::new(fetcher, validator, config.base_url.clone());
    let crawler = GenerationalCrawler::new(collector, config.failure_policy)
        .with_concurrency(config.concurrency);

    // With --json, stdout carries only the report
    if !cli.json {
        println!("🔍 Crawling from: {}", request.seed_url());
        println!(
            "📊 Generations: {}, max links per page: {}",
            request.generations(),
            request.per_page_cap()
        );
    }

    let cancel = CancellationToken::new();
    spawn_cancel_triggers(&config, &cancel);

    let report = match crawler.crawl(&request, &cancel).await {
        Ok(report) => report,
        Err(CrawlError::Cancelled { partial }) => {
            warn!("cancelled, no reports written");
            eprintln!("⏹️  Cancelled after collecting {} link(s)", partial.total_links);
            return Ok(EXIT_CANCELLED);
        }
        Err(e) => return Err(e.into()),
    };

    write_reports(&config, &report)?;
    print_summary(&config, &report, cli.json)?;

    if report.is_complete() {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_PARTIAL)
    }
}

// Cancels the crawl on Ctrl-C, and after the deadline if one was given
fn spawn_cancel_triggers(config: &CrawlConfig, cancel: &CancellationToken) {
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, cancelling");
            token.cancel();
        }
    });

    if let Some(deadline) = config.deadline {
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            info!(?deadline, "deadline reached, cancelling");
            token.cancel();
        });
    }
}

fn write_reports(config: &CrawlConfig, report: &CrawlReport) -> Result<()> {
    let writer = ReportWriter::new(config.csv_path(), config.json_path());
    writer.write(report).context("failed to write reports")?;

    if !report.is_complete() {
        let path = config.failures_path();
        writer
            .write_failures(&path, &report.failures)
            .context("failed to write failures list")?;
        warn!(
            failed = report.failures.len(),
            path = %path.display(),
            "some pages could not be fetched"
        );
    }
    Ok(())
}

fn print_summary(config: &CrawlConfig, report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Total links found: {}", report.total_links);
    println!("Unique links found: {}", report.unique_links);
    println!("Data saved to CSV file: {}", config.csv_path().display());
    println!("Data saved to JSON file: {}", config.json_path().display());
    Ok(())
}
