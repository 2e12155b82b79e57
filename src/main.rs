//! # img-grab CLI
//!
//! Command-line interface for the img-grab library.
//! Downloads every image referenced by a single web page.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use img_grab::{Downloader, Error, ImageOutcome, ImageStatus, ScrapeOptions};
use log::LevelFilter;

mod cli;

/// Command-line interface for img-grab
#[derive(Parser)]
#[command(name = "img-grab")]
#[command(about = "Download every image referenced by a web page")]
#[command(long_about = "Fetches one page, finds every <img src> and downloads the images in order:
  img-grab https://example.com/gallery             # Save into ./images
  img-grab https://example.com/gallery -o photos   # Save into ./photos
  img-grab https://example.com/gallery --dry-run   # Only list what would be saved
  img-grab                                         # Prompt for the URL

A failed image is reported and skipped; only a failed page aborts the run.")]
#[command(version = env!("IMG_GRAB_VERSION"))]
struct Cli {
    /// Page to scrape; prompted for on stdin when omitted
    url: Option<String>,

    /// Directory the images are saved into (created if missing)
    #[arg(short, long, default_value = img_grab::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Fetch and parse the page, list the images, download nothing
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Do not draw the progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        match e.downcast_ref::<Error>() {
            Some(Error::PageFetch { reason, .. }) => eprintln!("Error fetching URL: {reason}"),
            _ => eprintln!("❌ Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let mut logger = env_logger::Builder::from_default_env();
    logger.target(env_logger::Target::Stderr);
    if cli.verbose {
        logger.filter_module("img_grab", LevelFilter::Debug);
    }
    logger.init();

    if cli.verbose {
        eprintln!("img-grab v{} starting...", env!("IMG_GRAB_VERSION"));
    }

    let url = match cli.url {
        Some(ref url) => parse_url_answer(url)?,
        None => prompt_for_url()?,
    };

    if cli.dry_run {
        return dry_run(&url, &cli.output_dir).await;
    }

    let progress = cli::ProgressManager::new(0, !cli.quiet);
    let options = ScrapeOptions {
        output_dir: cli.output_dir.clone(),
        on_image: Some(Arc::new({
            let progress = progress.clone();
            move |outcome: &ImageOutcome| {
                progress.println(&outcome_line(outcome));
                progress.advance();
            }
        })),
        ..Default::default()
    };

    let downloader = Downloader::with_options(options);
    let planned = downloader.plan(&url).await?;
    progress.set_total(planned.len());

    if cli.verbose {
        eprintln!("📁 Saving {} image(s) to: {}", planned.len(), cli.output_dir.display());
    }

    let result = downloader.download_all(planned).await;
    progress.finish();
    result.with_context(|| format!("could not save images to {}", cli.output_dir.display()))?;

    Ok(())
}

/// List the images that would be downloaded, without writing anything
async fn dry_run(url: &str, output_dir: &std::path::Path) -> anyhow::Result<()> {
    let options = ScrapeOptions {
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    };
    let planned = img_grab::plan_images(url, options).await?;

    eprintln!("🔍 [DRY RUN] {} image(s) found on {url}", planned.len());
    for image in &planned {
        println!("{} -> {}", image.url, output_dir.join(&image.filename).display());
    }

    Ok(())
}

/// Console line for one processed image
fn outcome_line(outcome: &ImageOutcome) -> String {
    match &outcome.status {
        ImageStatus::Written { filename, .. } => format!("Downloaded {filename}"),
        ImageStatus::Failed(e) => format!("Error downloading image {}: {}", outcome.url, e.reason()),
    }
}

/// Ask for the page URL on stderr and read one line from stdin
fn prompt_for_url() -> anyhow::Result<String> {
    eprint!("Enter the website URL: ");
    std::io::stderr().flush().context("failed to flush prompt")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("failed to read URL from stdin")?;

    Ok(parse_url_answer(&input)?)
}

/// Trim a user supplied URL and reject empty input
fn parse_url_answer(input: &str) -> img_grab::Result<String> {
    let url = input.trim();
    if url.is_empty() {
        return Err(Error::InvalidInput("no URL given".to_string()));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_answer_trims() {
        assert_eq!(
            parse_url_answer("  https://example.com/gallery\n").unwrap(),
            "https://example.com/gallery"
        );
    }

    #[test]
    fn test_parse_url_answer_empty() {
        match parse_url_answer(" \n") {
            Err(Error::InvalidInput(msg)) => assert_eq!(msg, "no URL given"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_outcome_lines() {
        let written = ImageOutcome {
            ordinal: 1,
            url: "https://example.com/a.png".to_string(),
            status: ImageStatus::Written {
                filename: "a.png".to_string(),
                path: PathBuf::from("images/a.png"),
                bytes: 3,
            },
        };
        assert_eq!(outcome_line(&written), "Downloaded a.png");

        let failed = ImageOutcome {
            ordinal: 2,
            url: "https://example.com/b.png".to_string(),
            status: ImageStatus::Failed(Error::ResourceFetch {
                url: "https://example.com/b.png".to_string(),
                reason: "HTTP status 404 Not Found".to_string(),
            }),
        };
        assert_eq!(
            outcome_line(&failed),
            "Error downloading image https://example.com/b.png: HTTP status 404 Not Found"
        );
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["img-grab", "https://example.com"]);
        assert_eq!(cli.url.as_deref(), Some("https://example.com"));
        assert_eq!(cli.output_dir, PathBuf::from("images"));
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_without_url() {
        let cli = Cli::parse_from(["img-grab", "-o", "photos", "--quiet"]);
        assert!(cli.url.is_none());
        assert_eq!(cli.output_dir, PathBuf::from("photos"));
        assert!(cli.quiet);
    }
}
