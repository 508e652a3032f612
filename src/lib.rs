pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod models;
pub mod ranking;
pub mod recommendations;
pub mod reporter;
pub mod seo_analyzer;
pub mod server;
pub mod state;

use anyhow::Result;
use cli::{CheckArgs, Cli, Command, ServeArgs};
use colored::*;
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use reporter::Reporter;
use server::validate_url;
use state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` takes precedence over `verbose`.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "onpage=debug,tower_http=debug"
    } else {
        "onpage=info,tower_http=info"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run(args: Cli) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    init_tracing(args.verbose || config.verbose.unwrap_or(false));

    match args.command {
        Some(Command::Check(check_args)) => check(config.merge_with_check(&check_args)).await,
        Some(Command::Serve(serve_args)) => serve(config.merge_with_serve(&serve_args)).await,
        None => serve(config.merge_with_serve(&ServeArgs::default())).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        timeout_secs = args.timeout,
        "Starting onpage"
    );

    let state = Arc::new(AppState::new(args.timeout)?);
    server::serve(&args.host, args.port, state).await
}

async fn check(args: CheckArgs) -> Result<()> {
    let url = validate_url(Some(args.url.as_str()))?;
    let json_output = args.output == "json";

    if !json_output {
        println!(
            "{}",
            "onpage - On-page SEO Analyzer".bright_cyan().bold()
        );
        println!("{}", "=".repeat(50).bright_blue());
        println!("{} {}", "Analyzing:".bright_white().bold(), url);
    }

    let state = AppState::new(args.timeout)?;

    let spinner = (!json_output).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Fetching page...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let report = state.analyze(args.url.trim(), &url).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        Reporter::print_text_report(&report);
    }

    if let Some(filename) = args.save {
        Reporter::save_json_report(&report, &filename)?;
    }

    Ok(())
}
