mod report;

use clap::Parser;
use sizewatch_core::AppConfig;
use sizewatch_scraper::{CheckOutcome, PageClient, StockChecker, WebhookNotifier};
use tracing_subscriber::EnvFilter;

use crate::report::{format_message, OutputPolicy};

#[derive(Debug, Parser)]
#[command(name = "sizewatch")]
#[command(about = "Check whether a size is in stock on a product page")]
struct Cli {
    /// Product page URL.
    #[arg(long)]
    url: String,

    /// Size label to look for, matched case-insensitively (e.g. `L`, `32x30`).
    #[arg(long)]
    size: String,

    /// Chat webhook to notify (Slack- or Discord-compatible).
    #[arg(long, env = "SIZEWATCH_WEBHOOK")]
    webhook: Option<String>,

    /// Print only in-stock and undetermined results.
    #[arg(long)]
    quiet: bool,

    /// Notify the webhook for every result, not just in-stock ones.
    #[arg(long)]
    always_notify: bool,

    /// Print the page text excerpts the checker considered.
    #[arg(long)]
    show_candidates: bool,
}

impl Cli {
    fn output_policy(&self) -> OutputPolicy {
        OutputPolicy {
            quiet: self.quiet,
            always_notify: self.always_notify,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = sizewatch_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    run(&cli, &config).await
}

async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let checker = StockChecker::new(PageClient::from_config(config)?);
    let outcome = checker.check(&cli.url, &cli.size).await?;

    if cli.show_candidates {
        print_candidates(&outcome);
    }

    let availability = outcome.verdict.availability();
    let message = format_message(&cli.size, &cli.url, &outcome.verdict);
    let policy = cli.output_policy();

    if policy.should_print(availability) {
        println!("{message}");
    }
    if let Some(webhook) = cli.webhook.as_deref() {
        if policy.should_notify(availability) {
            notify_best_effort(config, webhook, &message).await;
        }
    }

    Ok(())
}

fn print_candidates(outcome: &CheckOutcome) {
    println!(
        "structured blocks: {}, size records: {}",
        outcome.structured_blocks, outcome.size_records
    );
    if outcome.snippets.is_empty() {
        println!("no candidate text found");
    }
    for snippet in &outcome.snippets {
        println!("candidate: {snippet}");
    }
}

/// Delivers `message` to `webhook`. Failures are logged and never affect
/// the check result.
async fn notify_best_effort(config: &AppConfig, webhook: &str, message: &str) {
    let result = match WebhookNotifier::from_config(config) {
        Ok(notifier) => notifier.send(webhook, message).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        tracing::warn!(error = %e, "webhook notification failed");
    }
}
