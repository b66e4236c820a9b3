//! NuBot CLI
//!
//! Local execution entry point, meant to be started by cron or a CI
//! schedule. For AWS Lambda, use `nubot-lambda`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nubot::{
    error::Result,
    models::{Config, REQUIRED_KEYS, Secrets},
    pipeline::{self, BotContext},
    services::{NoticeFetcher, SheetClient, SmtpMailer},
    storage::{LocalStateStore, StateStore},
};

/// NuBot - National University notice mailer
#[derive(Parser, Debug)]
#[command(name = "nubot", version, about = "Mails new National University notices")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "nubot.toml")]
    config: PathBuf,

    /// Override the baseline file path
    #[arg(long)]
    state: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, notify subscribers about new notices and record the baseline
    Run,

    /// Show what a run would send, without mailing or recording anything
    Preview,

    /// Validate configuration and environment
    Validate,

    /// Print the stored baseline
    State,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_invalid_url() => {
            eprintln!("The URL is not correct.");
            log::error!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config);
    if let Some(path) = cli.state {
        config.state.path = path;
    }
    let store = LocalStateStore::new(&config.state.path);

    match cli.command {
        Command::Run => {
            // Fail before any network traffic if the environment is incomplete.
            let secrets = Secrets::from_env()?;
            config.validate()?;

            log::info!("NuBot starting...");

            let fetcher = NoticeFetcher::new(config.clone())?;
            let sheet = SheetClient::new(&config.recipients, &secrets)?;
            let mailer = SmtpMailer::new(&config.mail);

            let ctx = BotContext {
                config: &config,
                secrets: &secrets,
                fetcher: &fetcher,
                sheet: &sheet,
                store: &store,
                mailer: &mailer,
            };
            let summary = pipeline::run_bot(&ctx).await?;

            log::info!(
                "{}: {} delivered, {} failed",
                summary.execution_result.as_str(),
                summary.counts.delivered,
                summary.counts.failed
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Preview => {
            config.validate()?;
            let fetcher = NoticeFetcher::new(config.clone())?;
            let preview = pipeline::preview(&fetcher, &store).await?;

            if preview.has_novelty {
                log::info!("A run now would notify subscribers");
            } else {
                log::info!("A run now would not notify anyone");
            }
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            if let Err(e) = Secrets::from_env() {
                log::error!("Environment validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Environment OK ({})", REQUIRED_KEYS.join(", "));

            log::info!("All validations passed!");
        }

        Command::State => {
            let state = store.load().await?;
            log::info!("Baseline: {}", store.location());

            for (i, heading) in state.headings.iter().enumerate() {
                println!("{:>2}. {}", i + 1, heading);
            }
            for (i, link) in state.links.iter().enumerate() {
                println!("{:>2}. {}", i + 1, link);
            }
        }
    }

    Ok(())
}
