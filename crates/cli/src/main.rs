use clap::{Parser, Subcommand};
use reporthub_core::api::{CatalogApi, HttpHubClient, HubApi};
use reporthub_core::domain::source::{NewSource, SourceKind};
use reporthub_core::domain::ticker::NewTicker;
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod browse;
mod render;

#[derive(Debug, Parser)]
#[command(name = "reporthub", about = "Stock Report Hub client")]
struct Args {
    /// Print raw JSON responses instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List known tickers.
    Tickers,

    /// Show the cached daily summary for a ticker.
    Summary {
        symbol: String,

        /// Summary date (YYYY-MM-DD). The backend uses its own today when omitted.
        #[arg(long)]
        asof_date: Option<String>,
    },

    /// Trigger the backend daily pipeline and wait for it to finish.
    RunDaily,

    /// Register a ticker.
    AddTicker { symbol: String, name: String },

    /// List report sources.
    Sources,

    /// Register a report source.
    AddSource {
        #[arg(long)]
        name: String,

        /// html or pdf
        #[arg(long)]
        kind: SourceKind,

        #[arg(long)]
        url: String,
    },

    /// List reports published within the last N days.
    Reports {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// Check backend health.
    Health,

    /// Interactive ticker page on stdin/stdout.
    Browse,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let settings = reporthub_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let client = HttpHubClient::from_settings(&settings)?;
    tracing::debug!(base_url = %client.base_url(), "hub client ready");

    match run(&client, args).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::debug!(error = ?err, "command failed");
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(client: &HttpHubClient, args: Args) -> anyhow::Result<()> {
    let json = args.json;
    match args.command {
        Command::Tickers => {
            let tickers = client.list_tickers().await?;
            emit(json, &tickers, |t| render::tickers(t))
        }
        Command::Summary { symbol, asof_date } => {
            let summary = client
                .ticker_summary(&symbol, asof_date.as_deref())
                .await?;
            emit(json, &summary, render::summary)
        }
        Command::RunDaily => {
            let report = client.run_daily().await?;
            emit(json, &report, render::run_daily)
        }
        Command::AddTicker { symbol, name } => {
            let ticker = client.create_ticker(&NewTicker { symbol, name }).await?;
            emit(json, &ticker, |t| render::tickers(std::slice::from_ref(t)))
        }
        Command::Sources => {
            let sources = client.list_sources().await?;
            emit(json, &sources, |s| render::sources(s))
        }
        Command::AddSource { name, kind, url } => {
            let source = client
                .create_source(&NewSource { name, kind, url })
                .await?;
            emit(json, &source, |s| render::sources(std::slice::from_ref(s)))
        }
        Command::Reports { days } => {
            let reports = client.list_reports(days).await?;
            emit(json, &reports, |r| render::reports(r))
        }
        Command::Health => {
            let health = client.health().await?;
            emit(json, &health, render::health)
        }
        Command::Browse => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            browse::browse(client.clone(), stdin, &mut stdout).await
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

fn init_sentry(settings: &reporthub_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
