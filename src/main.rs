mod api;
mod app;
mod cache;
mod config;
mod error;
mod event;
mod live;
mod query;

use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::api::types::GroupBy;

#[derive(Parser, Debug)]
#[command(name = "dealer-portal")]
#[command(about = "Dealer portal reports and live reverse-bidding sessions")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/dealer-portal/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Log to stderr instead of the log file
  #[arg(long)]
  log_stderr: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Resolve dashboard reports for a date range and print them as JSON lines
  Reports {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    from: String,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    to: String,

    /// day, week or month (default from config)
    #[arg(long)]
    group_by: Option<GroupBy>,

    /// Report to load; repeat for several (default: dashboard set)
    #[arg(long = "report")]
    reports: Vec<String>,

    /// Ignore cached reports for this range
    #[arg(long)]
    refresh: bool,
  },

  /// Follow live reverse-bidding sessions until Ctrl-C
  Live,
}

fn init_logging(to_stderr: bool) -> Result<Option<WorkerGuard>> {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dealer_portal=info"));

  if to_stderr {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .init();
    return Ok(None);
  }

  let dir = dirs::data_dir()
    .ok_or_else(|| eyre!("Could not determine data directory"))?
    .join("dealer-portal");
  std::fs::create_dir_all(&dir)?;

  let appender = tracing_appender::rolling::never(&dir, "portal.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Keep the guard alive so buffered log lines are flushed on exit
  let _guard = init_logging(args.log_stderr)?;

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  let mut app = app::App::new(config)?;
  match args.command {
    Command::Reports {
      from,
      to,
      group_by,
      reports,
      refresh,
    } => {
      app
        .reports(app::ReportsRequest {
          from,
          to,
          group_by,
          reports,
          refresh,
        })
        .await?
    }
    Command::Live => app.live().await?,
  }

  Ok(())
}
