use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use income_cli::config::AppConfig;
use income_cli::form::IncomeForm;
use income_cli::{app, csv_loader, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Annual income calculator for permanent and freelance work.
///
/// Totals gross income per year and applies a flat tax rate per kind of
/// income.
#[derive(Debug, Parser)]
#[command(name = "income-calc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML file with currency, tax rates and validation bounds.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `income_core=trace`.
    /// Falls back to RUST_LOG, then `warn`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Validate the rows in a CSV file and print the totals.
    Compute {
        /// CSV with columns kind, year, monthly_salary, hourly_rate,
        /// hours_per_day, days_per_year
        file: PathBuf,
    },

    /// Edit rows line by line on stdin (the default).
    Interactive {
        /// Start from the rows in this CSV file.
        #[arg(long)]
        rows: Option<PathBuf>,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let config = AppConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    debug!(?config, "configuration ready");

    let mut stdout = io::stdout().lock();

    match cli.command.unwrap_or(Mode::Interactive { rows: None }) {
        Mode::Compute { file } => {
            let ok = app::compute(&file, &config, &mut stdout)?;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Mode::Interactive { rows } => {
            let mut form = match rows {
                Some(path) => {
                    let rows = csv_loader::load_from_file(&path)
                        .with_context(|| format!("failed to load rows from '{}'", path.display()))?;
                    info!(rows = rows.len(), path = %path.display(), "rows loaded");
                    IncomeForm::with_rows(&config, rows)
                }
                None => IncomeForm::new(&config),
            };

            app::run_interactive(&mut form, io::stdin().lock(), &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
