use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use income_core::calculations::TaxCalculator;
use income_core::validation::{ValidationErrors, Validator};
use tracing::{debug, info, warn};

use crate::command::{Command, HELP};
use crate::config::AppConfig;
use crate::csv_loader::{self, CsvLoadError};
use crate::form::IncomeForm;
use crate::logging;
use crate::utils::format_currency;

fn write_errors(
    out: &mut impl Write,
    errors: &ValidationErrors,
) -> Result<()> {
    writeln!(out, "{errors}:")?;
    for error in errors.iter() {
        writeln!(out, "  {error}")?;
    }
    Ok(())
}

/// Loads `path`, validates every row and prints the totals to `out`.
///
/// Returns `Ok(false)` when the file holds invalid rows; each failing field
/// has then been printed instead of the totals.
pub fn compute(
    path: &Path,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<bool> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;

    let rows = match csv_loader::load_from_str(&contents) {
        Ok(rows) => rows,
        Err(CsvLoadError::Invalid(errors)) => {
            warn!(path = %path.display(), failures = errors.len(), "rejected income file");
            write_errors(out, &errors)?;
            return Ok(false);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to parse '{}'", path.display()));
        }
    };

    let rows = match Validator::new(config.bounds.clone()).validate(rows) {
        Ok(rows) => rows,
        Err(errors) => {
            warn!(path = %path.display(), failures = errors.len(), "rejected income file");
            write_errors(out, &errors)?;
            return Ok(false);
        }
    };

    let totals = TaxCalculator::new(config.rates.clone()).calculate(&rows);
    info!(path = %path.display(), rows = rows.len(), "computed totals");

    let money = |amount| format_currency(amount, &config.currency);
    writeln!(
        out,
        "Rows: {} permanent, {} freelancer",
        rows.permanents().count(),
        rows.freelancers().count()
    )?;
    writeln!(
        out,
        "Permanent: {} ({} after tax)",
        money(totals.permanent_total),
        money(totals.permanent_total_after_tax)
    )?;
    writeln!(
        out,
        "Freelance: {} ({} after tax)",
        money(totals.freelancer_total),
        money(totals.freelancer_total_after_tax)
    )?;
    writeln!(out, "Total: {}", money(totals.total))?;
    writeln!(out, "Total after taxes: {}", money(totals.total_after_taxes))?;
    Ok(true)
}

/// Applies one command to `form`. Returns `false` when the session should end.
fn execute(
    form: &mut IncomeForm,
    command: Command,
    out: &mut impl Write,
) -> Result<bool> {
    debug!(?command, "executing");
    match command {
        Command::Add(kind) => {
            form.append(kind);
            writeln!(out, "{}", form.render())?;
        }
        Command::Set {
            index,
            field,
            value,
        } => match form.set_field(index, field, &value) {
            Ok(()) => writeln!(out, "{}", form.render_totals())?,
            Err(e) => writeln!(out, "error: {e}")?,
        },
        Command::Remove(index) => match form.remove(index) {
            Ok(entry) => {
                writeln!(out, "removed {} row {}", entry.row.kind(), entry.id)?;
                writeln!(out, "{}", form.render())?;
            }
            Err(e) => writeln!(out, "error: {e}")?,
        },
        Command::Show => write!(out, "{}", form.render())?,
        Command::Submit => match form.submit() {
            Ok(()) => writeln!(out, "submitted {} row(s)", form.rows().len())?,
            Err(errors) => write_errors(out, &errors)?,
        },
        Command::LogLevel(level) => match logging::set_log_level(&level) {
            Ok(()) => writeln!(out, "log level set to {level}")?,
            Err(e) => writeln!(out, "error: {e}")?,
        },
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Runs the line-oriented session until `quit` or end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    form: &mut IncomeForm,
    input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Income calculator. Type 'help' for commands.")?;
    write!(out, "{}", form.render())?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if !execute(form, command, out)? {
                    break;
                }
            }
            Err(e) => writeln!(out, "error: {e}")?,
        }
    }

    info!(rows = form.rows().len(), "session ended");
    Ok(())
}
