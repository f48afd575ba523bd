//! Headless income form.
//!
//! Holds the row list for one session and recomputes totals after every
//! change. Range checks run on [`IncomeForm::submit`]; once a submission has
//! been attempted, every later change re-validates so displayed errors stay
//! current.

use std::fmt;

use income_core::calculations::{IncomeTotals, TaxCalculator};
use income_core::models::{
    Field, FreelancerRow, IncomeRow, PermanentRow, RowEntry, RowId, RowKind, RowList,
};
use income_core::validation::{ValidationError, ValidationErrors, Validator};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::utils::{format_currency, format_rate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("no row at index {0}")]
    RowNotFound(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct IncomeForm {
    rows: RowList,
    calculator: TaxCalculator,
    validator: Validator,
    currency: String,
    errors: ValidationErrors,
    submitted: bool,
}

impl IncomeForm {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_rows(config, RowList::new())
    }

    /// Starts a session pre-filled with `rows`.
    pub fn with_rows(
        config: &AppConfig,
        rows: RowList,
    ) -> Self {
        Self {
            rows,
            calculator: TaxCalculator::new(config.rates.clone()),
            validator: Validator::new(config.bounds.clone()),
            currency: config.currency.clone(),
            errors: ValidationErrors::new(),
            submitted: false,
        }
    }

    pub fn rows(&self) -> &RowList {
        &self.rows
    }

    /// Errors from the last submission, refreshed on every change after it.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Appends a blank row of `kind` with zeroed amounts and the default year.
    pub fn append(
        &mut self,
        kind: RowKind,
    ) -> RowId {
        let year = self.validator.bounds().default_year;
        let row = match kind {
            RowKind::Permanent => IncomeRow::from(PermanentRow::new(year)),
            RowKind::Freelancer => IncomeRow::from(FreelancerRow::new(year)),
        };
        let id = self.rows.push(row);
        debug!(%id, %kind, "row appended");
        self.changed();
        id
    }

    pub fn append_permanent(&mut self) -> RowId {
        self.append(RowKind::Permanent)
    }

    pub fn append_freelancer(&mut self) -> RowId {
        self.append(RowKind::Freelancer)
    }

    pub fn remove(
        &mut self,
        index: usize,
    ) -> Result<RowEntry, FormError> {
        let entry = self.rows.remove(index).ok_or(FormError::RowNotFound(index))?;
        debug!(id = %entry.id, index, "row removed");
        self.changed();
        Ok(entry)
    }

    /// Stores raw input text in `field` of the row at `index`.
    ///
    /// # Errors
    ///
    /// [`FormError::Validation`] when the text is not a valid value for the
    /// field or the field does not belong to the row's kind. The row keeps
    /// its previous value.
    pub fn set_field(
        &mut self,
        index: usize,
        field: Field,
        raw: &str,
    ) -> Result<(), FormError> {
        let row = self.rows.get_mut(index).ok_or(FormError::RowNotFound(index))?;
        row.apply_field(field, raw)
            .map_err(|kind| ValidationError::new(index, field, kind))?;
        debug!(index, %field, value = raw, "field updated");
        self.changed();
        Ok(())
    }

    pub fn totals(&self) -> IncomeTotals {
        self.calculator.calculate(&self.rows)
    }

    /// Validates every row. Success has no further effect beyond logging;
    /// failure records per-field errors and leaves the rows untouched.
    pub fn submit(&mut self) -> Result<(), ValidationErrors> {
        self.submitted = true;
        match self.validator.validate(self.rows.clone()) {
            Ok(rows) => {
                self.errors = ValidationErrors::new();
                let totals = self.totals();
                info!(rows = rows.len(), total = %totals.total, "income form submitted");
                Ok(())
            }
            Err(errors) => {
                warn!(failures = errors.len(), "income form rejected");
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Plain-text rendering of the table, totals and pending errors.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// The two total lines shown under the table.
    pub fn render_totals(&self) -> String {
        let totals = self.totals();
        format!(
            "Total: {}\nTotal after taxes: {}",
            format_currency(totals.total, &self.currency),
            format_currency(totals.total_after_taxes, &self.currency)
        )
    }

    fn changed(&mut self) {
        if self.submitted {
            self.errors = self.validator.check(&self.rows);
        }
    }

    fn cell(
        &self,
        row: &IncomeRow,
        field: Field,
    ) -> String {
        let Some(value) = row.field_value(field) else {
            return "-".to_string();
        };
        match field {
            Field::MonthlySalary => format!("{value} {}/month", self.currency),
            Field::HourlyRate => format!("{value} {}/hour", self.currency),
            _ => value,
        }
    }
}

const COLUMNS: [(&str, Field); 5] = [
    ("monthly salary", Field::MonthlySalary),
    ("hourly rate", Field::HourlyRate),
    ("hours/day", Field::HoursPerDay),
    ("days/year", Field::DaysPerYear),
    ("year", Field::Year),
];

impl fmt::Display for IncomeForm {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let rates = self.calculator.rates();
        writeln!(
            f,
            "Tax rates: permanent {}, freelance {}",
            format_rate(rates.permanent),
            format_rate(rates.freelance)
        )?;

        if self.rows.is_empty() {
            writeln!(f, "No income rows yet.")?;
        } else {
            write!(f, "{:>3}  {:<10}", "#", "kind")?;
            for (label, _) in COLUMNS {
                write!(f, "  {label:<16}")?;
            }
            writeln!(f)?;

            for (index, entry) in self.rows.iter().enumerate() {
                write!(f, "{index:>3}  {:<10}", entry.row.kind().as_str())?;
                for (_, field) in COLUMNS {
                    write!(f, "  {:<16}", self.cell(&entry.row, field))?;
                }
                writeln!(f)?;
                for error in self.errors.for_row(index) {
                    writeln!(f, "     ! {}: {}", error.field, error.kind)?;
                }
            }
        }

        writeln!(f, "{}", self.render_totals())
    }
}
