//! CSV loader for income rows.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed. Columns that belong to the other kind of row must be left empty.
//!
//! | Column          | Permanent | Freelancer | Type    |
//! |-----------------|-----------|------------|---------|
//! | `kind`          | required  | required   | `permanent` or `freelancer` |
//! | `year`          | required  | required   | integer |
//! | `monthly_salary`| required  | empty      | decimal |
//! | `hourly_rate`   | empty     | required   | decimal |
//! | `hours_per_day` | empty     | required   | integer |
//! | `days_per_year` | empty     | required   | integer |
//!
//! ### Example
//!
//! ```csv
//! kind,year,monthly_salary,hourly_rate,hours_per_day,days_per_year
//! permanent,2024,3000,,,
//! freelancer,2024,,50,8,220
//! ```
//!
//! Rows are indexed from 0 in error reports, matching their position in the
//! resulting [`RowList`]. Only type checks happen here; range checks are left
//! to [`income_core::Validator`].

use std::path::Path;

use income_core::models::{Field, FreelancerRow, IncomeRow, PermanentRow, RowKind, RowList};
use income_core::validation::{
    ValidationError, ValidationErrorKind, ValidationErrors, parse_amount, parse_whole,
};
use serde::Deserialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde row mirroring the CSV header
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    kind: String,
    year: Option<String>,
    monthly_salary: Option<String>,
    hourly_rate: Option<String>,
    hours_per_day: Option<String>,
    days_per_year: Option<String>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The CSV itself is malformed (bad structure, missing `kind` column...).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised income kind '{kind}' on row {row}")]
    UnknownKind { kind: String, row: usize },

    /// One or more cells are missing, not numeric, or filled in for the
    /// wrong kind of row. Every bad cell in the file is reported.
    #[error("{0}")]
    Invalid(ValidationErrors),
}

// ---------------------------------------------------------------------------
// Cell conversion
// ---------------------------------------------------------------------------

/// Records cell failures for one row.
struct Cells<'a> {
    row: usize,
    errors: &'a mut ValidationErrors,
}

impl Cells<'_> {
    fn required<T>(
        &mut self,
        field: Field,
        cell: Option<&str>,
        parse: fn(&str) -> Result<T, ValidationErrorKind>,
    ) -> Option<T> {
        let parsed = match cell {
            Some(raw) => parse(raw),
            None => Err(ValidationErrorKind::Required),
        };
        parsed
            .map_err(|kind| self.errors.push(ValidationError::new(self.row, field, kind)))
            .ok()
    }

    fn absent(
        &mut self,
        field: Field,
        cell: Option<&str>,
    ) {
        if cell.is_some_and(|raw| !raw.trim().is_empty()) {
            self.errors.push(ValidationError::new(
                self.row,
                field,
                ValidationErrorKind::NotApplicable,
            ));
        }
    }
}

/// Converts one record. Returns `Ok(None)` when a cell failed; the failure is
/// recorded in `errors`.
fn convert_row(
    record: CsvRow,
    row: usize,
    errors: &mut ValidationErrors,
) -> Result<Option<IncomeRow>, CsvLoadError> {
    let kind = RowKind::parse(&record.kind).ok_or_else(|| CsvLoadError::UnknownKind {
        kind: record.kind.clone(),
        row,
    })?;

    let before = errors.len();
    let mut cells = Cells {
        row,
        errors: &mut *errors,
    };

    let converted = match kind {
        RowKind::Permanent => {
            cells.absent(Field::HourlyRate, record.hourly_rate.as_deref());
            cells.absent(Field::HoursPerDay, record.hours_per_day.as_deref());
            cells.absent(Field::DaysPerYear, record.days_per_year.as_deref());
            let monthly_salary = cells.required(
                Field::MonthlySalary,
                record.monthly_salary.as_deref(),
                parse_amount,
            );
            let year = cells.required(Field::Year, record.year.as_deref(), parse_whole);

            match (year, monthly_salary) {
                (Some(year), Some(monthly_salary)) => Some(IncomeRow::from(PermanentRow {
                    year,
                    monthly_salary,
                })),
                _ => None,
            }
        }
        RowKind::Freelancer => {
            cells.absent(Field::MonthlySalary, record.monthly_salary.as_deref());
            let hourly_rate =
                cells.required(Field::HourlyRate, record.hourly_rate.as_deref(), parse_amount);
            let hours_per_day =
                cells.required(Field::HoursPerDay, record.hours_per_day.as_deref(), parse_whole);
            let days_per_year =
                cells.required(Field::DaysPerYear, record.days_per_year.as_deref(), parse_whole);
            let year = cells.required(Field::Year, record.year.as_deref(), parse_whole);

            match (year, hourly_rate, hours_per_day, days_per_year) {
                (Some(year), Some(hourly_rate), Some(hours_per_day), Some(days_per_year)) => {
                    Some(IncomeRow::from(FreelancerRow {
                        year,
                        hourly_rate,
                        hours_per_day,
                        days_per_year,
                    }))
                }
                _ => None,
            }
        }
    };

    Ok(converted.filter(|_| errors.len() == before))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse CSV text and return the rows in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid.
/// * [`CsvLoadError::UnknownKind`] on the first row with an unknown `kind`.
/// * [`CsvLoadError::Invalid`] listing every bad cell otherwise.
pub fn load_from_str(input: &str) -> Result<RowList, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let mut rows = RowList::new();
    let mut errors = ValidationErrors::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        if let Some(row) = convert_row(result?, index, &mut errors)? {
            rows.push(row);
        }
    }

    debug!(rows = rows.len(), failures = errors.len(), "parsed income CSV");
    errors.into_result(rows).map_err(CsvLoadError::Invalid)
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> anyhow::Result<RowList> {
    let contents = std::fs::read_to_string(path)?;
    Ok(load_from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const HEADER: &str = "kind,year,monthly_salary,hourly_rate,hours_per_day,days_per_year\n";

    fn csv(body: &str) -> String {
        format!("{HEADER}{body}")
    }

    fn invalid(result: Result<RowList, CsvLoadError>) -> ValidationErrors {
        match result {
            Err(CsvLoadError::Invalid(errors)) => errors,
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn parses_both_kinds_in_file_order() {
        let rows = load_from_str(&csv("permanent,2024,3000,,,\nfreelancer,2023,,50,8,220\n"))
            .expect("should parse");

        let rows: Vec<_> = rows.rows().cloned().collect();
        assert_eq!(
            rows,
            vec![
                IncomeRow::Permanent(PermanentRow {
                    year: 2024,
                    monthly_salary: dec!(3000),
                }),
                IncomeRow::Freelancer(FreelancerRow {
                    year: 2023,
                    hourly_rate: dec!(50),
                    hours_per_day: 8,
                    days_per_year: 220,
                }),
            ]
        );
    }

    #[test]
    fn unused_columns_may_be_omitted() {
        let rows = load_from_str("kind,year,monthly_salary\npermanent,2024,1500\n").unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows.permanents().next().unwrap().monthly_salary, dec!(1500));
    }

    #[test]
    fn header_only_yields_empty_list() {
        assert!(load_from_str(HEADER).unwrap().is_empty());
    }

    #[test]
    fn whitespace_and_case_are_tolerated() {
        let rows = load_from_str(&csv(" Freelancer , 2024 , , 45.50 , 7 , 200 \n")).unwrap();

        let row = rows.freelancers().next().unwrap();
        assert_eq!(row.hourly_rate, dec!(45.50));
        assert_eq!(row.days_per_year, 200);
    }

    #[test]
    fn missing_required_cell_is_reported() {
        let errors = invalid(load_from_str(&csv("freelancer,2024,,50,,220\n")));

        assert_eq!(
            errors.into_iter().collect::<Vec<_>>(),
            vec![ValidationError::new(
                0,
                Field::HoursPerDay,
                ValidationErrorKind::Required
            )]
        );
    }

    #[test]
    fn cell_of_other_kind_is_not_applicable() {
        let errors = invalid(load_from_str(&csv("permanent,2024,3000,50,,\n")));

        let error = errors.for_field(0, Field::HourlyRate).unwrap();
        assert_eq!(error.kind, ValidationErrorKind::NotApplicable);
    }

    #[test]
    fn fractional_hours_are_rejected() {
        let errors = invalid(load_from_str(&csv("freelancer,2024,,50,7.5,220\n")));

        assert_eq!(
            errors.for_field(0, Field::HoursPerDay).unwrap().kind,
            ValidationErrorKind::NotAnInteger
        );
    }

    #[test]
    fn errors_from_every_row_are_collected() {
        let errors = invalid(load_from_str(&csv(
            "permanent,abc,3000,,,\npermanent,2024,3000,,,\nfreelancer,2024,,x,8,\n",
        )));

        assert_eq!(errors.len(), 3);
        assert!(errors.for_field(0, Field::Year).is_some());
        assert_eq!(errors.for_row(1).count(), 0);
        assert!(errors.for_field(2, Field::HourlyRate).is_some());
        assert!(errors.for_field(2, Field::DaysPerYear).is_some());
    }

    #[test]
    fn out_of_range_values_are_left_to_validation() {
        let rows = load_from_str(&csv("freelancer,1800,,50,30,400\n")).unwrap();

        assert_eq!(rows.freelancers().next().unwrap().hours_per_day, 30);
    }

    #[test]
    fn unknown_kind_reports_row() {
        let result = load_from_str(&csv("permanent,2024,1,,,\ncontractor,2024,1,,,\n"));

        match result {
            Err(CsvLoadError::UnknownKind { kind, row }) => {
                assert_eq!(kind, "contractor");
                assert_eq!(row, 1);
            }
            other => panic!("expected UnknownKind, got {other:?}"),
        }
    }

    #[test]
    fn missing_kind_column_is_parse_error() {
        let result = load_from_str("year,monthly_salary\n2024,3000\n");

        assert!(matches!(result, Err(CsvLoadError::Parse(_))));
    }
}
