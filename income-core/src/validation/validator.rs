use rust_decimal::Decimal;
use tracing::debug;

use super::{ValidationBounds, ValidationError, ValidationErrorKind, ValidationErrors};
use crate::models::{Field, FreelancerRow, IncomeRow, PermanentRow, RowList};

/// Checks every row of a [`RowList`] against a set of [`ValidationBounds`].
///
/// Validation is per field: rows are never compared with each other, and every
/// failure is reported rather than only the first.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    bounds: ValidationBounds,
}

impl Validator {
    pub fn new(bounds: ValidationBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &ValidationBounds {
        &self.bounds
    }

    /// Returns the list unchanged when every field is within bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] keyed by row index and field for each
    /// value outside its range.
    pub fn validate(
        &self,
        rows: RowList,
    ) -> Result<RowList, ValidationErrors> {
        let errors = self.check(&rows);
        if !errors.is_empty() {
            debug!(rows = rows.len(), failures = errors.len(), "row list rejected");
        }
        errors.into_result(rows)
    }

    /// Collects failures without taking ownership of the list.
    pub fn check(
        &self,
        rows: &RowList,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (index, row) in rows.rows().enumerate() {
            errors.extend(self.check_row(index, row));
        }
        errors
    }

    /// Failures for a single row at position `index`.
    pub fn check_row(
        &self,
        index: usize,
        row: &IncomeRow,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut range = |field: Field, value: Decimal, min: Decimal, max: Decimal| {
            if let Some(kind) = out_of_range(value, min, max) {
                errors.push(ValidationError::new(index, field, kind));
            }
        };

        match row {
            IncomeRow::Permanent(PermanentRow {
                year,
                monthly_salary,
            }) => {
                range(
                    Field::MonthlySalary,
                    *monthly_salary,
                    Decimal::ZERO,
                    self.bounds.max_amount,
                );
                range(
                    Field::Year,
                    (*year).into(),
                    self.bounds.year_min.into(),
                    self.bounds.year_max.into(),
                );
            }
            IncomeRow::Freelancer(FreelancerRow {
                year,
                hourly_rate,
                hours_per_day,
                days_per_year,
            }) => {
                range(
                    Field::HourlyRate,
                    *hourly_rate,
                    Decimal::ZERO,
                    self.bounds.max_amount,
                );
                range(
                    Field::HoursPerDay,
                    (*hours_per_day).into(),
                    Decimal::ZERO,
                    self.bounds.max_hours_per_day.into(),
                );
                range(
                    Field::DaysPerYear,
                    (*days_per_year).into(),
                    Decimal::ZERO,
                    self.bounds.max_days_per_year.into(),
                );
                range(
                    Field::Year,
                    (*year).into(),
                    self.bounds.year_min.into(),
                    self.bounds.year_max.into(),
                );
            }
        }

        errors
    }
}

fn out_of_range(
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Option<ValidationErrorKind> {
    if value < min {
        Some(ValidationErrorKind::BelowMinimum { min })
    } else if value > max {
        Some(ValidationErrorKind::AboveMaximum { max })
    } else {
        None
    }
}

/// Validates `rows` against the default bounds.
pub fn validate(rows: RowList) -> Result<RowList, ValidationErrors> {
    Validator::default().validate(rows)
}
