use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Field;

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("is required")]
    Required,

    #[error("must be a number")]
    InvalidNumber,

    #[error("must be a whole number")]
    NotAnInteger,

    #[error("must be at least {min}")]
    BelowMinimum { min: Decimal },

    #[error("must be at most {max}")]
    AboveMaximum { max: Decimal },

    /// The field belongs to the other row variant.
    #[error("does not apply to this kind of income")]
    NotApplicable,
}

/// A field that failed a required, type or range constraint.
///
/// Keyed by the row's position in the list and the field name so a consumer
/// can highlight the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}, {field}: {kind}")]
pub struct ValidationError {
    pub row: usize,
    pub field: Field,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(
        row: usize,
        field: Field,
        kind: ValidationErrorKind,
    ) -> Self {
        Self { row, field, kind }
    }
}

/// Every failure found in one validation pass, in row then field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        error: ValidationError,
    ) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Errors attached to the row at `row`.
    pub fn for_row(
        &self,
        row: usize,
    ) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.row == row)
    }

    /// First error attached to `field` of the row at `row`.
    pub fn for_field(
        &self,
        row: usize,
        field: Field,
    ) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.row == row && e.field == field)
    }

    /// `Ok(value)` when nothing was collected, otherwise `Err(self)`.
    pub fn into_result<T>(
        self,
        value: T,
    ) -> Result<T, Self> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(
        &mut self,
        iter: I,
    ) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
