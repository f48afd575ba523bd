//! Annualized income totals before and after flat-rate tax.
//!
//! | Variant    | Yearly gross                                      |
//! |------------|---------------------------------------------------|
//! | Permanent  | monthly salary × 12                               |
//! | Freelancer | hourly rate × hours per day × days per year       |
//!
//! The after-tax figure of each row is its yearly gross × (1 − rate of its
//! variant). Totals are sums over rows; an empty list totals zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use income_core::calculations::{TaxCalculator, TaxRates};
//! use income_core::models::{FreelancerRow, PermanentRow, RowList};
//!
//! let mut rows = RowList::new();
//! rows.push(PermanentRow { year: 2024, monthly_salary: dec!(3000) });
//! rows.push(FreelancerRow {
//!     year: 2024,
//!     hourly_rate: dec!(50),
//!     hours_per_day: 8,
//!     days_per_year: 220,
//! });
//!
//! let calculator = TaxCalculator::new(TaxRates {
//!     permanent: dec!(0.25),
//!     freelance: dec!(0.3),
//! });
//! let totals = calculator.calculate(&rows);
//!
//! assert_eq!(totals.total, dec!(124000));
//! assert_eq!(totals.total_after_taxes, dec!(88600));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::TaxRates;
use super::common::{clamped_add, clamped_mul, clamped_sum};
use crate::models::{FreelancerRow, PermanentRow, RowList};

const MONTHS_PER_YEAR: i32 = 12;

// ---------------------------------------------------------------------------
// Per-row and per-variant gross income
// ---------------------------------------------------------------------------

/// Yearly equivalent of a monthly salary.
///
/// # Arguments
///
/// * `monthly_salary` - Gross salary paid each month
///
/// # Returns
///
/// `monthly_salary × 12`, clamped to [`Decimal::MAX`] if it overflows.
pub fn annualized_salary(monthly_salary: Decimal) -> Decimal {
    clamped_mul(monthly_salary, Decimal::from(MONTHS_PER_YEAR))
}

/// Gross yearly revenue of a freelancer row.
///
/// # Arguments
///
/// * `row` - The freelancer row to price
///
/// # Returns
///
/// `hourly_rate × hours_per_day × days_per_year`, clamped on overflow.
pub fn freelancer_yearly_revenue(row: &FreelancerRow) -> Decimal {
    let per_day = clamped_mul(row.hourly_rate, Decimal::from(row.hours_per_day));
    clamped_mul(per_day, Decimal::from(row.days_per_year))
}

/// Sum of the annualized salaries of `rows`.
///
/// # Arguments
///
/// * `rows` - Permanent rows, in any order
///
/// # Returns
///
/// The gross salaried income per year; zero for no rows.
pub fn permanent_annualized_total<'a>(rows: impl IntoIterator<Item = &'a PermanentRow>) -> Decimal {
    clamped_sum(
        rows.into_iter()
            .map(|row| annualized_salary(row.monthly_salary)),
    )
}

/// Sum of the yearly revenues of `rows`.
///
/// # Arguments
///
/// * `rows` - Freelancer rows, in any order
///
/// # Returns
///
/// The gross freelance income per year; zero for no rows.
pub fn freelancer_annualized_total<'a>(rows: impl IntoIterator<Item = &'a FreelancerRow>) -> Decimal {
    clamped_sum(rows.into_iter().map(freelancer_yearly_revenue))
}

// ---------------------------------------------------------------------------
// Totals after tax
// ---------------------------------------------------------------------------

/// Every total the form displays, broken down by variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTotals {
    pub permanent_total: Decimal,
    pub permanent_total_after_tax: Decimal,
    pub freelancer_total: Decimal,
    pub freelancer_total_after_tax: Decimal,

    /// Gross yearly income over all rows.
    pub total: Decimal,

    /// Net yearly income over all rows.
    pub total_after_taxes: Decimal,
}

/// Applies a fixed pair of [`TaxRates`] to row lists.
///
/// Stateless apart from the rates; every method is a pure function of its
/// arguments. Amounts too large to represent are clamped to
/// [`Decimal::MAX`] rather than overflowing.
#[derive(Debug, Clone, Default)]
pub struct TaxCalculator {
    rates: TaxRates,
}

impl TaxCalculator {
    /// Rates are taken as given; check them with [`TaxRates::validate`]
    /// beforehand when they come from user configuration.
    pub fn new(rates: TaxRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &TaxRates {
        &self.rates
    }

    /// Net salaried income, taxing each row separately.
    ///
    /// # Arguments
    ///
    /// * `rows` - Permanent rows, in any order
    ///
    /// # Returns
    ///
    /// Sum over rows of `annualized_salary × (1 − permanent rate)`.
    pub fn permanent_annualized_total_after_tax<'a>(
        &self,
        rows: impl IntoIterator<Item = &'a PermanentRow>,
    ) -> Decimal {
        let keep = Decimal::ONE - self.rates.permanent;
        clamped_sum(
            rows.into_iter()
                .map(|row| clamped_mul(annualized_salary(row.monthly_salary), keep)),
        )
    }

    /// Net freelance income, taxing each row separately.
    ///
    /// # Arguments
    ///
    /// * `rows` - Freelancer rows, in any order
    ///
    /// # Returns
    ///
    /// Sum over rows of `yearly revenue × (1 − freelance rate)`.
    pub fn freelancer_annualized_total_after_tax<'a>(
        &self,
        rows: impl IntoIterator<Item = &'a FreelancerRow>,
    ) -> Decimal {
        let keep = Decimal::ONE - self.rates.freelance;
        clamped_sum(
            rows.into_iter()
                .map(|row| clamped_mul(freelancer_yearly_revenue(row), keep)),
        )
    }

    /// Gross yearly income of every row in `rows`.
    pub fn grand_total(
        &self,
        rows: &RowList,
    ) -> Decimal {
        clamped_add(
            permanent_annualized_total(rows.permanents()),
            freelancer_annualized_total(rows.freelancers()),
        )
    }

    /// Net yearly income of every row in `rows`.
    pub fn grand_total_after_tax(
        &self,
        rows: &RowList,
    ) -> Decimal {
        clamped_add(
            self.permanent_annualized_total_after_tax(rows.permanents()),
            self.freelancer_annualized_total_after_tax(rows.freelancers()),
        )
    }

    /// Computes all totals for `rows` in one pass over each partition.
    pub fn calculate(
        &self,
        rows: &RowList,
    ) -> IncomeTotals {
        let permanent_total = permanent_annualized_total(rows.permanents());
        let permanent_total_after_tax = self.permanent_annualized_total_after_tax(rows.permanents());
        let freelancer_total = freelancer_annualized_total(rows.freelancers());
        let freelancer_total_after_tax =
            self.freelancer_annualized_total_after_tax(rows.freelancers());

        let totals = IncomeTotals {
            permanent_total,
            permanent_total_after_tax,
            freelancer_total,
            freelancer_total_after_tax,
            total: clamped_add(permanent_total, freelancer_total),
            total_after_taxes: clamped_add(permanent_total_after_tax, freelancer_total_after_tax),
        };
        trace!(rows = rows.len(), total = %totals.total, after_taxes = %totals.total_after_taxes, "totals recomputed");
        totals
    }
}
