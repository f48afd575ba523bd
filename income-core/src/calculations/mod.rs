//! Income and tax arithmetic over row lists.

pub mod calculator;
pub mod common;
pub mod rates;

pub use calculator::{
    IncomeTotals, TaxCalculator, annualized_salary, freelancer_annualized_total,
    freelancer_yearly_revenue, permanent_annualized_total,
};
pub use common::{clamped_add, clamped_mul, clamped_sum, round_half_up};
pub use rates::{TaxRates, TaxRatesError};
