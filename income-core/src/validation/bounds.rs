use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Range limits applied by [`super::Validator`].
///
/// The defaults reproduce the limits of the original form, including the
/// 356-day ceiling on `days_per_year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationBounds {
    /// Earliest accepted year (inclusive).
    pub year_min: i32,

    /// Latest accepted year (inclusive).
    pub year_max: i32,

    pub max_hours_per_day: i32,

    pub max_days_per_year: i32,

    /// Ceiling on `monthly_salary` and `hourly_rate`.
    pub max_amount: Decimal,

    /// Year pre-filled on newly appended rows.
    pub default_year: i32,
}

impl Default for ValidationBounds {
    fn default() -> Self {
        Self {
            year_min: 1900,
            year_max: 2100,
            max_hours_per_day: 24,
            max_days_per_year: 356,
            max_amount: Decimal::from(1_000_000_000),
            default_year: 1900,
        }
    }
}
