use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrorKind, parse_amount, parse_whole};

/// The two kinds of income source a row can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Permanent,
    Freelancer,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permanent => "permanent",
            Self::Freelancer => "freelancer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permanent" => Some(Self::Permanent),
            "freelancer" => Some(Self::Freelancer),
            _ => None,
        }
    }

    /// Fields a row of this kind carries, in display order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Permanent => &[Field::MonthlySalary, Field::Year],
            Self::Freelancer => &[
                Field::HourlyRate,
                Field::HoursPerDay,
                Field::DaysPerYear,
                Field::Year,
            ],
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of an editable input on an income row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Year,
    MonthlySalary,
    HourlyRate,
    HoursPerDay,
    DaysPerYear,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::MonthlySalary => "monthly_salary",
            Self::HourlyRate => "hourly_rate",
            Self::HoursPerDay => "hours_per_day",
            Self::DaysPerYear => "days_per_year",
        }
    }

    /// Accepts the snake_case name as well as the camelCase spelling used by
    /// web forms (`monthlySalary`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "year" => Some(Self::Year),
            "monthly_salary" | "monthlySalary" => Some(Self::MonthlySalary),
            "hourly_rate" | "hourlyRate" => Some(Self::HourlyRate),
            "hours_per_day" | "hoursPerDay" => Some(Self::HoursPerDay),
            "days_per_year" | "daysPerYear" => Some(Self::DaysPerYear),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salaried employment paid a fixed amount every month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermanentRow {
    pub year: i32,
    pub monthly_salary: Decimal,
}

impl PermanentRow {
    /// A blank row as created by the "add permanent income" action.
    pub fn new(year: i32) -> Self {
        Self {
            year,
            monthly_salary: Decimal::ZERO,
        }
    }
}

/// Freelance or contract work billed by the hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreelancerRow {
    pub year: i32,
    pub hourly_rate: Decimal,
    pub hours_per_day: i32,
    pub days_per_year: i32,
}

impl FreelancerRow {
    /// A blank row as created by the "add freelance income" action.
    pub fn new(year: i32) -> Self {
        Self {
            year,
            hourly_rate: Decimal::ZERO,
            hours_per_day: 0,
            days_per_year: 0,
        }
    }
}

/// One income source entered by the user.
///
/// The variant is fixed for the lifetime of the row: a permanent row can never
/// carry an hourly rate and a freelancer row can never carry a monthly salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IncomeRow {
    Permanent(PermanentRow),
    Freelancer(FreelancerRow),
}

impl IncomeRow {
    pub fn kind(&self) -> RowKind {
        match self {
            Self::Permanent(_) => RowKind::Permanent,
            Self::Freelancer(_) => RowKind::Freelancer,
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            Self::Permanent(row) => row.year,
            Self::Freelancer(row) => row.year,
        }
    }

    /// Parses `raw` and stores it in `field`.
    ///
    /// Only type checks are applied here; range checks happen in
    /// [`crate::validation::Validator`]. On error the row is left untouched.
    pub fn apply_field(
        &mut self,
        field: Field,
        raw: &str,
    ) -> Result<(), ValidationErrorKind> {
        match (self, field) {
            (Self::Permanent(row), Field::Year) => row.year = parse_whole(raw)?,
            (Self::Permanent(row), Field::MonthlySalary) => row.monthly_salary = parse_amount(raw)?,
            (Self::Freelancer(row), Field::Year) => row.year = parse_whole(raw)?,
            (Self::Freelancer(row), Field::HourlyRate) => row.hourly_rate = parse_amount(raw)?,
            (Self::Freelancer(row), Field::HoursPerDay) => row.hours_per_day = parse_whole(raw)?,
            (Self::Freelancer(row), Field::DaysPerYear) => row.days_per_year = parse_whole(raw)?,
            _ => return Err(ValidationErrorKind::NotApplicable),
        }
        Ok(())
    }

    /// Current value of `field` formatted for display, or `None` when the
    /// field does not belong to this variant.
    pub fn field_value(
        &self,
        field: Field,
    ) -> Option<String> {
        match (self, field) {
            (Self::Permanent(row), Field::Year) => Some(row.year.to_string()),
            (Self::Permanent(row), Field::MonthlySalary) => Some(row.monthly_salary.to_string()),
            (Self::Freelancer(row), Field::Year) => Some(row.year.to_string()),
            (Self::Freelancer(row), Field::HourlyRate) => Some(row.hourly_rate.to_string()),
            (Self::Freelancer(row), Field::HoursPerDay) => Some(row.hours_per_day.to_string()),
            (Self::Freelancer(row), Field::DaysPerYear) => Some(row.days_per_year.to_string()),
            _ => None,
        }
    }
}

impl From<PermanentRow> for IncomeRow {
    fn from(row: PermanentRow) -> Self {
        Self::Permanent(row)
    }
}

impl From<FreelancerRow> for IncomeRow {
    fn from(row: FreelancerRow) -> Self {
        Self::Freelancer(row)
    }
}
