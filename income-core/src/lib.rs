pub mod calculations;
pub mod models;
pub mod validation;

pub use calculations::{IncomeTotals, TaxCalculator, TaxRates};
pub use models::*;
pub use validation::{ValidationBounds, ValidationError, ValidationErrors, Validator, validate};
