//! Field constraints on income rows.
//!
//! Type checks (required, numeric, whole number) happen when raw text is
//! parsed; range checks happen in [`Validator`] over a complete [`RowList`].
//!
//! [`RowList`]: crate::models::RowList

mod bounds;
mod error;
mod parse;
mod validator;

pub use bounds::ValidationBounds;
pub use error::{ValidationError, ValidationErrorKind, ValidationErrors};
pub use parse::{parse_amount, parse_whole};
pub use validator::{Validator, validate};
