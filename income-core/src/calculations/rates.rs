use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a tax rate is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxRatesError {
    #[error("permanent tax rate must be between 0 and 1, got {0}")]
    InvalidPermanentRate(Decimal),

    #[error("freelance tax rate must be between 0 and 1, got {0}")]
    InvalidFreelanceRate(Decimal),
}

/// Flat tax rates applied to each income variant, as fractions of gross
/// income.
///
/// ```
/// use rust_decimal_macros::dec;
/// use income_core::calculations::TaxRates;
///
/// let rates = TaxRates {
///     permanent: dec!(0.25),
///     freelance: dec!(0.30),
/// };
/// assert!(rates.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRates {
    /// Share of a salaried income withheld as tax.
    pub permanent: Decimal,

    /// Share of freelance revenue owed as tax and contributions.
    pub freelance: Decimal,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            permanent: Decimal::new(25, 2),
            freelance: Decimal::new(30, 2),
        }
    }
}

impl TaxRates {
    /// Checks that both rates are usable fractions of income.
    ///
    /// # Returns
    ///
    /// `Ok(())` when each rate lies in `[0, 1]`, bounds included.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRatesError`] naming the first rate outside that range,
    /// permanent before freelance.
    pub fn validate(&self) -> Result<(), TaxRatesError> {
        if !is_fraction(self.permanent) {
            return Err(TaxRatesError::InvalidPermanentRate(self.permanent));
        }
        if !is_fraction(self.freelance) {
            return Err(TaxRatesError::InvalidFreelanceRate(self.freelance));
        }
        Ok(())
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let rates = TaxRates::default();

        assert_eq!(rates.permanent, dec!(0.25));
        assert_eq!(rates.freelance, dec!(0.30));
        assert_eq!(rates.validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_zero_and_one() {
        let rates = TaxRates {
            permanent: dec!(0),
            freelance: dec!(1),
        };

        assert_eq!(rates.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_permanent_rate() {
        let rates = TaxRates {
            permanent: dec!(-0.1),
            ..TaxRates::default()
        };

        assert_eq!(
            rates.validate(),
            Err(TaxRatesError::InvalidPermanentRate(dec!(-0.1)))
        );
    }

    #[test]
    fn validate_rejects_freelance_rate_above_one() {
        let rates = TaxRates {
            freelance: dec!(1.5),
            ..TaxRates::default()
        };

        assert_eq!(
            rates.validate(),
            Err(TaxRatesError::InvalidFreelanceRate(dec!(1.5)))
        );
    }
}
