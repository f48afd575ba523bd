//! Monetary rounding and overflow-safe arithmetic shared by the calculator
//! and its consumers.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Rounds to two decimal places, with midpoints rounded away from zero.
///
/// Totals are kept exact internally; this is applied when an amount is shown
/// to the user.
///
/// ```
/// use rust_decimal_macros::dec;
/// use income_core::calculations::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1234.564)), dec!(1234.56));
/// assert_eq!(round_half_up(dec!(1234.565)), dec!(1234.57));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiplies two amounts, clamping to the representable range on overflow.
///
/// # Arguments
///
/// * `a` - First factor
/// * `b` - Second factor
///
/// # Returns
///
/// `a × b`, or [`Decimal::MAX`] / [`Decimal::MIN`] (by the sign of the
/// product) when the product does not fit in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use income_core::calculations::clamped_mul;
///
/// assert_eq!(clamped_mul(dec!(50), dec!(8)), dec!(400));
/// assert_eq!(clamped_mul(Decimal::MAX, dec!(12)), Decimal::MAX);
/// assert_eq!(clamped_mul(Decimal::MAX, dec!(-2)), Decimal::MIN);
/// ```
pub fn clamped_mul(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        warn!(%a, %b, "product overflowed, clamping");
        if a.is_sign_negative() == b.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Adds two amounts, clamping to the representable range on overflow.
///
/// # Arguments
///
/// * `a` - First term
/// * `b` - Second term
///
/// # Returns
///
/// `a + b`, or [`Decimal::MAX`] / [`Decimal::MIN`] when the sum does not fit.
pub fn clamped_add(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        // Overflow is only possible when both terms share a sign.
        warn!(%a, %b, "sum overflowed, clamping");
        if a.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Sums `values` with [`clamped_add`]; an empty sequence sums to zero.
pub fn clamped_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, clamped_add)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(27000.004)), dec!(27000.00));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(61599.995)), dec!(61600.00));
    }

    #[test]
    fn round_half_up_keeps_whole_amounts() {
        assert_eq!(round_half_up(dec!(124000)), dec!(124000));
    }

    // =========================================================================
    // clamped arithmetic
    // =========================================================================

    #[test]
    fn clamped_mul_is_exact_within_range() {
        assert_eq!(clamped_mul(dec!(2500.50), dec!(12)), dec!(30006.00));
    }

    #[test]
    fn clamped_mul_saturates_by_sign() {
        assert_eq!(clamped_mul(Decimal::MAX, dec!(12)), Decimal::MAX);
        assert_eq!(clamped_mul(Decimal::MIN, dec!(12)), Decimal::MIN);
        assert_eq!(clamped_mul(Decimal::MIN, dec!(-12)), Decimal::MAX);
    }

    #[test]
    fn clamped_add_saturates_by_sign() {
        assert_eq!(clamped_add(Decimal::MAX, Decimal::MAX), Decimal::MAX);
        assert_eq!(clamped_add(Decimal::MIN, dec!(-1)), Decimal::MIN);
        assert_eq!(clamped_add(Decimal::MAX, dec!(-1)), Decimal::MAX - dec!(1));
    }

    #[test]
    fn clamped_sum_of_nothing_is_zero() {
        assert_eq!(clamped_sum([Decimal::ZERO; 0]), Decimal::ZERO);
        assert_eq!(clamped_sum([dec!(1.5), dec!(2.5)]), dec!(4.0));
    }

    #[test]
    fn clamped_sum_stays_at_max_after_overflow() {
        let huge = Decimal::MAX - dec!(10);

        assert_eq!(clamped_sum([huge, huge, dec!(1)]), Decimal::MAX);
    }
}
