use income_core::calculations::round_half_up;
use rust_decimal::Decimal;

/// Formats a monetary amount with two decimals and a currency suffix,
/// e.g. `"124000.00 €"`.
pub fn format_currency(
    amount: Decimal,
    currency: &str,
) -> String {
    format!("{:.2} {}", round_half_up(amount), currency)
}

/// Formats a fractional rate as a percentage, e.g. `0.25` as `"25%"`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
