//! Conversion of raw text input into typed field values.
//!
//! Text comes from form inputs and CSV cells. Surrounding whitespace is
//! ignored. The integer part may be grouped in thousands with commas
//! (`"1,234.56"`) or single spaces (`"2 500"`); any other placement of a
//! separator, such as a decimal comma (`"3,5"`), is rejected.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::ValidationErrorKind;

const GROUP_SEPARATORS: [char; 2] = [',', ' '];

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Strips thousands separators from trimmed, non-empty input.
///
/// Returns `None` unless the separators split the integer part into a
/// leading group of one to three digits followed by groups of exactly three.
fn strip_group_separators(input: &str) -> Option<String> {
    let (integer, fraction) = match input.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (input, None),
    };
    if fraction.is_some_and(|f| f.contains(GROUP_SEPARATORS)) {
        return None;
    }

    let Some(separator) = integer.chars().find(|c| GROUP_SEPARATORS.contains(c)) else {
        return Some(input.to_string());
    };

    let mut groups = integer.split(separator);
    let leading = groups.next()?.trim_start_matches(['-', '+']);
    if !is_digits(leading) || leading.len() > 3 {
        return None;
    }
    if !groups.all(|group| group.len() == 3 && is_digits(group)) {
        return None;
    }

    let mut stripped = integer.replace(separator, "");
    if let Some(fraction) = fraction {
        stripped.push('.');
        stripped.push_str(fraction);
    }
    Some(stripped)
}

/// Parses a monetary amount. Empty input is [`ValidationErrorKind::Required`].
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationErrorKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationErrorKind::Required);
    }
    let Some(normalized) = strip_group_separators(trimmed) else {
        tracing::debug!(input = %raw, "misplaced digit group separator");
        return Err(ValidationErrorKind::InvalidNumber);
    };
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %raw, "invalid amount: {}", e);
        ValidationErrorKind::InvalidNumber
    })
}

/// Parses a whole number such as a year or a count of days.
///
/// `"8.0"` is accepted, `"8.5"` is [`ValidationErrorKind::NotAnInteger`].
pub fn parse_whole(raw: &str) -> Result<i32, ValidationErrorKind> {
    let value = parse_amount(raw)?;
    if !value.fract().is_zero() {
        return Err(ValidationErrorKind::NotAnInteger);
    }
    value.to_i32().ok_or(ValidationErrorKind::InvalidNumber)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56"), Ok(dec!(1234.56)));
    }

    #[test]
    fn parse_amount_accepts_several_groups() {
        assert_eq!(parse_amount("-1,234,567.5"), Ok(dec!(-1234567.5)));
        assert_eq!(parse_amount("999,000"), Ok(dec!(999000)));
    }

    #[test]
    fn parse_amount_accepts_space_thousands_separator() {
        assert_eq!(parse_amount("2 500"), Ok(dec!(2500)));
        assert_eq!(parse_amount(" 1 000 000.25 "), Ok(dec!(1000000.25)));
    }

    #[test]
    fn parse_amount_rejects_decimal_comma() {
        assert_eq!(parse_amount("3,5"), Err(ValidationErrorKind::InvalidNumber));
        assert_eq!(parse_amount("2500,50"), Err(ValidationErrorKind::InvalidNumber));
    }

    #[test]
    fn parse_amount_rejects_misplaced_separators() {
        let misplaced = [
            "1,2,3",
            "12,34.5",
            ",500",
            "1,000,",
            "1,234.5,6",
            "1,000 000",
            "2  500",
            "1234,567",
        ];
        for raw in misplaced {
            assert_eq!(
                parse_amount(raw),
                Err(ValidationErrorKind::InvalidNumber),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  42.5 "), Ok(dec!(42.5)));
    }

    #[test]
    fn parse_amount_empty_is_required() {
        assert_eq!(parse_amount("   "), Err(ValidationErrorKind::Required));
    }

    #[test]
    fn parse_amount_rejects_text() {
        assert_eq!(parse_amount("abc"), Err(ValidationErrorKind::InvalidNumber));
    }

    #[test]
    fn parse_whole_accepts_integral_decimal() {
        assert_eq!(parse_whole("8.0"), Ok(8));
        assert_eq!(parse_whole("-3"), Ok(-3));
    }

    #[test]
    fn parse_whole_rejects_fraction() {
        assert_eq!(parse_whole("7.5"), Err(ValidationErrorKind::NotAnInteger));
    }

    #[test]
    fn parse_whole_rejects_out_of_i32_range() {
        assert_eq!(
            parse_whole("99999999999"),
            Err(ValidationErrorKind::InvalidNumber)
        );
    }
}
