//! Currency values are integer minor units (pence) throughout; pounds only
//! exist at the formatting and parsing edges.

use crate::date::FormatError;

/// Symbol prefixed to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "£";

const ABBREVIATIONS: [&str; 4] = ["k", "m", "bn", "tn"];

/// Formats pence as pounds with thousands grouping, e.g. `£1,234.56`.
pub fn format_pence(pence: i64) -> String {
    format_amount(pence, false)
}

/// Formats pence, abbreviating large magnitudes to one decimal place,
/// e.g. `£1.2k` for 123,456 pence.
pub fn format_pence_abbrev(pence: i64) -> String {
    format_amount(pence, true)
}

fn format_amount(pence: i64, abbreviate: bool) -> String {
    let mut pounds = pence as f64 / 100.0;

    let mut abbreviation = "";
    if abbreviate && pence != 0 {
        let log = ((pounds.abs().log10() / 3.0).floor() as usize).min(ABBREVIATIONS.len());
        if log > 0 {
            abbreviation = ABBREVIATIONS[log - 1];
            pounds /= 10f64.powi((log * 3) as i32);
            return format!(
                "{}{}{}",
                CURRENCY_SYMBOL,
                group_thousands(&format!("{pounds:.1}")),
                abbreviation
            );
        }
    }

    format!(
        "{}{}{}",
        CURRENCY_SYMBOL,
        group_thousands(&format!("{pounds:.2}")),
        abbreviation
    )
}

/// Inserts `,` separators into the integer part of an already formatted
/// decimal string.
fn group_thousands(value: &str) -> String {
    let (sign, rest) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::new();
    let digits = int_part.as_bytes();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Parses a user-entered cost into pence.
///
/// Every character other than digits and `.` is stripped first, so currency
/// symbols and grouping separators are tolerated. The result is rounded
/// half-up at two decimal places.
pub fn parse_cost(input: &str) -> Result<i64, FormatError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return Err(FormatError::InvalidAmount(input.to_string()));
    }

    let pounds: f64 = cleaned
        .parse()
        .map_err(|_| FormatError::InvalidAmount(input.to_string()))?;

    Ok((pounds * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_pence(123456), "£1,234.56");
        assert_eq!(format_pence(5), "£0.05");
        assert_eq!(format_pence(0), "£0.00");
        assert_eq!(format_pence(-123456), "£-1,234.56");
    }

    #[test]
    fn abbreviates_large_amounts() {
        assert_eq!(format_pence_abbrev(123456), "£1.2k");
        assert_eq!(format_pence_abbrev(250000000), "£2.5m");
        assert_eq!(format_pence_abbrev(99999), "£999.99");
        assert_eq!(format_pence_abbrev(0), "£0.00");
    }

    #[test]
    fn parses_decorated_cost_strings() {
        assert_eq!(parse_cost("£1,234.5"), Ok(123450));
        assert_eq!(parse_cost("15.00"), Ok(1500));
        assert_eq!(parse_cost(" £0.05 "), Ok(5));
    }

    #[test]
    fn rounds_half_up_at_two_places() {
        assert_eq!(parse_cost("0.125"), Ok(13));
        assert_eq!(parse_cost("0.124"), Ok(12));
    }

    #[test]
    fn rejects_empty_or_garbage_cost() {
        assert!(parse_cost("").is_err());
        assert!(parse_cost("£-,").is_err());
        assert!(parse_cost("1.2.3").is_err());
    }
}
