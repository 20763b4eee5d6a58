/// Parses the leading decimal number of a free-text form field.
///
/// Leading whitespace is skipped and the longest prefix that forms a decimal
/// literal (optional sign, digits, fraction, exponent) is parsed; trailing text is
/// ignored, so `"45000 per month"` reads as 45000. Anything without a numeric
/// prefix, and any non-finite result, yields 0.
pub fn parse_numeric_or_zero(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let prefix = &trimmed[..numeric_prefix_len(trimmed)];
    match prefix.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(parse_numeric_or_zero("75000"), 75_000.0);
        assert_eq!(parse_numeric_or_zero("-12.5"), -12.5);
        assert_eq!(parse_numeric_or_zero("+3"), 3.0);
        assert_eq!(parse_numeric_or_zero(".5"), 0.5);
        assert_eq!(parse_numeric_or_zero("4."), 4.0);
        assert_eq!(parse_numeric_or_zero("1e5"), 100_000.0);
    }

    #[test]
    fn empty_and_non_numeric_text_is_zero() {
        assert_eq!(parse_numeric_or_zero(""), 0.0);
        assert_eq!(parse_numeric_or_zero("   "), 0.0);
        assert_eq!(parse_numeric_or_zero("abc"), 0.0);
        assert_eq!(parse_numeric_or_zero("-"), 0.0);
        assert_eq!(parse_numeric_or_zero("."), 0.0);
        assert_eq!(parse_numeric_or_zero("₹50,000"), 0.0);
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(parse_numeric_or_zero("  42 years"), 42.0);
        assert_eq!(parse_numeric_or_zero("1,00,000"), 1.0);
        assert_eq!(parse_numeric_or_zero("3e"), 3.0);
        assert_eq!(parse_numeric_or_zero("2e+x"), 2.0);
    }

    #[test]
    fn overflow_is_zero() {
        assert_eq!(parse_numeric_or_zero("1e999"), 0.0);
    }
}
