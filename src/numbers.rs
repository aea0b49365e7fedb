//! Number formatting rules
//!
//! One set of rules for every figure the reporter prints, whether it ends up
//! in an insight sentence or in a rendered table. Non-finite inputs are shown
//! as zero.

/// Whole number with thousands separators: `1,234`
pub fn thousands(value: f64) -> String {
    grouped(value, 0)
}

/// Unit count with thousands separators
pub fn count(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Weight with thousands separators and one decimal: `1,234.5`
pub fn weight(value: f64) -> String {
    grouped(value, 1)
}

/// Two-decimal figure with thousands separators, used by the statistics appendix
pub fn decimal2(value: f64) -> String {
    grouped(value, 2)
}

/// Ratio as a percentage with two decimals: `90.00%`
pub fn percent(ratio: f64) -> String {
    format!("{:.2}%", finite(ratio) * 100.0)
}

/// Ratio as a percentage with one decimal: `45.0%`
pub fn share(ratio: f64) -> String {
    format!("{:.1}%", finite(ratio) * 100.0)
}

/// Downtime minutes per unit with three decimals
pub fn per_unit(value: f64) -> String {
    format!("{:.3}", finite(value))
}

fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn grouped(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, finite(value));
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    // "-0" and "-0.0" collapse to zero
    let is_zero = unsigned.chars().all(|c| c == '0' || c == '.');
    let sign = if is_zero { "" } else { sign };

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, group_digits(whole), fraction),
        None => format!("{}{}", sign, group_digits(whole)),
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.0), "999");
        assert_eq!(thousands(1234.0), "1,234");
        assert_eq!(thousands(1234567.4), "1,234,567");
        assert_eq!(thousands(-1234.0), "-1,234");
        assert_eq!(thousands(f64::NAN), "0");
        assert_eq!(count(1_000_000), "1,000,000");
    }

    #[test]
    fn test_weight_and_decimal() {
        assert_eq!(weight(1234.56), "1,234.6");
        assert_eq!(weight(0.0), "0.0");
        assert_eq!(weight(-0.01), "0.0");
        assert_eq!(decimal2(12345.678), "12,345.68");
    }

    #[test]
    fn test_percentages() {
        assert_eq!(percent(0.9), "90.00%");
        assert_eq!(percent(0.0), "0.00%");
        assert_eq!(percent(f64::INFINITY), "0.00%");
        assert_eq!(share(0.45), "45.0%");
        assert_eq!(per_unit(0.5), "0.500");
    }
}
