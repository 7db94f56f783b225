//! Money and count formatting for terminal output and exports.

/// Currency suffix used across the CRM.
pub const CURRENCY: &str = "сом";

/// Placeholder for a missing value.
pub const DASH: &str = "—";

/// Group the integer part in threes with a space: `1234567` → `"1 234 567"`.
///
/// Values are rounded to whole units.
pub fn format_int(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `"1 500 сом"`.
pub fn format_money(value: f64) -> String {
    format!("{} {CURRENCY}", format_int(value))
}

/// Like [`format_money`], with [`DASH`] for a missing amount.
pub fn format_opt_money(value: Option<f64>) -> String {
    value.map(format_money).unwrap_or_else(|| DASH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_int(0.0), "0");
        assert_eq!(format_int(999.0), "999");
        assert_eq!(format_int(1000.0), "1 000");
        assert_eq!(format_int(1234567.4), "1 234 567");
        assert_eq!(format_int(-45000.0), "-45 000");
        assert_eq!(format_int(f64::NAN), "0");
    }

    #[test]
    fn money_suffix_and_dash() {
        assert_eq!(format_money(1500.0), "1 500 сом");
        assert_eq!(format_opt_money(None), "—");
        assert_eq!(format_opt_money(Some(250.6)), "251 сом");
    }
}
