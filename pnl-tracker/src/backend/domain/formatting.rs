//! Display formatting for amounts and dates.
//!
//! Amounts use Indian digit grouping (12,34,567) and dates follow the en-GB
//! day-first conventions.

use chrono::NaiveDate;

/// Default number of fraction digits shown for amounts
pub const DEFAULT_FRACTION_DIGITS: usize = 3;

/// Formats amounts with a currency symbol
#[derive(Debug, Clone)]
pub struct AmountFormatter {
    currency_symbol: String,
}

impl AmountFormatter {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// `₹12,34,567.5`, or `-₹500` for negatives
    pub fn format(&self, value: f64) -> String {
        self.format_with_digits(value, DEFAULT_FRACTION_DIGITS)
    }

    /// Rounded to whole units, as used for dashboard averages
    pub fn format_rounded(&self, value: f64) -> String {
        self.format_with_digits(value, 0)
    }

    pub fn format_with_digits(&self, value: f64, max_fraction_digits: usize) -> String {
        let digits = format_grouped(value.abs(), max_fraction_digits);
        if value < 0.0 && digits.chars().any(|c| c.is_ascii_digit() && c != '0') {
            format!("-{}{}", self.currency_symbol, digits)
        } else {
            format!("{}{}", self.currency_symbol, digits)
        }
    }

    /// Profit with an explicit sign: `+₹1,200` / `-₹350`
    pub fn format_signed(&self, profit: f64) -> String {
        let sign = if profit >= 0.0 { '+' } else { '-' };
        format!("{}{}{}", sign, self.currency_symbol, format_grouped(profit.abs(), DEFAULT_FRACTION_DIGITS))
    }
}

impl Default for AmountFormatter {
    fn default() -> Self {
        Self::new("₹")
    }
}

/// Non-negative number with Indian grouping and trailing fraction zeros trimmed
pub fn format_grouped(value: f64, max_fraction_digits: usize) -> String {
    // Ties round away from zero
    let factor = 10f64.powi(max_fraction_digits as i32);
    let rounded = (value * factor).round() / factor;
    let fixed = format!("{:.*}", max_fraction_digits, rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let grouped = group_indian(int_part);
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Insert separators: last three digits, then pairs (1234567 -> 12,34,567)
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// `24/07/2024`
pub fn format_date_numeric(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `Wednesday 24 July 2024`
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%A %-d %B %Y").to_string()
}

/// `Wed 24 Jul`
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%a %-d %b").to_string()
}

/// `24 July`
pub fn format_month_day(date: NaiveDate) -> String {
    date.format("%-d %B").to_string()
}

/// `Wednesday`
pub fn format_weekday(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 24).unwrap()
    }

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("0"), "0");
        assert_eq!(group_indian("999"), "999");
        assert_eq!(group_indian("1000"), "1,000");
        assert_eq!(group_indian("123456"), "1,23,456");
        assert_eq!(group_indian("1234567"), "12,34,567");
        assert_eq!(group_indian("123456789"), "12,34,56,789");
    }

    #[test]
    fn test_format_grouped_trims_fraction() {
        assert_eq!(format_grouped(2333.3, 3), "2,333.3");
        assert_eq!(format_grouped(1552.5, 3), "1,552.5");
        assert_eq!(format_grouped(4490.0, 3), "4,490");
        assert_eq!(format_grouped(0.1234, 3), "0.123");
        assert_eq!(format_grouped(1234.56, 0), "1,235");
        assert_eq!(format_grouped(2.5, 0), "3");
    }

    #[test]
    fn test_amount_formatter() {
        let formatter = AmountFormatter::default();
        assert_eq!(formatter.format(1234567.0), "₹12,34,567");
        assert_eq!(formatter.format(-500.0), "-₹500");
        assert_eq!(formatter.format(-0.0001), "₹0");
        assert_eq!(formatter.format_rounded(12447.5), "₹12,448");
    }

    #[test]
    fn test_format_signed() {
        let formatter = AmountFormatter::new("Rs.");
        assert_eq!(formatter.format_signed(1200.0), "+Rs.1,200");
        assert_eq!(formatter.format_signed(-350.25), "-Rs.350.25");
        assert_eq!(formatter.format_signed(0.0), "+Rs.0");
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(format_date_numeric(date()), "24/07/2024");
        assert_eq!(format_date_long(date()), "Wednesday 24 July 2024");
        assert_eq!(format_date_short(date()), "Wed 24 Jul");
        assert_eq!(format_month_day(date()), "24 July");
        assert_eq!(format_weekday(date()), "Wednesday");
    }
}
