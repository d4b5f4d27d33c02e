use crate::constants::{MILLION, THOUSAND};

/// Format a USD amount with the dashboard abbreviation rule
///
/// - `>= 1,000,000` → one decimal + `M` (`$1.4M`)
/// - `>= 1,000` → one decimal + `K` (`$12.5K`)
/// - otherwise the integer part unmodified (`$999`)
pub fn format_usd_compact(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "$0".to_string();
    }

    if value >= MILLION {
        format!("${:.1}M", value / MILLION)
    } else if value >= THOUSAND {
        format!("${:.1}K", value / THOUSAND)
    } else {
        format!("${}", value.trunc() as u64)
    }
}

/// Group digits by thousands (`12450` → `12,450`)
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a token price in USD with two decimals
pub fn format_price_usd(value: f64) -> String {
    if !value.is_finite() {
        return "$-".to_string();
    }
    format!("${:.2}", value)
}
