//! Display helpers for KPI values.

/// Insert `,` between groups of three digits of a non-negative integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234.5` → `1,234.50`
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let sign = if value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{}.{f}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(int_part)),
    }
}

/// Rupee amount with two decimals, e.g. `₹12,345.60`.
pub fn format_currency(value: f64) -> String {
    format!("₹{}", format_grouped(value, 2))
}

/// Counts print without decimals when whole.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format_grouped(value, 0)
    } else {
        format_grouped(value, 2)
    }
}
