//! German number formatting: `.` groups thousands, `,` separates decimals.

/// Shown for values that cannot be displayed as a number.
pub const NOT_APPLICABLE: &str = "N/A";

/// Formats `value` with a fixed number of decimals and an optional unit,
/// e.g. `format_number(8250.0, 2, "kWh/Jahr") == "8.250,00 kWh/Jahr"`.
///
/// Non-finite values yield [`NOT_APPLICABLE`].
pub fn format_number(value: f64, decimals: usize, unit: &str) -> String {
    if !value.is_finite() {
        return NOT_APPLICABLE.to_string();
    }
    let number = group_decimal(value, decimals);
    if unit.is_empty() {
        number
    } else {
        format!("{} {}", number, unit)
    }
}

/// Formats an integer percentage as `"54 %"`.
pub fn format_percent(value: u32) -> String {
    format!("{} %", value)
}

fn group_decimal(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }

    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}
