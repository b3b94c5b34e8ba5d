/// Round to `dp` decimal places, ties to even (`0.125` → `0.12`,
/// `0.135` → `0.14`). Never returns `-0.0`.
pub fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round_ties_even() / factor + 0.0
}

/// Percentage label with two-decimal rounding and at least one fractional
/// digit: `-5.0 %`, `12.34 %`.
pub fn format_pct(value: f64) -> String {
    format!("{:?} %", round_to(value, 2))
}

/// Fixed-point with comma thousands separators: `1,234,567.89`.
pub fn format_thousands(value: f64, dp: usize) -> String {
    let fixed = format!("{:.*}", dp, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Currency-style amount: `$1,234.50`, `-$12.00`.
pub fn format_usd(value: f64) -> String {
    let body = format_thousands(value.abs(), 2);
    if value < 0.0 {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}
