//! en-US display formatting for KPI values.

/// Placeholder shown where a value is undefined, e.g. the mean of no rows.
pub const MISSING: &str = "—";

/// Render a value given in millions as whole US dollars.
///
/// At most one fraction digit is kept and a trailing `.0` is dropped, so
/// `1.5` becomes `"$1,500,000"`.
pub fn format_currency(millions: f64) -> String {
    if !millions.is_finite() {
        return MISSING.to_string();
    }
    let dollars = millions * 1_000_000.0;
    let body = group_tenths(dollars.abs());
    if dollars < 0.0 && body != "0" {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Compact form for chart axes: `12.5` becomes `"$12.5M"`.
pub fn format_currency_millions(millions: f64) -> String {
    if !millions.is_finite() {
        return MISSING.to_string();
    }
    let sign = if millions < 0.0 { "-" } else { "" };
    format!("{sign}${:.1}M", millions.abs())
}

/// Integer with thousands separators: `1234` becomes `"1,234"`.
pub fn format_count(value: u64) -> String {
    group_thousands(value)
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Percentage with an explicit `+` for growth.
pub fn format_signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

/// One-decimal rendering of an optional mean, with a unit suffix.
pub fn format_mean(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}{suffix}"),
        _ => MISSING.to_string(),
    }
}

fn group_tenths(value: f64) -> String {
    let tenths = (value * 10.0).round() as u64;
    let whole = group_thousands(tenths / 10);
    match tenths % 10 {
        0 => whole,
        frac => format!("{whole}.{frac}"),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
