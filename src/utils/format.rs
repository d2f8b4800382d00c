//! Display helpers for calculator values.
//!
//! Currency is always rendered in US-dollar style, independent of the
//! interface language.

/// Formats an amount as whole US dollars, e.g. `960000.0` -> `"$960,000"`.
///
/// Rounds half away from zero, groups thousands with `,` and puts the sign
/// in front of the symbol (`-$1,234`). Non-finite values render as `$NaN`,
/// `$∞` and `-$∞`.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "$∞" } else { "-$∞" }.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// `40.0` -> `"40h"`
pub fn format_hours(value: f64) -> String {
    format!("{}h", value)
}

/// `5.0` -> `"5%"`, `2.5` -> `"2.5%"`
pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}

pub fn format_months(months: u32) -> String {
    if months == 1 {
        "1 month".to_string()
    } else {
        format!("{} months", months)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
