use chrono::NaiveDateTime;

/// Placeholder shown for metrics that are undefined (no data).
pub const MISSING: &str = "—";

/// Formats an optional f64 to 4 decimal places, or returns "—" if None or non-finite.
pub fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.4}"),
        _ => MISSING.to_owned(),
    }
}

pub fn fmt_opt_count(v: Option<usize>) -> String {
    v.map_or_else(|| MISSING.to_owned(), |n| n.to_string())
}

pub fn fmt_opt_timestamp(v: Option<&NaiveDateTime>) -> String {
    v.map_or_else(|| MISSING.to_owned(), |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Shortest representation of a value, `-0` folded into `0`.
pub fn fmt_number(v: f64) -> String {
    if v == 0.0 { "0".to_owned() } else { v.to_string() }
}

/// Up to four decimals with trailing zeros removed, used for bin edges.
pub fn fmt_bound(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        &s
    };
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

/// Fraction in `[0, 1]` shown as a percentage with two decimals.
pub fn fmt_percentage(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(1.5)), "1.5000");
        assert_eq!(fmt_opt(None), MISSING);
        assert_eq!(fmt_opt(Some(f64::NAN)), MISSING);
    }

    #[test]
    fn test_fmt_number_folds_negative_zero() {
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(2.0), "2");
        assert_eq!(fmt_number(-2.5), "-2.5");
    }

    #[test]
    fn test_fmt_bound() {
        assert_eq!(fmt_bound(1.25), "1.25");
        assert_eq!(fmt_bound(3.0), "3");
        assert_eq!(fmt_bound(-0.00001), "0");
        assert_eq!(fmt_bound(100.0), "100");
    }

    #[test]
    fn test_fmt_percentage() {
        assert_eq!(fmt_percentage(0.6667), "66.67%");
        assert_eq!(fmt_percentage(1.0), "100.00%");
    }
}
