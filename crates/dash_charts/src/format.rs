//! Default value formatting and label truncation
//!
//! Used only when the caller does not supply a formatter of its own.

use std::sync::Arc;

/// Placeholder shown for missing or non-numeric values
pub const MISSING_VALUE: &str = "-";

/// Caller-supplied `value -> text` formatter
pub type ValueFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Fixed-point formatting; `-` for missing or NaN values
pub fn format_number(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.digits$}"),
        _ => MISSING_VALUE.to_string(),
    }
}

/// Rounded integer formatting; `-` for missing or NaN values
pub fn format_integer(value: Option<f64>) -> String {
    match value {
        // `+ 0.0` turns -0 into 0
        Some(v) if !v.is_nan() => format!("{}", v.round() + 0.0),
        _ => MISSING_VALUE.to_string(),
    }
}

/// `"<minutes>m <seconds>s"`; `-` for a missing or zero duration
pub fn format_duration_ms(ms: Option<u64>) -> String {
    match ms {
        Some(ms) if ms > 0 => format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000),
        _ => MISSING_VALUE.to_string(),
    }
}

/// Shorten `label` to `max_len - 3` characters plus `...` when it is longer than `max_len`
pub fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Apply the caller's formatter or fall back to fixed-point with `digits`
pub fn format_with(formatter: Option<&ValueFormatter>, value: f64, digits: usize) -> String {
    match formatter {
        Some(f) => f(value),
        None => format_number(Some(value), digits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(Some(1.236), 2), "1.24");
        assert_eq!(format_number(Some(2.4), 0), "2");
        assert_eq!(format_number(Some(7.0), 1), "7.0");
        assert_eq!(format_number(None, 2), "-");
        assert_eq!(format_number(Some(f64::NAN), 2), "-");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(format_integer(Some(41.6)), "42");
        assert_eq!(format_integer(Some(-3.2)), "-3");
        assert_eq!(format_integer(Some(-0.4)), "0");
        assert_eq!(format_integer(Some(-0.0)), "0");
        assert_eq!(format_integer(None), "-");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(Some(1_865_000)), "31m 5s");
        assert_eq!(format_duration_ms(Some(59_999)), "0m 59s");
        assert_eq!(format_duration_ms(Some(0)), "-");
        assert_eq!(format_duration_ms(None), "-");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short", 14), "Short");
        assert_eq!(truncate_label("Exactly14Chars", 14), "Exactly14Chars");
        assert_eq!(truncate_label("A very long champion name", 14), "A very long...");
        assert_eq!(truncate_label("Kha'Zix the Voidreaver", 10), "Kha'Zix...");
        assert_eq!(truncate_label("", 5), "");
    }

    #[test]
    fn test_format_with_override() {
        let pct: ValueFormatter = Arc::new(|v| format!("{:.0}%", v * 100.0));
        assert_eq!(format_with(Some(&pct), 0.52, 0), "52%");
        assert_eq!(format_with(None, 0.52, 1), "0.5");
    }
}
