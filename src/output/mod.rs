// Output formatting: terminal display and CSV/JSON reports.

pub mod report;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, unlike byte slicing.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Format an optional statistic with fixed precision, "NaN" when missing
/// (the way pandas prints it).
pub fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.precision$}"),
        _ => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(0.123456), 3), "0.123");
        assert_eq!(fmt_opt(None, 3), "NaN");
        assert_eq!(fmt_opt(Some(f64::NAN), 2), "NaN");
    }
}
