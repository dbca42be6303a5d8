// Missing-cell detection.
//
// Study exports come out of pandas and Qualtrics, where a missing value can
// be an empty cell or one of pandas' default NA markers. Both read as
// missing here.

/// Cell contents pandas' `read_csv` treats as NaN by default.
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell is empty, whitespace-only, or an NA marker.
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_VALUES.contains(&cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_are_missing() {
        assert!(is_missing(""));
        assert!(is_missing("   "));
    }

    #[test]
    fn test_na_markers_are_missing() {
        for marker in ["NA", "N/A", "nan", "NaN", "NULL", "null", " NA "] {
            assert!(is_missing(marker), "{marker:?} should be missing");
        }
    }

    #[test]
    fn test_text_is_present() {
        assert!(!is_missing("build a wall"));
        assert!(!is_missing("na"));
        assert!(!is_missing("Nan bread"));
    }
}
