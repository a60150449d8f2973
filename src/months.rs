//! Month labels in the `"<month> de <year>"` form used throughout the
//! metrics, e.g. `"novembro de 2024"`, plus the ordinal table needed to sort
//! labels chronologically.

use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Long-form month label for a date, e.g. `"março de 2024"`.
pub fn month_label(date: NaiveDate) -> String {
    format!("{} de {}", MONTH_NAMES[date.month0() as usize], date.year())
}

/// 1-based ordinal for a lowercase month name.
pub fn month_ordinal(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name.to_lowercase())
        .map(|i| i as u32 + 1)
}

/// Parse a `"<month> de <year>"` label back into `(year, month ordinal)` for
/// chronological comparison.
pub fn parse_month_label(label: &str) -> Option<(i32, u32)> {
    let (name, year) = label.split_once(" de ")?;
    let ordinal = month_ordinal(name.trim())?;
    let year: i32 = year.trim().parse().ok()?;
    Some((year, ordinal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_label() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        assert_eq!(month_label(date), "novembro de 2024");

        let date = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        assert_eq!(month_label(date), "março de 2023");
    }

    #[test]
    fn test_label_round_trip() {
        for month in 1..=12 {
            let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
            assert_eq!(parse_month_label(&month_label(date)), Some((2024, month)));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        assert_eq!(parse_month_label("smarch de 2024"), None);
        assert_eq!(parse_month_label("novembro 2024"), None);
        assert_eq!(parse_month_label("novembro de vinte"), None);
    }

    #[test]
    fn test_chronological_ordering_key() {
        let a = parse_month_label("dezembro de 2023").unwrap();
        let b = parse_month_label("janeiro de 2024").unwrap();
        assert!(a < b);
    }
}
