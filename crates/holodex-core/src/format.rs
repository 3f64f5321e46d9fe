//! Display formatting for character detail and card views.

use chrono::{DateTime, NaiveDate};

/// Placeholder shown when a value cannot be formatted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format an ISO-8601 timestamp as `dd-MM-yyyy`.
///
/// Accepts full RFC 3339 timestamps and bare `yyyy-mm-dd` dates. Anything
/// else yields [`NOT_AVAILABLE`].
#[must_use]
pub fn format_date(iso_date: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso_date) {
        return dt.format("%d-%m-%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") {
        return date.format("%d-%m-%Y").to_string();
    }
    NOT_AVAILABLE.to_string()
}

/// Convert a centimetre string to metres with two decimals, e.g. `"172"` to `"1.72 m"`.
#[must_use]
pub fn cm_to_meters(cm: &str) -> String {
    match cm.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{:.2} m", value / 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// ANSI foreground colour code for a species badge, keyed by resolved species name.
#[must_use]
pub fn category_color(species_name: &str) -> &'static str {
    match species_name {
        "Droid" => "90",
        "Human" => "34",
        "Wookiee" => "33",
        "Yoda" | "Yoda's species" => "32",
        _ => "31",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2014-12-09T13:50:51.644000Z"), "09-12-2014");
        assert_eq!(format_date("2014-12-20"), "20-12-2014");
        assert_eq!(format_date("yesterday"), "N/A");
        assert_eq!(format_date(""), "N/A");
    }

    #[test]
    fn test_cm_to_meters() {
        assert_eq!(cm_to_meters("172"), "1.72 m");
        assert_eq!(cm_to_meters("66"), "0.66 m");
        assert_eq!(cm_to_meters("unknown"), "N/A");
    }

    #[test]
    fn test_category_color_default() {
        assert_eq!(category_color("Human"), "34");
        assert_eq!(category_color("Yoda's species"), "32");
        assert_eq!(category_color("Hutt"), "31");
    }
}
