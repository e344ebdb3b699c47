//! Formatting utilities used for CLI and export outputs.

use chrono::NaiveDate;

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Column header for a date key: ("Jan 10", "Wed").
/// Keys that are not dates are shown as-is with no weekday.
pub fn date_header(date: &str) -> (String, String) {
    match parse_date(date) {
        Some(d) => (d.format("%b %-d").to_string(), d.format("%a").to_string()),
        None => (date.to_string(), String::new()),
    }
}

/// "Jan 10".
pub fn short_date(date: &str) -> String {
    date_header(date).0
}

/// "Wednesday, Jan 10, 2024", as in the date picker of the edit form.
pub fn long_date(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%A, %b %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// Join the present parts with " • ".
pub fn bullet_join<'a, I: IntoIterator<Item = &'a str>>(parts: I) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_headers() {
        assert_eq!(
            date_header("2024-01-10"),
            ("Jan 10".to_string(), "Wed".to_string())
        );
        assert_eq!(date_header("someday"), ("someday".to_string(), String::new()));
        assert_eq!(long_date("2024-01-10"), "Wednesday, Jan 10, 2024");
    }

    #[test]
    fn bullet_join_skips_empty() {
        assert_eq!(bullet_join(["PH101", "", "Core"]), "PH101 • Core");
    }
}
