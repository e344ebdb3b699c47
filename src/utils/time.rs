//! Time utilities: parsing "h:mm am/pm" strings into minutes of the day.

use regex::Regex;
use std::sync::LazyLock;

static AMPM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)(?::(\d+))?\s*(am|pm)").expect("static time regex")
});

/// Parse the first "h[:mm] am|pm" occurrence in `t` into minutes since midnight.
///
/// - `12 am` → 0, `12 pm` → 720, any other pm hour adds 720
/// - hours above 12 or minutes above 59 are rejected
pub fn minutes_of_day(t: &str) -> Option<u32> {
    let caps = AMPM_RE.captures(t)?;

    let mut hours: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    if hours > 12 || minutes > 59 {
        return None;
    }

    let is_pm = caps.get(3)?.as_str().eq_ignore_ascii_case("pm");
    if is_pm && hours != 12 {
        hours += 12;
    }
    if !is_pm && hours == 12 {
        hours = 0;
    }

    Some(hours * 60 + minutes)
}

/// Lenient variant used for ordering: unparsable strings sort as midnight.
pub fn time_to_minutes(t: &str) -> u32 {
    minutes_of_day(t).unwrap_or_else(|| {
        log::debug!("unparsable time '{t}', treating as 00:00");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noon_and_midnight_policy() {
        assert_eq!(time_to_minutes("12:00 am"), 0);
        assert_eq!(time_to_minutes("12:00 pm"), 720);
        assert_eq!(time_to_minutes("1:00 pm"), 780);
        assert_eq!(time_to_minutes("12:30 AM"), 30);
    }

    #[test]
    fn hour_only_and_compact_forms() {
        assert_eq!(time_to_minutes("9am"), 540);
        assert_eq!(time_to_minutes("2 PM"), 840);
        assert_eq!(time_to_minutes("9:30 am"), 570);
        assert_eq!(time_to_minutes("11:59 pm"), 1439);
    }

    #[test]
    fn unparsable_degrades_to_midnight() {
        assert_eq!(minutes_of_day("noon"), None);
        assert_eq!(time_to_minutes("noon"), 0);
        assert_eq!(time_to_minutes(""), 0);
        assert_eq!(time_to_minutes("14:00"), 0);
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        assert_eq!(minutes_of_day("13:00 pm"), None);
        assert_eq!(minutes_of_day("9:75 am"), None);
    }

    #[test]
    fn every_valid_clock_time_stays_in_day_range() {
        for h in 1..=12u32 {
            for m in [0u32, 15, 30, 59] {
                for marker in ["am", "pm", "AM", "Pm"] {
                    let s = format!("{h}:{m:02} {marker}");
                    let v = minutes_of_day(&s).unwrap();
                    assert!(v <= 1439, "{s} -> {v}");
                    assert_eq!(v % 60, m);
                }
            }
        }
    }
}
