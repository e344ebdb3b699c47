//! Build a dataset document from a registration sheet exported as CSV.

use crate::errors::{AppError, AppResult};
use crate::models::{Dataset, ExamRecord, SlotTiming, SlotTimingMap};
use crate::ui::messages::{info, warning};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Columns a row must have to be kept.
const REQUIRED: [&str; 6] = [
    "Roll No",
    "Student Name",
    "Course Code",
    "Course Name",
    "Date",
    "Slot",
];

/// Institution defaults; other slots are read from the `Time` column.
const DEFAULT_TIMINGS: [(&str, &str, &str); 8] = [
    ("A", "9am", "12pm"),
    ("B", "2pm", "5pm"),
    ("C", "9am", "11am"),
    ("D", "11am", "1pm"),
    ("E", "2pm", "4pm"),
    ("F", "4pm", "6pm"),
    ("FN", "9am", "12pm"),
    ("AN", "2pm", "5pm"),
];

const FALLBACK_TIMING: (&str, &str) = ("9am", "12pm");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub exams: usize,
    pub students: usize,
    pub courses: usize,
    pub dates: usize,
    pub slots: usize,
    pub dropped_rows: usize,
    pub defaulted_slots: Vec<String>,
}

struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.trim().to_string(), i))
                .collect(),
        )
    }

    fn get<'r>(&self, row: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.0
            .get(name)
            .and_then(|&i| row.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

/// Normalize the date formats spreadsheets commonly emit to `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d.format("%Y-%m-%d").to_string());
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date().format("%Y-%m-%d").to_string());
        }
    }
    None
}

/// "9:00 AM - 12:00 PM" → ("9am", "12pm").
pub fn parse_time_range(raw: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 2 {
        return None;
    }
    let clean = |s: &str| s.trim().to_lowercase().replace(":00", "").replace(' ', "");
    let (start, end) = (clean(parts[0]), clean(parts[1]));
    if start.is_empty() || end.is_empty() {
        return None;
    }
    Some((start, end))
}

pub fn convert_reader<R: Read>(reader: R) -> AppResult<(Dataset, ConvertSummary)> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let cols = Columns::new(rdr.headers()?);

    if let Some(missing) = REQUIRED.iter().find(|c| !cols.has(c)) {
        return Err(AppError::Convert(format!("missing required column '{missing}'")));
    }

    let mut summary = ConvertSummary::default();
    let mut slot_timing: SlotTimingMap = DEFAULT_TIMINGS
        .iter()
        .map(|(k, s, e)| (k.to_string(), SlotTiming::new(s, e)))
        .collect();
    let mut exams = Vec::new();
    let mut time_of_slot: HashMap<String, String> = HashMap::new();

    for row in rdr.records() {
        let row = row?;

        if REQUIRED.iter().any(|c| cols.get(&row, c).is_none()) {
            summary.dropped_rows += 1;
            continue;
        }
        let get = |c: &str| cols.get(&row, c).unwrap_or_default().to_string();

        let raw_date = get("Date");
        let Some(date) = normalize_date(&raw_date) else {
            warning(format!("Skipping row with unreadable date '{raw_date}'"));
            summary.dropped_rows += 1;
            continue;
        };

        let slot = get("Slot");
        if let Some(t) = cols.get(&row, "Time") {
            time_of_slot.entry(slot.clone()).or_insert_with(|| t.to_string());
        }

        let dept = cols.get(&row, "Department").unwrap_or("N/A").to_string();
        let program = cols.get(&row, "Program").unwrap_or("N/A").to_string();

        exams.push(ExamRecord {
            roll_no: get("Roll No"),
            student_name: get("Student Name"),
            email: get("Email"),
            course_code: get("Course Code"),
            course_name: get("Course Name"),
            slot,
            date,
            department: dept,
            program,
            instructor: cols.get(&row, "Instructor 1").map(String::from),
            classroom: cols.get(&row, "Classroom").map(String::from),
            course_type: cols.get(&row, "Course Type").map(String::from),
        });
    }

    let slots: BTreeSet<&str> = exams.iter().map(|e| e.slot.as_str()).collect();
    for slot in slots {
        if slot_timing.contains_key(slot) {
            continue;
        }
        let timing = time_of_slot
            .get(slot)
            .and_then(|t| parse_time_range(t))
            .map(|(s, e)| SlotTiming {
                day: None,
                start: s,
                end: e,
            });
        let timing = match timing {
            Some(t) => {
                info(format!("Slot {slot}: {} - {}", t.start, t.end));
                t
            }
            None => {
                warning(format!(
                    "Slot '{slot}' not defined in slot timing. Using default {}-{}",
                    FALLBACK_TIMING.0, FALLBACK_TIMING.1
                ));
                summary.defaulted_slots.push(slot.to_string());
                SlotTiming::new(FALLBACK_TIMING.0, FALLBACK_TIMING.1)
            }
        };
        slot_timing.insert(slot.to_string(), timing);
    }

    let unique_dates: BTreeSet<&str> = exams.iter().map(|e| e.date.as_str()).collect();
    let dates = unique_dates
        .iter()
        .enumerate()
        .map(|(i, d)| (d.to_string(), i as u32 + 1))
        .collect();

    summary.exams = exams.len();
    summary.students = exams.iter().map(|e| &e.roll_no).collect::<BTreeSet<_>>().len();
    summary.courses = exams
        .iter()
        .map(|e| &e.course_code)
        .collect::<BTreeSet<_>>()
        .len();
    summary.dates = unique_dates.len();
    summary.slots = slot_timing.len();

    Ok((
        Dataset {
            exams,
            dates,
            slot_timing,
        },
        summary,
    ))
}

/// Convert `input` (CSV) into a dataset JSON document at `output`.
pub fn convert_file(input: &Path, output: &Path) -> AppResult<ConvertSummary> {
    info(format!("Reading sheet: {}", input.display()));
    let (data, summary) = convert_reader(File::open(input)?)?;

    let json = serde_json::to_string_pretty(&data)?;
    let mut f = File::create(output)?;
    f.write_all(json.as_bytes())?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
Date,Time,Roll No,Student Name,Email,Course Code,Course Name,Course Type,Slot,Instructor 1,Department,Program
10/01/2024,9:00 AM - 12:00 PM,R1,Alice,a@x.edu,PH101,Physics,Core,A,Dr. Rao,Physics,BSc
2024-01-11,,R1,Alice,a@x.edu,CH101,Chemistry,,G1,,,
2024-01-12,2:30 PM - 4:00 PM,R2,Bob,b@x.edu,MA101,Maths,Elective,H2,,Maths,BSc
2024-01-12,,,Nobody,n@x.edu,XX000,Ghost,,A,,,
";

    #[test]
    fn converts_rows_and_fills_defaults() {
        let (ds, summary) = convert_reader(SHEET.as_bytes()).unwrap();

        assert_eq!(summary.exams, 3);
        assert_eq!(summary.dropped_rows, 1);
        assert_eq!(summary.students, 2);
        assert_eq!(summary.dates, 3);

        let alice = &ds.exams[0];
        assert_eq!(alice.date, "2024-01-10");
        assert_eq!(alice.instructor.as_deref(), Some("Dr. Rao"));
        assert_eq!(alice.course_type.as_deref(), Some("Core"));

        let chem = &ds.exams[1];
        assert_eq!(chem.department, "N/A");
        assert_eq!(chem.program, "N/A");
        assert!(chem.instructor.is_none());

        assert_eq!(ds.dates["2024-01-10"], 1);
        assert_eq!(ds.dates["2024-01-12"], 3);
    }

    #[test]
    fn slot_timings_from_defaults_time_column_or_fallback() {
        let (ds, summary) = convert_reader(SHEET.as_bytes()).unwrap();

        assert_eq!(ds.slot_timing["A"], SlotTiming::new("9am", "12pm"));
        assert_eq!(ds.slot_timing["H2"], SlotTiming::new("2:30pm", "4pm"));
        assert_eq!(ds.slot_timing["G1"], SlotTiming::new("9am", "12pm"));
        assert_eq!(summary.defaulted_slots, vec!["G1".to_string()]);
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let err = convert_reader("Date,Slot\n2024-01-10,A\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Roll No"));
    }

    #[test]
    fn date_and_range_helpers() {
        assert_eq!(normalize_date("2024-01-10 00:00:00").as_deref(), Some("2024-01-10"));
        assert_eq!(normalize_date("31-12-2024").as_deref(), Some("2024-12-31"));
        assert_eq!(normalize_date("Jan 10"), None);
        assert_eq!(
            parse_time_range("11:00 AM - 1:00 PM"),
            Some(("11am".into(), "1pm".into()))
        );
        assert_eq!(parse_time_range("9am"), None);
    }
}
