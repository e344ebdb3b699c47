// src/export/model.rs

use crate::core::timetable::Timetable;
use crate::models::{Color, Dataset, SelectedExam, StudentInfo};
use crate::utils::formatting::date_header;
use serde::Serialize;

pub const CORNER_LABEL: &str = "Time Slot";
pub const EMPTY_CELL: &str = "-";
pub const NOT_FINALISED: &str = "Not Finalised Yet";

/// One exam as drawn inside a timetable cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub lines: Vec<String>,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub label: String,
    pub cells: Vec<Vec<Card>>,
}

/// Renderer-neutral layout of a timetable: header labels, row labels and
/// the cards of each cell, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub title: String,
    pub columns: Vec<(String, String)>,
    pub rows: Vec<GridRow>,
}

impl GridView {
    pub fn new(tt: &Timetable, info: Option<&StudentInfo>, show_classrooms: bool) -> Self {
        let columns = tt.dates.iter().map(|d| date_header(d)).collect();

        let rows = tt
            .timings
            .iter()
            .map(|timing| GridRow {
                label: timing.label(),
                cells: tt
                    .dates
                    .iter()
                    .map(|d| {
                        tt.cell(d, timing)
                            .iter()
                            .map(|e| card(e, show_classrooms))
                            .collect()
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: title(info),
            columns,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    /// Column headers as single-line strings, "Jan 10 (Wed)".
    pub fn header_labels(&self) -> Vec<String> {
        std::iter::once(CORNER_LABEL.to_string())
            .chain(self.columns.iter().map(|(d, w)| {
                if w.is_empty() {
                    d.clone()
                } else {
                    format!("{d} ({w})")
                }
            }))
            .collect()
    }
}

pub fn title(info: Option<&StudentInfo>) -> String {
    match info {
        Some(i) => format!("Exam Schedule: {} ({})", i.name, i.roll_no),
        None => "Exam Schedule".to_string(),
    }
}

/// Lines shown for one exam: course name, then the venue lines when enabled.
pub fn card(exam: &SelectedExam, show_classrooms: bool) -> Card {
    let mut lines = vec![exam.record.course_name.clone()];
    if show_classrooms {
        if let Some(room) = exam.classroom() {
            lines.push(format!("Room: {room}"));
        }
        if exam.instructor().is_some() {
            lines.push(NOT_FINALISED.to_string());
        }
    }
    Card {
        lines,
        color: exam.color,
    }
}

/// Flat row for CSV / JSON export of a selection.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ExamExport {
    pub id: usize,
    pub roll_no: String,
    pub student_name: String,
    pub course_code: String,
    pub course_name: String,
    pub date: String,
    pub day: Option<u32>,
    pub slot: String,
    pub start: String,
    pub end: String,
    pub classroom: String,
    pub instructor: String,
    pub course_type: String,
    pub color: String,
    pub placed: bool,
}

pub(crate) fn exams_to_export(
    tt: &Timetable,
    exams: &[SelectedExam],
    data: &Dataset,
) -> Vec<ExamExport> {
    exams
        .iter()
        .map(|e| {
            let placed = tt
                .timings
                .iter()
                .find(|t| tt.cell(&e.record.date, t).iter().any(|c| c.id == e.id));
            let (start, end) = placed
                .map(|t| (t.start.clone(), t.end.clone()))
                .unwrap_or_default();

            ExamExport {
                id: e.id,
                roll_no: e.record.roll_no.clone(),
                student_name: e.record.student_name.clone(),
                course_code: e.record.course_code.clone(),
                course_name: e.record.course_name.clone(),
                date: e.record.date.clone(),
                day: data.day_of(&e.record.date),
                slot: e.record.slot.clone(),
                start,
                end,
                classroom: e.classroom().unwrap_or_default().to_string(),
                instructor: e.instructor().unwrap_or_default().to_string(),
                course_type: e.course_type().unwrap_or_default().to_string(),
                color: e.color.to_string(),
                placed: placed.is_some(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateIndex, ExamRecord, SlotTiming, SlotTimingMap};

    fn fixture() -> (Dataset, Vec<SelectedExam>) {
        let mut dates = DateIndex::new();
        dates.insert("2024-01-10".into(), 1);
        dates.insert("2024-01-11".into(), 2);
        let mut slots = SlotTimingMap::new();
        slots.insert("A".into(), SlotTiming::new("9:00 am", "11:00 am"));

        let physics = ExamRecord {
            student_name: "Alice".into(),
            roll_no: "R1".into(),
            course_name: "Physics".into(),
            date: "2024-01-10".into(),
            slot: "A1".into(),
            classroom: Some("LH-1".into()),
            instructor: Some("Dr. Rao".into()),
            ..ExamRecord::default()
        };
        let lost = ExamRecord {
            course_name: "Lost".into(),
            slot: "Q".into(),
            ..physics.clone()
        };
        let ds = Dataset {
            exams: vec![physics.clone(), lost.clone()],
            dates,
            slot_timing: slots,
        };
        (ds, vec![SelectedExam::new(0, physics), SelectedExam::new(1, lost)])
    }

    #[test]
    fn grid_view_lays_out_cards() {
        let (ds, exams) = fixture();
        let tt = Timetable::build(&exams, &ds.dates, &ds.slot_timing);
        let view = GridView::new(&tt, None, true);

        assert_eq!(view.columns[0], ("Jan 10".to_string(), "Wed".to_string()));
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].label, "9:00 am - 11:00 am");
        assert_eq!(
            view.rows[0].cells[0][0].lines,
            vec!["Physics", "Room: LH-1", NOT_FINALISED]
        );
        assert!(view.rows[0].cells[1].is_empty());
        assert_eq!(view.header_labels()[1], "Jan 10 (Wed)");
    }

    #[test]
    fn hidden_venues_show_course_only() {
        let (ds, exams) = fixture();
        let tt = Timetable::build(&exams, &ds.dates, &ds.slot_timing);
        let view = GridView::new(&tt, None, false);
        assert_eq!(view.rows[0].cells[0][0].lines, vec!["Physics"]);
    }

    #[test]
    fn flat_export_marks_unplaced_rows() {
        let (ds, exams) = fixture();
        let tt = Timetable::build(&exams, &ds.dates, &ds.slot_timing);
        let rows = exams_to_export(&tt, &exams, &ds);

        assert!(rows[0].placed);
        assert_eq!(rows[0].start, "9:00 am");
        assert_eq!(rows[0].day, Some(1));
        assert!(!rows[1].placed);
        assert_eq!(rows[1].start, "");
    }
}
