//! Application state for one lookup session: the selected student, the row
//! being edited and the venue toggle.

use crate::core::search::{SearchOutcome, StudentSelection};
use crate::core::slot::normalize_slot;
use crate::core::timetable::Timetable;
use crate::errors::{AppError, AppResult};
use crate::models::{Color, Dataset, SelectedExam, StudentInfo};

/// Field changes for one exam row. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamUpdate {
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub date: Option<String>,
    pub slot: Option<String>,
    pub classroom: Option<String>,
    pub instructor: Option<String>,
    pub color: Option<Color>,
}

impl ExamUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ExamUpdate::default()
    }

    /// Parse one `field=value` assignment into this update.
    ///
    /// Fields: `name`/`course`, `code`, `date`, `slot`, `room`/`classroom`,
    /// `instructor`, `color`.
    pub fn parse_assignment(&mut self, assignment: &str) -> AppResult<()> {
        let (field, value) = assignment.split_once('=').ok_or_else(|| {
            AppError::InvalidEdit(format!("expected field=value, got '{assignment}'"))
        })?;
        let value = value.trim().to_string();

        match field.trim().to_ascii_lowercase().as_str() {
            "name" | "course" | "course_name" => self.course_name = Some(value),
            "code" | "course_code" => self.course_code = Some(value),
            "date" => {
                chrono::NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| AppError::InvalidDate(value.clone()))?;
                self.date = Some(value);
            }
            "slot" => self.slot = Some(normalize_slot(&value)),
            "room" | "classroom" => self.classroom = Some(value),
            "instructor" => self.instructor = Some(value),
            "color" | "colour" => self.color = Some(value.parse()?),
            other => return Err(AppError::InvalidEdit(format!("unknown field '{other}'"))),
        }
        Ok(())
    }

    /// Build an update from several assignments, e.g. `["room=L1", "color=3"]`.
    pub fn from_assignments<S: AsRef<str>>(items: &[S]) -> AppResult<Self> {
        let mut u = ExamUpdate::default();
        for item in items {
            u.parse_assignment(item.as_ref())?;
        }
        Ok(u)
    }

    fn apply(self, exam: &mut SelectedExam) {
        let r = &mut exam.record;
        if let Some(v) = self.course_name {
            r.course_name = v;
        }
        if let Some(v) = self.course_code {
            r.course_code = v;
        }
        if let Some(v) = self.date {
            r.date = v;
        }
        if let Some(v) = self.slot {
            r.slot = v;
        }
        if let Some(v) = self.classroom {
            r.classroom = Some(v);
        }
        if let Some(v) = self.instructor {
            r.instructor = Some(v);
        }
        if let Some(c) = self.color {
            exam.color = c;
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    selection: Option<StudentSelection>,
    editing: Option<usize>,
    pub show_classrooms: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AppState {
    pub fn new(show_classrooms: bool) -> Self {
        Self {
            selection: None,
            editing: None,
            show_classrooms,
        }
    }

    /// Apply a search result. A miss clears the previous student.
    pub fn apply_search(&mut self, outcome: SearchOutcome) {
        match outcome {
            SearchOutcome::Empty => {}
            SearchOutcome::NotFound => {
                self.selection = None;
                self.editing = None;
            }
            SearchOutcome::Found(sel) => {
                self.selection = Some(sel);
                self.editing = None;
            }
        }
    }

    pub fn info(&self) -> Option<&StudentInfo> {
        self.selection.as_ref().map(|s| &s.info)
    }

    pub fn exams(&self) -> &[SelectedExam] {
        self.selection
            .as_ref()
            .map(|s| s.exams.as_slice())
            .unwrap_or(&[])
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    pub fn exam(&self, id: usize) -> AppResult<&SelectedExam> {
        self.exams()
            .iter()
            .find(|e| e.id == id)
            .ok_or(AppError::UnknownExam(id))
    }

    pub fn begin_edit(&mut self, id: usize) -> AppResult<()> {
        self.exam(id)?;
        self.editing = Some(id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Merge `update` into the row with `id` and leave edit mode.
    pub fn update_exam(&mut self, id: usize, update: ExamUpdate) -> AppResult<()> {
        let sel = self.selection.as_mut().ok_or(AppError::NoSelection)?;
        let exam = sel
            .exams
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(AppError::UnknownExam(id))?;

        update.apply(exam);
        self.editing = None;
        Ok(())
    }

    pub fn remove_exam(&mut self, id: usize) -> AppResult<SelectedExam> {
        let sel = self.selection.as_mut().ok_or(AppError::NoSelection)?;
        let pos = sel
            .exams
            .iter()
            .position(|e| e.id == id)
            .ok_or(AppError::UnknownExam(id))?;

        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(sel.exams.remove(pos))
    }

    pub fn toggle_classrooms(&mut self) -> bool {
        self.show_classrooms = !self.show_classrooms;
        self.show_classrooms
    }

    pub fn timetable(&self, data: &Dataset) -> Timetable {
        Timetable::build(self.exams(), &data.dates, &data.slot_timing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::{SearchMode, search};
    use crate::models::{ExamRecord, PALETTE, SlotTiming};

    fn dataset() -> Dataset {
        let mut ds = Dataset::default();
        ds.dates.insert("2024-01-10".into(), 1);
        ds.dates.insert("2024-01-11".into(), 2);
        ds.slot_timing
            .insert("A".into(), SlotTiming::new("9:00 am", "11:00 am"));
        ds.slot_timing
            .insert("B".into(), SlotTiming::new("2:00 pm", "4:00 pm"));
        for (course, date, slot) in [
            ("Physics", "2024-01-10", "A1"),
            ("Maths", "2024-01-11", "B2"),
        ] {
            ds.exams.push(ExamRecord {
                student_name: "Alice".into(),
                roll_no: "R1".into(),
                course_name: course.into(),
                date: date.into(),
                slot: slot.into(),
                ..ExamRecord::default()
            });
        }
        ds
    }

    fn selected() -> (Dataset, AppState) {
        let ds = dataset();
        let mut st = AppState::default();
        st.apply_search(search(&ds.exams, "r1", SearchMode::Contains));
        (ds, st)
    }

    #[test]
    fn not_found_clears_previous_selection() {
        let (ds, mut st) = selected();
        assert_eq!(st.exams().len(), 2);

        st.apply_search(search(&ds.exams, "nobody", SearchMode::Contains));
        assert!(st.info().is_none());
        assert!(st.exams().is_empty());
    }

    #[test]
    fn blank_search_keeps_selection() {
        let (ds, mut st) = selected();
        st.apply_search(search(&ds.exams, "  ", SearchMode::Contains));
        assert_eq!(st.exams().len(), 2);
    }

    #[test]
    fn update_moves_exam_between_cells() {
        let (ds, mut st) = selected();
        st.begin_edit(1).unwrap();
        assert_eq!(st.editing(), Some(1));

        let update = ExamUpdate::from_assignments(&[
            "date=2024-01-11",
            "slot=B7",
            "room=LH-2",
            "color=#FFCDD2",
        ])
        .unwrap();
        st.update_exam(1, update).unwrap();
        assert_eq!(st.editing(), None);

        let e = st.exam(1).unwrap();
        assert_eq!(e.record.slot, "B");
        assert_eq!(e.classroom(), Some("LH-2"));
        assert_eq!(e.color, PALETTE[5]);

        let tt = st.timetable(&ds);
        let afternoon = tt.timings.iter().find(|t| t.start == "2:00 pm").unwrap();
        assert_eq!(tt.cell("2024-01-11", afternoon).len(), 2);
        assert_eq!(tt.placed_count(), 2);
    }

    #[test]
    fn cancel_does_not_mutate() {
        let (_, mut st) = selected();
        let before = st.exams().to_vec();
        st.begin_edit(2).unwrap();
        st.cancel_edit();
        assert_eq!(st.exams(), before.as_slice());
        assert_eq!(st.editing(), None);
    }

    #[test]
    fn remove_keeps_other_ids_stable() {
        let (_, mut st) = selected();
        let removed = st.remove_exam(1).unwrap();
        assert_eq!(removed.record.course_name, "Physics");
        assert_eq!(st.exams().len(), 1);
        assert_eq!(st.exams()[0].id, 2);
        assert!(matches!(st.remove_exam(1), Err(AppError::UnknownExam(1))));
    }

    #[test]
    fn edits_without_selection_fail() {
        let mut st = AppState::default();
        assert!(matches!(
            st.update_exam(1, ExamUpdate::default()),
            Err(AppError::NoSelection)
        ));
        assert!(st.begin_edit(1).is_err());
    }

    #[test]
    fn assignment_parsing_rejects_bad_input() {
        let mut u = ExamUpdate::default();
        assert!(u.parse_assignment("room").is_err());
        assert!(u.parse_assignment("weather=sunny").is_err());
        assert!(u.parse_assignment("date=10/01/2024").is_err());
        assert!(u.parse_assignment("color=blue").is_err());
        assert!(u.is_empty());
    }

    #[test]
    fn toggle_flips_venue_visibility() {
        let mut st = AppState::new(true);
        assert!(!st.toggle_classrooms());
        assert!(st.toggle_classrooms());
    }
}
