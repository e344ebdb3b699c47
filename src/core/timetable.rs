//! Pivot of a student's exam rows into a date × timing grid.

use crate::core::slot::normalize_slot;
use crate::models::{DateIndex, SelectedExam, SlotTiming, SlotTimingMap};
use crate::utils::time::time_to_minutes;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Row key of the timetable: slots sharing start and end share a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TimingPair {
    pub start: String,
    pub end: String,
}

impl TimingPair {
    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }

    pub fn start_minutes(&self) -> u32 {
        time_to_minutes(&self.start)
    }
}

impl From<&SlotTiming> for TimingPair {
    fn from(t: &SlotTiming) -> Self {
        Self {
            start: t.start.clone(),
            end: t.end.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub date: String,
    pub timing: TimingPair,
}

/// Why an exam could not be placed in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    MissingSlot,
    UnknownSlot(String),
    UnknownDate(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::MissingSlot => write!(f, "no slot assigned"),
            UnresolvedReason::UnknownSlot(s) => write!(f, "slot '{s}' has no timing"),
            UnresolvedReason::UnknownDate(d) => write!(f, "date '{d}' is outside the exam period"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unresolved {
    pub exam: SelectedExam,
    pub reason: UnresolvedReason,
}

#[derive(Debug, Clone, Default)]
pub struct Timetable {
    pub dates: Vec<String>,
    pub timings: Vec<TimingPair>,
    cells: HashMap<CellKey, Vec<SelectedExam>>,
    pub unresolved: Vec<Unresolved>,
}

impl Timetable {
    pub fn build(exams: &[SelectedExam], dates: &DateIndex, slot_timing: &SlotTimingMap) -> Self {
        // DateIndex is ordered, so its keys are already lexicographic.
        let sorted_dates: Vec<String> = dates.keys().cloned().collect();

        let mut timings: Vec<TimingPair> = Vec::new();
        for t in slot_timing.values() {
            let pair = TimingPair::from(t);
            if !timings.contains(&pair) {
                timings.push(pair);
            }
        }
        timings.sort_by_key(TimingPair::start_minutes);

        let mut cells = HashMap::with_capacity(sorted_dates.len() * timings.len());
        for date in &sorted_dates {
            for timing in &timings {
                cells.insert(
                    CellKey {
                        date: date.clone(),
                        timing: timing.clone(),
                    },
                    Vec::new(),
                );
            }
        }

        let lookup: HashMap<String, &SlotTiming> = slot_timing
            .iter()
            .map(|(k, v)| (normalize_slot(k), v))
            .collect();

        let mut unresolved = Vec::new();
        for exam in exams {
            if let Err(reason) = place(exam, &lookup, &mut cells) {
                log::debug!("exam #{} not placed: {reason}", exam.id);
                unresolved.push(Unresolved {
                    exam: exam.clone(),
                    reason,
                });
            }
        }

        Self {
            dates: sorted_dates,
            timings,
            cells,
            unresolved,
        }
    }

    /// Exams in the `(date, timing)` cell; empty for keys outside the grid.
    pub fn cell(&self, date: &str, timing: &TimingPair) -> &[SelectedExam] {
        self.cells
            .get(&CellKey {
                date: date.to_string(),
                timing: timing.clone(),
            })
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn placed_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// True when the grid has no rows or no columns to render.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.timings.is_empty()
    }
}

fn place(
    exam: &SelectedExam,
    lookup: &HashMap<String, &SlotTiming>,
    cells: &mut HashMap<CellKey, Vec<SelectedExam>>,
) -> Result<(), UnresolvedReason> {
    if exam.record.slot.trim().is_empty() {
        return Err(UnresolvedReason::MissingSlot);
    }

    let canonical = normalize_slot(exam.record.slot.trim());
    let timing = lookup
        .get(&canonical)
        .ok_or_else(|| UnresolvedReason::UnknownSlot(canonical.clone()))?;

    let key = CellKey {
        date: exam.record.date.clone(),
        timing: TimingPair::from(*timing),
    };

    match cells.get_mut(&key) {
        Some(list) => {
            list.push(exam.clone());
            Ok(())
        }
        None => Err(UnresolvedReason::UnknownDate(exam.record.date.clone())),
    }
}
