//! Student lookup over the loaded exam rows.

use crate::models::{ExamRecord, SelectedExam, StudentInfo};
use serde::Serialize;
use std::collections::HashMap;

pub const NOT_FOUND_MESSAGE: &str = "No exam records found for this student.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Substring on student name or roll number (free-text search).
    Contains,
    /// Roll number equality (picking a suggestion).
    ExactRoll,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentSelection {
    pub info: StudentInfo,
    pub exams: Vec<SelectedExam>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank; nothing to do.
    Empty,
    NotFound,
    Found(StudentSelection),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub roll_no: String,
}

pub fn search(exams: &[ExamRecord], query: &str, mode: SearchMode) -> SearchOutcome {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return SearchOutcome::Empty;
    }

    let matches: Vec<&ExamRecord> = exams
        .iter()
        .filter(|e| match mode {
            SearchMode::ExactRoll => e.roll_no.to_lowercase() == q,
            SearchMode::Contains => {
                e.student_name.to_lowercase().contains(&q) || e.roll_no.to_lowercase().contains(&q)
            }
        })
        .collect();

    let Some(first) = matches.first() else {
        return SearchOutcome::NotFound;
    };

    let info = StudentInfo::from(*first);
    let exams = matches
        .iter()
        .enumerate()
        .map(|(i, r)| SelectedExam::new(i, (*r).clone()))
        .collect();

    SearchOutcome::Found(StudentSelection { info, exams })
}

/// Live suggestions: one entry per distinct (lowercased) student name whose
/// name contains the query. Nothing is suggested below `min_len` characters.
pub fn suggestions(exams: &[ExamRecord], query: &str, min_len: usize) -> Vec<Suggestion> {
    if query.is_empty() || query.chars().count() < min_len {
        return Vec::new();
    }
    let q = query.to_lowercase();

    let mut order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, &ExamRecord> = HashMap::new();

    for e in exams {
        let key = e.student_name.to_lowercase();
        if !key.contains(&q) {
            continue;
        }
        if by_name.insert(key.clone(), e).is_none() {
            order.push(key);
        }
    }

    order
        .iter()
        .filter_map(|k| by_name.get(k))
        .map(|e| Suggestion {
            name: e.student_name.clone(),
            roll_no: e.roll_no.clone(),
        })
        .collect()
}
