use super::color::Color;
use serde::{Deserialize, Serialize};

/// One registration row of the dataset: a student sitting one course exam.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExamRecord {
    pub student_name: String,
    pub roll_no: String,
    pub email: String,
    pub department: String,
    pub program: String,
    pub course_name: String,
    pub course_code: String,
    pub date: String,
    pub slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_type: Option<String>,
}

/// A student's exam row once picked into the current selection.
///
/// `id` is the 1-based position inside the selection it was created in,
/// it does not change when other rows are removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedExam {
    pub id: usize,
    pub color: Color,
    #[serde(flatten)]
    pub record: ExamRecord,
}

impl SelectedExam {
    pub fn new(index: usize, record: ExamRecord) -> Self {
        Self {
            id: index + 1,
            color: Color::for_index(index),
            record,
        }
    }

    /// Non-empty classroom, if any.
    pub fn classroom(&self) -> Option<&str> {
        non_empty(self.record.classroom.as_deref())
    }

    pub fn instructor(&self) -> Option<&str> {
        non_empty(self.record.instructor.as_deref())
    }

    pub fn course_type(&self) -> Option<&str> {
        non_empty(self.record.course_type.as_deref())
    }
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

/// Identity fields of the first matching record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentInfo {
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub department: String,
    pub program: String,
}

impl From<&ExamRecord> for StudentInfo {
    fn from(r: &ExamRecord) -> Self {
        Self {
            name: r.student_name.clone(),
            roll_no: r.roll_no.clone(),
            email: r.email.clone(),
            department: r.department.clone(),
            program: r.program.clone(),
        }
    }
}
