#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rxt() -> Command {
    cargo_bin_cmd!("rexamtable")
}

/// Two students over two exam days. Slots A1/A2 and B1/B2 share timings,
/// Alice's Maths sits in slot Z which has none.
pub const DATASET: &str = r#"{
  "exams": [
    {"studentName": "Alice Kumar", "rollNo": "CS21B001", "email": "alice@uni.edu",
     "department": "Computer Science", "program": "BTech",
     "courseName": "Physics", "courseCode": "PH101", "date": "2024-01-10", "slot": "A1",
     "classroom": "LH-1", "instructor": "Dr. Rao", "courseType": "Core"},
    {"studentName": "Alice Kumar", "rollNo": "CS21B001", "email": "alice@uni.edu",
     "department": "Computer Science", "program": "BTech",
     "courseName": "Chemistry", "courseCode": "CH101", "date": "2024-01-11", "slot": "B2"},
    {"studentName": "Alice Kumar", "rollNo": "CS21B001", "email": "alice@uni.edu",
     "department": "Computer Science", "program": "BTech",
     "courseName": "Maths", "courseCode": "MA101", "date": "2024-01-11", "slot": "Z"},
    {"studentName": "Bob Singh", "rollNo": "CS21B002", "email": "bob@uni.edu",
     "department": "Computer Science", "program": "BTech",
     "courseName": "Physics", "courseCode": "PH101", "date": "2024-01-10", "slot": "A2"}
  ],
  "dates": {"2024-01-10": 1, "2024-01-11": 2},
  "slotTiming": {
    "A1": {"day": 1, "start": "9:00 am", "end": "11:00 am"},
    "A2": {"day": 1, "start": "9:00 am", "end": "11:00 am"},
    "B1": {"day": 2, "start": "2:00 pm", "end": "4:00 pm"},
    "B2": {"day": 2, "start": "2:00 pm", "end": "4:00 pm"}
  }
}"#;

/// Write `content` to a unique file inside the system temp dir.
pub fn temp_file(name: &str, ext: &str, content: &str) -> String {
    let p = temp_out(name, ext);
    fs::write(&p, content).expect("write fixture");
    p
}

/// The standard fixture dataset, written for test `name`.
pub fn setup_dataset(name: &str) -> String {
    temp_file(&format!("{name}_data"), "json", DATASET)
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rexamtable_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}
