mod common;
use common::{rxt, temp_file, temp_out};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

const SHEET: &str = "\
Date,Time,Roll No,Student Name,Email,Course Code,Course Name,Course Type,Slot,Instructor 1,Department,Program,Classroom
10/01/2024,9:00 AM - 12:00 PM,CS21B001,Alice Kumar,alice@uni.edu,PH101,Physics,Core,A,Dr. Rao,CS,BTech,LH-1
11/01/2024,2:30 PM - 4:00 PM,CS21B001,Alice Kumar,alice@uni.edu,CH101,Chemistry,Core,H1,,CS,BTech,
11/01/2024,,CS21B002,Bob Singh,bob@uni.edu,MA101,Maths,,Q2,,,,
11/01/2024,,,Ghost,ghost@uni.edu,XX000,Nothing,,A,,,,
";

#[test]
fn test_convert_builds_a_loadable_dataset() {
    let input = temp_file("convert_sheet", "csv", SHEET);
    let output = temp_out("convert_sheet", "json");

    rxt()
        .args(["convert", "--input", &input, "--output", &output])
        .assert()
        .success()
        .stdout(contains("Dataset written to"))
        .stdout(contains("1 row(s) skipped"))
        .stdout(contains("Slot 'Q2' not defined"));

    let content = fs::read_to_string(&output).expect("read dataset");
    let json: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(json["exams"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["dates"]["2024-01-10"], 1);
    assert_eq!(json["slotTiming"]["H1"]["start"], "2:30pm");
    assert_eq!(json["exams"][1]["department"], "CS");
    assert_eq!(json["exams"][2]["program"], "N/A");

    // the converted file drives the lookup directly; H1 and the default A
    // slot both resolve through the canonical slot names
    rxt()
        .args(["--data", &output, "show", "alice"])
        .assert()
        .success()
        .stdout(contains("9am - 12pm"))
        .stdout(contains("2:30pm - 4pm"))
        .stdout(contains("could not be placed").not());
}

#[test]
fn test_convert_rejects_sheet_without_required_columns() {
    let input = temp_file("convert_bad_sheet", "csv", "Date,Slot\n2024-01-10,A\n");
    let output = temp_out("convert_bad_sheet", "json");

    rxt()
        .args(["convert", "--input", &input, "--output", &output])
        .assert()
        .failure()
        .stderr(contains("missing required column"));
}
