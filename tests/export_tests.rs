mod common;
use common::{rxt, setup_dataset, temp_file, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_png_default_format() {
    let data = setup_dataset("export_png");
    let out = temp_out("export_png", "png");

    rxt()
        .args(["--data", &data, "export", "alice", "--file", &out])
        .assert()
        .success()
        .stdout(contains("PNG export completed"));

    let bytes = fs::read(&out).expect("read exported png");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    // IHDR width: 1200 logical px at 2x
    assert_eq!(u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]), 2400);
}

#[test]
fn test_export_pdf() {
    let data = setup_dataset("export_pdf");
    let out = temp_out("export_pdf", "pdf");

    rxt()
        .args(["--data", &data, "export", "alice", "--format", "pdf", "--file", &out])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read exported pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_xlsx() {
    let data = setup_dataset("export_xlsx");
    let out = temp_out("export_xlsx", "xlsx");

    rxt()
        .args(["--data", &data, "export", "alice", "--format", "xlsx", "--file", &out])
        .assert()
        .success();

    // xlsx is a zip container
    let bytes = fs::read(&out).expect("read exported xlsx");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_csv_includes_unplaced_rows() {
    let data = setup_dataset("export_csv");
    let out = temp_out("export_csv", "csv");

    rxt()
        .args(["--data", &data, "export", "alice", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,roll_no,student_name"));
    assert!(content.contains("Physics"));
    assert!(content.contains("Maths"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_export_json_reflects_edits() {
    let data = setup_dataset("export_json");
    let out = temp_out("export_json", "json");

    rxt()
        .args([
            "--data", &data, "export", "alice", "--format", "json", "--file", &out, "--edit",
            "2:color=#FFCDD2", "--remove", "3",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["color"], "#FFCDD2");
    assert_eq!(rows[1]["start"], "2:00 pm");
    assert_eq!(rows[0]["placed"], true);
}

#[test]
fn test_export_refuses_to_overwrite_without_force() {
    let data = setup_dataset("export_overwrite");
    let out = temp_file("export_overwrite", "json", "old");

    rxt()
        .args(["--data", &data, "export", "alice", "--format", "json", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("already exists"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    rxt()
        .args(["--data", &data, "export", "alice", "--format", "json", "--file", &out, "-f"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("Physics"));
}

#[test]
fn test_export_of_empty_grid_fails_cleanly() {
    let data = temp_file(
        "export_empty_grid_data",
        "json",
        r#"{"exams":[{"studentName":"Alice","rollNo":"R1","courseName":"Physics","date":"2024-01-10","slot":"A"}],
            "dates":{"2024-01-10":1},"slotTiming":{}}"#,
    );
    let out = temp_out("export_empty_grid", "png");

    rxt()
        .args(["--data", &data, "export", "alice", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("zero-size"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_without_match_fails() {
    let data = setup_dataset("export_no_match");
    let out = temp_out("export_no_match", "png");

    rxt()
        .args(["--data", &data, "export", "zelda", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("No student selected"));
}
