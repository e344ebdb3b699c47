mod common;
use common::{rxt, setup_dataset, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_session_search_edit_remove_export() {
    let data = setup_dataset("session_flow");
    let out = temp_out("session_flow", "csv");

    let script = format!(
        "search alice\nedit 1 room=LH 9 instructor=Dr. Iyer\nremove 2\nrooms\nexport csv {out}\nquit\n"
    );

    rxt()
        .args(["--data", &data, "session"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Alice Kumar"))
        .stdout(contains("Updated [1]"))
        .stdout(contains("Removed [2] Chemistry"))
        .stdout(contains("Classroom details hidden."))
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read session export");
    assert!(content.contains("LH 9"));
    assert!(content.contains("Dr. Iyer"));
    assert!(!content.contains("Chemistry"));
}

#[test]
fn test_session_reports_errors_and_keeps_going() {
    let data = setup_dataset("session_errors");

    rxt()
        .args(["--data", &data, "session"])
        .write_stdin("show\nfly away\nsearch zelda\npick CS21B002\nquit\n")
        .assert()
        .success()
        .stderr(contains("No student selected"))
        .stderr(contains("Unknown command 'fly'"))
        .stdout(contains("No exam records found for this student."))
        .stdout(contains("Bob Singh"));
}

#[test]
fn test_session_ends_on_eof() {
    let data = setup_dataset("session_eof");

    rxt()
        .args(["--data", &data, "session"])
        .write_stdin("suggest alice\n")
        .assert()
        .success()
        .stdout(contains("Alice Kumar (CS21B001)"));
}
