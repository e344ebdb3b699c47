//! Terminal rendering of a selection: info card, subject list, timetable.

use crate::core::slot::normalize_slot;
use crate::core::timetable::Unresolved;
use crate::core::Suggestion;
use crate::export::GridView;
use crate::models::{Dataset, SelectedExam, StudentInfo};
use crate::utils::colors::paint;
use crate::utils::formatting::{bullet_join, short_date};
use crate::utils::table::{Cell, Table};
use std::io::IsTerminal;

/// Colors are emitted only when stdout is a terminal.
pub fn use_ansi() -> bool {
    std::io::stdout().is_terminal()
}

pub fn info_card(info: &StudentInfo) -> String {
    let rows = [
        ("Name", info.name.as_str()),
        ("Roll No", info.roll_no.as_str()),
        ("Email", info.email.as_str()),
        ("Department", info.department.as_str()),
        ("Program", info.program.as_str()),
    ];
    rows.iter()
        .map(|(k, v)| format!("{k:<11}: {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The three lines describing one exam row in the subject list.
pub fn subject_lines(exam: &SelectedExam, data: &Dataset) -> Vec<String> {
    let r = &exam.record;

    let day = match data.day_of(&r.date) {
        Some(n) => format!("Day {n} ({})", short_date(&r.date)),
        None => short_date(&r.date),
    };

    let slot = normalize_slot(&r.slot);
    let slot = match data.slot_timing.get(&slot) {
        Some(t) => format!("Slot {slot} ({})", t.display()),
        None if slot.is_empty() => String::new(),
        None => format!("Slot {slot}"),
    };

    let mut lines = vec![
        format!("[{}] {}", exam.id, r.course_name),
        bullet_join([
            r.course_code.as_str(),
            day.as_str(),
            slot.as_str(),
            exam.course_type().unwrap_or_default(),
        ]),
    ];

    let venue = bullet_join([
        exam.classroom()
            .map(|c| format!("Room: {c}"))
            .unwrap_or_default()
            .as_str(),
        exam.instructor().unwrap_or_default(),
    ]);
    if !venue.is_empty() {
        lines.push(venue);
    }
    lines
}

pub fn subject_list(exams: &[SelectedExam], data: &Dataset, ansi: bool) -> String {
    let mut out = Vec::new();
    for exam in exams {
        for line in subject_lines(exam, data) {
            out.push(if ansi { paint(&format!(" {line} "), exam.color) } else { line });
        }
        out.push(String::new());
    }
    out.join("\n")
}

pub fn timetable(view: &GridView, ansi: bool) -> String {
    let mut headers = vec![Cell::text("Time Slot")];
    headers.extend(view.columns.iter().map(|(date, weekday)| {
        if weekday.is_empty() {
            Cell::text(date.clone())
        } else {
            Cell::lines(vec![date.clone(), weekday.clone()])
        }
    }));

    let mut table = Table::new(headers).with_max_col_width(22).with_ansi(ansi);
    for row in &view.rows {
        let mut cells = vec![Cell::text(row.label.clone())];
        for cards in &row.cells {
            if cards.is_empty() {
                cells.push(Cell::placeholder("-"));
                continue;
            }
            let mut cell = Cell::default();
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    // blank separator between stacked exams
                    cell.push_block(vec![String::new()], card.color);
                }
                cell.push_block(card.lines.clone(), card.color);
            }
            cells.push(cell);
        }
        table.add_row(cells);
    }
    table.render()
}

/// One line per exam that has no timetable cell.
pub fn unresolved(list: &[Unresolved]) -> Vec<String> {
    list.iter()
        .map(|u| format!("[{}] {}: {}", u.exam.id, u.exam.record.course_name, u.reason))
        .collect()
}

pub fn suggestion_list(list: &[Suggestion]) -> String {
    list.iter()
        .map(|s| format!("{} ({})", s.name, s.roll_no))
        .collect::<Vec<_>>()
        .join("\n")
}
