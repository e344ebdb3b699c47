use crate::cli::commands::{load_dataset, select};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AppState;
use crate::errors::AppResult;
use crate::export::GridView;
use crate::models::Dataset;
use crate::ui::messages::{header, info, warning};
use crate::ui::render;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { select: args } = cmd {
        let data = load_dataset(cfg);
        if let Some(state) = select(&data, args, cfg)? {
            print_selection(&state, &data);
        }
    }
    Ok(())
}

/// Info card, subject list and timetable of the current selection.
pub(crate) fn print_selection(state: &AppState, data: &Dataset) {
    let Some(student) = state.info() else {
        return;
    };
    let ansi = render::use_ansi();

    header("Student Information");
    println!("{}", render::info_card(student));

    header(format!("Subjects ({})", state.exams().len()));
    if state.exams().is_empty() {
        info("No subjects left in the selection.");
    } else {
        println!("{}", render::subject_list(state.exams(), data, ansi));
    }

    print_timetable(state, data);
}

pub(crate) fn print_timetable(state: &AppState, data: &Dataset) {
    let tt = state.timetable(data);
    let view = GridView::new(&tt, state.info(), state.show_classrooms);

    header(&view.title);
    if view.is_empty() {
        warning("The schedule has no dates or time slots to lay out.");
    } else {
        print!("{}", render::timetable(&view, render::use_ansi()));
    }

    if !tt.unresolved.is_empty() {
        warning(format!(
            "{} exam(s) could not be placed in the timetable:",
            tt.unresolved.len()
        ));
        for line in render::unresolved(&tt.unresolved) {
            println!("   {line}");
        }
    }
}
