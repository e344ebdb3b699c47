use crate::cli::commands::{load_dataset, mode, report_outcome};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AppState;
use crate::core::search::search;
use crate::errors::AppResult;
use crate::ui::messages::{header, success};
use crate::ui::render;

/// Handle the `search` command: student card and subject list only.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Search { query, exact_roll } = cmd {
        let data = load_dataset(cfg);
        let outcome = search(&data.exams, query, mode(*exact_roll));
        if !report_outcome(&outcome) {
            return Ok(());
        }

        let mut state = AppState::new(cfg.show_classrooms);
        state.apply_search(outcome);

        if let Some(student) = state.info() {
            success(format!("Found {} exam(s)", state.exams().len()));
            header("Student Information");
            println!("{}", render::info_card(student));
            header("Subjects");
            println!("{}", render::subject_list(state.exams(), &data, render::use_ansi()));
        }
    }
    Ok(())
}
