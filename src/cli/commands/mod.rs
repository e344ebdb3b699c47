pub mod config;
pub mod convert;
pub mod export;
pub mod init;
pub mod search;
pub mod session;
pub mod show;
pub mod suggest;

use crate::cli::parser::SelectArgs;
use crate::config::Config;
use crate::core::loader::load_or_empty;
use crate::core::search::{NOT_FOUND_MESSAGE, SearchMode, SearchOutcome, search};
use crate::core::{AppState, ExamUpdate};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, RasterOptions};
use crate::models::Dataset;
use crate::ui::messages::{notice, warning};
use crate::utils::path::{expand_tilde, resolve_output};
use std::path::PathBuf;

pub(crate) fn load_dataset(cfg: &Config) -> Dataset {
    load_or_empty(&expand_tilde(&cfg.dataset))
}

pub(crate) fn raster_options(cfg: &Config) -> RasterOptions {
    RasterOptions {
        width: cfg.export_width,
        pixel_ratio: cfg.pixel_ratio,
    }
}

/// Output path for an export: the given file or `exam-timetable.<ext>`,
/// relative names landing in the configured export directory.
pub(crate) fn resolve_export(cfg: &Config, format: ExportFormat, file: Option<&str>) -> PathBuf {
    let name = file
        .map(str::to_string)
        .unwrap_or_else(|| format.default_file_name());
    resolve_output(&name, cfg.export_dir.as_deref())
}

pub(crate) fn mode(exact_roll: bool) -> SearchMode {
    if exact_roll {
        SearchMode::ExactRoll
    } else {
        SearchMode::Contains
    }
}

/// Report a search outcome the way the lookup screen does. Returns true
/// when a student was selected.
pub(crate) fn report_outcome(outcome: &SearchOutcome) -> bool {
    match outcome {
        SearchOutcome::Empty => {
            warning("Enter a student name or roll number.");
            false
        }
        SearchOutcome::NotFound => {
            notice("Not Found", NOT_FOUND_MESSAGE);
            false
        }
        SearchOutcome::Found(_) => true,
    }
}

/// Run the lookup for `args` and apply its edits and removals.
/// `None` means nothing was selected (already reported).
pub(crate) fn select(
    data: &Dataset,
    args: &SelectArgs,
    cfg: &Config,
) -> AppResult<Option<AppState>> {
    let outcome = search(&data.exams, &args.query, mode(args.exact_roll));
    if !report_outcome(&outcome) {
        return Ok(None);
    }

    let mut state = AppState::new(cfg.show_classrooms && !args.hide_rooms);
    state.apply_search(outcome);

    for (id, assignments) in group_edits(&args.edits)? {
        state.update_exam(id, ExamUpdate::from_assignments(&assignments)?)?;
    }
    for id in &args.removes {
        state.remove_exam(*id)?;
    }
    Ok(Some(state))
}

/// Parse `ID:field=value` into its id and assignment.
pub(crate) fn parse_edit(raw: &str) -> AppResult<(usize, String)> {
    let (id, assignment) = raw
        .split_once(':')
        .ok_or_else(|| AppError::InvalidEdit(format!("expected ID:field=value, got '{raw}'")))?;
    let id = id
        .trim()
        .parse::<usize>()
        .map_err(|_| AppError::InvalidEdit(format!("'{id}' is not a row id")))?;
    Ok((id, assignment.to_string()))
}

/// Edits grouped per row, in first-mention order.
fn group_edits(raw: &[String]) -> AppResult<Vec<(usize, Vec<String>)>> {
    let mut groups: Vec<(usize, Vec<String>)> = Vec::new();
    for item in raw {
        let (id, assignment) = parse_edit(item)?;
        match groups.iter_mut().find(|(g, _)| *g == id) {
            Some((_, list)) => list.push(assignment),
            None => groups.push((id, vec![assignment])),
        }
    }
    Ok(groups)
}
