use crate::core::slot::normalize_slot_keys;
use crate::errors::{AppError, AppResult};
use crate::models::Dataset;
use crate::ui::messages::notice;
use std::fs;
use std::path::Path;

pub const LOAD_ERROR_MESSAGE: &str = "Error loading exam schedule data. Please try again later.";

/// Read and parse the dataset, re-keying slot timings by canonical name.
pub fn load(path: &Path) -> AppResult<Dataset> {
    let content = fs::read_to_string(path).map_err(|e| AppError::DatasetLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut data = Dataset::from_json(&content).map_err(|e| AppError::DatasetLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    data.slot_timing = normalize_slot_keys(std::mem::take(&mut data.slot_timing));
    if data.is_empty() {
        log::warn!("{} holds no exams, dates or slots", path.display());
    }

    log::info!(
        "loaded {} exam rows, {} dates, {} slots from {}",
        data.exams.len(),
        data.dates.len(),
        data.slot_timing.len(),
        path.display()
    );
    Ok(data)
}

/// Like [`load`], but a failure is reported once and yields an empty dataset.
pub fn load_or_empty(path: &Path) -> Dataset {
    match load(path) {
        Ok(data) => data,
        Err(e) => {
            log::error!("{e}");
            notice("Schedule Error", LOAD_ERROR_MESSAGE);
            Dataset::default()
        }
    }
}
