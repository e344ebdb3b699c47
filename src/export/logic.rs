// src/export/logic.rs

use crate::core::AppState;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{GridView, exams_to_export};
use crate::export::pdf_export::export_pdf;
use crate::export::png::{RasterOptions, export_png};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, notify_export_success};
use crate::models::Dataset;
use crate::utils::path::parent_dir;
use std::fs;
use std::path::Path;

/// High-level export of the selected student's timetable.
pub struct ExportLogic;

impl ExportLogic {
    /// Render the current selection into `path`.
    ///
    /// The file is written to a temporary sibling first and moved into place
    /// only when the writer succeeds, so a failed export leaves neither a
    /// partial file nor a stray temporary behind.
    ///
    /// - `force`: overwrite an existing file without asking
    /// - `ask`: prompt on an existing file (otherwise it is an error)
    pub fn export(
        state: &AppState,
        data: &Dataset,
        format: ExportFormat,
        path: &Path,
        force: bool,
        ask: bool,
        raster: RasterOptions,
    ) -> AppResult<()> {
        let info = state.info().ok_or(AppError::NoSelection)?;

        ensure_writable(path, force, ask)?;

        let tt = state.timetable(data);
        let view = GridView::new(&tt, Some(info), state.show_classrooms);

        if !tt.unresolved.is_empty() {
            log::warn!(
                "{} exam(s) have no timetable cell and appear only in the flat exports",
                tt.unresolved.len()
            );
        }

        let dir = parent_dir(path);
        fs::create_dir_all(&dir)?;

        let tmp = tempfile::Builder::new()
            .prefix(".rexamtable-")
            .suffix(&format!(".{}", format.as_str()))
            .tempfile_in(&dir)?;

        let written = match format {
            ExportFormat::Png => export_png(&view, raster, tmp.path()),
            ExportFormat::Pdf => export_pdf(&view, tmp.path()),
            ExportFormat::Xlsx => {
                let rows = exams_to_export(&tt, state.exams(), data);
                export_xlsx(&view, &rows, tmp.path())
            }
            ExportFormat::Csv => {
                export_csv(&exams_to_export(&tt, state.exams(), data), tmp.path())
            }
            ExportFormat::Json => {
                export_json(&exams_to_export(&tt, state.exams(), data), tmp.path())
            }
        };

        if let Err(e) = written {
            // dropping `tmp` removes the partial file
            log::error!("{} export to {} failed: {e}", format.label(), path.display());
            return Err(e);
        }

        tmp.persist(path).map_err(|e| AppError::Io(e.error))?;
        log::info!(
            "wrote {} ({} exams in {} cells)",
            path.display(),
            tt.placed_count(),
            tt.cell_count()
        );

        notify_export_success(format.label(), path);
        Ok(())
    }
}
