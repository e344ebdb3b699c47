// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::GridView;
use crate::export::pdf::PdfManager;
use std::path::Path;

/// Export PDF using PdfManager and the laid-out grid.
pub(crate) fn export_pdf(view: &GridView, path: &Path) -> AppResult<()> {
    if view.columns.is_empty() {
        return Err(AppError::Export(
            "zero-size timetable: no dates to lay out".to_string(),
        ));
    }

    let mut pdf = PdfManager::new();
    pdf.write_grid(view);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))
}
