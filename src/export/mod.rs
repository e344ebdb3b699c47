// src/export/mod.rs

pub(crate) mod fs_utils;
mod glyphs;
mod json_csv;
pub mod logic;
pub mod model;
mod pdf;
mod pdf_export;
mod png;
mod xlsx;

pub use logic::ExportLogic;
pub use model::{ExamExport, GridView};
pub use png::RasterOptions;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Png,
    Pdf,
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Xlsx => "XLSX",
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    /// `exam-timetable.<ext>`
    pub fn default_file_name(&self) -> String {
        format!("exam-timetable.{}", self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = crate::errors::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <ExportFormat as ValueEnum>::from_str(s, true)
            .map_err(|_| crate::errors::AppError::InvalidExportFormat(s.to_string()))
    }
}
