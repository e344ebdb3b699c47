//! Unified application error type.
//! All modules (core, cli, export, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Dataset-related
    // ---------------------------
    #[error("Dataset parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to load dataset {path}: {reason}")]
    DatasetLoad { path: String, reason: String },

    #[error("Conversion error: {0}")]
    Convert(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid color: {0} (use #RRGGBB or a palette index 1-10)")]
    InvalidColor(String),

    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("No exam with id {0} in the current selection")]
    UnknownExam(usize),

    #[error("No student selected")]
    NoSelection,

    #[error("Unknown command '{0}' (type `help` for the list)")]
    UnknownCommand(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
