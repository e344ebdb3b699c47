use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::convert::convert_file;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::path::expand_tilde;

/// Handle the `convert` command
pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Convert {
        input,
        output,
        force,
    } = cmd
    {
        let input = expand_tilde(input);
        let output = expand_tilde(output);
        ensure_writable(&output, *force, false)?;

        let summary = convert_file(&input, &output)?;

        success(format!("Dataset written to {}", output.display()));
        header("Conversion summary");
        info(format!("Exam rows : {}", summary.exams));
        info(format!("Students  : {}", summary.students));
        info(format!("Courses   : {}", summary.courses));
        info(format!("Dates     : {}", summary.dates));
        info(format!("Slots     : {}", summary.slots));

        if summary.dropped_rows > 0 {
            warning(format!(
                "{} row(s) skipped for missing required fields",
                summary.dropped_rows
            ));
        }
        if !summary.defaulted_slots.is_empty() {
            info(format!("Defaulted : {}", summary.defaulted_slots.join(", ")));
        }
    }
    Ok(())
}
