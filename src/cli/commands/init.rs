use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;

/// Handle the `init` command
///
/// Writes the configuration file (skipped in test mode) pointing at the
/// dataset given with `--data`, or the default `exam_schedule.json`.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.data.clone(), cli.test)?;

    info("Initializing rExamTable…");
    info(format!("Config file : {}", Config::config_file().display()));
    info(format!("Dataset     : {}", cfg.dataset));

    if !expand_tilde(&cfg.dataset).exists() {
        warning(format!(
            "Dataset '{}' does not exist yet; create it with `rexamtable convert`",
            cfg.dataset
        ));
    }

    success("rExamTable initialization completed!");
    Ok(())
}
