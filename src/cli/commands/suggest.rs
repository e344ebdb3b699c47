use crate::cli::commands::load_dataset;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::search::suggestions;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::ui::render;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Suggest { query, min_chars } = cmd {
        let min = min_chars.unwrap_or(cfg.suggestion_min_chars);
        if query.chars().count() < min {
            info(format!("Type at least {min} characters for suggestions."));
            return Ok(());
        }

        let data = load_dataset(cfg);
        let list = suggestions(&data.exams, query, min);
        if list.is_empty() {
            info("No matching students.");
        } else {
            println!("{}", render::suggestion_list(&list));
        }
    }
    Ok(())
}
