use crate::cli::commands::{load_dataset, raster_options, resolve_export, select};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        select: args,
        format,
        file,
        force,
    } = cmd
    {
        let data = load_dataset(cfg);
        let state = select(&data, args, cfg)?.ok_or(AppError::NoSelection)?;

        let path = resolve_export(cfg, *format, file.as_deref());

        ExportLogic::export(&state, &data, *format, &path, *force, false, raster_options(cfg))?;
    }
    Ok(())
}
