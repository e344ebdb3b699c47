//! Path utilities: expand ~, resolve export destinations.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Relative export targets land in `export_dir` when one is configured.
pub fn resolve_output(file: &str, export_dir: Option<&str>) -> PathBuf {
    let p = expand_tilde(file);
    match export_dir {
        Some(dir) if p.is_relative() => expand_tilde(dir).join(p),
        _ => p,
    }
}

/// Directory a temporary sibling of `path` can be created in.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
