use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_show_classrooms")]
    pub show_classrooms: bool,
    #[serde(default = "default_suggestion_min_chars")]
    pub suggestion_min_chars: usize,
    #[serde(default)]
    pub export_dir: Option<String>,
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: u32,
    #[serde(default = "default_export_width")]
    pub export_width: u32,
}

fn default_dataset() -> String {
    "exam_schedule.json".to_string()
}
fn default_show_classrooms() -> bool {
    true
}
fn default_suggestion_min_chars() -> usize {
    5
}
fn default_pixel_ratio() -> u32 {
    2
}
fn default_export_width() -> u32 {
    1200
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            show_classrooms: default_show_classrooms(),
            suggestion_min_chars: default_suggestion_min_chars(),
            export_dir: None,
            pixel_ratio: default_pixel_ratio(),
            export_width: default_export_width(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rexamtable")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rexamtable")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rexamtable.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize the configuration file, pointing `dataset` at the given file
    /// (relative paths are kept as given and resolved against the CWD at run time).
    pub fn init_all(dataset: Option<String>, is_test: bool) -> AppResult<Self> {
        let config = Config {
            dataset: dataset.unwrap_or_else(default_dataset),
            ..Config::default()
        };

        if !is_test {
            let dir = Self::config_dir();
            fs::create_dir_all(&dir)?;

            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
        }

        Ok(config)
    }
}
