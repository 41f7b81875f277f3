use crate::error::{CliError, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// Settings read from `config.toml`. Command-line flags take precedence.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Spreadsheet id or URL.
    pub spreadsheet: Option<String>,
    /// Sheet metadata snapshot. Relative paths are relative to the config file.
    pub sheets: Option<PathBuf>,
    /// Rectangle used when an area names only a sheet (e.g. `A:ZZ`).
    pub default_range: Option<String>,
}

pub(crate) fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("io", "sheetref", "sheetref")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load the config file.
///
/// An explicit path must exist. The default location is optional: a missing
/// file there yields an empty config.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(Config::default()),
        },
    };

    let meta = std::fs::metadata(&path)?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(CliError::Config {
            path,
            message: format!(
                "file too large ({} bytes, max {})",
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ),
        });
    }
    let content = std::fs::read_to_string(&path)?;
    let mut config = parse_config(&content).map_err(|message| CliError::Config {
        path: path.clone(),
        message,
    })?;

    if let Some(sheets) = config.sheets.take() {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.sheets = Some(base.join(sheets));
    }
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn parse_config(content: &str) -> std::result::Result<Config, String> {
    toml::from_str::<Config>(content).map_err(|err| err.to_string())
}
