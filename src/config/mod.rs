use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// File-backed settings. Every field can also come from the command line
/// or the environment; `main` merges the three sources.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Target contract address the datalist was captured against.
    pub contract_address: Option<String>,

    /// Newline-separated raw input-data list.
    pub datalist_path: Option<PathBuf>,

    /// ABI array or deployments JSON carrying an `abi` key.
    pub abi_path: Option<PathBuf>,

    /// Output JSON array path.
    pub output_path: Option<PathBuf>,
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("TXPEEK_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("txpeek").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("txpeek").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "txpeek", "txpeek")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
