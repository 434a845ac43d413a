use serde::Deserialize;
use std::path::PathBuf;

use crate::cli::DigestArgs;

/// Settings read from config.toml, all optional. CLI flags win over the file.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub db_path: Option<PathBuf>,
    pub max_results: Option<usize>,
    /// Regex patterns; pages matching any of them are left out of digests.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl FileConfig {
    /// Load ~/.config/sitewatch/config.toml (or platform equivalent). A
    /// missing file means defaults; a malformed one is an error worth seeing.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let Some(dirs) = directories::ProjectDirs::from("", "", "sitewatch") else {
            return Ok(FileConfig::default());
        };

        let path = dirs.config_dir().join("config.toml");
        if !path.exists() {
            return Ok(FileConfig::default());
        }

        let text = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&text)?)
    }
}

pub struct Config {
    pub db_path: Option<PathBuf>,
    pub max_results: Option<usize>,
    pub exclude: Vec<String>,
    pub json_output: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_digest_args(
        args: &DigestArgs,
        file: FileConfig,
        db_override: Option<PathBuf>,
    ) -> Self {
        Config {
            db_path: db_override.or(file.db_path),
            max_results: args.max_results.or(file.max_results),
            exclude: file.exclude,
            json_output: args.json,
            verbose: args.verbose,
        }
    }
}
