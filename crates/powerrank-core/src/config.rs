// Configuration loading and parsing (club.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub club: ClubConfig,
    pub data_paths: DataPaths,
    pub display: DisplayConfig,
}

// ---------------------------------------------------------------------------
// club.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire club.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ClubFile {
    club: ClubConfig,
    data_paths: DataPaths,
    #[serde(default)]
    display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClubConfig {
    pub name: String,
}

/// Paths are relative to the working directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub roster: String,
    /// Optional CSV export of the weekly vote. Applied over the roster at
    /// startup when the file exists.
    #[serde(default)]
    pub ratings: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_team_a_label")]
    pub team_a_label: String,
    #[serde(default = "default_team_b_label")]
    pub team_b_label: String,
}

fn default_team_a_label() -> String {
    "Team 1".to_string()
}

fn default_team_b_label() -> String {
    "Team 2".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            team_a_label: default_team_a_label(),
            team_b_label: default_team_b_label(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/club.toml` relative to the
/// given `base_dir`.
///
/// This does not auto-copy defaults; `load_config()` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let club_path = base_dir.join("config").join("club.toml");
    let club_text = read_file(&club_path)?;
    let club_file: ClubFile = toml::from_str(&club_text).map_err(|e| ConfigError::ParseError {
        path: club_path.clone(),
        source: e,
    })?;

    let config = Config {
        club: club_file.club,
        data_paths: club_file.data_paths,
        display: club_file.display,
    };

    validate(&config)?;

    Ok(config)
}

/// Files seeded from `defaults/` into `config/` on first run. The vote
/// export template stays in `defaults/`; real exports are dropped at the
/// `data_paths.ratings` location.
pub const SEEDED_FILES: [&str; 2] = ["club.toml", "roster.toml"];

/// Ensure the club config and roster exist by copying missing ones from
/// `defaults/`. Returns the files that were copied.
///
/// An existing file is never overwritten: `config/roster.toml` carries the
/// accumulated weekly updates.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for file_name in SEEDED_FILES {
        let source = defaults_dir.join(file_name);
        if !source.is_file() {
            debug!("no default {} to seed", file_name);
            continue;
        }
        let target = config_dir.join(file_name);
        if seed_file(&source, &target)? {
            info!("Seeded {} from {}", target.display(), source.display());
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Copy `source` to `target` unless `target` already exists. Returns whether
/// a copy was made.
fn seed_file(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(dest) => dest,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            })
        }
    };
    let mut src = std::fs::File::open(source).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read {}: {e}", source.display()),
    })?;
    std::io::copy(&mut src, &mut dest).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;
    Ok(true)
}

/// Convenience wrapper: loads config relative to the current working directory,
/// seeding `config/` from `defaults/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let non_empty: &[(&str, &str)] = &[
        ("club.name", config.club.name.as_str()),
        ("data_paths.roster", config.data_paths.roster.as_str()),
        ("display.team_a_label", config.display.team_a_label.as_str()),
        ("display.team_b_label", config.display.team_b_label.as_str()),
    ];
    for (field, value) in non_empty {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.display.team_a_label == config.display.team_b_label {
        return Err(ConfigError::ValidationError {
            field: "display.team_b_label".into(),
            message: format!(
                "must differ from team_a_label, both are {:?}",
                config.display.team_a_label
            ),
        });
    }

    if let Some(ratings) = &config.data_paths.ratings {
        if ratings.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "data_paths.ratings".into(),
                message: "must not be empty when set; remove the key instead".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
