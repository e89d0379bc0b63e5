//! Configuration module for `hs-study-tools`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for saved course plans
    #[serde(default)]
    pub plans_dir: String,
    /// Directory for flashcard decks
    #[serde(default)]
    pub decks_dir: String,
}

/// Planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Per-grade credit load above which a year is flagged as overloaded
    #[serde(default = "default_grade_credit_cap")]
    pub grade_credit_cap: f32,
    /// Credits needed for graduation
    #[serde(default = "default_target_credits")]
    pub target_credits: f32,
}

const fn default_grade_credit_cap() -> f32 {
    crate::core::planner::requirements::DEFAULT_GRADE_CREDIT_CAP
}

const fn default_target_credits() -> f32 {
    crate::core::planner::requirements::GRADUATION_CREDIT_TARGET
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grade_credit_cap: default_grade_credit_cap(),
            target_credits: default_target_credits(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
}

impl Config {
    /// Get the `$STUDYTOOLS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/studytools`
    /// - macOS: `~/Library/Application Support/studytools`
    /// - Windows: `%APPDATA%\studytools`
    #[must_use]
    pub fn get_studytools_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studytools")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading configuration so that newly added fields are
    /// populated with their default values. Only fields that are empty in the
    /// current config and non-empty in defaults are updated.
    ///
    /// # Returns
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.plans_dir.is_empty() && !defaults.paths.plans_dir.is_empty() {
            self.paths.plans_dir.clone_from(&defaults.paths.plans_dir);
            changed = true;
        }
        if self.paths.decks_dir.is_empty() && !defaults.paths.decks_dir.is_empty() {
            self.paths.decks_dir.clone_from(&defaults.paths.decks_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Command-line arguments override configuration file values for one run
    /// without touching the persistent file. Only non-`None` values replace
    /// config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds so a
    /// debug checkout never clobbers the real config.
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_studytools_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$STUDYTOOLS` in a string to the actual config directory path
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$STUDYTOOLS") {
            let studytools_dir = Self::get_studytools_dir();
            value.replace("$STUDYTOOLS", studytools_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Parses a TOML configuration string and expands `$STUDYTOOLS` in path
    /// values. Missing fields use their serde defaults.
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the
    /// expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.plans_dir = Self::expand_variables(&config.paths.plans_dir);
        config.paths.decks_dir = Self::expand_variables(&config.paths.decks_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// The defaults differ between debug and release builds.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. This
    /// should never happen since the defaults are compiled into the binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: loads it, merges missing fields from
    ///   defaults, and saves the updated config.
    /// - First run: creates the config directory and saves the defaults.
    ///
    /// Falls back to defaults on any load error.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the config
    /// directory cannot be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Remove the config file, resetting to defaults on the next load
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `plans_dir`, `decks_dir`,
    /// `grade_credit_cap`, `target_credits`.
    ///
    /// # Returns
    /// The value as a string, or `None` for an unknown key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "plans_dir" | "plans-dir" => Some(self.paths.plans_dir.clone()),
            "decks_dir" | "decks-dir" => Some(self.paths.decks_dir.clone()),
            "grade_credit_cap" | "grade-credit-cap" => {
                Some(self.planner.grade_credit_cap.to_string())
            }
            "target_credits" | "target-credits" => Some(self.planner.target_credits.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are validated before being stored; this updates the in-memory
    /// config only, call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error message for an unknown key or an invalid value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                let normalized = value.to_ascii_lowercase();
                if !matches!(normalized.as_str(), "error" | "warn" | "info" | "debug") {
                    return Err(format!(
                        "Invalid level '{value}' (expected error, warn, info, or debug)"
                    ));
                }
                self.logging.level = normalized;
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid verbose value '{value}' (expected true or false)"))?;
            }
            "plans_dir" | "plans-dir" => self.paths.plans_dir = Self::expand_variables(value),
            "decks_dir" | "decks-dir" => self.paths.decks_dir = Self::expand_variables(value),
            "grade_credit_cap" | "grade-credit-cap" => {
                self.planner.grade_credit_cap = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid credit cap '{value}' (expected a number)"))?;
            }
            "target_credits" | "target-credits" => {
                self.planner.target_credits = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid credit target '{value}' (expected a number)"))?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single key to its compiled-in default
    ///
    /// # Errors
    /// Returns an error message for an unknown key
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        let default_value = defaults
            .get(key)
            .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
        self.set(key, &default_value)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "level = {}", self.logging.level)?;
        writeln!(f, "file = {}", self.logging.file)?;
        writeln!(f, "verbose = {}", self.logging.verbose)?;
        writeln!(f)?;
        writeln!(f, "[paths]")?;
        writeln!(f, "plans_dir = {}", self.paths.plans_dir)?;
        writeln!(f, "decks_dir = {}", self.paths.decks_dir)?;
        writeln!(f)?;
        writeln!(f, "[planner]")?;
        writeln!(f, "grade_credit_cap = {}", self.planner.grade_credit_cap)?;
        writeln!(f, "target_credits = {}", self.planner.target_credits)?;
        Ok(())
    }
}
