//! CLI argument definitions for `hs-study-tools`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use study_tools::config::ConfigOverrides;
use study_tools::core::models::Rating;
use study_tools::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to
/// lowercase strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// CLI recall rating argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum RatingArg {
    /// Failed to recall
    Again,
    /// Recalled with difficulty
    Hard,
    /// Recalled correctly
    Good,
    /// Recalled effortlessly
    Easy,
}

impl From<RatingArg> for Rating {
    fn from(arg: RatingArg) -> Self {
        match arg {
            RatingArg::Again => Self::Again,
            RatingArg::Hard => Self::Hard,
            RatingArg::Good => Self::Good,
            RatingArg::Easy => Self::Easy,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `plans_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Validate a course plan against a catalog.
    ///
    /// Replays every placement in timeline order and reports rejections,
    /// credit loads, and the graduation checklist.
    Check {
        /// Path to the course catalog TOML file
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Path to the plan TOML file
        #[arg(short, long, value_name = "FILE")]
        plan: PathBuf,

        /// Path to a program-requirements TOML file
        #[arg(long, value_name = "FILE", requires_all = ["university", "program"])]
        requirements: Option<PathBuf>,

        /// University to check admission requirements for
        #[arg(long, value_name = "NAME")]
        university: Option<String>,

        /// Program to check admission requirements for
        #[arg(long, value_name = "NAME")]
        program: Option<String>,
    },
    /// Generate a preset plan from a university program's requirements.
    Preset {
        /// Path to the course catalog TOML file
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Path to the program-requirements TOML file
        #[arg(short, long, value_name = "FILE")]
        requirements: PathBuf,

        /// University offering the program
        #[arg(short, long, value_name = "NAME")]
        university: String,

        /// Program to plan for
        #[arg(short, long, value_name = "NAME")]
        program: String,

        /// Where to write the generated plan
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Allow moving CALM into a summer window
        #[arg(long)]
        allow_summer: bool,
    },
    /// Review flashcards: list due cards or apply a rating.
    ///
    /// Without --card, lists the deck's due cards with interval previews.
    /// With --card and --rating, applies the rating and saves the deck.
    Drill {
        /// Path to the deck TOML file
        #[arg(short, long, value_name = "FILE")]
        deck: PathBuf,

        /// Card to rate
        #[arg(long, value_name = "ID", requires = "rating")]
        card: Option<String>,

        /// Recall rating to apply
        #[arg(long, value_enum, value_name = "RATING", requires = "card")]
        rating: Option<RatingArg>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studytools",
    about = "High-school study tools command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum, global = true)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH", global = true)]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new(), global = true)]
    pub config_verbose: Option<bool>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None`
    /// means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
        }
    }
}
