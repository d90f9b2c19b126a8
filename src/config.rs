//! Configuration management for the SCPI interpreter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project / user configuration files (TOML)
//! - Reply strings and input bound

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::interpreter::{Interpreter, ReplySet, DEFAULT_MAX_INPUT_LEN};
use crate::parser::MIN_INPUT_LEN;

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".scpi.toml";

/// Command-line arguments for the SCPI interpreter
#[derive(Debug, Parser)]
#[command(name = "scpi-ctl")]
#[command(about = "SCPI command interpreter for the antenna rotator controller")]
#[command(version)]
pub struct Args {
    /// Configuration file, overrides the project and user files
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Serve over TCP instead of stdin/stdout
    #[arg(long, help = "Address to listen on (e.g., '0.0.0.0:5025')")]
    pub listen: Option<String>,

    /// Interpret the given commands and exit
    #[arg(long = "command", short = 'c', help = "Command to interpret (repeatable)")]
    pub commands: Vec<String>,

    /// Emit JSON records instead of plain replies
    #[arg(long)]
    pub json: bool,

    /// Log level for the interpreter
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Contents of a configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Answer to `*IDN?`
    pub identification: Option<String>,
    /// Bytes of a command line considered before truncation
    pub max_input_len: Option<usize>,
    /// Default TCP listen address
    pub listen: Option<String>,
    pub replies: Option<ReplySet>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub replies: ReplySet,
    pub max_input_len: usize,
    /// TCP address; stdin/stdout when absent
    pub listen: Option<String>,
    /// One-shot commands from the command line
    pub commands: Vec<String>,
    pub json: bool,
    pub log_level: String,
    /// File the settings were read from, if any
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            replies: ReplySet::default(),
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            listen: None,
            commands: Vec::new(),
            json: false,
            log_level: "info".to_string(),
            config_path: None,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let config_path = match args.config {
            Some(path) => Some(path),
            None => Self::discover_config_file(),
        };

        let file = match &config_path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let mut config = Self::from_file(file)?;
        config.config_path = config_path;

        // Command line wins over any file
        if args.listen.is_some() {
            config.listen = args.listen;
        }
        config.commands = args.commands;
        config.json = args.json;
        config.log_level = args.log_level;

        Ok(config)
    }

    /// Apply a configuration file on top of the defaults
    pub fn from_file(file: ConfigFile) -> Result<Self> {
        let mut config = Config::default();

        if let Some(replies) = file.replies {
            config.replies = replies;
        }
        if let Some(identification) = file.identification {
            config.replies.identification = identification;
        }
        if let Some(max_input_len) = file.max_input_len {
            if max_input_len < MIN_INPUT_LEN {
                bail!(
                    "max_input_len must be at least {} (got {})",
                    MIN_INPUT_LEN,
                    max_input_len
                );
            }
            config.max_input_len = max_input_len;
        }
        config.listen = file.listen;

        config.replies.validate()?;
        Ok(config)
    }

    /// Project file first, then the user's config directory
    pub fn discover_config_file() -> Option<PathBuf> {
        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Some(project);
        }

        dirs::config_dir()
            .map(|dir| dir.join("scpi-interpreter").join("config.toml"))
            .filter(|path| path.is_file())
    }

    pub fn has_config_file(&self) -> bool {
        self.config_path.is_some()
    }

    /// Build the interpreter described by this configuration
    pub fn interpreter(&self) -> Interpreter {
        Interpreter::new(self.replies.clone(), self.max_input_len)
    }
}
