//! CLI command definitions for cfgchain
//!
//! This module defines the CLI structure using clap's derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Type a resolved value is converted to before printing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ValueType {
    #[default]
    String,
    Bool,
    Int,
    Float,
}

/// Resolve configuration values from env vars, secret files and defaults
#[derive(Parser, Debug)]
#[command(name = "cfgchain", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML config file (default: workspace, then user config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Secrets directory (overrides config)
    #[arg(long, global = true)]
    pub secrets_dir: Option<PathBuf>,

    #[command(flatten)]
    pub defaults: DefaultArgs,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// All `--default` pairs in command-line order, before and after the subcommand
    pub fn default_values(&self) -> Vec<(String, String)> {
        let mut values = self.defaults.values.clone();
        values.extend(self.command.defaults().values.iter().cloned());
        values
    }
}

/// Default values seeded into the defaults provider
///
/// Accepted both before and after the subcommand; the two lists are merged
/// by [`Cli::default_values`].
#[derive(Args, Debug, Clone, Default)]
pub struct DefaultArgs {
    /// Default value, may be repeated
    #[arg(
        short = 'D',
        long = "default",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value
    )]
    pub values: Vec<(String, String)>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a key and print its value
    Get {
        key: String,

        /// Convert the value before printing
        #[arg(long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,

        /// Print JSON instead of the bare value
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        defaults: DefaultArgs,
    },

    /// Show which provider supplies a key
    Which {
        key: String,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        defaults: DefaultArgs,
    },

    /// List the provider chain in lookup order
    Providers {
        #[command(flatten)]
        defaults: DefaultArgs,
    },
}

impl Command {
    fn defaults(&self) -> &DefaultArgs {
        match self {
            Command::Get { defaults, .. }
            | Command::Which { defaults, .. }
            | Command::Providers { defaults } => defaults,
        }
    }
}

/// Parse a `KEY=VALUE` pair; the value may itself contain `=`
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", s))?;
    if key.is_empty() {
        return Err(format!("empty key in {:?}", s));
    }
    Ok((key.to_string(), value.to_string()))
}
