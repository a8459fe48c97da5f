//! cfgchain command-line tool

mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use cfgchain_core::{AccessError, ConfigFile, Resolver};
use clap::Parser;
use serde_json::{json, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ValueType};

/// Exit status when the key is not set by any provider
const EXIT_MISSING: u8 = 2;

/// How a lookup command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Missing,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Missing => ExitCode::from(EXIT_MISSING),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => std::env::var("CFGCHAIN_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".into()),
        1 => "debug".into(),
        _ => "trace".into(),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<Outcome> {
    let resolver = build_resolver(cli)?;
    debug!(providers = ?resolver.provider_names(), "resolver ready");

    match &cli.command {
        Command::Get { key, value_type, json, .. } => get(&resolver, key, *value_type, *json),
        Command::Which { key, json, .. } => which(&resolver, key, *json),
        Command::Providers { .. } => {
            for (position, name) in resolver.provider_names().iter().enumerate() {
                println!("{}. {}", position + 1, name);
            }
            Ok(Outcome::Success)
        }
    }
}

fn build_resolver(cli: &Cli) -> Result<Resolver> {
    let mut config = match &cli.config {
        Some(path) => load_explicit(path)?,
        None => {
            let cwd = std::env::current_dir().context("reading current directory")?;
            ConfigFile::discover(cwd)?.0
        }
    };

    if let Some(dir) = &cli.secrets_dir {
        config.secrets_dir = dir.clone();
    }
    for (key, value) in cli.default_values() {
        config.defaults.insert(key, value);
    }

    Ok(config.build()?)
}

fn load_explicit(path: &Path) -> Result<ConfigFile> {
    if !path.is_file() {
        bail!("config file {} does not exist", path.display());
    }
    Ok(ConfigFile::load(path)?)
}

fn get(resolver: &Resolver, key: &str, value_type: ValueType, as_json: bool) -> Result<Outcome> {
    let typed = match value_type {
        ValueType::String => resolver
            .get_string(key)
            .map(Value::from)
            .map_err(AccessError::from),
        ValueType::Bool => resolver.get_bool(key).map(Value::from),
        ValueType::Int => resolver.get_int(key).map(Value::from),
        ValueType::Float => resolver.get_float(key).map(Value::from),
    };

    let value = match typed {
        Ok(value) => value,
        Err(err) if err.is_missing() => return Ok(missing(key, as_json)),
        Err(err) => return Err(err.into()),
    };

    if as_json {
        println!("{}", json!({ "key": key, "value": value }));
    } else {
        match value {
            Value::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }
    Ok(Outcome::Success)
}

fn which(resolver: &Resolver, key: &str, as_json: bool) -> Result<Outcome> {
    let resolved = match resolver.resolve_source(key) {
        Ok(resolved) => resolved,
        Err(err) if err.is_missing() => return Ok(missing(key, as_json)),
        Err(err) => return Err(err.into()),
    };

    if as_json {
        println!("{}", json!({ "key": key, "source": resolved.source }));
    } else {
        println!("{}: {}", key, resolved.source);
    }
    Ok(Outcome::Success)
}

fn missing(key: &str, as_json: bool) -> Outcome {
    if as_json {
        println!("{}", json!({ "key": key, "value": null }));
    } else {
        eprintln!("{}: not set", key);
    }
    Outcome::Missing
}
