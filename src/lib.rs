//! Ecowatch - configuration provider for the ecosystem monitoring system.
//!
//! The detection pipeline, audio classifier and alerting layer all read
//! their settings from one [`config::Config`] record. [`config::load`]
//! builds that record once at startup (defaults, TOML file, environment,
//! flags), validates it and prepares the on-disk directory layout; the
//! record is then passed to each subsystem, optionally through a
//! [`config::SharedConfig`] handle.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

use clap::Parser;
use cli::{Cli, Command, DumpFormat};
use config::{Config, LoadOptions, SharedConfig, save_config, save_default_config};
use constants::REDACTED;
use tracing::info;

pub use error::{Error, ErrorKind, Result};

/// Main entry point for the ecowatch CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = LoadOptions {
        config_path: cli.config,
        overrides: cli.overrides.into(),
    };

    // `path` and `init` never load the record, so they work with a broken config.
    match cli.command.unwrap_or(Command::Show) {
        Command::Path => handle_path(&options),
        Command::Init { force } => handle_init(&options, force),
        Command::Show => {
            let shared = start(&options, cli.verbose, cli.quiet)?;
            config::print_config(&shared.current());
            Ok(())
        }
        Command::Check => {
            let shared = start(&options, cli.verbose, cli.quiet)?;
            handle_check(&shared.current(), &options);
            Ok(())
        }
        Command::Dump { format } => {
            let shared = start(&options, cli.verbose, cli.quiet)?;
            print_rendered(&render(&shared.current(), format)?);
            Ok(())
        }
    }
}

/// Load the configuration, then install logging as it describes.
fn start(options: &LoadOptions, verbose: u8, quiet: bool) -> Result<SharedConfig> {
    let config = tracing::subscriber::with_default(
        logging::bootstrap_subscriber(verbose, quiet),
        || config::load(options),
    )?;
    logging::init_logging(&config, verbose, quiet)?;
    info!(
        project = %config.project.name,
        version = %config.project.version,
        "starting"
    );
    Ok(SharedConfig::new(config))
}

#[allow(clippy::print_stdout)]
fn handle_check(config: &Config, options: &LoadOptions) {
    match options.source_path() {
        Some(path) if path.exists() => println!("configuration OK: {}", path.display()),
        _ => println!("configuration OK: built-in defaults"),
    }
    for dir in config.layout().directories() {
        println!("  {}", dir.display());
    }
}

#[allow(clippy::print_stdout)]
fn print_rendered(text: &str) {
    println!("{text}");
}

/// Serialize the effective record with the bot token masked.
fn render(config: &Config, format: DumpFormat) -> Result<String> {
    let mut config = config.clone();
    if let Some(token) = config.notifications.telegram.bot_token.as_mut() {
        *token = REDACTED.to_string();
    }

    match format {
        DumpFormat::Toml => {
            toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })
        }
        DumpFormat::Json => {
            serde_json::to_string_pretty(&config).map_err(|e| Error::JsonSerialize { source: e })
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_path(options: &LoadOptions) -> Result<()> {
    let path = options.source_path().ok_or(Error::ConfigDirNotFound)?;
    println!("{}", path.display());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn handle_init(options: &LoadOptions, force: bool) -> Result<()> {
    let target = match &options.config_path {
        Some(path) => path.clone(),
        None => config::config_file_path()?,
    };

    if target.exists() && !force {
        return Err(Error::ConfigExists { path: target });
    }

    let path = match &options.config_path {
        Some(path) => {
            save_config(&Config::default(), path)?;
            path.clone()
        }
        None => save_default_config(&Config::default())?,
    };
    println!("Created configuration file: {}", path.display());
    println!("\nNext steps:");
    println!("  ecowatch --config {} check", path.display());
    Ok(())
}
