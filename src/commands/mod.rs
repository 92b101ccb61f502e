//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod prepare_command;
pub mod inspect_command;

pub use command_traits::{Command, CommandFactory};
pub use prepare_command::PrepareCommand;
pub use inspect_command::InspectCommand;

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::config::PrepConfig;
use crate::errors::{PrepError, PrepResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
pub struct HistoprepCommandFactory;

impl HistoprepCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        HistoprepCommandFactory
    }
}

impl Default for HistoprepCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for HistoprepCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> PrepResult<Box<dyn Command + 'a>> {
        let config = config_from_args(args)?;
        if args.get_flag("inspect") {
            Ok(Box::new(InspectCommand::new(config, logger)))
        } else {
            Ok(Box::new(PrepareCommand::new(config, logger)))
        }
    }
}

/// Build the configuration: defaults, then `--config`, then path flags
pub fn config_from_args(args: &ArgMatches) -> PrepResult<PrepConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => {
            info!("Loading configuration file: {}", path);
            PrepConfig::from_file(path)?
        }
        None => PrepConfig::default(),
    };

    let overrides = [
        ("deepliif", &mut config.paths.deepliif),
        ("monuseg", &mut config.paths.monuseg),
        ("pannuke", &mut config.paths.pannuke),
        ("output", &mut config.paths.output),
    ];
    for (name, target) in overrides {
        if let Some(value) = args.get_one::<String>(name) {
            info!("Using {} path: {}", name, value);
            *target = PathBuf::from(value);
        }
    }

    if let Some(seed) = args.get_one::<String>("shuffle-seed") {
        let seed = seed
            .parse::<u64>()
            .map_err(|_| PrepError::InvalidConfig(format!("Invalid shuffle seed: {}", seed)))?;
        config.split.shuffle_seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}
