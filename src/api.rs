use std::path::Path;

use log::info;

use crate::config::PrepConfig;
use crate::errors::PrepResult;
use crate::inspect::{inspect_packed_array, InspectionSummary};
use crate::pipeline::{PreparationPipeline, PreparationReport};

/// Main interface to the histoprep library
pub struct HistoPrep {
    config: PrepConfig,
}

impl HistoPrep {
    /// Create an instance with the given settings
    ///
    /// # Returns
    /// A HistoPrep instance or an error if the settings are invalid
    pub fn new(config: PrepConfig) -> PrepResult<Self> {
        config.validate()?;
        Ok(HistoPrep { config })
    }

    /// Create an instance from a TOML file layered over the defaults
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        Self::new(PrepConfig::from_file(path)?)
    }

    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Run the full preparation and write all four output directories
    pub fn prepare(&self) -> PrepResult<PreparationReport> {
        info!("Preparing dataset into {}", self.config.paths.output.display());
        PreparationPipeline::new(&self.config).run()
    }

    /// Inspect the configured PanNuke fold, writing three preview samples
    pub fn inspect(&self) -> PrepResult<InspectionSummary> {
        inspect_packed_array(&self.config.paths.inspect_file(), &self.config.paths.debug, 3)
    }
}
