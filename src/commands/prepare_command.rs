//! Dataset preparation command

use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::config::PrepConfig;
use crate::errors::PrepResult;
use crate::pipeline::PreparationPipeline;
use crate::utils::logger::Logger;

/// Command running the full preparation pipeline
pub struct PrepareCommand<'a> {
    /// Settings for the run
    config: PrepConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> PrepareCommand<'a> {
    pub fn new(config: PrepConfig, logger: &'a Logger) -> Self {
        PrepareCommand { config, logger }
    }
}

impl<'a> Command for PrepareCommand<'a> {
    fn execute(&self) -> PrepResult<()> {
        info!("Writing dataset to {}", self.config.paths.output.display());

        let report = PreparationPipeline::new(&self.config).run()?;

        for fold in report.failed_folds() {
            if let Err(message) = &fold.result {
                warn!("Fold {} was skipped: {}", fold.name, message);
            }
        }

        self.logger.log(&format!(
            "IHC: {} train, {} test | H&E: {} train, {} test ({} MoNuSeg, {} PanNuke)",
            report.ihc.train,
            report.ihc.test,
            report.he.train,
            report.he.test,
            report.monuseg_patches,
            report.pannuke_patches
        ))?;
        Ok(())
    }
}
