//! Packed-array inspection command

use log::{error, info};

use crate::commands::command_traits::Command;
use crate::config::PrepConfig;
use crate::errors::{PrepError, PrepResult};
use crate::inspect::inspect_packed_array;
use crate::utils::logger::Logger;

const PREVIEW_COUNT: usize = 3;

/// Command checking that a PanNuke fold loads and normalizes correctly
pub struct InspectCommand<'a> {
    /// Settings for the run
    config: PrepConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InspectCommand<'a> {
    pub fn new(config: PrepConfig, logger: &'a Logger) -> Self {
        InspectCommand { config, logger }
    }
}

impl<'a> Command for InspectCommand<'a> {
    fn execute(&self) -> PrepResult<()> {
        let path = self.config.paths.inspect_file();
        info!("Inspecting {}", path.display());

        match inspect_packed_array(&path, &self.config.paths.debug, PREVIEW_COUNT) {
            Ok(summary) => {
                self.logger.log(&format!(
                    "{}: shape {}, dtype {}, range [{}, {}], {} previews",
                    summary.path.display(),
                    summary.shape,
                    summary.sample_type,
                    summary.min_value,
                    summary.max_value,
                    summary.previews.len()
                ))?;
                Ok(())
            }
            Err(PrepError::MissingPath(missing)) => {
                error!("File not found: {}", missing.display());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
