pub mod errors;
pub mod config;
pub mod pixels;
pub mod io;
pub mod extractor;
pub mod dataset;
pub mod pipeline;
pub mod inspect;
pub mod commands;
pub mod cli;
pub mod utils;
pub mod api;

pub use crate::api::HistoPrep;

pub use config::PrepConfig;
pub use errors::{PrepError, PrepResult};
pub use extractor::{PatchExtractor, Region};
pub use pipeline::{PreparationPipeline, PreparationReport};
