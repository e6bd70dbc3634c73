//! Dataset assembly around the pair generator: configuration, per-class
//! quotas, the volume filter and the CSV, JSON and OBJ writers.

pub mod config;
pub mod driver;
pub mod errors;
pub mod filename;
pub mod writer;

pub use config::{DatasetConfig, OutputFormat, VolumeRange};
pub use driver::{DatasetDriver, DatasetSummary, VolumeHistogram, class_quotas};
pub use errors::{ConfigError, DatasetError};
pub use filename::format_filename;
pub use writer::DatasetWriter;
