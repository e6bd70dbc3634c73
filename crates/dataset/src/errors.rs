use std::path::PathBuf;

use tetra_generator::GenerationError;

/// Errors while loading or validating a dataset configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    #[error("precision must be between 1 and 16, got {0}")]
    InvalidPrecision(i64),

    #[error("dataset size must be greater than 0, got {0}")]
    InvalidDatasetSize(i64),

    #[error("intersection distribution must have exactly 5 values, got {0}")]
    DistributionLength(usize),

    #[error("intersection distribution entry {index} is negative: {value}")]
    NegativeShare { index: usize, value: f64 },

    #[error("intersection distribution sums to {0}, more than 0.5 away from 100")]
    DistributionSum(f64),

    #[error("invalid volume range [{min}, {max}]: need 0 <= min < max <= 1/3")]
    InvalidVolumeRange { min: f64, max: f64 },

    #[error("number of bins must be greater than 0, got {0}")]
    InvalidBins(i64),

    #[error("max volume rejections must be greater than 0, got {0}")]
    InvalidVolumeRejections(i64),
}

/// Errors while producing a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no polyhedron volume in range after {rejections} consecutive rejections")]
    VolumeFilterExhausted { rejections: usize },
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
