//! Dataset sinks. The format is chosen once when the writer is created;
//! every variant accepts the same records in generation order.

mod csv;
mod json;
mod obj;

use std::path::{Path, PathBuf};

use tetra_generator::TetrahedronPair;
use tetra_kernel::Point3d;
use tracing::info;

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;
pub use self::obj::ObjWriter;
use crate::config::{DatasetConfig, OutputFormat};
use crate::errors::DatasetError;
use crate::filename::format_filename;

pub enum DatasetWriter {
    Csv(CsvWriter),
    Json(JsonWriter),
    Obj(ObjWriter),
}

impl DatasetWriter {
    /// Create the writer for `config` inside `output_dir`, which is
    /// created if missing.
    pub fn create(config: &DatasetConfig, output_dir: &Path) -> Result<Self, DatasetError> {
        std::fs::create_dir_all(output_dir).map_err(|e| DatasetError::io(output_dir, e))?;
        let format = config.output_format;
        let path = output_dir.join(format_filename(config.dataset_size, format.extension()));
        let (precision, shape) = (config.precision, config.export_shape);

        let writer = match format {
            OutputFormat::Csv => Self::Csv(CsvWriter::create(&path, precision, shape)?),
            OutputFormat::Json => Self::Json(JsonWriter::create(&path, shape)?),
            OutputFormat::Obj => {
                Self::Obj(ObjWriter::create(&path.with_extension(""), precision, shape)?)
            }
        };
        info!(format = %format, path = %writer.path().display(), "writing dataset");
        Ok(writer)
    }

    pub fn format(&self) -> OutputFormat {
        match self {
            Self::Csv(_) => OutputFormat::Csv,
            Self::Json(_) => OutputFormat::Json,
            Self::Obj(_) => OutputFormat::Obj,
        }
    }

    /// Output file, or the output directory for OBJ datasets.
    pub fn path(&self) -> &Path {
        match self {
            Self::Csv(w) => w.path(),
            Self::Json(w) => w.path(),
            Self::Obj(w) => w.path(),
        }
    }

    /// Write one record. `shape` holds the intersection's vertices and is
    /// only written by writers created with shape export enabled.
    pub fn write_entry(
        &mut self,
        pair: &TetrahedronPair,
        shape: &[Point3d],
    ) -> Result<(), DatasetError> {
        match self {
            Self::Csv(w) => w.write_entry(pair, shape),
            Self::Json(w) => w.write_entry(pair, shape),
            Self::Obj(w) => w.write_entry(pair, shape),
        }
    }

    /// Flush everything to disk and return the output path.
    pub fn finish(self) -> Result<PathBuf, DatasetError> {
        match self {
            Self::Csv(w) => w.finish(),
            Self::Json(w) => w.finish(),
            Self::Obj(w) => w.finish(),
        }
    }
}
