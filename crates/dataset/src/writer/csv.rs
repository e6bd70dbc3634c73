use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tetra_generator::TetrahedronPair;
use tetra_kernel::{Point3d, Tetrahedron};

use crate::errors::DatasetError;

/// Vertex slots in the quoted shape column; unused slots hold `(-1,-1,-1)`.
pub const SHAPE_SLOTS: usize = 16;

/// One row per pair: 24 coordinates, class label, volume and status,
/// optionally followed by the intersection shape.
pub struct CsvWriter {
    path: PathBuf,
    out: BufWriter<File>,
    precision: usize,
    export_shape: bool,
}

impl CsvWriter {
    pub fn create(path: &Path, precision: usize, export_shape: bool) -> Result<Self, DatasetError> {
        let file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
        let mut writer = Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
            precision,
            export_shape,
        };
        writer.write_header()?;
        Ok(writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Column names in row order.
    pub fn header(export_shape: bool) -> Vec<String> {
        let mut columns = Vec::with_capacity(28);
        for t in 1..=2 {
            for v in 1..=4 {
                for axis in ["x", "y", "z"] {
                    columns.push(format!("T{t}_v{v}_{axis}"));
                }
            }
        }
        columns.extend(
            ["intersection_class", "intersection_volume", "intersection_status"]
                .map(String::from),
        );
        if export_shape {
            columns.push("intersection_shape".to_string());
        }
        columns
    }

    fn write_header(&mut self) -> Result<(), DatasetError> {
        let line = Self::header(self.export_shape).join(",");
        writeln!(self.out, "{line}").map_err(|e| DatasetError::io(&self.path, e))
    }

    pub fn write_entry(
        &mut self,
        pair: &TetrahedronPair,
        shape: &[Point3d],
    ) -> Result<(), DatasetError> {
        let mut fields = Vec::with_capacity(28);
        self.push_coordinates(&mut fields, pair.first());
        self.push_coordinates(&mut fields, pair.second());
        fields.push(pair.class().label().to_string());
        fields.push(format!("{:.*}", self.precision, pair.volume()));
        fields.push(u8::from(pair.intersects()).to_string());
        if self.export_shape {
            fields.push(self.shape_cell(shape));
        }

        writeln!(self.out, "{}", fields.join(",")).map_err(|e| DatasetError::io(&self.path, e))
    }

    fn push_coordinates(&self, fields: &mut Vec<String>, tetrahedron: &Tetrahedron) {
        for p in tetrahedron.vertices() {
            for c in p.to_array() {
                fields.push(format!("{:.*}", self.precision, c));
            }
        }
    }

    /// Quoted list of `(x,y,z)` groups padded to [`SHAPE_SLOTS`].
    fn shape_cell(&self, shape: &[Point3d]) -> String {
        let prec = self.precision;
        let groups: Vec<String> = shape
            .iter()
            .map(|p| format!("({:.prec$},{:.prec$},{:.prec$})", p.x, p.y, p.z))
            .chain(std::iter::repeat_n(
                "(-1,-1,-1)".to_string(),
                SHAPE_SLOTS.saturating_sub(shape.len()),
            ))
            .collect();
        format!("\"{}\"", groups.join(","))
    }

    pub fn finish(mut self) -> Result<PathBuf, DatasetError> {
        self.out.flush().map_err(|e| DatasetError::io(&self.path, e))?;
        Ok(self.path)
    }
}
