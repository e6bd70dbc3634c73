use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tetra_generator::TetrahedronPair;
use tetra_kernel::{Point3d, Tetrahedron};
use tetra_kernel::geometry::tetrahedron::EDGES;

use crate::errors::DatasetError;

#[derive(Debug, Serialize)]
struct JsonTetrahedron {
    vertices: [[f64; 3]; 4],
    edges: [[usize; 2]; 6],
}

impl From<&Tetrahedron> for JsonTetrahedron {
    fn from(t: &Tetrahedron) -> Self {
        Self {
            vertices: t.vertices().map(|p| p.to_array()),
            edges: EDGES,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonEntry {
    id: usize,
    tetrahedron_1: JsonTetrahedron,
    tetrahedron_2: JsonTetrahedron,
    intersection_class: u8,
    intersection_volume: f64,
    intersection_status: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    intersection_shape: Option<Vec<[f64; 3]>>,
}

/// Collects records and writes one JSON array on [`JsonWriter::finish`].
pub struct JsonWriter {
    path: PathBuf,
    file: File,
    entries: Vec<JsonEntry>,
    export_shape: bool,
}

impl JsonWriter {
    pub fn create(path: &Path, export_shape: bool) -> Result<Self, DatasetError> {
        let file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            entries: Vec::new(),
            export_shape,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_entry(
        &mut self,
        pair: &TetrahedronPair,
        shape: &[Point3d],
    ) -> Result<(), DatasetError> {
        self.entries.push(JsonEntry {
            id: self.entries.len(),
            tetrahedron_1: pair.first().into(),
            tetrahedron_2: pair.second().into(),
            intersection_class: pair.class().label(),
            intersection_volume: pair.volume(),
            intersection_status: u8::from(pair.intersects()),
            intersection_shape: self
                .export_shape
                .then(|| shape.iter().map(Point3d::to_array).collect()),
        });
        Ok(())
    }

    pub fn finish(self) -> Result<PathBuf, DatasetError> {
        let mut out = BufWriter::new(self.file);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        self.entries.serialize(&mut serializer)?;
        out.flush().map_err(|e| DatasetError::io(&self.path, e))?;
        Ok(self.path)
    }
}
