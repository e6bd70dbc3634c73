use std::path::{Path, PathBuf};

use tetra_generator::TetrahedronPair;
use tetra_kernel::{Point3d, Tetrahedron};

use crate::errors::DatasetError;

/// Faces as zero-based vertex triples.
const FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 2, 3]];

/// One Wavefront OBJ file per pair inside a dataset directory.
pub struct ObjWriter {
    dir: PathBuf,
    precision: usize,
    export_shape: bool,
    written: usize,
}

impl ObjWriter {
    pub fn create(dir: &Path, precision: usize, export_shape: bool) -> Result<Self, DatasetError> {
        std::fs::create_dir_all(dir).map_err(|e| DatasetError::io(dir, e))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            precision,
            export_shape,
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn write_entry(
        &mut self,
        pair: &TetrahedronPair,
        shape: &[Point3d],
    ) -> Result<(), DatasetError> {
        self.written += 1;
        let path = self.dir.join(format!("tetrahedron_pair_{:05}.obj", self.written));
        std::fs::write(&path, self.render(pair, shape)).map_err(|e| DatasetError::io(&path, e))
    }

    fn render(&self, pair: &TetrahedronPair, shape: &[Point3d]) -> String {
        let mut out = String::from("# Tetrahedron pair\n");
        out.push_str("# Tetrahedron 1\n");
        self.push_tetrahedron(&mut out, pair.first(), 1);
        out.push_str("# Tetrahedron 2\n");
        self.push_tetrahedron(&mut out, pair.second(), 5);

        out.push_str(&format!("# Intersection class: {}\n", pair.class().label()));
        out.push_str(&format!(
            "# Intersection volume: {:.*}\n",
            self.precision,
            pair.volume()
        ));
        out.push_str(&format!(
            "# Intersection status: {}\n",
            u8::from(pair.intersects())
        ));
        if self.export_shape {
            for p in shape {
                out.push_str(&format!("# Intersection vertex: {}\n", self.coordinates(p)));
            }
        }
        out
    }

    fn push_tetrahedron(&self, out: &mut String, tetrahedron: &Tetrahedron, offset: usize) {
        for p in tetrahedron.vertices() {
            out.push_str(&format!("v {}\n", self.coordinates(p)));
        }
        for [a, b, c] in FACES {
            out.push_str(&format!("f {} {} {}\n", a + offset, b + offset, c + offset));
        }
    }

    fn coordinates(&self, p: &Point3d) -> String {
        let prec = self.precision;
        format!("{:.prec$} {:.prec$} {:.prec$}", p.x, p.y, p.z)
    }

    pub fn finish(self) -> Result<PathBuf, DatasetError> {
        Ok(self.dir)
    }
}
