//! Stratified generation of tetrahedron pairs by intersection class.
//!
//! [`PairGenerator`] builds pairs whose intersection is empty, a single
//! point, a segment, a polygon or a solid. The point, segment and polygon
//! classes are aimed at directly by sampling around a face of a seed
//! tetrahedron; the empty and solid classes are rejection-sampled.

pub mod classify;
pub mod config;
pub mod error;
pub mod pair;
pub mod sampling;
pub mod strategies;

pub use classify::{classify, classify_pair};
pub use config::GeneratorConfig;
pub use error::GenerationError;
pub use pair::{IntersectionClass, TetrahedronPair};
pub use sampling::{RandomPointSource, TetrahedronBuilder};
pub use strategies::PairGenerator;
