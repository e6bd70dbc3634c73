use thiserror::Error;

use crate::pair::IntersectionClass;

/// Fatal failures while generating a pair.
///
/// Rejected candidates and timed-out attempts are not errors; they are
/// retried internally until one of the configured bounds is exceeded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("no non-degenerate tetrahedron after {attempts} draws")]
    DegenerateSampling { attempts: usize },

    #[error("gave up generating a {class} pair after {restarts} restarts")]
    Exhausted {
        class: IntersectionClass,
        restarts: usize,
    },

    #[error("boundary complex V={vertices} E={edges} F={faces} matches no intersection class")]
    Unclassifiable {
        vertices: usize,
        edges: usize,
        faces: usize,
    },

    #[error("invalid intersection class index: {0}")]
    InvalidClass(i64),

    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}
