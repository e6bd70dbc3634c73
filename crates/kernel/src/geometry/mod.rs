pub mod bounds;
pub mod frame;
pub mod plane;
pub mod point;
pub mod tetrahedron;
pub mod vector;
