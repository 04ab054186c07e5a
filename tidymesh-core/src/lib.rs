//! Core data structures for tidymesh
//!
//! This crate provides the host-side polygon mesh snapshot, the editable
//! vertex/edge/face topology the simplification passes operate on, and the
//! error types shared across the workspace.

pub mod point;
pub mod mesh;
pub mod topology;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use topology::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

// Type aliases for easier imports
pub type Point = Point3f;
pub type Mesh = PolygonMesh;
