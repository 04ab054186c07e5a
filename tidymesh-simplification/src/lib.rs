//! Mesh cleanup algorithms
//!
//! This crate provides the passes that tidy up a polygon mesh:
//! - Distance-based vertex welding
//! - Merging of coplanar adjacent face pairs into quads
//! - The weld-then-merge pipeline combining both

pub mod weld;
pub mod coplanar;
pub mod quad;
pub mod mutate;
pub mod merge;
pub mod tidy;

pub use weld::*;
pub use coplanar::*;
pub use quad::*;
pub use mutate::*;
pub use merge::*;
pub use tidy::*;

use tidymesh_core::{PolygonMesh, Result};

/// A pass producing a cleaned-up copy of a mesh
pub trait MeshSimplifier {
    /// Return the simplified mesh, leaving `mesh` untouched.
    fn simplify(&self, mesh: &PolygonMesh) -> Result<PolygonMesh>;
}
