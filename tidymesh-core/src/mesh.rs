//! Polygon mesh snapshot

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A polygon mesh with vertices and faces of arbitrary arity.
///
/// This is the host representation the tidy pipeline reads from and writes
/// back to. Each face is an ordered cycle of vertex indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<Vec<usize>>,
    pub face_normals: Option<Vec<Vector3f>>,
}

impl PolygonMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            face_normals: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            vertices,
            faces,
            face_normals: None,
        }
    }

    /// Create a mesh from triangles
    pub fn from_triangles(vertices: Vec<Point3f>, triangles: &[[usize; 3]]) -> Self {
        Self::from_vertices_and_faces(vertices, triangles.iter().map(|t| t.to_vec()).collect())
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of distinct undirected edges used by the faces
    pub fn edge_count(&self) -> usize {
        let mut edges = HashSet::new();
        for face in &self.faces {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: Vec<usize>) {
        self.faces.push(face);
        self.face_normals = None;
    }

    /// Calculate face normals. Degenerate faces, and faces referencing a
    /// vertex index out of range (see [`PolygonMesh::validate`]), get a zero
    /// vector.
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                face.iter()
                    .map(|&i| self.vertices.get(i))
                    .collect::<Option<Vec<_>>>()
                    .and_then(newell_normal)
                    .unwrap_or_else(Vector3f::zeros)
            })
            .collect()
    }

    /// Set face normals
    pub fn set_face_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.faces.len() {
            self.face_normals = Some(normals);
        }
    }

    /// Check that every face is a cycle of at least three in-range indices
    /// and that every vertex position is finite.
    pub fn validate(&self) -> Result<()> {
        if let Some(vi) = self
            .vertices
            .iter()
            .position(|v| !v.iter().all(|c| c.is_finite()))
        {
            return Err(Error::InvalidInput(format!(
                "vertex {vi} has a non-finite coordinate"
            )));
        }
        for (fi, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(Error::InvalidInput(format!(
                    "face {fi} has {} vertices, need at least 3",
                    face.len()
                )));
            }
            if let Some(&bad) = face.iter().find(|&&v| v >= self.vertices.len()) {
                return Err(Error::InvalidInput(format!(
                    "face {fi} references invalid vertex index {bad}"
                )));
            }
        }
        Ok(())
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.face_normals = None;
    }
}

impl Default for PolygonMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_triangles() -> PolygonMesh {
        PolygonMesh::from_triangles(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_counts() {
        let mesh = unit_square_triangles();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.edge_count(), 5);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_face_normals() {
        let mesh = unit_square_triangles();
        let normals = mesh.calculate_face_normals();
        assert_eq!(normals.len(), 2);
        for n in normals {
            assert_eq!(n, Vector3f::new(0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_face_normals_out_of_range_face_is_zero() {
        let mut mesh = unit_square_triangles();
        mesh.faces.push(vec![0, 1, 99]);
        assert!(mesh.validate().is_err());
        let normals = mesh.calculate_face_normals();
        assert_eq!(normals.len(), 3);
        assert_eq!(normals[0], Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(normals[2], Vector3f::zeros());
    }

    #[test]
    fn test_set_face_normals_length_mismatch_is_ignored() {
        let mut mesh = unit_square_triangles();
        mesh.set_face_normals(vec![Vector3f::z()]);
        assert!(mesh.face_normals.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_index() {
        let mut mesh = unit_square_triangles();
        mesh.add_face(vec![0, 1, 9]);
        assert!(matches!(mesh.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_short_face() {
        let mut mesh = unit_square_triangles();
        mesh.add_face(vec![0, 1]);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut mesh = unit_square_triangles();
        mesh.vertices[2].x = f32::NAN;
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_serde_derives() {
        fn assert_serde<T: Serialize + for<'de> Deserialize<'de>>() {}
        assert_serde::<PolygonMesh>();
    }
}
