//! Distance-based vertex welding
//!
//! Collapses vertices lying within a distance threshold of each other into a
//! single vertex, then remaps faces and drops the ones that became degenerate
//! or duplicated. This runs once before face merging.

use crate::MeshSimplifier;
use rstar::primitives::GeomWithData;
use rstar::RTree;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tidymesh_core::{Error, Point3f, PolygonMesh, Result};

/// Default welding distance.
pub const DEFAULT_WELD_THRESHOLD: f32 = 0.001;

const UNASSIGNED: usize = usize::MAX;

type IndexedPoint = GeomWithData<[f32; 3], usize>;

/// Outcome of a weld.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeldReport {
    /// Vertices merged into another vertex and removed.
    pub welded_vertices: usize,
    /// Faces dropped because welding made them degenerate or duplicated.
    pub removed_faces: usize,
}

/// Welds vertices closer than `threshold`.
///
/// Any two vertices within `threshold` are unified, so chains of close
/// vertices collapse into one. The lowest-index vertex of each cluster is
/// kept with its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexWelder {
    pub threshold: f32,
}

impl Default for VertexWelder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_WELD_THRESHOLD,
        }
    }
}

impl VertexWelder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Weld `mesh` in place.
    pub fn weld(&self, mesh: &mut PolygonMesh) -> Result<WeldReport> {
        weld(mesh, self.threshold)
    }
}

fn find_root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Join the sets of `i` and `j`; the lower index becomes the root.
fn union(parent: &mut [usize], i: usize, j: usize) {
    let (ri, rj) = (find_root(parent, i), find_root(parent, j));
    if ri != rj {
        parent[ri.max(rj)] = ri.min(rj);
    }
}

/// Map every vertex to the index of the vertex it is welded into, and
/// return the surviving positions.
///
/// Vertices within `threshold` of each other end up in the same cluster,
/// transitively. Each cluster keeps its lowest-index vertex and position.
fn cluster_vertices(vertices: &[Point3f], threshold: f32) -> (Vec<usize>, Vec<Point3f>) {
    let tree: RTree<IndexedPoint> = RTree::bulk_load(
        vertices
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedPoint::new([p.x, p.y, p.z], i))
            .collect(),
    );
    let radius_sq = threshold * threshold;

    let mut parent: Vec<usize> = (0..vertices.len()).collect();
    for (vi, p) in vertices.iter().enumerate() {
        for neighbor in tree.locate_within_distance([p.x, p.y, p.z], radius_sq) {
            union(&mut parent, vi, neighbor.data);
        }
    }

    let mut remap = vec![UNASSIGNED; vertices.len()];
    let mut kept = Vec::with_capacity(vertices.len());
    for vi in 0..vertices.len() {
        let root = find_root(&mut parent, vi);
        if remap[root] == UNASSIGNED {
            remap[root] = kept.len();
            kept.push(vertices[root]);
        }
        remap[vi] = remap[root];
    }

    (remap, kept)
}

/// Remap a face through `remap`, collapsing runs of the same vertex.
/// Returns `None` if fewer than three distinct vertices remain or a vertex
/// still appears twice.
fn remap_face(face: &[usize], remap: &[usize]) -> Option<Vec<usize>> {
    let mut out: Vec<usize> = Vec::with_capacity(face.len());
    for &vi in face {
        let nv = remap[vi];
        if out.last() != Some(&nv) {
            out.push(nv);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    let distinct: HashSet<usize> = out.iter().copied().collect();
    if out.len() < 3 || distinct.len() != out.len() {
        return None;
    }
    Some(out)
}

/// Weld vertices of `mesh` lying within `threshold` (Euclidean) of each other.
///
/// Faces that collapse below three distinct vertices, and faces that end up
/// over the same vertex set as an earlier face, are removed. Face normals are
/// cleared since the geometry changed.
pub fn weld(mesh: &mut PolygonMesh, threshold: f32) -> Result<WeldReport> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(Error::InvalidInput(format!(
            "weld threshold must be a finite non-negative distance, got {threshold}"
        )));
    }
    mesh.validate()?;
    if mesh.vertices.is_empty() {
        return Ok(WeldReport::default());
    }

    let (remap, kept) = cluster_vertices(&mesh.vertices, threshold);
    let welded_vertices = mesh.vertices.len() - kept.len();

    let mut seen_faces: HashSet<Vec<usize>> = HashSet::new();
    let mut new_faces = Vec::with_capacity(mesh.faces.len());
    for face in &mesh.faces {
        let Some(remapped) = remap_face(face, &remap) else {
            continue;
        };
        let mut key = remapped.clone();
        key.sort_unstable();
        if seen_faces.insert(key) {
            new_faces.push(remapped);
        }
    }
    let removed_faces = mesh.faces.len() - new_faces.len();

    mesh.vertices = kept;
    mesh.faces = new_faces;
    mesh.face_normals = None;

    log::debug!(
        "weld (threshold {}): {} vertices merged, {} faces removed",
        threshold,
        welded_vertices,
        removed_faces
    );
    Ok(WeldReport {
        welded_vertices,
        removed_faces,
    })
}

impl MeshSimplifier for VertexWelder {
    fn simplify(&self, mesh: &PolygonMesh) -> Result<PolygonMesh> {
        let mut out = mesh.clone();
        self.weld(&mut out)?;
        Ok(out)
    }
}
