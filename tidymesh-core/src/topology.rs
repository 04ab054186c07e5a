//! Editable mesh topology
//!
//! An arena of vertices, edges and faces addressed by stable typed ids. Edges
//! track the faces bordering them ("link faces"), faces track their ordered
//! vertex and edge cycles. Removed elements leave a `None` slot behind, so ids
//! handed out earlier never alias a different element.
//!
//! Positional access through [`MeshTopology::face_at`] and
//! [`MeshTopology::edge_at`] goes through dense lookup tables that are only
//! valid until the next structural mutation; call
//! [`MeshTopology::ensure_lookup_tables`] to re-synchronize them.

use crate::error::{Error, FaceConstructionError, Result};
use crate::mesh::PolygonMesh;
use crate::point::*;
use itertools::Itertools;
use std::collections::HashMap;

macro_rules! define_id {
    ($name:ident, $display:literal) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Raw arena index.
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", $display, self.0)
            }
        }
    };
}

define_id!(VertId, "V");
define_id!(EdgeId, "E");
define_id!(FaceId, "F");

#[derive(Debug, Clone)]
struct Vertex {
    co: Point3f,
}

#[derive(Debug, Clone)]
struct Edge {
    verts: [VertId; 2],
    link_faces: Vec<FaceId>,
}

#[derive(Debug, Clone)]
struct Face {
    verts: Vec<VertId>,
    /// `edges[i]` joins `verts[i]` and `verts[(i + 1) % n]`
    edges: Vec<EdgeId>,
    normal: Vector3f,
}

#[inline]
fn edge_key(a: VertId, b: VertId) -> (VertId, VertId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Editable vertex/edge/face graph built from a [`PolygonMesh`].
#[derive(Debug, Clone)]
pub struct MeshTopology {
    vertices: Vec<Vertex>,
    edges: Vec<Option<Edge>>,
    faces: Vec<Option<Face>>,
    edge_lookup: HashMap<(VertId, VertId), EdgeId>,
    face_table: Vec<FaceId>,
    edge_table: Vec<EdgeId>,
    tables_dirty: bool,
    live_edges: usize,
    live_faces: usize,
}

impl MeshTopology {
    /// Build the topology from a host mesh snapshot.
    ///
    /// Degenerate (zero-area) faces are accepted and get a zero normal. Faces
    /// repeating a vertex, and edges bordered by more than two faces, are
    /// rejected as invalid input.
    pub fn load(mesh: &PolygonMesh) -> Result<Self> {
        mesh.validate()?;

        let mut topo = MeshTopology {
            vertices: mesh.vertices.iter().map(|&co| Vertex { co }).collect(),
            edges: Vec::with_capacity(mesh.faces.len() * 2),
            faces: Vec::with_capacity(mesh.faces.len()),
            edge_lookup: HashMap::with_capacity(mesh.faces.len() * 2),
            face_table: Vec::new(),
            edge_table: Vec::new(),
            tables_dirty: true,
            live_edges: 0,
            live_faces: 0,
        };

        for (fi, face) in mesh.faces.iter().enumerate() {
            let verts: Vec<VertId> = face.iter().map(|&i| VertId(i)).collect();
            if !verts.iter().all_unique() {
                return Err(Error::InvalidInput(format!(
                    "face {fi} repeats a vertex"
                )));
            }
            for (&a, &b) in verts.iter().circular_tuple_windows() {
                if let Some(&e) = topo.edge_lookup.get(&edge_key(a, b)) {
                    if topo.edge(e)?.link_faces.len() >= 2 {
                        return Err(Error::InvalidInput(format!(
                            "edge ({}, {}) has more than two incident faces",
                            a.0, b.0
                        )));
                    }
                }
            }
            let normal = newell_normal(verts.iter().map(|&v| &topo.vertices[v.0].co).collect::<Vec<_>>())
                .unwrap_or_else(Vector3f::zeros);
            topo.insert_face(verts, normal);
        }

        topo.ensure_lookup_tables();
        log::debug!(
            "loaded topology: {} vertices, {} edges, {} faces",
            topo.num_vertices(),
            topo.num_edges(),
            topo.num_faces()
        );
        Ok(topo)
    }

    /// Write the current state back into `host`, replacing its geometry.
    ///
    /// Consumes the topology; all working memory is released afterwards.
    pub fn commit(self, host: &mut PolygonMesh) {
        let (faces, normals): (Vec<Vec<usize>>, Vec<Vector3f>) = self
            .faces
            .into_iter()
            .flatten()
            .map(|f| (f.verts.iter().map(|v| v.0).collect(), f.normal))
            .unzip();
        host.vertices = self.vertices.into_iter().map(|v| v.co).collect();
        host.faces = faces;
        host.face_normals = Some(normals);
    }

    // ------------------------------------------------------------
    // Counts and iteration
    // ------------------------------------------------------------

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.live_edges
    }

    pub fn num_faces(&self) -> usize {
        self.live_faces
    }

    pub fn vert_ids(&self) -> impl Iterator<Item = VertId> + '_ {
        (0..self.vertices.len()).map(VertId)
    }

    /// Live edges in id order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeId(i))
    }

    /// Live faces in id order. Newly created faces come last.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_some())
            .map(|(i, _)| FaceId(i))
    }

    pub fn contains_face(&self, f: FaceId) -> bool {
        matches!(self.faces.get(f.0), Some(Some(_)))
    }

    pub fn contains_edge(&self, e: EdgeId) -> bool {
        matches!(self.edges.get(e.0), Some(Some(_)))
    }

    // ------------------------------------------------------------
    // Adjacency queries
    // ------------------------------------------------------------

    fn face(&self, f: FaceId) -> Result<&Face> {
        self.faces
            .get(f.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::dangling("face", f))
    }

    fn edge(&self, e: EdgeId) -> Result<&Edge> {
        self.edges
            .get(e.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::dangling("edge", e))
    }

    /// Faces bordering `e` (0, 1 or 2).
    pub fn faces_of_edge(&self, e: EdgeId) -> Result<&[FaceId]> {
        Ok(&self.edge(e)?.link_faces)
    }

    /// Boundary edges of `f`, in cycle order.
    pub fn edges_of_face(&self, f: FaceId) -> Result<&[EdgeId]> {
        Ok(&self.face(f)?.edges)
    }

    /// Vertices of `f`, in cycle order.
    pub fn verts_of_face(&self, f: FaceId) -> Result<&[VertId]> {
        Ok(&self.face(f)?.verts)
    }

    /// Unit normal of `f`; zero for degenerate faces.
    pub fn face_normal(&self, f: FaceId) -> Result<Vector3f> {
        Ok(self.face(f)?.normal)
    }

    pub fn edge_verts(&self, e: EdgeId) -> Result<[VertId; 2]> {
        Ok(self.edge(e)?.verts)
    }

    pub fn vertex_position(&self, v: VertId) -> Result<Point3f> {
        self.vertices
            .get(v.0)
            .map(|vert| vert.co)
            .ok_or_else(|| Error::dangling("vertex", v))
    }

    /// The edge joining `a` and `b`, if any.
    pub fn find_edge(&self, a: VertId, b: VertId) -> Option<EdgeId> {
        self.edge_lookup.get(&edge_key(a, b)).copied()
    }

    // ------------------------------------------------------------
    // Lookup tables
    // ------------------------------------------------------------

    /// Re-synchronize the positional face and edge tables.
    pub fn ensure_lookup_tables(&mut self) {
        self.face_table = self.face_ids().collect();
        self.edge_table = self.edge_ids().collect();
        self.tables_dirty = false;
    }

    pub fn lookup_tables_valid(&self) -> bool {
        !self.tables_dirty
    }

    /// The `i`-th live face as of the last table refresh.
    pub fn face_at(&self, i: usize) -> Result<FaceId> {
        if self.tables_dirty {
            return Err(Error::StaleLookupTable);
        }
        self.face_table
            .get(i)
            .copied()
            .ok_or_else(|| Error::dangling("face table index", i))
    }

    /// The `i`-th live edge as of the last table refresh.
    pub fn edge_at(&self, i: usize) -> Result<EdgeId> {
        if self.tables_dirty {
            return Err(Error::StaleLookupTable);
        }
        self.edge_table
            .get(i)
            .copied()
            .ok_or_else(|| Error::dangling("edge table index", i))
    }

    // ------------------------------------------------------------
    // Face construction
    // ------------------------------------------------------------

    /// Validate `verts` as a new face without mutating anything, treating
    /// the faces in `replacing` as already removed. Returns the normal the
    /// face would get.
    pub fn check_face(&self, verts: &[VertId], replacing: &[FaceId]) -> Result<Vector3f> {
        if verts.len() < 3 {
            return Err(FaceConstructionError::TooFewVertices(verts.len()).into());
        }
        if !verts.iter().all_unique() {
            return Err(FaceConstructionError::RepeatedVertex.into());
        }
        let positions = verts
            .iter()
            .map(|&v| self.vertex_position(v))
            .collect::<Result<Vec<_>>>()?;
        let normal = newell_normal(&positions).ok_or(FaceConstructionError::Degenerate)?;
        if self_intersects(&positions, &normal) {
            return Err(FaceConstructionError::SelfIntersecting.into());
        }

        let existing: Vec<EdgeId> = verts
            .iter()
            .circular_tuple_windows()
            .filter_map(|(&a, &b)| self.find_edge(a, b))
            .collect();

        // Every edge already exists: a face over the same vertices may too.
        if existing.len() == verts.len() {
            for &f in self.faces_of_edge(existing[0])? {
                if replacing.contains(&f) {
                    continue;
                }
                let other = self.verts_of_face(f)?;
                if other.len() == verts.len() && other.iter().all(|v| verts.contains(v)) {
                    return Err(FaceConstructionError::DuplicateFace.into());
                }
            }
        }

        for &e in &existing {
            let remaining = self
                .faces_of_edge(e)?
                .iter()
                .filter(|&&f| !replacing.contains(&f))
                .count();
            if remaining >= 2 {
                return Err(FaceConstructionError::NonManifoldEdge.into());
            }
        }

        Ok(normal)
    }

    /// Create a face from an ordered vertex cycle, adding any missing edges.
    pub fn create_face(&mut self, verts: &[VertId]) -> Result<FaceId> {
        let normal = self.check_face(verts, &[])?;
        Ok(self.insert_face(verts.to_vec(), normal))
    }

    fn insert_face(&mut self, verts: Vec<VertId>, normal: Vector3f) -> FaceId {
        let fid = FaceId(self.faces.len());
        let edges: Vec<EdgeId> = verts
            .iter()
            .circular_tuple_windows()
            .map(|(&a, &b)| self.get_or_create_edge(a, b))
            .collect();
        for &e in &edges {
            if let Some(Some(edge)) = self.edges.get_mut(e.0) {
                edge.link_faces.push(fid);
            }
        }
        self.faces.push(Some(Face {
            verts,
            edges,
            normal,
        }));
        self.live_faces += 1;
        self.tables_dirty = true;
        fid
    }

    fn get_or_create_edge(&mut self, a: VertId, b: VertId) -> EdgeId {
        let key = edge_key(a, b);
        if let Some(&e) = self.edge_lookup.get(&key) {
            return e;
        }
        let eid = EdgeId(self.edges.len());
        self.edges.push(Some(Edge {
            verts: [a, b],
            link_faces: Vec::new(),
        }));
        self.edge_lookup.insert(key, eid);
        self.live_edges += 1;
        eid
    }

    // ------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------

    /// Remove a face. Its edges stay behind, unlinked from it.
    pub fn remove_face(&mut self, f: FaceId) -> Result<()> {
        let face = self
            .faces
            .get_mut(f.0)
            .and_then(Option::take)
            .ok_or_else(|| Error::dangling("face", f))?;
        for e in face.edges {
            let edge = self
                .edges
                .get_mut(e.0)
                .and_then(Option::as_mut)
                .ok_or_else(|| Error::dangling("edge", e))?;
            edge.link_faces.retain(|&lf| lf != f);
        }
        self.live_faces -= 1;
        self.tables_dirty = true;
        Ok(())
    }

    /// Remove an edge that no face borders any more.
    pub fn remove_edge(&mut self, e: EdgeId) -> Result<()> {
        let edge = self.edge(e)?;
        if !edge.link_faces.is_empty() {
            return Err(Error::TopologyInconsistency(format!(
                "edge {e:?} still borders {} face(s)",
                edge.link_faces.len()
            )));
        }
        let key = edge_key(edge.verts[0], edge.verts[1]);
        self.edge_lookup.remove(&key);
        self.edges[e.0] = None;
        self.live_edges -= 1;
        self.tables_dirty = true;
        Ok(())
    }

    // ------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------

    /// Check the structural invariants: consistent face cycles, mutual
    /// edge/face links, at most two link faces per edge and an edge lookup
    /// in sync with the live edges.
    pub fn is_valid(&self) -> bool {
        for (fi, face) in self.faces.iter().enumerate() {
            let Some(face) = face else { continue };
            let n = face.verts.len();
            if n < 3 || face.edges.len() != n {
                return false;
            }
            for i in 0..n {
                let Ok(edge) = self.edge(face.edges[i]) else {
                    return false;
                };
                let (a, b) = (face.verts[i], face.verts[(i + 1) % n]);
                if edge_key(edge.verts[0], edge.verts[1]) != edge_key(a, b) {
                    return false;
                }
                if !edge.link_faces.contains(&FaceId(fi)) {
                    return false;
                }
            }
        }
        for (ei, edge) in self.edges.iter().enumerate() {
            let Some(edge) = edge else { continue };
            if edge.link_faces.len() > 2 {
                return false;
            }
            if self.edge_lookup.get(&edge_key(edge.verts[0], edge.verts[1])) != Some(&EdgeId(ei)) {
                return false;
            }
            for &f in &edge.link_faces {
                match self.face(f) {
                    Ok(face) if face.edges.contains(&EdgeId(ei)) => {}
                    _ => return false,
                }
            }
        }
        self.edge_lookup.len() == self.live_edges
            && self.face_ids().count() == self.live_faces
    }
}

/// Whether any two non-adjacent sides of the polygon cross, checked in the
/// coordinate plane most orthogonal to `normal`.
fn self_intersects(positions: &[Point3f], normal: &Vector3f) -> bool {
    let drop_axis = normal.iamax();
    let project = |p: &Point3f| match drop_axis {
        0 => [p.y, p.z],
        1 => [p.z, p.x],
        _ => [p.x, p.y],
    };
    let pts: Vec<[f32; 2]> = positions.iter().map(project).collect();
    let n = pts.len();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments_cross(pts[i], pts[(i + 1) % n], pts[j], pts[(j + 1) % n]) {
                return true;
            }
        }
    }
    false
}

fn orient(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

fn segments_cross(p1: [f32; 2], p2: [f32; 2], q1: [f32; 2], q2: [f32; 2]) -> bool {
    orient(p1, p2, q1) * orient(p1, p2, q2) < 0.0 && orient(q1, q2, p1) * orient(q1, q2, p2) < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit square split along the (0, 2) diagonal, both triangles facing +Z.
    fn square_pair() -> PolygonMesh {
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

    fn make_tetrahedron() -> PolygonMesh {
        PolygonMesh::from_triangles(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.5, 1.0, 0.0),
                Point3f::new(0.5, 0.5, 1.0),
            ],
            &[[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
    }

    fn v(i: usize) -> VertId {
        VertId(i)
    }

    #[test]
    fn test_load_counts() {
        let topo = MeshTopology::load(&square_pair()).unwrap();
        assert_eq!(topo.num_vertices(), 4);
        assert_eq!(topo.num_edges(), 5);
        assert_eq!(topo.num_faces(), 2);
        assert!(topo.is_valid());
        assert!(topo.lookup_tables_valid());
    }

    #[test]
    fn test_closed_mesh_edges_have_two_faces() {
        let topo = MeshTopology::load(&make_tetrahedron()).unwrap();
        assert_eq!(topo.num_edges(), 6);
        for e in topo.edge_ids() {
            assert_eq!(topo.faces_of_edge(e).unwrap().len(), 2);
        }
        assert!(topo.is_valid());
    }

    #[test]
    fn test_adjacency_queries() {
        let topo = MeshTopology::load(&square_pair()).unwrap();
        let f0 = topo.face_at(0).unwrap();
        assert_eq!(topo.verts_of_face(f0).unwrap(), &[v(0), v(1), v(2)]);
        assert_eq!(topo.edges_of_face(f0).unwrap().len(), 3);
        assert_eq!(topo.face_normal(f0).unwrap(), Vector3f::new(0.0, 0.0, 1.0));

        let diagonal = topo.find_edge(v(2), v(0)).unwrap();
        assert_eq!(topo.faces_of_edge(diagonal).unwrap().len(), 2);
        let border = topo.find_edge(v(0), v(1)).unwrap();
        assert_eq!(topo.faces_of_edge(border).unwrap(), &[f0]);
        assert!(topo.find_edge(v(1), v(3)).is_none());
    }

    #[test]
    fn test_load_rejects_non_manifold_edge() {
        let mut mesh = square_pair();
        mesh.vertices.push(Point3f::new(0.5, 0.5, 1.0));
        mesh.add_face(vec![0, 2, 4]);
        assert!(matches!(
            MeshTopology::load(&mesh),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_rejects_repeated_vertex() {
        let mut mesh = square_pair();
        mesh.add_face(vec![0, 1, 0]);
        assert!(MeshTopology::load(&mesh).is_err());
    }

    #[test]
    fn test_load_keeps_degenerate_face_with_zero_normal() {
        let mesh = PolygonMesh::from_triangles(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
            ],
            &[[0, 1, 2]],
        );
        let topo = MeshTopology::load(&mesh).unwrap();
        let f = topo.face_ids().next().unwrap();
        assert_eq!(topo.face_normal(f).unwrap(), Vector3f::zeros());
    }

    #[test]
    fn test_lookup_tables_go_stale_after_mutation() {
        let mut topo = MeshTopology::load(&square_pair()).unwrap();
        let f0 = topo.face_at(0).unwrap();
        topo.remove_face(f0).unwrap();
        assert_eq!(topo.face_at(0), Err(Error::StaleLookupTable));
        assert_eq!(topo.edge_at(0), Err(Error::StaleLookupTable));

        topo.ensure_lookup_tables();
        let remaining = topo.face_at(0).unwrap();
        assert_ne!(remaining, f0);
        assert!(topo.face_at(1).is_err());
    }

    #[test]
    fn test_remove_face_keeps_edges() {
        let mut topo = MeshTopology::load(&square_pair()).unwrap();
        let f0 = topo.face_ids().next().unwrap();
        topo.remove_face(f0).unwrap();
        assert_eq!(topo.num_faces(), 1);
        assert_eq!(topo.num_edges(), 5);
        let border = topo.find_edge(v(0), v(1)).unwrap();
        assert!(topo.faces_of_edge(border).unwrap().is_empty());
        assert!(topo.is_valid());
        assert!(topo.remove_face(f0).is_err());
    }

    #[test]
    fn test_remove_edge_requires_no_link_faces() {
        let mut topo = MeshTopology::load(&square_pair()).unwrap();
        let diagonal = topo.find_edge(v(0), v(2)).unwrap();
        assert!(matches!(
            topo.remove_edge(diagonal),
            Err(Error::TopologyInconsistency(_))
        ));

        let faces: Vec<FaceId> = topo.face_ids().collect();
        for f in faces {
            topo.remove_face(f).unwrap();
        }
        topo.remove_edge(diagonal).unwrap();
        assert_eq!(topo.num_edges(), 4);
        assert!(topo.find_edge(v(0), v(2)).is_none());
        assert!(!topo.contains_edge(diagonal));
        assert!(topo.is_valid());
    }

    #[test]
    fn test_create_face_reuses_existing_edges() {
        let mut topo = MeshTopology::load(&square_pair()).unwrap();
        let faces: Vec<FaceId> = topo.face_ids().collect();
        for f in faces {
            topo.remove_face(f).unwrap();
        }
        let quad = topo.create_face(&[v(0), v(1), v(2), v(3)]).unwrap();
        assert_eq!(topo.num_faces(), 1);
        assert_eq!(topo.num_edges(), 5);
        assert_eq!(topo.edges_of_face(quad).unwrap().len(), 4);
        assert_eq!(topo.face_normal(quad).unwrap(), Vector3f::new(0.0, 0.0, 1.0));
        assert!(topo.is_valid());
    }

    fn construction_error(topo: &MeshTopology, verts: &[VertId]) -> FaceConstructionError {
        match topo.check_face(verts, &[]) {
            Err(Error::FaceConstruction(e)) => e,
            other => panic!("expected construction error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_face_rejections() {
        let mut mesh = square_pair();
        mesh.vertices.push(Point3f::new(0.5, 0.5, 1.0));
        let topo = MeshTopology::load(&mesh).unwrap();

        assert_eq!(
            construction_error(&topo, &[v(0), v(1)]),
            FaceConstructionError::TooFewVertices(2)
        );
        assert_eq!(
            construction_error(&topo, &[v(0), v(1), v(1)]),
            FaceConstructionError::RepeatedVertex
        );
        assert_eq!(
            construction_error(&topo, &[v(2), v(1), v(0)]),
            FaceConstructionError::DuplicateFace
        );
        // The diagonal already borders two faces
        assert_eq!(
            construction_error(&topo, &[v(0), v(2), v(4)]),
            FaceConstructionError::NonManifoldEdge
        );
    }

    #[test]
    fn test_check_face_self_intersecting() {
        let mesh = PolygonMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(3.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(1.0, 3.0, 0.0),
            ],
            Vec::new(),
        );
        let topo = MeshTopology::load(&mesh).unwrap();
        assert_eq!(
            construction_error(&topo, &[v(0), v(1), v(2), v(3)]),
            FaceConstructionError::SelfIntersecting
        );
        assert!(topo.check_face(&[v(0), v(1), v(3), v(2)], &[]).is_ok());
    }

    #[test]
    fn test_check_face_with_replacement_is_accepted() {
        let topo = MeshTopology::load(&square_pair()).unwrap();
        let faces: Vec<FaceId> = topo.face_ids().collect();
        let normal = topo
            .check_face(&[v(0), v(1), v(2), v(3)], &faces)
            .unwrap();
        assert_eq!(normal, Vector3f::new(0.0, 0.0, 1.0));
        // Dry run: nothing changed
        assert_eq!(topo.num_faces(), 2);
        assert_eq!(topo.num_edges(), 5);
    }

    #[test]
    fn test_check_face_degenerate() {
        let mut mesh = square_pair();
        mesh.vertices.push(Point3f::new(2.0, 0.0, 0.0));
        let topo = MeshTopology::load(&mesh).unwrap();
        assert_eq!(
            topo.check_face(&[v(0), v(1), v(4)], &[]),
            Err(Error::FaceConstruction(FaceConstructionError::Degenerate))
        );
    }

    #[test]
    fn test_commit_writes_back() {
        let mut host = square_pair();
        let mut topo = MeshTopology::load(&host).unwrap();
        let f0 = topo.face_ids().next().unwrap();
        topo.remove_face(f0).unwrap();
        topo.commit(&mut host);

        assert_eq!(host.vertex_count(), 4);
        assert_eq!(host.faces, vec![vec![0, 2, 3]]);
        assert_eq!(
            host.face_normals,
            Some(vec![Vector3f::new(0.0, 0.0, 1.0)])
        );
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", FaceId(7)), "F(7)");
        assert_eq!(format!("{:?}", EdgeId(0)), "E(0)");
    }
}
