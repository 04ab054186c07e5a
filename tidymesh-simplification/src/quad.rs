//! Quad synthesis from a coplanar face pair
//!
//! Given two adjacent faces whose union has exactly four corners, order the
//! corners by angle around their centroid and validate the resulting quad
//! against the topology. Nothing is mutated here; the returned [`QuadPlan`]
//! is applied by [`crate::mutate::apply_merge`].

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tidymesh_core::{
    EdgeId, Error, FaceConstructionError, FaceId, MeshTopology, Point3f, Result, Vector3f, VertId,
};

/// Plane the corners are projected onto before sorting them by angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// Drop the Z coordinate. Faces not facing along Z can be misordered
    /// (and are then rejected as self-intersecting or degenerate).
    #[default]
    Xy,
    /// Project onto the plane orthogonal to the shared face normal.
    FaceNormal,
}

/// A validated merge: the two source faces and the ordered corners of the
/// quad replacing them.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadPlan {
    pub sources: [FaceId; 2],
    pub verts: [VertId; 4],
    pub normal: Vector3f,
}

/// Vertices of `faces` in first-seen order, without repeats.
pub fn unique_vertices(topo: &MeshTopology, faces: &[FaceId]) -> Result<Vec<VertId>> {
    let mut all = Vec::new();
    for &f in faces {
        all.extend_from_slice(topo.verts_of_face(f)?);
    }
    Ok(all.into_iter().unique().collect())
}

/// Two in-plane axes `(u, v)` such that `u × v` points along `normal`.
fn projection_axes(projection: Projection, normal: &Vector3f) -> (Vector3f, Vector3f) {
    match projection {
        Projection::Xy => (Vector3f::x(), Vector3f::y()),
        Projection::FaceNormal => {
            let helper = if normal.x.abs() < 0.9 {
                Vector3f::x()
            } else {
                Vector3f::y()
            };
            let u = (helper - normal * normal.dot(&helper)).normalize();
            let v = normal.cross(&u);
            (u, v)
        }
    }
}

/// Sort `verts` by `atan2` of their offset from the centroid, ascending.
pub fn order_by_angle(
    verts: &[VertId],
    positions: &[Point3f],
    projection: Projection,
    normal: &Vector3f,
) -> Vec<VertId> {
    let centroid = positions
        .iter()
        .fold(Vector3f::zeros(), |acc, p| acc + p.coords)
        / positions.len() as f32;
    let (u, v) = projection_axes(projection, normal);

    let mut keyed: Vec<(f32, VertId)> = verts
        .iter()
        .zip(positions)
        .map(|(&vid, p)| {
            let d = p.coords - centroid;
            (d.dot(&v).atan2(d.dot(&u)), vid)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, vid)| vid).collect()
}

/// Edges bordering exactly one of the two faces.
fn union_boundary(topo: &MeshTopology, [a, b]: [FaceId; 2]) -> Result<HashSet<EdgeId>> {
    let edges_a: HashSet<EdgeId> = topo.edges_of_face(a)?.iter().copied().collect();
    let edges_b: HashSet<EdgeId> = topo.edges_of_face(b)?.iter().copied().collect();
    Ok(edges_a.symmetric_difference(&edges_b).copied().collect())
}

/// Build a quad plan replacing `sources`.
///
/// Fails with [`Error::FaceConstruction`] when the pair does not have exactly
/// four unique corners, when the ordered quad would be rejected by the
/// topology, or when its sides are not exactly the outer boundary of the
/// pair. Any other error means the topology itself is inconsistent.
pub fn synthesize_quad(
    topo: &MeshTopology,
    sources: [FaceId; 2],
    projection: Projection,
) -> Result<QuadPlan> {
    let verts = unique_vertices(topo, &sources)?;
    if verts.len() != 4 {
        return Err(FaceConstructionError::WrongVertexCount(verts.len()).into());
    }
    let positions = verts
        .iter()
        .map(|&v| topo.vertex_position(v))
        .collect::<Result<Vec<_>>>()?;
    let shared_normal = topo.face_normal(sources[0])?;

    let mut order = order_by_angle(&verts, &positions, projection, &shared_normal);
    let mut normal = topo.check_face(&order, &sources)?;
    if normal.dot(&shared_normal) < 0.0 {
        order.reverse();
        normal = topo.check_face(&order, &sources)?;
    }

    let boundary = union_boundary(topo, sources)?;
    let sides: Option<HashSet<EdgeId>> = order
        .iter()
        .circular_tuple_windows()
        .map(|(&a, &b)| topo.find_edge(a, b))
        .collect();
    if sides.as_ref() != Some(&boundary) {
        return Err(FaceConstructionError::PerimeterMismatch.into());
    }

    let verts: [VertId; 4] = order
        .try_into()
        .map_err(|_| Error::TopologyInconsistency("quad lost a corner while ordering".into()))?;
    Ok(QuadPlan {
        sources,
        verts,
        normal,
    })
}
