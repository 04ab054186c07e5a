//! Coplanar neighbour detection

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tidymesh_core::{FaceId, MeshTopology, Result, Vector3f};

/// How two face normals are compared when looking for a merge partner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum NormalTest {
    /// Component-wise equality with no tolerance.
    #[default]
    Exact,
    /// Normals whose angle is at most `max_angle` radians.
    Angular { max_angle: f32 },
}

impl NormalTest {
    /// Zero (degenerate) normals never match under `Angular`.
    pub fn matches(&self, a: &Vector3f, b: &Vector3f) -> bool {
        match *self {
            NormalTest::Exact => a == b,
            NormalTest::Angular { max_angle } => {
                *a != Vector3f::zeros() && *b != Vector3f::zeros() && a.angle(b) <= max_angle
            }
        }
    }
}

/// Collect `face` followed by every edge-adjacent face that is not in
/// `merged` and whose normal passes `test`.
///
/// A neighbour is listed once per shared edge. Faces with a degenerate
/// (zero) normal never pair with anything.
pub fn find_merge_candidates(
    topo: &MeshTopology,
    face: FaceId,
    merged: &HashSet<FaceId>,
    test: NormalTest,
) -> Result<Vec<FaceId>> {
    let normal = topo.face_normal(face)?;
    let mut candidates = vec![face];
    if normal == Vector3f::zeros() {
        return Ok(candidates);
    }

    for &edge in topo.edges_of_face(face)? {
        for &neighbor in topo.faces_of_edge(edge)? {
            if neighbor == face || merged.contains(&neighbor) {
                continue;
            }
            let other = topo.face_normal(neighbor)?;
            if other != Vector3f::zeros() && test.matches(&normal, &other) {
                candidates.push(neighbor);
            }
        }
    }
    Ok(candidates)
}

/// The merge pair, if the candidate list holds exactly one partner.
pub fn as_pair(candidates: &[FaceId]) -> Option<[FaceId; 2]> {
    match *candidates {
        [a, b] => Some([a, b]),
        _ => None,
    }
}
