//! Applying a validated merge to the topology

use crate::quad::QuadPlan;
use std::collections::HashSet;
use tidymesh_core::{EdgeId, Error, FaceId, MeshTopology, Result};

/// Replace the two source faces of `plan` by its quad.
///
/// Both sources are recorded in `merged`. Edges of the sources that are not
/// sides of the quad (the shared diagonal) are removed, and the lookup
/// tables are refreshed before returning so iteration can continue.
///
/// The plan must come from [`crate::quad::synthesize_quad`] on this same
/// topology; any failure here is reported as
/// [`Error::TopologyInconsistency`].
pub fn apply_merge(
    topo: &mut MeshTopology,
    plan: &QuadPlan,
    merged: &mut HashSet<FaceId>,
) -> Result<FaceId> {
    merged.extend(plan.sources);

    let mut old_edges: Vec<EdgeId> = Vec::with_capacity(8);
    for &f in &plan.sources {
        for &e in topo.edges_of_face(f)? {
            if !old_edges.contains(&e) {
                old_edges.push(e);
            }
        }
    }

    for &f in &plan.sources {
        topo.remove_face(f)?;
    }
    let quad = topo.create_face(&plan.verts).map_err(|e| match e {
        Error::FaceConstruction(reason) => Error::TopologyInconsistency(format!(
            "validated quad {:?} rejected on creation: {reason}",
            plan.verts
        )),
        other => other,
    })?;

    let kept: Vec<EdgeId> = topo.edges_of_face(quad)?.to_vec();
    for e in old_edges {
        if !kept.contains(&e) {
            topo.remove_edge(e)?;
        }
    }

    topo.ensure_lookup_tables();
    Ok(quad)
}
