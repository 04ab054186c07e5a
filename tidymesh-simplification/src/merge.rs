//! Coplanar face merging passes
//!
//! A pass walks the faces present when it starts. For each face not yet
//! consumed, it looks for exactly one coplanar edge neighbour, synthesizes
//! the quad covering both and applies it. Pairs that cannot be merged are
//! left alone; only topology inconsistencies abort a pass.

use crate::coplanar::{as_pair, find_merge_candidates, NormalTest};
use crate::mutate::apply_merge;
use crate::quad::{synthesize_quad, Projection};
use crate::MeshSimplifier;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tidymesh_core::{Error, FaceId, MeshTopology, PolygonMesh, Result};

/// How many passes [`CoplanarMerger::run`] performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassLimit {
    /// One pass. Quads created in it are not merged further.
    #[default]
    Single,
    /// Up to `n` passes, stopping early after a pass without merges.
    Count(usize),
    /// Repeat until a pass merges nothing.
    FixedPoint,
}

/// Configuration for coplanar merging
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    pub normal_test: NormalTest,
    pub projection: Projection,
    pub passes: PassLimit,
}

impl MergeConfig {
    pub fn with_params(normal_test: NormalTest, projection: Projection, passes: PassLimit) -> Self {
        Self {
            normal_test,
            projection,
            passes,
        }
    }
}

/// Per-pass outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Faces from the pass-start snapshot that were examined.
    pub visited: usize,
    /// Successful merges (each removes one face and one edge).
    pub merged: usize,
    /// Faces with no compatible neighbour.
    pub unpaired: usize,
    /// Faces with more than one compatible neighbour.
    pub ambiguous: usize,
    /// Pairs rejected while building the quad.
    pub rejected: usize,
}

/// Totals over all passes of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub passes: Vec<PassStats>,
}

impl MergeStats {
    pub fn total_merged(&self) -> usize {
        self.passes.iter().map(|p| p.merged).sum()
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }
}

/// Run one merge pass over `topo`.
pub fn merge_pass(topo: &mut MeshTopology, config: &MergeConfig) -> Result<PassStats> {
    let snapshot: Vec<FaceId> = topo.face_ids().collect();
    let mut merged: HashSet<FaceId> = HashSet::new();
    let mut stats = PassStats::default();

    for face in snapshot {
        if merged.contains(&face) || !topo.contains_face(face) {
            continue;
        }
        stats.visited += 1;

        let candidates = find_merge_candidates(topo, face, &merged, config.normal_test)?;
        let Some(pair) = as_pair(&candidates) else {
            if candidates.len() > 2 {
                log::debug!(
                    "face {:?}: {} compatible neighbours, skipped",
                    face,
                    candidates.len() - 1
                );
                stats.ambiguous += 1;
            } else {
                stats.unpaired += 1;
            }
            continue;
        };

        let plan = match synthesize_quad(topo, pair, config.projection) {
            Ok(plan) => plan,
            Err(Error::FaceConstruction(reason)) => {
                log::debug!("pair {:?}/{:?} not merged: {}", pair[0], pair[1], reason);
                stats.rejected += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let quad = apply_merge(topo, &plan, &mut merged)?;
        log::debug!("merged {:?} and {:?} into {:?}", pair[0], pair[1], quad);
        stats.merged += 1;
    }

    Ok(stats)
}

/// Coplanar merger driving one or more passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoplanarMerger {
    pub config: MergeConfig,
}

impl CoplanarMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Merge passes over `topo` according to the configured [`PassLimit`].
    pub fn run(&self, topo: &mut MeshTopology) -> Result<MergeStats> {
        let max_passes = match self.config.passes {
            PassLimit::Single => 1,
            PassLimit::Count(n) => n,
            PassLimit::FixedPoint => usize::MAX,
        };

        let mut stats = MergeStats::default();
        while stats.pass_count() < max_passes {
            let pass = merge_pass(topo, &self.config)?;
            log::info!(
                "merge pass {}: {} merged, {} unpaired, {} ambiguous, {} rejected ({} faces left)",
                stats.pass_count() + 1,
                pass.merged,
                pass.unpaired,
                pass.ambiguous,
                pass.rejected,
                topo.num_faces()
            );
            stats.passes.push(pass);
            if pass.merged == 0 {
                break;
            }
        }
        Ok(stats)
    }
}

impl MeshSimplifier for CoplanarMerger {
    fn simplify(&self, mesh: &PolygonMesh) -> Result<PolygonMesh> {
        let mut topo = MeshTopology::load(mesh)?;
        self.run(&mut topo)?;
        let mut out = mesh.clone();
        topo.commit(&mut out);
        Ok(out)
    }
}
