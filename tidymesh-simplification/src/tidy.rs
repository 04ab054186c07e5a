//! Weld-then-merge pipeline
//!
//! [`tidy_target`] is the entry point used by the command line tools: it
//! welds near-duplicate vertices, loads the result into a [`MeshTopology`],
//! runs the configured merge passes and writes the topology back. The host
//! mesh is replaced only when every step succeeded.

use crate::merge::{CoplanarMerger, MergeConfig, MergeStats};
use crate::weld::{weld, WeldReport, DEFAULT_WELD_THRESHOLD};
use crate::MeshSimplifier;
use serde::{Deserialize, Serialize};
use tidymesh_core::{Error, MeshTopology, PolygonMesh, Result};

/// Configuration for the whole pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TidyConfig {
    /// Distance under which vertices are welded
    pub weld_threshold: f32,
    pub merge: MergeConfig,
}

impl Default for TidyConfig {
    fn default() -> Self {
        Self {
            weld_threshold: DEFAULT_WELD_THRESHOLD,
            merge: MergeConfig::default(),
        }
    }
}

impl TidyConfig {
    pub fn with_params(weld_threshold: f32, merge: MergeConfig) -> Self {
        Self {
            weld_threshold,
            merge,
        }
    }
}

/// What a tidy run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TidyReport {
    pub weld: WeldReport,
    pub merge: MergeStats,
    pub faces_before: usize,
    pub faces_after: usize,
}

/// Tidy `mesh` with the default merge settings.
pub fn tidy(mesh: &mut PolygonMesh, weld_threshold: f32) -> Result<TidyReport> {
    let config = TidyConfig {
        weld_threshold,
        ..Default::default()
    };
    tidy_target(Some(mesh), &config)
}

/// Weld, then merge coplanar face pairs of `target` into quads.
///
/// Fails with [`Error::InvalidInput`] when no target is given or the target
/// does not hold a usable mesh. On any error `target` is left unchanged.
pub fn tidy_target(target: Option<&mut PolygonMesh>, config: &TidyConfig) -> Result<TidyReport> {
    let Some(mesh) = target else {
        log::warn!("tidy requested without a mesh");
        return Err(Error::InvalidInput("no mesh provided".into()));
    };
    if let Err(e) = mesh.validate() {
        log::warn!("tidy target rejected: {e}");
        return Err(Error::InvalidInput(format!(
            "target is not a mesh-like structure: {e}"
        )));
    }

    let faces_before = mesh.face_count();
    let mut work = mesh.clone();
    let weld_report = weld(&mut work, config.weld_threshold)?;

    let mut topo = MeshTopology::load(&work)?;
    let merge_stats = CoplanarMerger::with_config(config.merge).run(&mut topo)?;
    topo.commit(&mut work);

    let report = TidyReport {
        weld: weld_report,
        merge: merge_stats,
        faces_before,
        faces_after: work.face_count(),
    };
    log::info!(
        "tidy: {} vertices welded, {} faces merged, {} -> {} faces",
        report.weld.welded_vertices,
        report.merge.total_merged(),
        report.faces_before,
        report.faces_after
    );

    *mesh = work;
    Ok(report)
}

/// [`MeshSimplifier`] running the full tidy pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tidier {
    pub config: TidyConfig,
}

impl Tidier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TidyConfig) -> Self {
        Self { config }
    }
}

impl MeshSimplifier for Tidier {
    fn simplify(&self, mesh: &PolygonMesh) -> Result<PolygonMesh> {
        let mut out = mesh.clone();
        tidy_target(Some(&mut out), &self.config)?;
        Ok(out)
    }
}
