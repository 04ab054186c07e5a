//! Tidy a generated triangle grid from the command line.
//!
//! Usage: tidy_grid [OPTIONS]
//!
//! Set `RUST_LOG=debug` to see every merge decision.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use nalgebra::{Rotation3, Vector3};
use tidymesh_core::{Point3f, PolygonMesh};
use tidymesh_simplification::{
    tidy_target, MergeConfig, NormalTest, PassLimit, Projection, TidyConfig,
    DEFAULT_WELD_THRESHOLD,
};

#[derive(Parser)]
#[command(name = "tidy_grid")]
#[command(author, version, about = "Weld and merge a generated triangle grid", long_about = None)]
struct Cli {
    /// Number of cells along each side of the grid
    #[arg(short, long, default_value = "4")]
    size: usize,

    /// Give every cell its own corner vertices, offset by this distance
    #[arg(long, default_value = "0.0")]
    seam_gap: f32,

    /// Tilt the grid about the X axis (degrees)
    #[arg(long, default_value = "0.0")]
    tilt: f32,

    /// Welding distance
    #[arg(short = 't', long, default_value_t = DEFAULT_WELD_THRESHOLD)]
    threshold: f32,

    /// Number of merge passes (0 = until nothing merges)
    #[arg(short, long, default_value = "1")]
    passes: usize,

    /// Maximum angle between normals of merged faces (degrees); exact match if omitted
    #[arg(long)]
    max_angle: Option<f32>,

    /// Plane used to order quad corners
    #[arg(long, value_enum, default_value = "xy")]
    projection: ProjectionArg,

    /// Print the resulting faces
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectionArg {
    Xy,
    FaceNormal,
}

impl From<ProjectionArg> for Projection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Xy => Projection::Xy,
            ProjectionArg::FaceNormal => Projection::FaceNormal,
        }
    }
}

fn build_grid(size: usize, seam_gap: f32, tilt: f32) -> PolygonMesh {
    let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), tilt.to_radians());
    let mut mesh = PolygonMesh::new();

    for y in 0..size {
        for x in 0..size {
            let corner = |dx: usize, dy: usize| {
                let gap = if seam_gap > 0.0 { seam_gap * (x + y) as f32 } else { 0.0 };
                rotation * Point3f::new((x + dx) as f32 + gap, (y + dy) as f32, 0.0)
            };
            let base = mesh.vertex_count();
            for (dx, dy) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
                mesh.add_vertex(corner(dx, dy));
            }
            mesh.add_face(vec![base, base + 1, base + 2]);
            mesh.add_face(vec![base, base + 2, base + 3]);
        }
    }
    mesh
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.size == 0 {
        anyhow::bail!("grid size must be at least 1");
    }

    let passes = match cli.passes {
        0 => PassLimit::FixedPoint,
        1 => PassLimit::Single,
        n => PassLimit::Count(n),
    };
    let normal_test = match cli.max_angle {
        Some(deg) => NormalTest::Angular {
            max_angle: deg.to_radians(),
        },
        None => NormalTest::Exact,
    };
    let config = TidyConfig::with_params(
        cli.threshold,
        MergeConfig::with_params(normal_test, cli.projection.into(), passes),
    );

    let mut mesh = build_grid(cli.size, cli.seam_gap, cli.tilt);
    println!(
        "Input: {} vertices, {} edges, {} faces",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.face_count()
    );

    let report = tidy_target(Some(&mut mesh), &config).context("tidy failed")?;

    println!(
        "Output: {} vertices, {} edges, {} faces",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.face_count()
    );
    println!("Welded vertices: {}", report.weld.welded_vertices);
    println!("Dropped faces:   {}", report.weld.removed_faces);
    for (i, pass) in report.merge.passes.iter().enumerate() {
        println!(
            "Pass {}: {} merged, {} unpaired, {} ambiguous, {} rejected",
            i + 1,
            pass.merged,
            pass.unpaired,
            pass.ambiguous,
            pass.rejected
        );
    }

    if cli.verbose {
        for (i, face) in mesh.faces.iter().enumerate() {
            println!("  face {i}: {face:?}");
        }
    }
    Ok(())
}
