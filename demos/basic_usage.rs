//! Basic usage example for tidymesh
//!
//! Builds a small mesh whose triangles carry their own copies of shared
//! corners, then welds and merges it into quads.

use tidymesh_core::{Point3f, PolygonMesh};
use tidymesh_simplification::{tidy, DEFAULT_WELD_THRESHOLD};

fn print_mesh(label: &str, mesh: &PolygonMesh) {
    println!(
        "{label}: {} vertices, {} edges, {} faces",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.face_count()
    );
    for (i, face) in mesh.faces.iter().enumerate() {
        println!("  face {i}: {face:?}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("tidymesh basic usage");
    println!("====================");

    // Two unit squares side by side, each split into triangles. The second
    // square's left corners are separate vertices 0.0002 away from the first
    // square's right corners.
    let vertices = vec![
        Point3f::new(0.0, 0.0, 0.0),
        Point3f::new(1.0, 0.0, 0.0),
        Point3f::new(1.0, 1.0, 0.0),
        Point3f::new(0.0, 1.0, 0.0),
        Point3f::new(1.0002, 0.0, 0.0),
        Point3f::new(2.0, 0.0, 0.0),
        Point3f::new(2.0, 1.0, 0.0),
        Point3f::new(1.0002, 1.0, 0.0),
    ];
    let mut mesh = PolygonMesh::from_triangles(
        vertices,
        &[[0, 1, 2], [0, 2, 3], [4, 5, 6], [4, 6, 7]],
    );
    print_mesh("\nBefore", &mesh);

    let report = tidy(&mut mesh, DEFAULT_WELD_THRESHOLD)?;
    print_mesh("\nAfter", &mesh);

    println!(
        "\nWelded {} vertices, merged {} face pairs",
        report.weld.welded_vertices,
        report.merge.total_merged()
    );
    Ok(())
}
