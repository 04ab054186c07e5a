//! Benchmarks for welding and coplanar merging on grid meshes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tidymesh_core::{MeshTopology, Point3f, PolygonMesh};
use tidymesh_simplification::{
    merge_pass, tidy_target, MergeConfig, PassLimit, TidyConfig, VertexWelder,
};

/// Flat grid of `size` x `size` vertices. With `split_seams` every cell
/// gets its own copy of its corners, so the welder has work to do.
fn generate_grid_mesh(size: usize, split_seams: bool) -> PolygonMesh {
    let mut vertices = Vec::new();
    let mut faces = Vec::with_capacity((size - 1) * (size - 1) * 2);

    if split_seams {
        for y in 0..(size - 1) {
            for x in 0..(size - 1) {
                let base = vertices.len();
                for (dx, dy) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
                    vertices.push(Point3f::new((x + dx) as f32, (y + dy) as f32, 0.0));
                }
                faces.push([base, base + 1, base + 2]);
                faces.push([base, base + 2, base + 3]);
            }
        }
    } else {
        for y in 0..size {
            for x in 0..size {
                vertices.push(Point3f::new(x as f32, y as f32, 0.0));
            }
        }
        for y in 0..(size - 1) {
            for x in 0..(size - 1) {
                let bl = y * size + x;
                let br = bl + 1;
                let tl = bl + size;
                let tr = tl + 1;
                faces.push([bl, br, tr]);
                faces.push([bl, tr, tl]);
            }
        }
    }
    PolygonMesh::from_triangles(vertices, &faces)
}

fn bench_weld(c: &mut Criterion) {
    let mut group = c.benchmark_group("weld");
    for &size in &[10, 40, 100] {
        let mesh = generate_grid_mesh(size, true);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}v", mesh.vertex_count())),
            &mesh,
            |b, mesh| {
                let welder = VertexWelder::new();
                b.iter(|| {
                    let mut work = mesh.clone();
                    black_box(welder.weld(&mut work).unwrap());
                });
            },
        );
    }
    group.finish();
}

fn bench_merge_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_pass");
    for &size in &[10, 40, 100] {
        let mesh = generate_grid_mesh(size, false);
        let topo = MeshTopology::load(&mesh).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}f", mesh.face_count())),
            &topo,
            |b, topo| {
                let config = MergeConfig::default();
                b.iter(|| {
                    let mut work = topo.clone();
                    black_box(merge_pass(&mut work, &config).unwrap());
                });
            },
        );
    }
    group.finish();
}

fn bench_tidy(c: &mut Criterion) {
    let mut group = c.benchmark_group("tidy");
    for &size in &[10, 40] {
        let mesh = generate_grid_mesh(size, true);
        for (label, passes) in [("single", PassLimit::Single), ("fixed_point", PassLimit::FixedPoint)] {
            let config = TidyConfig {
                merge: MergeConfig {
                    passes,
                    ..Default::default()
                },
                ..Default::default()
            };
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}f", mesh.face_count())),
                &(&mesh, config),
                |b, &(mesh, config)| {
                    b.iter(|| {
                        let mut work = mesh.clone();
                        black_box(tidy_target(Some(&mut work), &config).unwrap());
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_weld, bench_merge_pass, bench_tidy);
criterion_main!(benches);
