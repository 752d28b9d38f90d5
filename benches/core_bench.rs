use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use spline_route_network::{
    parse_network, ArcLengthEstimator, BezierSpline, JunctionGraph, PointId, ShortestPathTree,
    SplineNetwork,
};
use std::hint::black_box;

fn bench_xml_parsing(c: &mut Criterion) {
    let xml_content = include_str!("../tests/fixtures/crossing_network.xml");

    c.bench_function("xml_parse_crossing_network", |b| {
        b.iter(|| {
            let document = parse_network(black_box(xml_content)).expect("XML parse failed");
            black_box(document.graph.len())
        })
    });
}

/// Gitter aus `size` horizontalen und `size` vertikalen Kurven,
/// jede Kreuzung ist eine Junction.
fn build_grid_network(size: usize) -> (SplineNetwork, JunctionGraph) {
    let mut curves = SplineNetwork::new();

    for row in 0..size {
        let anchors: Vec<Vec3> = (0..size)
            .map(|column| Vec3::new(column as f32 * 10.0, row as f32 * 10.0, 0.0))
            .collect();
        curves.push(BezierSpline::polyline(&anchors).expect("Gitter braucht 2 Anker"));
    }
    for column in 0..size {
        let anchors: Vec<Vec3> = (0..size)
            .map(|row| Vec3::new(column as f32 * 10.0, row as f32 * 10.0, 0.0))
            .collect();
        curves.push(BezierSpline::polyline(&anchors).expect("Gitter braucht 2 Anker"));
    }

    let graph = JunctionGraph::from_member_lists((0..size * size).map(|index| {
        let row = index / size;
        let column = index % size;
        [
            PointId::new(row, column * 3),
            PointId::new(size + column, row * 3),
        ]
    }));

    (curves, graph)
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");
    let estimator = ArcLengthEstimator::default();

    for &size in &[8usize, 16usize] {
        let (curves, graph) = build_grid_network(size);

        group.bench_with_input(
            BenchmarkId::new("grid_full_tree", size),
            &(curves, graph),
            |b, (curves, graph)| {
                b.iter(|| {
                    let tree = ShortestPathTree::compute(graph, curves, &estimator, black_box(0));
                    let path = tree.path_to(graph.len() - 1);
                    black_box(path.map(|p| p.hop_count()))
                })
            },
        );
    }

    group.finish();
}

fn bench_arc_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("arc_length");
    let (curves, _) = build_grid_network(16);

    for (label, estimator) in [
        ("default", ArcLengthEstimator::default()),
        ("coarse", ArcLengthEstimator::new(0.05, 0.01)),
    ] {
        group.bench_with_input(
            BenchmarkId::new("anchor_spans", label),
            &estimator,
            |b, estimator| {
                b.iter(|| {
                    let spans = estimator.anchor_span_lengths(&curves, black_box(0));
                    black_box(spans.iter().sum::<f32>())
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("total_length", label),
            &estimator,
            |b, estimator| b.iter(|| black_box(estimator.total_length(&curves, black_box(3)))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_xml_parsing,
    bench_shortest_path,
    bench_arc_length
);
criterion_main!(benches);
