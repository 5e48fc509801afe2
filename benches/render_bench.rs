use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;
use std::hint::black_box;
use ts_map2osm::{
    write_osm_document, ExportOptions, LaneSpec, MapNode, MapPoint, OsmRenderer, PrefabInstance,
    PrefabNode, PrefabTemplate, RenderFlags, RoadSegment, TsMapData,
};

/// Raster aus Nodes, jede Zeile durch Straßen verbunden, jede zehnte Node mit Kreuzung
fn build_synthetic_map(node_count: usize) -> TsMapData {
    let mut map = TsMapData::new();
    map.add_prefab_template(
        "crossing",
        PrefabTemplate {
            map_points: vec![
                MapPoint::new(Vec2::ZERO, LaneSpec::InheritFromControlNode)
                    .with_control_node(0)
                    .with_neighbours([2]),
                MapPoint::new(Vec2::new(20.0, 0.0), LaneSpec::InheritFromControlNode)
                    .with_control_node(1)
                    .with_neighbours([2]),
                MapPoint::new(Vec2::new(10.0, 0.0), LaneSpec::Explicit(1)).with_neighbours([0, 1]),
            ],
            prefab_nodes: vec![
                PrefabNode::new(Vec2::ZERO, Vec2::X, 2),
                PrefabNode::new(Vec2::new(20.0, 0.0), Vec2::NEG_X, 2),
            ],
        },
    );

    for index in 0..node_count {
        let uid = 1_000_000 + index as u64;
        let column = (index % 1000) as f32;
        let row = (index / 1000) as f32;
        map.add_node(MapNode::new(
            uid,
            Vec2::new(column * 50.0, row * 50.0),
            FRAC_PI_2,
        ));

        if index % 1000 != 0 {
            map.add_road(RoadSegment::new(5_000_000 + index as u64, uid - 1, uid));
        }
        if index % 10 == 0 {
            map.add_prefab(PrefabInstance::new(
                9_000_000 + index as u64,
                "crossing",
                vec![uid],
                0,
            ));
        }
    }

    map
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for &node_count in &[1_000usize, 10_000usize] {
        let map = build_synthetic_map(node_count);

        group.bench_with_input(BenchmarkId::new("cold", node_count), &map, |b, map| {
            b.iter(|| {
                let mut renderer = OsmRenderer::new(map, ExportOptions::default());
                let document = renderer
                    .render(black_box(RenderFlags::ALL))
                    .expect("Export fehlgeschlagen");
                black_box(document.node_count())
            })
        });

        // Kurven aus dem Cache eines vorherigen Durchlaufs
        let mut warm = OsmRenderer::new(&map, ExportOptions::default());
        warm.render(RenderFlags::ALL).expect("Export fehlgeschlagen");
        group.bench_function(BenchmarkId::new("cached_curves", node_count), |b| {
            b.iter(|| {
                let document = warm
                    .render(black_box(RenderFlags::ALL))
                    .expect("Export fehlgeschlagen");
                black_box(document.way_count())
            })
        });
    }

    group.finish();
}

fn bench_xml_writing(c: &mut Criterion) {
    let map = build_synthetic_map(10_000);
    let document = OsmRenderer::new(&map, ExportOptions::default())
        .render(RenderFlags::ALL)
        .expect("Export fehlgeschlagen");

    c.bench_function("xml_write_10k", |b| {
        b.iter(|| {
            let xml = write_osm_document(black_box(&document)).expect("XML-Export fehlgeschlagen");
            black_box(xml.len())
        })
    });
}

criterion_group!(render_benches, bench_render, bench_xml_writing);
criterion_main!(render_benches);
