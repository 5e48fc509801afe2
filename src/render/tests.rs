use super::*;
use crate::core::{
    format_coordinate, LaneSpec, MapNode, MapPoint, PrefabInstance, PrefabNode, PrefabTemplate,
    RoadSegment, TsMapData,
};
use glam::Vec2;
use std::collections::HashSet;

const START_UID: u64 = 0x4000_0000_0000_0001;
const END_UID: u64 = 0x4000_0000_0000_0002;
const ROAD_UID: u64 = 0x5000_0000_0000_0001;

/// Eine gerade Straße von (0,0) nach (100,0), beide Headings 0.
fn straight_road_map() -> TsMapData {
    let mut map = TsMapData::new();
    map.add_node(MapNode::new(START_UID, Vec2::new(0.0, 0.0), 0.0));
    map.add_node(MapNode::new(END_UID, Vec2::new(100.0, 0.0), 0.0));
    map.add_road(RoadSegment::new(ROAD_UID, START_UID, END_UID));
    map
}

/// Ein Prefab mit zwei Anschlüssen und einem Mittelpunkt.
fn add_simple_prefab(map: &mut TsMapData, uid: u64, nodes: Vec<u64>) {
    let template = PrefabTemplate {
        map_points: vec![
            MapPoint::new(Vec2::new(0.0, 0.0), LaneSpec::Explicit(1)).with_neighbours(vec![1]),
            MapPoint::new(Vec2::new(10.0, 0.0), LaneSpec::Explicit(1)).with_neighbours(vec![0, 2]),
            MapPoint::new(Vec2::new(20.0, 0.0), LaneSpec::Explicit(1)).with_neighbours(vec![1]),
        ],
        prefab_nodes: vec![PrefabNode::new(Vec2::ZERO, Vec2::X, 1)],
    };
    map.add_prefab_template("simple", template);
    map.add_prefab(PrefabInstance::new(uid, "simple", nodes, 0));
}

#[test]
fn test_straight_road_scenario() {
    let map = straight_road_map();
    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());
    let doc = renderer.render(RenderFlags::ROADS).expect("Render fehlgeschlagen");

    assert_eq!(doc.node_count(), 8);
    assert_eq!(doc.way_count(), 1);

    let way = &doc.ways[0];
    assert_eq!(way.id, 1);
    assert_eq!(way.highway(), Some("primary"));
    assert_eq!(way.tags.len(), 1);
    assert_eq!(way.nodes.len(), 8);

    let first = doc.nodes[0];
    let last = doc.nodes[7];
    assert_eq!(first.id, ROAD_UID);
    assert_eq!(last.id, END_UID);
    assert_eq!(format_coordinate(first.lat), "0.0000000");
    assert_eq!(format_coordinate(first.lon), "0.0000000");
    assert_eq!(format_coordinate(last.lat), "0.0000000");
    assert_eq!(format_coordinate(last.lon), "0.0250000");

    // Innere Punkte bekommen frische IDs nach der Way-ID
    let interior: Vec<u64> = way.nodes[1..7].to_vec();
    assert_eq!(interior, vec![2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_road_classification_tags() {
    let mut map = straight_road_map();
    let mut motorway = RoadSegment::new(ROAD_UID + 1, START_UID, END_UID);
    motorway.look.lanes_right = vec!["motorway_lane".to_string()];
    map.add_road(motorway);
    let mut secret = RoadSegment::new(ROAD_UID + 2, START_UID, END_UID);
    secret.look.lanes_left = vec!["motorway_lane".to_string()];
    secret.secret = true;
    map.add_road(secret);

    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());
    let doc = renderer.render(RenderFlags::ALL).expect("Render fehlgeschlagen");

    let classes: Vec<_> = doc.ways.iter().map(|w| w.highway()).collect();
    assert_eq!(
        classes,
        vec![Some("primary"), Some("motorway"), Some("unclassified")]
    );
}

#[test]
fn test_hidden_and_secret_roads_are_skipped() {
    let mut map = straight_road_map();
    let mut hidden = RoadSegment::new(ROAD_UID + 1, START_UID, END_UID);
    hidden.hidden = true;
    map.add_road(hidden);
    let mut secret = RoadSegment::new(ROAD_UID + 2, START_UID, END_UID);
    secret.secret = true;
    map.add_road(secret);

    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());

    let doc = renderer.render(RenderFlags::ROADS).expect("Render fehlgeschlagen");
    assert_eq!(doc.way_count(), 1);
    assert_eq!(renderer.stats().roads_skipped, 2);

    let doc = renderer
        .render(RenderFlags::ROADS | RenderFlags::SECRET_ROADS)
        .expect("Render fehlgeschlagen");
    assert_eq!(doc.way_count(), 2);
    assert_eq!(renderer.stats().roads_skipped, 1);
}

#[test]
fn test_explicit_polyline_is_used_verbatim() {
    let mut map = TsMapData::new();
    map.add_node(MapNode::new(START_UID, Vec2::ZERO, 0.0));
    map.add_node(MapNode::new(END_UID, Vec2::new(40.0, 0.0), 0.0));
    let mut road = RoadSegment::new(ROAD_UID, START_UID, END_UID);
    road.points = Some(vec![
        Vec2::ZERO,
        Vec2::new(20.0, 4.0),
        Vec2::new(40.0, 0.0),
    ]);
    map.add_road(road);

    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());
    let doc = renderer.render(RenderFlags::ROADS).expect("Render fehlgeschlagen");

    assert_eq!(doc.node_count(), 3);
    assert_eq!(doc.ways[0].nodes, vec![ROAD_UID, 2, END_UID]);
    assert_eq!(format_coordinate(doc.nodes[1].lat), "-0.0010000");
    assert_eq!(renderer.stats().curves_synthesized, 0);
    assert!(renderer.cache().road_points(ROAD_UID).is_none());
}

#[test]
fn test_empty_explicit_polyline_falls_back_to_curve() {
    let mut map = straight_road_map();
    let mut road = RoadSegment::new(ROAD_UID + 1, START_UID, END_UID);
    road.points = Some(Vec::new());
    map.add_road(road);

    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());
    let doc = renderer.render(RenderFlags::ROADS).expect("Render fehlgeschlagen");

    assert_eq!(doc.ways[1].nodes.len(), 8);
    assert_eq!(renderer.stats().curves_synthesized, 2);
    assert!(renderer.cache().road_points(ROAD_UID + 1).is_some());
}

#[test]
fn test_synthesized_curve_is_memoized_across_passes() {
    let map = straight_road_map();
    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());

    let first = renderer.render(RenderFlags::ALL).expect("Render fehlgeschlagen");
    assert_eq!(renderer.stats().curves_synthesized, 1);
    assert_eq!(renderer.cache().road_points_count(), 1);

    let second = renderer.render(RenderFlags::ALL).expect("Render fehlgeschlagen");
    assert_eq!(renderer.stats().curves_synthesized, 0);

    // Frische ID-Vergabe je Durchlauf → identische Dokumente
    assert_eq!(first, second);

    let cache = renderer.into_cache();
    let mut reused = OsmRenderer::new(&map, ExportOptions::default()).with_cache(cache);
    reused.render(RenderFlags::ALL).expect("Render fehlgeschlagen");
    assert_eq!(reused.stats().curves_synthesized, 0);
}

#[test]
fn test_unknown_road_node_is_an_error() {
    let mut map = straight_road_map();
    map.add_road(RoadSegment::new(ROAD_UID + 1, START_UID, 999));

    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());
    let err = renderer
        .render(RenderFlags::ROADS)
        .expect_err("Fehlender Node muss scheitern");
    assert!(matches!(err, RenderError::UnknownNode { node_uid: 999, .. }));
}

#[test]
fn test_flags_select_renderers() {
    let mut map = straight_road_map();
    add_simple_prefab(&mut map, 77, vec![START_UID]);

    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());

    let roads_only = renderer.render(RenderFlags::ROADS).expect("Render fehlgeschlagen");
    assert_eq!(roads_only.way_count(), 1);
    assert_eq!(renderer.stats().prefab_edges, 0);

    let prefabs_only = renderer.render(RenderFlags::PREFABS).expect("Render fehlgeschlagen");
    assert_eq!(prefabs_only.way_count(), 2);
    assert_eq!(renderer.stats().roads_rendered, 0);
    assert!(prefabs_only.ways.iter().all(|w| w.nodes.len() == 2));

    let nothing = renderer
        .render(RenderFlags::empty())
        .expect("Render fehlgeschlagen");
    assert_eq!(nothing.node_count(), 0);
    assert_eq!(nothing.way_count(), 0);
}

#[test]
fn test_references_resolve_and_fresh_ids_are_unique() {
    let mut map = straight_road_map();
    add_simple_prefab(&mut map, 77, vec![START_UID]);

    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());
    let doc = renderer.render(RenderFlags::ALL).expect("Render fehlgeschlagen");

    assert!(doc.unresolved_references().is_empty());

    let reused: HashSet<u64> = [START_UID, END_UID, ROAD_UID].into_iter().collect();
    let mut fresh: Vec<u64> = doc.ways.iter().map(|w| w.id).collect();
    fresh.extend(
        doc.nodes
            .iter()
            .map(|n| n.id)
            .filter(|id| !reused.contains(id)),
    );
    fresh.sort_unstable();
    let unique: HashSet<u64> = fresh.iter().copied().collect();
    assert_eq!(unique.len(), fresh.len(), "Frische IDs doppelt vergeben");
    assert_eq!(fresh.first(), Some(&1));
    assert_eq!(fresh.last(), Some(&(fresh.len() as u64)));
}

#[test]
fn test_prefab_with_cached_looks_is_skipped() {
    let mut map = TsMapData::new();
    map.add_node(MapNode::new(START_UID, Vec2::ZERO, 0.0));
    add_simple_prefab(&mut map, 77, vec![START_UID]);

    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());
    renderer.cache_mut().insert_prefab_looks(
        77,
        vec![PrefabPolygon {
            prefab_uid: 77,
            points: vec![Vec2::ZERO, Vec2::X],
            z_index: 2,
            closed: false,
        }],
    );

    let doc = renderer.render(RenderFlags::ALL).expect("Render fehlgeschlagen");
    assert_eq!(doc.way_count(), 0);
    assert_eq!(renderer.stats().prefabs_skipped, 1);
    assert_eq!(renderer.cache().prefab_looks(77).map(|l| l.len()), Some(1));
}

#[test]
fn test_unknown_prefab_origin_node_is_an_error() {
    let mut map = TsMapData::new();
    add_simple_prefab(&mut map, 77, vec![12345]);

    let mut renderer = OsmRenderer::new(&map, ExportOptions::default());
    let err = renderer
        .render(RenderFlags::PREFABS)
        .expect_err("Fehlender Ursprungs-Node muss scheitern");
    assert_eq!(
        err,
        RenderError::UnknownNode {
            node_uid: 12345,
            owner: "Prefab 77".to_string()
        }
    );
}

#[test]
fn test_renderer_options_can_be_saved_and_reloaded() {
    let map = straight_road_map();
    let mut options = ExportOptions {
        emit_lane_tags: true,
        ..ExportOptions::default()
    };
    options.set_render_flags(RenderFlags::ROADS);
    let renderer = OsmRenderer::new(&map, options.clone());

    let path = std::env::temp_dir().join(format!(
        "ts-map2osm-renderer-{}.toml",
        std::process::id()
    ));
    renderer
        .options()
        .save_to_file(&path)
        .expect("Speichern fehlgeschlagen");
    let reloaded = ExportOptions::load_from_file(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(reloaded, options);
    assert_eq!(reloaded.render_flags(), RenderFlags::ROADS);
}
