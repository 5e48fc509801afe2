//! Export der Straßensegmente als OSM-Ways.

use super::types::{RenderContext, RenderError};
use crate::core::{GeoNode, GeoWay, MapNode, RenderFlags, RoadClass, RoadSegment};
use crate::shared::{polyline_length, synthesize_road_curve};

/// Exportiert alle sichtbaren Straßen.
pub(crate) fn render_roads(ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
    if !ctx.flags.contains(RenderFlags::ROADS) {
        return Ok(());
    }

    let map = ctx.map;
    for road in map.roads() {
        if road.hidden || (road.secret && !ctx.secret_allowed()) {
            ctx.stats.roads_skipped += 1;
            continue;
        }
        render_road(ctx, road)?;
        ctx.stats.roads_rendered += 1;
    }

    Ok(())
}

fn render_road(ctx: &mut RenderContext<'_>, road: &RoadSegment) -> Result<(), RenderError> {
    let start = lookup_node(ctx, road.start_node, road.uid)?;
    let end = lookup_node(ctx, road.end_node, road.uid)?;

    let points = match road.points.as_deref() {
        Some(points) if road.has_points() => points.to_vec(),
        _ => {
            let mut synthesized = false;
            let points = ctx
                .cache
                .road_points_or_insert_with(road.uid, || {
                    synthesized = true;
                    synthesize_road_curve(start.position, start.rotation, end.position, end.rotation)
                })
                .to_vec();
            if synthesized {
                ctx.stats.curves_synthesized += 1;
            }
            points
        }
    };

    if points.is_empty() {
        return Err(RenderError::EmptyPolyline { road_uid: road.uid });
    }
    ctx.stats.road_length += polyline_length(&points);

    let class = RoadClass::for_road(road);
    let mut way = GeoWay::new(ctx.ids.next_id());
    way.tag("highway", class.as_str());

    let last = points.len() - 1;
    for (index, point) in points.iter().enumerate() {
        // Anfang trägt die Straßen-UID, Ende die UID des End-Nodes
        let id = if index == last {
            end.uid
        } else if index == 0 {
            road.uid
        } else {
            ctx.ids.next_id()
        };

        ctx.document.push_node(GeoNode::from_world(id, *point));
        way.nodes.push(id);
    }

    ctx.document.push_way(way);
    Ok(())
}

fn lookup_node(
    ctx: &RenderContext<'_>,
    node_uid: u64,
    road_uid: u64,
) -> Result<MapNode, RenderError> {
    ctx.map
        .node(node_uid)
        .copied()
        .ok_or_else(|| RenderError::UnknownNode {
            node_uid,
            owner: format!("Straße {}", road_uid),
        })
}
