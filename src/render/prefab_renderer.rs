//! Export der Prefab-Kanten (Kreuzungen, Rastplätze, ...) als OSM-Ways.

use super::polygon::{polygon_z_index, traverse_polygon, PrefabPolygon};
use super::types::{RenderContext, RenderError};
use crate::core::{
    GeoNode, GeoWay, LaneSpec, MapNode, PrefabInstance, PrefabNode, PrefabTemplate, RenderFlags,
    RoadClass,
};
use crate::shared::rotate_point;
use glam::Vec2;
use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, PI};

/// Abbildung lokaler Template-Koordinaten in die Welt.
///
/// Der Ursprungs-Anschluss des Templates landet exakt auf dem Ursprungs-Node
/// der Instanz; gedreht wird um diesen Node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefabTransform {
    /// Drehzentrum (Weltposition des Ursprungs-Nodes)
    pub center: Vec2,
    /// Verschiebung vor der Drehung
    pub local_origin: Vec2,
    /// Drehwinkel in Radiant
    pub rotation: f32,
}

impl PrefabTransform {
    /// Leitet die Transformation aus Ursprungs-Node und Ursprungs-Anschluss ab
    pub fn new(origin_node: &MapNode, origin_prefab_node: &PrefabNode) -> Self {
        let direction = origin_prefab_node.direction;
        let rotation = origin_node.rotation - PI - direction.y.atan2(direction.x) + FRAC_PI_2;

        Self {
            center: origin_node.position,
            local_origin: origin_node.position - origin_prefab_node.position,
            rotation,
        }
    }

    /// Transformiert eine lokale Position in Weltkoordinaten
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        rotate_point(self.local_origin + local, self.rotation, self.center)
    }
}

/// Effektive Spuranzahl eines Kartenpunkts.
///
/// `InheritFromControlNode` wird nur für Punkte innerhalb der Anschluss-Anzahl
/// und mit gültigem Kontroll-Node aufgelöst, sonst bleibt der Wert offen.
pub fn resolve_lane_spec(template: &PrefabTemplate, index: usize) -> LaneSpec {
    let Some(point) = template.map_points.get(index) else {
        return LaneSpec::InheritFromControlNode;
    };

    match point.lanes {
        LaneSpec::InheritFromControlNode if index < template.prefab_nodes.len() => point
            .control_node_index
            .and_then(|control| template.prefab_nodes.get(control))
            .map(|control| LaneSpec::Explicit(control.lane_count))
            .unwrap_or(LaneSpec::InheritFromControlNode),
        other => other,
    }
}

/// Gleicht die Spuranzahlen beider Kanten-Enden ab.
///
/// Ein offenes Ende übernimmt den Wert des anderen; sind beide offen, gilt 1.
/// Das dritte Feld meldet, ob auf 1 zurückgefallen wurde.
pub fn resolve_edge_lanes(start: LaneSpec, end: LaneSpec) -> (LaneSpec, LaneSpec, bool) {
    match (start.is_unresolved(), end.is_unresolved()) {
        (true, false) => (end, end, false),
        (false, true) => (start, start, false),
        (true, true) => (LaneSpec::Explicit(1), LaneSpec::Explicit(1), true),
        (false, false) => (start, end, false),
    }
}

/// Exportiert alle sichtbaren Prefab-Instanzen.
pub(crate) fn render_prefabs(ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
    if !ctx.flags.contains(RenderFlags::PREFABS) {
        return Ok(());
    }

    let map = ctx.map;
    for prefab in map.prefabs() {
        if prefab.hidden || (prefab.secret && !ctx.secret_allowed()) {
            ctx.stats.prefabs_skipped += 1;
            continue;
        }

        let Some(template) = map
            .prefab_template(&prefab.template)
            .filter(|template| template.is_renderable())
        else {
            log::debug!(
                "Prefab {}: Template '{}' fehlt oder ist leer, übersprungen",
                prefab.uid,
                prefab.template
            );
            ctx.stats.prefabs_skipped += 1;
            continue;
        };

        let (Some(&origin_uid), Some(origin_prefab_node)) =
            (prefab.nodes.first(), template.prefab_nodes.get(prefab.origin))
        else {
            log::debug!(
                "Prefab {}: kein Ursprung (Nodes: {}, Origin-Index: {}), übersprungen",
                prefab.uid,
                prefab.nodes.len(),
                prefab.origin
            );
            ctx.stats.prefabs_skipped += 1;
            continue;
        };

        if ctx.cache.has_prefab_looks(prefab.uid) {
            ctx.stats.prefabs_skipped += 1;
            continue;
        }

        let origin_node = map
            .node(origin_uid)
            .ok_or_else(|| RenderError::UnknownNode {
                node_uid: origin_uid,
                owner: format!("Prefab {}", prefab.uid),
            })?;

        let transform = PrefabTransform::new(origin_node, origin_prefab_node);
        render_prefab(ctx, prefab, template, &transform);
        ctx.stats.prefabs_rendered += 1;
    }

    Ok(())
}

fn render_prefab(
    ctx: &mut RenderContext<'_>,
    prefab: &PrefabInstance,
    template: &PrefabTemplate,
    transform: &PrefabTransform,
) {
    let points = &template.map_points;
    let class = RoadClass::for_prefab(prefab.secret);
    let mut polygon_points: HashSet<usize> = HashSet::new();

    for (index, point) in points.iter().enumerate() {
        if point.lanes == LaneSpec::PolygonMarker {
            if !polygon_points.contains(&index) {
                collect_polygon(ctx, prefab, template, transform, index, &mut polygon_points);
            }
            continue;
        }

        let mut point_lanes = resolve_lane_spec(template, index);

        for &neighbour_index in &point.neighbours {
            // Alle Punkte bis einschließlich `index` gelten als gezeichnet
            if neighbour_index <= index {
                continue;
            }
            let Some(neighbour) = points.get(neighbour_index) else {
                log::warn!(
                    "Prefab {}: Nachbar-Index {} außerhalb der {} Kartenpunkte",
                    prefab.uid,
                    neighbour_index,
                    points.len()
                );
                continue;
            };

            if (point.hidden || neighbour.hidden) && template.skips_hidden_edges() {
                continue;
            }

            let neighbour_lanes = resolve_lane_spec(template, neighbour_index);
            let (start_lanes, end_lanes, defaulted) =
                resolve_edge_lanes(point_lanes, neighbour_lanes);
            if defaulted {
                log::debug!(
                    "Spuranzahl für ({}, {}) nicht ermittelbar, verwende 1 für {}",
                    index,
                    neighbour_index,
                    prefab.template
                );
                ctx.stats.lane_defaults += 1;
            }
            point_lanes = start_lanes;

            let mut way = GeoWay::new(ctx.ids.next_id());
            way.tag("highway", class.as_str());
            if ctx.options.emit_lane_tags {
                if let Some(lanes) = start_lanes.count().max(end_lanes.count()) {
                    way.tag("lanes", lanes.to_string());
                }
            }

            // Beide Enden schlagen den Nachbar-Index in der Node-Liste der Instanz nach
            let reused_uid = prefab.nodes.get(neighbour_index).copied();
            for endpoint in [point, neighbour] {
                let id = reused_uid.unwrap_or_else(|| ctx.ids.next_id());
                let position = transform.to_world(endpoint.position);
                ctx.document.push_node(GeoNode::from_world(id, position));
                way.nodes.push(id);
            }

            ctx.document.push_way(way);
            ctx.stats.prefab_edges += 1;
        }
    }
}

fn collect_polygon(
    ctx: &mut RenderContext<'_>,
    prefab: &PrefabInstance,
    template: &PrefabTemplate,
    transform: &PrefabTransform,
    start: usize,
    claimed: &mut HashSet<usize>,
) {
    let traversal = traverse_polygon(&template.map_points, start);
    let indices = traversal.indices();
    claimed.insert(start);
    claimed.extend(indices.iter().copied());

    if indices.len() < 2 {
        return;
    }
    if !traversal.is_closed() {
        log::debug!(
            "Prefab {}: Fläche ab Punkt {} ist nicht geschlossen",
            prefab.uid,
            start
        );
    }

    let color_flags = template.map_points[indices[0]].color_flags;
    ctx.polygons.push(PrefabPolygon {
        prefab_uid: prefab.uid,
        points: indices
            .iter()
            .map(|&i| transform.to_world(template.map_points[i].position))
            .collect(),
        z_index: polygon_z_index(color_flags),
        closed: traversal.is_closed(),
    });
    ctx.stats.polygons += 1;
}
