//! OSM-Ausgabemodell: Nodes, Ways und das Dokument, das beide sammelt.

use glam::Vec2;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Umrechnung von Simulations-Welteinheiten in Grad
pub const WORLD_TO_DEGREES: f64 = 0.00025;

/// Generator-Kennung im `osm`-Wurzelelement
pub const OSM_GENERATOR: &str = "ts-map2osm";
/// Unterstützte OSM-API-Version
pub const OSM_VERSION: &str = "0.6";

/// Bounding-Box des Dokuments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Gesamter gültiger Wertebereich (wird nicht aus den Daten berechnet)
    pub const FULL_RANGE: Bounds = Bounds {
        min_lat: -85.0,
        min_lon: -180.0,
        max_lat: 85.0,
        max_lon: 180.0,
    };
}

impl Default for Bounds {
    fn default() -> Self {
        Self::FULL_RANGE
    }
}

/// Ein ausgegebener OSM-Node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoNode {
    pub id: u64,
    pub lat: f64,
    pub lon: f64,
}

impl GeoNode {
    /// Projiziert eine Weltposition (`x`, `y` = Z) auf Breite/Länge
    pub fn from_world(id: u64, position: Vec2) -> Self {
        let (lat, lon) = world_to_geo(position);
        Self { id, lat, lon }
    }
}

/// `lat = -z * scale`, `lon = x * scale`
pub fn world_to_geo(position: Vec2) -> (f64, f64) {
    let lat = -(position.y as f64) * WORLD_TO_DEGREES;
    let lon = position.x as f64 * WORLD_TO_DEGREES;
    (lat, lon)
}

/// Ein ausgegebener OSM-Way
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoWay {
    pub id: u64,
    /// Referenzierte Node-IDs in Reihenfolge
    pub nodes: Vec<u64>,
    /// Tags in Einfügereihenfolge
    pub tags: IndexMap<String, String>,
}

impl GeoWay {
    /// Erstellt einen leeren Way
    pub fn new(id: u64) -> Self {
        Self {
            id,
            nodes: Vec::new(),
            tags: IndexMap::new(),
        }
    }

    /// Setzt einen Tag (überschreibt vorhandene Werte)
    pub fn tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Wert von `highway`, falls gesetzt
    pub fn highway(&self) -> Option<&str> {
        self.tags.get("highway").map(String::as_str)
    }
}

/// Das vollständige Ausgabedokument.
///
/// Nodes und Ways werden getrennt gesammelt; der Writer schreibt alle Ways
/// nach allen Nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OsmDocument {
    pub bounds: Bounds,
    pub nodes: Vec<GeoNode>,
    pub ways: Vec<GeoWay>,
}

impl OsmDocument {
    /// Leeres Dokument mit festen Bounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen Node an
    pub fn push_node(&mut self, node: GeoNode) {
        self.nodes.push(node);
    }

    /// Puffert einen Way bis zur Finalisierung
    pub fn push_way(&mut self, way: GeoWay) {
        self.ways.push(way);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    /// Liefert alle `(way_id, node_ref)`-Paare ohne passenden Node
    pub fn unresolved_references(&self) -> Vec<(u64, u64)> {
        let known: HashSet<u64> = self.nodes.iter().map(|node| node.id).collect();
        self.ways
            .iter()
            .flat_map(|way| {
                way.nodes
                    .iter()
                    .filter(|node_ref| !known.contains(node_ref))
                    .map(move |node_ref| (way.id, *node_ref))
            })
            .collect()
    }
}

/// Festkomma-Formatierung mit 7 Nachkommastellen.
///
/// Werte, die auf Null runden, werden ohne Vorzeichen geschrieben.
pub fn format_coordinate(value: f64) -> String {
    let text = format!("{:.7}", value);
    if text
        .trim_start_matches('-')
        .bytes()
        .all(|b| b == b'0' || b == b'.')
    {
        "0.0000000".to_string()
    } else {
        text
    }
}
