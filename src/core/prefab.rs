//! Prefab-Templates (lokale Geometrie) und deren Instanzen in der Map.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rohwert im Template für Polygon-Punkte (kein Straßenpunkt)
const RAW_POLYGON_MARKER: i32 = -1;
/// Rohwert im Template für "Spuranzahl vom Kontroll-Node übernehmen"
const RAW_INHERIT: i32 = -2;

/// Ungültiger Spuranzahl-Rohwert im Template
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Ungueltige Spuranzahl im Prefab-Template: {0}")]
pub struct InvalidLaneCount(pub i32);

/// Spuranzahl eines Template-Punkts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum LaneSpec {
    /// Feste Spuranzahl
    Explicit(u32),
    /// Spuranzahl vom referenzierten Kontroll-Node übernehmen
    InheritFromControlNode,
    /// Punkt gehört zu einer Fläche, nicht zu einer Straße
    PolygonMarker,
}

impl LaneSpec {
    /// `true` solange keine konkrete Spuranzahl feststeht
    pub fn is_unresolved(self) -> bool {
        matches!(self, Self::InheritFromControlNode)
    }

    /// Konkrete Spuranzahl, falls bekannt
    pub fn count(self) -> Option<u32> {
        match self {
            Self::Explicit(count) => Some(count),
            _ => None,
        }
    }
}

impl TryFrom<i32> for LaneSpec {
    type Error = InvalidLaneCount;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            RAW_POLYGON_MARKER => Ok(Self::PolygonMarker),
            RAW_INHERIT => Ok(Self::InheritFromControlNode),
            count if count >= 0 => Ok(Self::Explicit(count as u32)),
            other => Err(InvalidLaneCount(other)),
        }
    }
}

impl From<LaneSpec> for i32 {
    fn from(spec: LaneSpec) -> Self {
        match spec {
            LaneSpec::Explicit(count) => count as i32,
            LaneSpec::InheritFromControlNode => RAW_INHERIT,
            LaneSpec::PolygonMarker => RAW_POLYGON_MARKER,
        }
    }
}

/// Lokaler Kartenpunkt eines Prefab-Templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// Position relativ zum Template-Ursprung (`y` = lokales Z)
    pub position: Vec2,
    /// Spuranzahl bzw. Punktart
    pub lanes: LaneSpec,
    /// Index des zuständigen Kontroll-Nodes
    #[serde(default)]
    pub control_node_index: Option<usize>,
    /// Indizes benachbarter Kartenpunkte
    #[serde(default)]
    pub neighbours: Vec<usize>,
    /// Dekorativer, ausgeblendeter Punkt
    #[serde(default)]
    pub hidden: bool,
    /// Farb-Flags (Bit 0 entscheidet über die Stapelebene von Flächen)
    #[serde(default)]
    pub color_flags: u8,
}

impl MapPoint {
    /// Erstellt einen Straßenpunkt ohne Nachbarn
    pub fn new(position: Vec2, lanes: LaneSpec) -> Self {
        Self {
            position,
            lanes,
            control_node_index: None,
            neighbours: Vec::new(),
            hidden: false,
            color_flags: 0,
        }
    }

    /// Setzt die Nachbar-Indizes (Builder)
    pub fn with_neighbours(mut self, neighbours: impl Into<Vec<usize>>) -> Self {
        self.neighbours = neighbours.into();
        self
    }

    /// Setzt den Kontroll-Node-Index (Builder)
    pub fn with_control_node(mut self, index: usize) -> Self {
        self.control_node_index = Some(index);
        self
    }
}

/// Anschlusspunkt eines Prefabs an das umgebende Straßennetz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrefabNode {
    /// Lokale Position
    pub position: Vec2,
    /// Ausrichtungsvektor (`x` = RotX, `y` = RotZ)
    pub direction: Vec2,
    /// Spuranzahl am Anschluss
    #[serde(default)]
    pub lane_count: u32,
}

impl PrefabNode {
    /// Erstellt einen neuen Anschlusspunkt
    pub fn new(position: Vec2, direction: Vec2, lane_count: u32) -> Self {
        Self {
            position,
            direction,
            lane_count,
        }
    }
}

/// Vorgefertigtes Straßenstück (Kreuzung, Brücke, ...), geteilt von allen Instanzen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefabTemplate {
    /// Lokale Kartenpunkte inklusive Nachbarschaft
    #[serde(default)]
    pub map_points: Vec<MapPoint>,
    /// Anschluss-/Kontroll-Nodes
    #[serde(default)]
    pub prefab_nodes: Vec<PrefabNode>,
}

impl PrefabTemplate {
    /// Ein Template ohne Kartenpunkte oder Anschlüsse kann nicht gezeichnet werden
    pub fn is_renderable(&self) -> bool {
        !self.map_points.is_empty() && !self.prefab_nodes.is_empty()
    }

    /// Heuristik: mehr Kartenpunkte als Anschlüsse+1 bedeutet echte Straßengeometrie,
    /// in der ausgeblendete Kanten rein dekorativ sind.
    pub fn skips_hidden_edges(&self) -> bool {
        self.prefab_nodes.len() + 1 < self.map_points.len()
    }
}

/// Platzierte Instanz eines Prefab-Templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabInstance {
    /// Stabile UID der Instanz
    pub uid: u64,
    /// Schlüssel des Templates im Katalog
    pub template: String,
    /// Node-UIDs, indexgleich mit den Template-Punkten
    pub nodes: Vec<u64>,
    /// Index des Anschluss-Nodes, der als Ursprung dient
    #[serde(default)]
    pub origin: usize,
    /// Im Spiel ausgeblendet
    #[serde(default)]
    pub hidden: bool,
    /// Geheimes Prefab
    #[serde(default)]
    pub secret: bool,
}

impl PrefabInstance {
    /// Erstellt eine sichtbare Instanz
    pub fn new(uid: u64, template: impl Into<String>, nodes: Vec<u64>, origin: usize) -> Self {
        Self {
            uid,
            template: template.into(),
            nodes,
            origin,
            hidden: false,
            secret: false,
        }
    }
}
