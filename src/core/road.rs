//! Straßensegmente der Quell-Map und deren OSM-Klassifizierung.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fahrspur-Beschreibungen eines Straßentyps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadLook {
    /// Spuren links der Mittellinie (z.B. `"traffic_lane.road.motorway"`)
    #[serde(default)]
    pub lanes_left: Vec<String>,
    /// Spuren rechts der Mittellinie
    #[serde(default)]
    pub lanes_right: Vec<String>,
}

impl RoadLook {
    /// Prüft ob mindestens eine Spur als Autobahn markiert ist
    pub fn has_motorway_lane(&self) -> bool {
        self.lanes_left
            .iter()
            .chain(self.lanes_right.iter())
            .any(|lane| lane.contains("motorway"))
    }
}

/// Ein Straßensegment zwischen zwei Map-Nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    /// Stabile UID des Segments
    pub uid: u64,
    /// UID des Start-Nodes
    pub start_node: u64,
    /// UID des End-Nodes
    pub end_node: u64,
    /// Explizite Polyline (optional, sonst per Hermite-Kurve rekonstruiert)
    #[serde(default)]
    pub points: Option<Vec<Vec2>>,
    /// Im Spiel ausgeblendet
    #[serde(default)]
    pub hidden: bool,
    /// Geheime Straße (erst nach Entdeckung sichtbar)
    #[serde(default)]
    pub secret: bool,
    /// Spurbeschreibung
    #[serde(default)]
    pub look: RoadLook,
}

impl RoadSegment {
    /// Erstellt ein Segment ohne explizite Polyline
    pub fn new(uid: u64, start_node: u64, end_node: u64) -> Self {
        Self {
            uid,
            start_node,
            end_node,
            points: None,
            hidden: false,
            secret: false,
            look: RoadLook::default(),
        }
    }

    /// `true` wenn eine nicht-leere Polyline mitgeliefert wurde
    pub fn has_points(&self) -> bool {
        self.points.as_ref().is_some_and(|points| !points.is_empty())
    }
}

/// OSM-Straßenklasse (Wert des `highway`-Tags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadClass {
    /// Autobahn
    Motorway,
    /// Normale Straße
    Primary,
    /// Geheime Straßen und Wege ohne Einordnung
    Unclassified,
}

impl RoadClass {
    /// Klassifiziert ein Straßensegment.
    ///
    /// Geheime Straßen sind immer `unclassified`, unabhängig von ihren Spuren.
    pub fn for_road(road: &RoadSegment) -> Self {
        if road.secret {
            Self::Unclassified
        } else if road.look.has_motorway_lane() {
            Self::Motorway
        } else {
            Self::Primary
        }
    }

    /// Klasse für Kanten innerhalb eines Prefabs
    pub fn for_prefab(secret: bool) -> Self {
        if secret {
            Self::Unclassified
        } else {
            Self::Primary
        }
    }

    /// Wert für `highway=<...>`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motorway => "motorway",
            Self::Primary => "primary",
            Self::Unclassified => "unclassified",
        }
    }
}
