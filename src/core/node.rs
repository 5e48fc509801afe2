//! Repräsentiert einen Knoten des Quell-Straßennetzes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pose eines Map-Nodes (Position in X/Z plus Fahrtrichtung)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    /// Stabile UID aus der Quell-Map
    pub uid: u64,
    /// Weltposition: `x` = Welt-X, `y` = Welt-Z
    pub position: Vec2,
    /// Fahrtrichtung in Radiant
    #[serde(default)]
    pub rotation: f32,
}

impl MapNode {
    /// Erstellt einen neuen Map-Node
    pub fn new(uid: u64, position: Vec2, rotation: f32) -> Self {
        Self {
            uid,
            position,
            rotation,
        }
    }
}
