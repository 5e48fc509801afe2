//! Flächen aus Polygon-Punkten eines Prefab-Templates.
//!
//! Die Traversierung ist vom Kanten-Export entkoppelt: Flächen werden gesammelt,
//! erzeugen aber weder Nodes noch Ways im OSM-Dokument.

use crate::core::MapPoint;
use glam::Vec2;
use indexmap::IndexSet;

/// Stapelebene für Flächen mit gesetztem Bit 0 der Farb-Flags
const Z_INDEX_RAISED: u8 = 3;
/// Standard-Stapelebene
const Z_INDEX_DEFAULT: u8 = 2;

/// Ergebnis einer Polygon-Traversierung (Punkt-Indizes in Besuchsreihenfolge)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolygonTraversal {
    /// Der Weg ist zum Startpunkt zurückgekehrt
    ClosedLoop(Vec<usize>),
    /// Sackgasse oder isolierter Punkt
    Incomplete(Vec<usize>),
}

impl PolygonTraversal {
    /// Besuchte Indizes, unabhängig vom Ausgang
    pub fn indices(&self) -> &[usize] {
        match self {
            Self::ClosedLoop(indices) | Self::Incomplete(indices) => indices,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::ClosedLoop(_))
    }
}

/// Läuft ab `start` immer zum ersten noch nicht besuchten Nachbarn.
///
/// Der Startpunkt selbst gilt erst als besucht, wenn der Weg zu ihm zurückkehrt.
/// Nachbar-Indizes außerhalb von `points` werden ignoriert.
pub fn traverse_polygon(points: &[MapPoint], start: usize) -> PolygonTraversal {
    let mut visited: IndexSet<usize> = IndexSet::new();
    let mut current = start;

    while let Some(point) = points.get(current) {
        let next = point
            .neighbours
            .iter()
            .copied()
            .find(|&n| n < points.len() && !visited.contains(&n));

        match next {
            Some(next) => {
                visited.insert(next);
                current = next;
            }
            None => break,
        }
    }

    let indices: Vec<usize> = visited.into_iter().collect();
    if indices.contains(&start) {
        PolygonTraversal::ClosedLoop(indices)
    } else {
        PolygonTraversal::Incomplete(indices)
    }
}

/// Stapelebene aus den Farb-Flags des ersten Punkts
pub fn polygon_z_index(color_flags: u8) -> u8 {
    if color_flags & 0x01 != 0 {
        Z_INDEX_RAISED
    } else {
        Z_INDEX_DEFAULT
    }
}

/// Eine Fläche in Weltkoordinaten
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabPolygon {
    /// UID der Prefab-Instanz
    pub prefab_uid: u64,
    /// Eckpunkte (Welt-X/Z)
    pub points: Vec<Vec2>,
    /// Stapelebene (2 oder 3)
    pub z_index: u8,
    /// `true` wenn die Traversierung einen geschlossenen Ring ergab
    pub closed: bool,
}
