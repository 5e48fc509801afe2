//! Render-Typen: gemeinsamer Kontext, Memo-Cache, Statistik und Fehler.

use super::polygon::PrefabPolygon;
use crate::core::{IdAllocator, MapData, OsmDocument, RenderFlags};
use crate::shared::ExportOptions;
use glam::Vec2;
use std::collections::HashMap;

/// Fehler, die einen Render-Durchlauf abbrechen
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Eine referenzierte Node-UID existiert nicht in der Map
    #[error("Node {node_uid} fehlt (referenziert von {owner})")]
    UnknownNode { node_uid: u64, owner: String },
    /// Invariante verletzt: Straße ohne Polyline nach der Kurven-Rekonstruktion
    #[error("Straße {road_uid} hat keine Polyline")]
    EmptyPolyline { road_uid: u64 },
}

/// Vom Renderer besessene Memo-Tabellen.
///
/// Ersetzt Cache-Felder an den Map-Objekten; jeder Eintrag wird höchstens
/// einmal geschrieben und kann über mehrere Durchläufe wiederverwendet werden.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    /// Rekonstruierte Straßen-Polylines, nach Straßen-UID
    road_points: HashMap<u64, Vec<Vec2>>,
    /// Bereits anderweitig gerenderte Flächen, nach Prefab-UID
    prefab_looks: HashMap<u64, Vec<PrefabPolygon>>,
}

impl RenderCache {
    /// Erstellt einen leeren Cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Liefert die gemerkte Polyline oder berechnet sie einmalig
    pub fn road_points_or_insert_with(
        &mut self,
        road_uid: u64,
        compute: impl FnOnce() -> Vec<Vec2>,
    ) -> &[Vec2] {
        self.road_points.entry(road_uid).or_insert_with(compute)
    }

    /// Gemerkte Polyline einer Straße
    pub fn road_points(&self, road_uid: u64) -> Option<&[Vec2]> {
        self.road_points.get(&road_uid).map(Vec::as_slice)
    }

    /// Anzahl gemerkter Polylines
    pub fn road_points_count(&self) -> usize {
        self.road_points.len()
    }

    /// Hinterlegt Flächen für ein Prefab (z.B. aus einem Bild-Renderer).
    ///
    /// Prefabs mit hinterlegten Flächen werden beim OSM-Export übersprungen.
    pub fn insert_prefab_looks(&mut self, prefab_uid: u64, looks: Vec<PrefabPolygon>) {
        self.prefab_looks.entry(prefab_uid).or_insert(looks);
    }

    /// `true` wenn für das Prefab bereits Flächen vorliegen
    pub fn has_prefab_looks(&self, prefab_uid: u64) -> bool {
        self.prefab_looks.contains_key(&prefab_uid)
    }

    /// Hinterlegte Flächen eines Prefabs
    pub fn prefab_looks(&self, prefab_uid: u64) -> Option<&[PrefabPolygon]> {
        self.prefab_looks.get(&prefab_uid).map(Vec::as_slice)
    }
}

/// Zähler eines Render-Durchlaufs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderStats {
    pub roads_rendered: usize,
    pub roads_skipped: usize,
    pub curves_synthesized: usize,
    /// Summierte Polyline-Länge aller Straßen (Welteinheiten)
    pub road_length: f32,
    pub prefabs_rendered: usize,
    pub prefabs_skipped: usize,
    pub prefab_edges: usize,
    /// Kanten, deren Spuranzahl auf 1 zurückfiel
    pub lane_defaults: usize,
    pub polygons: usize,
}

/// Gemeinsamer Kontext für Straßen- und Prefab-Renderer.
///
/// Bündelt Eingabe, Auswahl und alle mutierbaren Ausgaben eines Durchlaufs.
pub(crate) struct RenderContext<'a> {
    /// Quell-Map (read-only)
    pub map: &'a dyn MapData,
    /// Auswahl der zu exportierenden Teile
    pub flags: RenderFlags,
    /// Export-Optionen
    pub options: &'a ExportOptions,
    /// ID-Vergabe dieses Durchlaufs
    pub ids: &'a mut IdAllocator,
    /// Ausgabedokument
    pub document: &'a mut OsmDocument,
    /// Memo-Tabellen
    pub cache: &'a mut RenderCache,
    /// Zähler
    pub stats: &'a mut RenderStats,
    /// Flächen aus Polygon-Punkten (erscheinen nicht im XML)
    pub polygons: &'a mut Vec<PrefabPolygon>,
}

impl RenderContext<'_> {
    /// `true` wenn geheime Objekte exportiert werden sollen
    pub fn secret_allowed(&self) -> bool {
        self.flags.contains(RenderFlags::SECRET_ROADS)
    }
}
