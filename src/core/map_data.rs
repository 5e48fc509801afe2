//! Eingabevertrag des Exporters und eine konkrete, per JSON ladbare Implementierung.

use super::{MapNode, PrefabInstance, PrefabTemplate, RoadSegment};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lesezugriff auf die bereits geladene Map
pub trait MapData {
    /// Alle Straßensegmente in Quellreihenfolge
    fn roads(&self) -> &[RoadSegment];
    /// Alle Prefab-Instanzen in Quellreihenfolge
    fn prefabs(&self) -> &[PrefabInstance];
    /// Node-Pose per UID
    fn node(&self, uid: u64) -> Option<&MapNode>;
    /// Template aus dem Prefab-Katalog
    fn prefab_template(&self, name: &str) -> Option<&PrefabTemplate>;
}

/// Dateiformat: Listen wie von der Map-Extraktion geliefert
#[derive(Debug, Default, Serialize, Deserialize)]
struct TsMapFile {
    #[serde(default)]
    nodes: Vec<MapNode>,
    #[serde(default)]
    roads: Vec<RoadSegment>,
    #[serde(default)]
    prefab_templates: IndexMap<String, PrefabTemplate>,
    #[serde(default)]
    prefabs: Vec<PrefabInstance>,
}

/// In-Memory-Map mit Node-Index
#[derive(Debug, Clone, Default)]
pub struct TsMapData {
    nodes: IndexMap<u64, MapNode>,
    roads: Vec<RoadSegment>,
    prefab_templates: IndexMap<String, PrefabTemplate>,
    prefabs: Vec<PrefabInstance>,
}

impl TsMapData {
    /// Erstellt eine leere Map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed eine Map aus einem JSON-String
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TsMapFile =
            serde_json::from_str(json).context("Fehler beim Parsen der Map-Daten")?;

        let mut map = Self::new();
        for node in file.nodes {
            let uid = node.uid;
            if map.nodes.insert(uid, node).is_some() {
                log::warn!("Doppelte Node-UID {}, letzter Eintrag gewinnt", uid);
            }
        }
        map.roads = file.roads;
        map.prefab_templates = file.prefab_templates;
        map.prefabs = file.prefabs;

        log::debug!(
            "Map geladen: {} Nodes, {} Straßen, {} Prefabs, {} Templates",
            map.nodes.len(),
            map.roads.len(),
            map.prefabs.len(),
            map.prefab_templates.len()
        );

        Ok(map)
    }

    /// Lädt eine Map aus einer JSON-Datei
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Map-Datei nicht lesbar: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Ungueltige Map-Datei: {}", path.display()))
    }

    /// Fügt einen Node hinzu (ersetzt vorhandene UID)
    pub fn add_node(&mut self, node: MapNode) {
        self.nodes.insert(node.uid, node);
    }

    /// Fügt ein Straßensegment hinzu
    pub fn add_road(&mut self, road: RoadSegment) {
        self.roads.push(road);
    }

    /// Registriert ein Template im Katalog
    pub fn add_prefab_template(&mut self, name: impl Into<String>, template: PrefabTemplate) {
        self.prefab_templates.insert(name.into(), template);
    }

    /// Fügt eine Prefab-Instanz hinzu
    pub fn add_prefab(&mut self, prefab: PrefabInstance) {
        self.prefabs.push(prefab);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl MapData for TsMapData {
    fn roads(&self) -> &[RoadSegment] {
        &self.roads
    }

    fn prefabs(&self) -> &[PrefabInstance] {
        &self.prefabs
    }

    fn node(&self, uid: u64) -> Option<&MapNode> {
        self.nodes.get(&uid)
    }

    fn prefab_template(&self, name: &str) -> Option<&PrefabTemplate> {
        self.prefab_templates.get(name)
    }
}
