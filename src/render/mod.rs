//! OSM-Export der Map: Straßen und Prefabs werden zu Nodes und Ways.

pub mod polygon;
mod prefab_renderer;
mod road_renderer;
mod types;

pub use polygon::{polygon_z_index, traverse_polygon, PolygonTraversal, PrefabPolygon};
pub use prefab_renderer::{resolve_edge_lanes, resolve_lane_spec, PrefabTransform};
pub use types::{RenderCache, RenderError, RenderStats};
use types::RenderContext;

use crate::core::{IdAllocator, MapData, OsmDocument, RenderFlags};
use crate::shared::ExportOptions;

/// Haupt-Renderer für den OSM-Export.
///
/// Besitzt Memo-Cache und Ergebnisse des letzten Durchlaufs. Jeder Aufruf von
/// `render()` startet mit einer frischen ID-Vergabe und einem leeren Dokument.
pub struct OsmRenderer<'a> {
    map: &'a dyn MapData,
    options: ExportOptions,
    cache: RenderCache,
    stats: RenderStats,
    polygons: Vec<PrefabPolygon>,
}

impl<'a> OsmRenderer<'a> {
    /// Erstellt einen Renderer über einer geladenen Map
    pub fn new(map: &'a dyn MapData, options: ExportOptions) -> Self {
        Self {
            map,
            options,
            cache: RenderCache::new(),
            stats: RenderStats::default(),
            polygons: Vec::new(),
        }
    }

    /// Übernimmt einen bestehenden Cache (Builder)
    pub fn with_cache(mut self, cache: RenderCache) -> Self {
        self.cache = cache;
        self
    }

    /// Führt einen vollständigen Durchlauf aus.
    ///
    /// Reihenfolge: Straßen, Prefabs. Ways werden im Dokument gepuffert und vom
    /// Writer nach allen Nodes geschrieben.
    pub fn render(&mut self, flags: RenderFlags) -> Result<OsmDocument, RenderError> {
        let mut document = OsmDocument::new();
        let mut ids = IdAllocator::new();
        self.stats = RenderStats::default();
        self.polygons.clear();

        let mut ctx = RenderContext {
            map: self.map,
            flags,
            options: &self.options,
            ids: &mut ids,
            document: &mut document,
            cache: &mut self.cache,
            stats: &mut self.stats,
            polygons: &mut self.polygons,
        };

        road_renderer::render_roads(&mut ctx)?;
        prefab_renderer::render_prefabs(&mut ctx)?;

        log::info!(
            "OSM-Export: {} Nodes, {} Ways ({} Straßen, {} Prefabs, {} IDs vergeben)",
            document.node_count(),
            document.way_count(),
            self.stats.roads_rendered,
            self.stats.prefabs_rendered,
            ids.issued()
        );
        if self.stats.lane_defaults > 0 {
            log::debug!(
                "{} Prefab-Kanten ohne ermittelbare Spuranzahl",
                self.stats.lane_defaults
            );
        }

        Ok(document)
    }

    /// Memo-Cache (read-only)
    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Memo-Cache (z.B. um Flächen eines Bild-Renderers zu hinterlegen)
    pub fn cache_mut(&mut self) -> &mut RenderCache {
        &mut self.cache
    }

    /// Gibt den Cache für einen späteren Renderer frei
    pub fn into_cache(self) -> RenderCache {
        self.cache
    }

    /// Flächen des letzten Durchlaufs
    pub fn polygons(&self) -> &[PrefabPolygon] {
        &self.polygons
    }

    /// Zähler des letzten Durchlaufs
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Aktive Export-Optionen
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests;
