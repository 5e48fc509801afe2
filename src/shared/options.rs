//! Zentrale Konfiguration für den OSM-Export.
//!
//! `ExportOptions` wird als TOML neben der Binary gespeichert.
//! Fehlt die Datei oder ist sie fehlerhaft, gelten die Standardwerte.

use crate::core::RenderFlags;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Dateiname der Optionen-Datei
pub const CONFIG_FILE_NAME: &str = "ts-map2osm.toml";

/// Laufzeit-Optionen des Exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    // ── Auswahl ─────────────────────────────────────────────────
    /// Straßensegmente exportieren
    #[serde(default = "default_true")]
    pub render_roads: bool,
    /// Prefab-Kanten exportieren
    #[serde(default = "default_true")]
    pub render_prefabs: bool,
    /// Geheime Straßen/Prefabs exportieren
    #[serde(default = "default_true")]
    pub render_secret_roads: bool,

    // ── Tags ────────────────────────────────────────────────────
    /// Prefab-Kanten zusätzlich mit `lanes=<n>` taggen
    #[serde(default)]
    pub emit_lane_tags: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            render_roads: true,
            render_prefabs: true,
            render_secret_roads: true,
            emit_lane_tags: false,
        }
    }
}

/// Serde-Default für die Auswahl-Schalter.
fn default_true() -> bool {
    true
}

impl ExportOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Schreibt die wirksamen Export-Optionen zurück (CLI `--save-config`).
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let toml_text =
            toml::to_string_pretty(self).context("Export-Optionen nicht serialisierbar")?;
        std::fs::write(path, toml_text)
            .with_context(|| format!("Optionen-Datei nicht schreibbar: {}", path.display()))?;
        log::info!(
            "Export-Optionen ({:?}, Spur-Tags: {}) gesichert: {}",
            self.render_flags(),
            self.emit_lane_tags,
            path.display()
        );
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("ts-map2osm"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Übernimmt eine Auswahl als Schalter (Gegenstück zu `render_flags`)
    pub fn set_render_flags(&mut self, flags: RenderFlags) {
        self.render_roads = flags.contains(RenderFlags::ROADS);
        self.render_prefabs = flags.contains(RenderFlags::PREFABS);
        self.render_secret_roads = flags.contains(RenderFlags::SECRET_ROADS);
    }

    /// Übersetzt die Auswahl-Schalter in Render-Flags
    pub fn render_flags(&self) -> RenderFlags {
        let mut flags = RenderFlags::empty();
        flags.set(RenderFlags::ROADS, self.render_roads);
        flags.set(RenderFlags::PREFABS, self.render_prefabs);
        flags.set(RenderFlags::SECRET_ROADS, self.render_secret_roads);
        flags
    }
}
