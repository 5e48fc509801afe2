//! Auswahl, welche Teile der Map exportiert werden.

use bitflags::bitflags;

bitflags! {
    /// Kombinierbare Render-Flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u32 {
        /// Straßensegmente exportieren
        const ROADS = 1;
        /// Prefab-Kanten exportieren
        const PREFABS = 1 << 1;
        /// Geheime Straßen und Prefabs zusätzlich exportieren
        const SECRET_ROADS = 1 << 2;
        /// Alles
        const ALL = Self::ROADS.bits() | Self::PREFABS.bits() | Self::SECRET_ROADS.bits();
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self::ALL
    }
}
