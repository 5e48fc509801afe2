//! Vergabe frischer OSM-IDs für synthetisierte Nodes und Ways.

/// Monotoner Zähler; der erste vergebene Wert ist 1.
///
/// Lebt genau einen Render-Durchlauf. Ein Überlauf wird nicht abgefangen,
/// reale Maps bleiben weit unter `u64::MAX`.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Erstellt einen frischen Zähler
    pub fn new() -> Self {
        Self::default()
    }

    /// Vergibt die nächste ID
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// Zuletzt vergebene ID (0 = noch keine)
    pub fn issued(&self) -> u64 {
        self.last
    }
}
