//! ts-map2osm Library.
//!
//! Wandelt Straßennetz und Prefabs einer Truck-Simulator-Map in ein
//! OpenStreetMap-XML-Dokument um.

pub mod core;
pub mod render;
pub mod shared;
pub mod xml;

pub use core::{
    GeoNode, GeoWay, LaneSpec, MapData, MapNode, MapPoint, OsmDocument, PrefabInstance,
    PrefabNode, PrefabTemplate, RenderFlags, RoadClass, RoadSegment, TsMapData,
};
pub use render::{OsmRenderer, PrefabPolygon, RenderCache, RenderError, RenderStats};
pub use shared::ExportOptions;
pub use xml::{parse_osm_document, write_osm_document};
