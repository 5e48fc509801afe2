//! Core-Domänentypen: Quell-Map (Nodes, Straßen, Prefabs) und OSM-Ausgabemodell.

pub mod id_allocator;
pub mod map_data;
pub mod node;
pub mod osm;
pub mod prefab;
pub mod render_flags;
pub mod road;

pub use id_allocator::IdAllocator;
pub use map_data::{MapData, TsMapData};
pub use node::MapNode;
pub use osm::{format_coordinate, world_to_geo, Bounds, GeoNode, GeoWay, OsmDocument};
pub use osm::{OSM_GENERATOR, OSM_VERSION, WORLD_TO_DEGREES};
pub use prefab::{InvalidLaneCount, LaneSpec, MapPoint, PrefabInstance, PrefabNode, PrefabTemplate};
pub use render_flags::RenderFlags;
pub use road::{RoadClass, RoadLook, RoadSegment};
