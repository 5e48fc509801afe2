//! OSM-XML Export und Import.
//!
//! Der Writer erzeugt das Ausgabeformat (Nodes vor Ways), der Parser liest
//! exportierte Dateien zur Prüfung wieder ein.

pub mod parser;
pub mod writer;

pub use parser::parse_osm_document;
pub use writer::write_osm_document;
