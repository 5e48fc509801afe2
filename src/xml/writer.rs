//! Writer für OSM-XML-Dokumente.

use crate::core::{format_coordinate, OsmDocument, OSM_GENERATOR, OSM_VERSION};
use anyhow::{bail, Result};

/// Schreibt ein OSM-Dokument als XML.
///
/// Alle Nodes stehen vor allen Ways. Schlägt fehl, wenn ein Way einen Node
/// referenziert, der nicht im Dokument enthalten ist.
pub fn write_osm_document(document: &OsmDocument) -> Result<String> {
    let unresolved = document.unresolved_references();
    if let Some((way_id, node_ref)) = unresolved.first() {
        bail!(
            "Way {} referenziert unbekannten Node {} ({} offene Referenzen)",
            way_id,
            node_ref,
            unresolved.len()
        );
    }

    // Grobe Schätzung: ~80 Byte pro Node, ~40 Byte pro Referenz
    let refs: usize = document.ways.iter().map(|w| w.nodes.len()).sum();
    let mut output = String::with_capacity(document.nodes.len() * 80 + refs * 40 + 256);

    output.push_str("<?xml version=\"1.0\" encoding=\"us-ascii\"?>\n");
    output.push_str(&format!(
        "<osm version=\"{}\" generator=\"{}\">\n",
        OSM_VERSION, OSM_GENERATOR
    ));

    let bounds = &document.bounds;
    output.push_str(&format!(
        "  <bounds minlat=\"{}\" minlon=\"{}\" maxlat=\"{}\" maxlon=\"{}\" />\n",
        format_coordinate(bounds.min_lat),
        format_coordinate(bounds.min_lon),
        format_coordinate(bounds.max_lat),
        format_coordinate(bounds.max_lon)
    ));

    for node in &document.nodes {
        output.push_str(&format!(
            "  <node id=\"{}\" lat=\"{}\" lon=\"{}\" />\n",
            node.id,
            format_coordinate(node.lat),
            format_coordinate(node.lon)
        ));
    }

    // Ways erst nach allen Nodes
    for way in &document.ways {
        output.push_str(&format!("  <way id=\"{}\">\n", way.id));
        for node_ref in &way.nodes {
            output.push_str(&format!("    <nd ref=\"{}\" />\n", node_ref));
        }
        for (key, value) in &way.tags {
            output.push_str(&format!(
                "    <tag k=\"{}\" v=\"{}\" />\n",
                escape_xml(key),
                escape_xml(value)
            ));
        }
        output.push_str("  </way>\n");
    }

    output.push_str("</osm>\n");

    Ok(output)
}

/// Escaped Attributwerte; Nicht-ASCII wird als Zeichenreferenz geschrieben.
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if c.is_ascii() => escaped.push(c),
            c => escaped.push_str(&format!("&#{};", c as u32)),
        }
    }
    escaped
}
