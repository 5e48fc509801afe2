//! Parser für OSM-XML-Dokumente (Prüfung und Roundtrip exportierter Dateien).

use crate::core::{Bounds, GeoNode, GeoWay, OsmDocument};
use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::str::FromStr;

/// Parsed ein OSM-Dokument aus einem XML-String.
///
/// Erwartet `osm` als Wurzel und alle Nodes vor dem ersten Way.
pub fn parse_osm_document(xml_content: &str) -> Result<OsmDocument> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut document = OsmDocument::new();
    let mut current_way: Option<GeoWay> = None;
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                if !saw_root {
                    expect_root(e)?;
                    saw_root = true;
                } else if e.name().as_ref() == b"way" {
                    let attrs = read_attributes(&reader, e)?;
                    current_way = Some(GeoWay::new(required(&attrs, "id", "way")?));
                } else {
                    handle_element(&reader, e, &mut document, current_way.as_mut())?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                if !saw_root {
                    expect_root(e)?;
                    saw_root = true;
                } else if e.name().as_ref() == b"way" {
                    let attrs = read_attributes(&reader, e)?;
                    document.push_way(GeoWay::new(required(&attrs, "id", "way")?));
                } else {
                    handle_element(&reader, e, &mut document, current_way.as_mut())?;
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"way" {
                    if let Some(way) = current_way.take() {
                        document.push_way(way);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des OSM-XML"),
            _ => {}
        }

        buffer.clear();
    }

    if !saw_root {
        bail!("Kein <osm>-Element gefunden");
    }

    Ok(document)
}

fn expect_root(e: &BytesStart<'_>) -> Result<()> {
    if e.name().as_ref() != b"osm" {
        bail!(
            "Wurzelelement muss <osm> sein, gefunden: <{}>",
            String::from_utf8_lossy(e.name().as_ref())
        );
    }
    Ok(())
}

fn handle_element(
    reader: &Reader<&[u8]>,
    e: &BytesStart<'_>,
    document: &mut OsmDocument,
    current_way: Option<&mut GeoWay>,
) -> Result<()> {
    match e.name().as_ref() {
        b"bounds" => {
            let attrs = read_attributes(reader, e)?;
            document.bounds = Bounds {
                min_lat: required(&attrs, "minlat", "bounds")?,
                min_lon: required(&attrs, "minlon", "bounds")?,
                max_lat: required(&attrs, "maxlat", "bounds")?,
                max_lon: required(&attrs, "maxlon", "bounds")?,
            };
        }
        b"node" => {
            let attrs = read_attributes(reader, e)?;
            let id: u64 = required(&attrs, "id", "node")?;
            if current_way.is_some() || !document.ways.is_empty() {
                bail!("Node {} steht nach einem Way", id);
            }
            document.push_node(GeoNode {
                id,
                lat: required(&attrs, "lat", "node")?,
                lon: required(&attrs, "lon", "node")?,
            });
        }
        b"nd" => {
            let attrs = read_attributes(reader, e)?;
            let node_ref: u64 = required(&attrs, "ref", "nd")?;
            match current_way {
                Some(way) => way.nodes.push(node_ref),
                None => bail!("<nd ref=\"{}\"> außerhalb eines Ways", node_ref),
            }
        }
        b"tag" => {
            // Tags an Nodes werden ignoriert
            if let Some(way) = current_way {
                let attrs = read_attributes(reader, e)?;
                let key: String = required(&attrs, "k", "tag")?;
                let value: String = required(&attrs, "v", "tag")?;
                way.tag(key, value);
            }
        }
        other => {
            log::debug!(
                "Unbekanntes OSM-Element ignoriert: <{}>",
                String::from_utf8_lossy(other)
            );
        }
    }
    Ok(())
}

fn read_attributes(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Liest ein Pflicht-Attribut und parsed es
fn required<T: FromStr>(attrs: &HashMap<String, String>, key: &str, element: &str) -> Result<T>
where
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = attrs
        .get(key)
        .with_context(|| format!("Attribut '{}' fehlt an <{}>", key, element))?;
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Ungueltiger Wert '{}' fuer {}.{}", raw, element, key))
}
