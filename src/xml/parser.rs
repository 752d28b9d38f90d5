//! Parser für Kurven-Netzwerk-Dateien.

use super::codec::{decode_junction, decode_legacy_connections, fold_legacy_connections};
use super::NetworkDocument;
use crate::core::{BezierSpline, CurveProvider, JunctionGraph, PointId, SplineNetwork};
use anyhow::{bail, Context, Result};
use glam::Vec3;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;

mod lists;

pub(crate) use lists::parse_list;

/// Höchste Dateiversion, die der Parser kennt.
pub const SUPPORTED_VERSION: u32 = 1;

/// Rohe Koordinatenlisten einer `<spline>`.
#[derive(Default)]
struct SplineBuffers {
    x: String,
    y: String,
    z: String,
}

/// Parsed ein Kurven-Netzwerk aus einem XML-String.
pub fn parse_network(xml_content: &str) -> Result<NetworkDocument> {
    // Kein trim_text: Leerzeichen neben Entity-Referenzen gehoeren zum Text,
    // Listen und Identitaeten werden beim Dekodieren selbst getrimmt.
    let mut reader = Reader::from_str(xml_content);

    let mut buffer = Vec::new();

    let mut root_seen = false;
    let mut version_attr: Option<String> = None;
    let mut network_name: Option<String> = None;

    let mut in_splines = false;
    let mut in_nodes = false;
    let mut in_connections = false;
    let mut current_tag: Option<String> = None;

    let mut spline_buffers: Option<SplineBuffers> = None;
    let mut raw_splines: Vec<SplineBuffers> = Vec::new();
    let mut current_node: Option<String> = None;
    let mut raw_nodes: Vec<String> = Vec::new();
    let mut legacy_keys = String::new();
    let mut legacy_values = String::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                if !root_seen {
                    if tag != "SplineNetwork" {
                        bail!("Unbekanntes Wurzelelement <{}>", tag);
                    }
                    root_seen = true;
                    for attr in e.attributes().with_checks(false) {
                        let attr = attr?;
                        let key = reader.decoder().decode(attr.key.as_ref())?;
                        if key == "version" {
                            version_attr = Some(attr.unescape_value()?.into_owned());
                        }
                    }
                } else if tag == "splines" {
                    in_splines = true;
                } else if in_splines && tag == "spline" {
                    spline_buffers = Some(SplineBuffers::default());
                } else if tag == "nodes" {
                    in_nodes = true;
                } else if in_nodes && tag == "node" {
                    current_node = Some(String::new());
                } else if tag == "connections" {
                    in_connections = true;
                } else {
                    current_tag = Some(tag.to_string());
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if !root_seen && tag == "SplineNetwork" {
                    root_seen = true;
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.xml_content()?.into_owned();

                if let Some(node) = current_node.as_mut() {
                    node.push_str(&text);
                } else if let Some(buffers) = spline_buffers.as_mut() {
                    match current_tag.as_deref() {
                        Some("x") => buffers.x.push_str(&text),
                        Some("y") => buffers.y.push_str(&text),
                        Some("z") => buffers.z.push_str(&text),
                        _ => {}
                    }
                } else if in_connections {
                    match current_tag.as_deref() {
                        Some("keys") => legacy_keys.push_str(&text),
                        Some("values") => legacy_values.push_str(&text),
                        _ => {}
                    }
                } else if current_tag.as_deref() == Some("name") {
                    network_name.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if current_tag.as_deref() == Some("name") && spline_buffers.is_none() {
                    if let Some(resolved) = resolve_reference(e)? {
                        network_name.get_or_insert_with(String::new).push_str(&resolved);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let end_name = e.name();
                let tag = reader.decoder().decode(end_name.as_ref())?;
                if tag == "splines" {
                    in_splines = false;
                } else if tag == "spline" {
                    if let Some(buffers) = spline_buffers.take() {
                        raw_splines.push(buffers);
                    }
                } else if tag == "nodes" {
                    in_nodes = false;
                } else if tag == "node" {
                    if let Some(node) = current_node.take() {
                        raw_nodes.push(node);
                    }
                } else if tag == "connections" {
                    in_connections = false;
                } else if current_tag.as_deref() == Some(tag.as_ref()) {
                    current_tag = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    if !root_seen {
        bail!("Kein <SplineNetwork>-Element gefunden");
    }
    let version = parse_version(version_attr)?;
    if version > SUPPORTED_VERSION {
        log::warn!(
            "Dateiversion {} ist neuer als unterstuetzt ({})",
            version,
            SUPPORTED_VERSION
        );
    }

    let curves = raw_splines
        .iter()
        .enumerate()
        .map(|(index, buffers)| {
            build_spline(buffers).with_context(|| format!("Fehler in Spline {}", index))
        })
        .collect::<Result<SplineNetwork>>()?;

    let member_lists = raw_nodes
        .iter()
        .map(|line| retain_known_points(&curves, decode_junction(line)));
    let mut graph = JunctionGraph::from_member_lists(member_lists);

    if !legacy_keys.is_empty() || !legacy_values.is_empty() {
        let table = decode_legacy_connections(&legacy_keys, &legacy_values)
            .context("Fehler beim Parsen der Verbindungstabelle")?;
        let table: Vec<_> = table
            .into_iter()
            .filter(|(key, _)| point_exists(&curves, *key))
            .map(|(key, values)| (key, retain_known_points(&curves, values)))
            .collect();
        fold_legacy_connections(&mut graph, &table);
    }

    log::info!(
        "Netzwerk geladen: {} Splines, {} Junctions",
        curves.len(),
        graph.len()
    );

    let network_name = network_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    Ok(NetworkDocument {
        name: network_name,
        curves,
        graph,
    })
}

/// Löst eine Zeichen- oder vordefinierte Entity-Referenz auf.
///
/// Unbekannte Entities werden mit einer Warnung übersprungen.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<Option<String>> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .context("Ungueltige Zeichenreferenz")?
    {
        return Ok(Some(ch.to_string()));
    }
    let entity = reference.decode()?;
    match resolve_predefined_entity(&entity) {
        Some(text) => Ok(Some(text.to_string())),
        None => {
            log::warn!("Unbekannte Entity &{}; wird uebersprungen", entity);
            Ok(None)
        }
    }
}

fn build_spline(buffers: &SplineBuffers) -> Result<BezierSpline> {
    let xs = parse_list::<f32>(&buffers.x, ',').context("Fehler beim Parsen der X-Koordinaten")?;
    let ys = parse_list::<f32>(&buffers.y, ',').context("Fehler beim Parsen der Y-Koordinaten")?;
    let zs = parse_list::<f32>(&buffers.z, ',').context("Fehler beim Parsen der Z-Koordinaten")?;

    if xs.len() != ys.len() || xs.len() != zs.len() {
        bail!("Laengen der Koordinaten-Listen stimmen nicht ueberein");
    }
    if xs.iter().chain(&ys).chain(&zs).any(|v| !v.is_finite()) {
        bail!("Koordinaten muessen endlich sein");
    }

    let points = xs
        .into_iter()
        .zip(ys)
        .zip(zs)
        .map(|((x, y), z)| Vec3::new(x, y, z))
        .collect();
    BezierSpline::from_points(points)
}

fn point_exists(curves: &SplineNetwork, point: PointId) -> bool {
    point.curve < curves.curve_count() && point.point < curves.control_point_count(point.curve)
}

/// Verwirft Identitäten, die auf keine vorhandene Kurve bzw. keinen Punkt zeigen.
fn retain_known_points(curves: &SplineNetwork, points: Vec<PointId>) -> Vec<PointId> {
    points
        .into_iter()
        .filter(|&p| {
            let known = point_exists(curves, p);
            if !known {
                log::warn!("Punkt {} existiert nicht, wird uebersprungen", p);
            }
            known
        })
        .collect()
}

fn parse_version(version_attr: Option<String>) -> Result<u32> {
    let Some(value) = version_attr else {
        return Ok(SUPPORTED_VERSION);
    };
    value
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Version '{}' konnte nicht gelesen werden", value))
}

#[cfg(test)]
mod tests;
