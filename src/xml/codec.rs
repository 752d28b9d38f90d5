//! String-Kodierung von Junctions und der alten paarweisen Verbindungstabelle.
//!
//! Eine Junction wird als kommagetrennte Liste von Identitäten `Kurve-Punkt`
//! gespeichert, z.B. `0-0,1-0`. Fehlerhafte Identitäten werden mit einer
//! Warnung übersprungen und brechen das Laden nicht ab.

use crate::core::{JunctionGraph, PointId};
use anyhow::{bail, Result};

/// Kodiert jede Junction als kommagetrennte Identitäts-Liste.
pub fn encode_junctions(graph: &JunctionGraph) -> Vec<String> {
    graph.junctions().iter().map(|j| j.to_string()).collect()
}

/// Dekodiert eine einzelne Junction-Zeile in ihre Mitglieder.
pub fn decode_junction(text: &str) -> Vec<PointId> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<PointId>() {
            Ok(point) => Some(point),
            Err(e) => {
                log::warn!("{}, Eintrag wird uebersprungen", e);
                None
            }
        })
        .collect()
}

/// Baut den Junction-Graphen aus den gespeicherten Zeilen wieder auf.
pub fn decode_junctions<I, S>(lines: I) -> JunctionGraph
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    JunctionGraph::from_member_lists(lines.into_iter().map(|line| decode_junction(line.as_ref())))
}

/// Ein Eintrag der alten Verbindungstabelle: Punkt → verbundene Punkte.
pub type LegacyConnection = (PointId, Vec<PointId>);

/// Dekodiert die parallelen Schlüssel/Wert-Listen der alten Verbindungstabelle.
///
/// Schlüssel sind `;`-getrennt, Werte ebenfalls `;`-getrennt mit je einer
/// kommagetrennten Identitäts-Liste.
pub fn decode_legacy_connections(keys: &str, values: &str) -> Result<Vec<LegacyConnection>> {
    let keys: Vec<&str> = split_entries(keys);
    let values: Vec<&str> = split_entries(values);
    if keys.len() != values.len() {
        bail!(
            "Verbindungstabelle: {} Schluessel, aber {} Wertelisten",
            keys.len(),
            values.len()
        );
    }

    Ok(keys
        .into_iter()
        .zip(values)
        .filter_map(|(key, value)| match key.trim().parse::<PointId>() {
            Ok(point) => Some((point, decode_junction(value))),
            Err(e) => {
                log::warn!("{}, Tabelleneintrag wird uebersprungen", e);
                None
            }
        })
        .collect())
}

/// Überführt die alte Verbindungstabelle in Junctions.
///
/// Gehört der Schlüssel oder einer seiner Werte schon zu einer Junction,
/// werden die übrigen Punkte dort ergänzt, sonst entsteht eine neue Junction.
pub fn fold_legacy_connections(graph: &mut JunctionGraph, table: &[LegacyConnection]) {
    for (key, values) in table {
        let mut points = Vec::with_capacity(values.len() + 1);
        points.push(*key);
        points.extend(values.iter().copied());

        let existing = points.iter().find_map(|&p| graph.is_member(p));
        if existing.is_none() && points.len() < 2 {
            continue;
        }
        graph.add_members(&points, existing);
    }
    log::debug!("{} Eintraege der Verbindungstabelle uebernommen", table.len());
}

fn split_entries(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(';').collect()
}
