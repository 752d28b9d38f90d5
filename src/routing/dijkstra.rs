//! Dijkstra mit lazy Nachbarsuche.
//!
//! Es gibt keine Adjazenzliste: die Nachbarn einer Junction werden erst beim
//! Expandieren über `JunctionGraph::neighboring_junctions` ermittelt, die
//! Kantengewichte liefert der `ArcLengthEstimator`. Die Auswahl des nächsten
//! Knotens ist ein linearer Scan (O(J²) pro Lauf), was bei einigen Dutzend
//! Junctions genügt.

use crate::core::{ArcLengthEstimator, CurveProvider, JunctionGraph};
use serde::Serialize;

/// Über welchen Kurvenabschnitt eine Junction am günstigsten erreicht wurde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hop {
    /// Vorgänger-Junction
    pub predecessor: usize,
    /// Verbindende Kurve
    pub curve: usize,
    /// Ankerpunkt der erreichten Junction auf `curve`
    pub anchor: usize,
    /// Ankerpunkt des Vorgängers auf `curve`
    pub from_anchor: usize,
}

/// Bester bekannter Abstand einer Junction zur Quelle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceRecord {
    /// Kumulierte Bogenlänge ab Quelle (`f32::INFINITY` = nicht erreicht)
    pub distance: f32,
    /// Letzter Schritt; `None` für die Quelle und unerreichte Junctions
    pub via: Option<Hop>,
}

impl DistanceRecord {
    const UNREACHED: Self = Self {
        distance: f32::INFINITY,
        via: None,
    };

    /// `true` wenn ein endlicher Abstand bekannt ist
    pub fn is_reached(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Eine Zeile der Abstandstabelle (Diagnose / JSON-Ausgabe).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceRow {
    /// Junction-Index
    pub junction: usize,
    /// Abstand zur Quelle, `None` wenn unerreichbar
    pub distance: Option<f32>,
    /// Vorgänger-Junction auf dem kürzesten Weg
    pub predecessor: Option<usize>,
    /// Kurve des letzten Schritts
    pub curve: Option<usize>,
    /// Ankerpunkt, an dem der letzte Schritt die Junction erreicht
    pub anchor: Option<usize>,
}

/// Endzustand eines Suchlaufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    /// Alle Junctions wurden besucht
    Completed,
    /// Abbruch über das Abort-Prädikat vor dem Terminalzustand
    Aborted,
}

/// Ergebnis eines Dijkstra-Laufs: Abstände und Vorgänger aller Junctions.
///
/// Bleibt bis zum nächsten Lauf zur Inspektion erhalten.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    pub(crate) source: usize,
    pub(crate) records: Vec<DistanceRecord>,
    visited: Vec<bool>,
    status: SearchStatus,
}

impl ShortestPathTree {
    /// Führt die Suche von `source` aus bis zum Terminalzustand durch.
    ///
    /// Panic wenn `source` kein gültiger Junction-Index ist.
    pub fn compute(
        graph: &JunctionGraph,
        curves: &impl CurveProvider,
        estimator: &ArcLengthEstimator,
        source: usize,
    ) -> Self {
        Self::compute_with_abort(graph, curves, estimator, source, || false)
    }

    /// Wie `compute`, prüft aber vor jeder Auswahl das Abort-Prädikat.
    pub fn compute_with_abort(
        graph: &JunctionGraph,
        curves: &impl CurveProvider,
        estimator: &ArcLengthEstimator,
        source: usize,
        mut abort: impl FnMut() -> bool,
    ) -> Self {
        let count = graph.len();
        assert!(
            source < count,
            "Quell-Junction {source} ausserhalb von 0..{count}"
        );

        let mut records = vec![DistanceRecord::UNREACHED; count];
        records[source].distance = 0.0;
        let mut visited = vec![false; count];
        let mut unvisited: Vec<usize> = (0..count).collect();
        let mut status = SearchStatus::Completed;

        while !unvisited.is_empty() {
            if abort() {
                log::info!(
                    "Suche ab Junction {} abgebrochen ({} unbesucht)",
                    source,
                    unvisited.len()
                );
                status = SearchStatus::Aborted;
                break;
            }

            let current = unvisited.remove(select_min(&unvisited, &records));
            let base = records[current].distance;

            for neighbor in graph.neighboring_junctions(curves, current) {
                if visited[neighbor.junction] || neighbor.junction == current {
                    continue;
                }
                let Some(step) = estimator.length_from_junction_to_anchor(
                    graph,
                    curves,
                    current,
                    neighbor.curve,
                    neighbor.anchor,
                ) else {
                    continue;
                };

                let candidate = base + step;
                if candidate < records[neighbor.junction].distance {
                    records[neighbor.junction] = DistanceRecord {
                        distance: candidate,
                        via: Some(Hop {
                            predecessor: current,
                            curve: neighbor.curve,
                            anchor: neighbor.anchor,
                            from_anchor: neighbor.from_anchor,
                        }),
                    };
                    log::debug!(
                        "Junction {} ueber {} erreicht: {:.4}",
                        neighbor.junction,
                        current,
                        candidate
                    );
                }
            }

            visited[current] = true;
        }

        if status == SearchStatus::Completed {
            log::info!(
                "Suche ab Junction {} abgeschlossen: {} von {} erreichbar",
                source,
                records.iter().filter(|r| r.is_reached()).count(),
                count
            );
        }

        Self {
            source,
            records,
            visited,
            status,
        }
    }

    /// Quell-Junction des Laufs
    pub fn source(&self) -> usize {
        self.source
    }

    /// Endzustand des Laufs
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Alle Abstands-Einträge, Index = Junction-Index
    pub fn records(&self) -> &[DistanceRecord] {
        &self.records
    }

    /// Eintrag einer Junction (Panic bei ungültigem Index)
    pub fn record(&self, junction: usize) -> &DistanceRecord {
        &self.records[junction]
    }

    /// Abstand zur Quelle, `None` wenn unerreichbar
    pub fn distance_to(&self, junction: usize) -> Option<f32> {
        let record = &self.records[junction];
        record.is_reached().then_some(record.distance)
    }

    /// `true` wenn die Junction im Lauf besucht wurde
    pub fn is_visited(&self, junction: usize) -> bool {
        self.visited[junction]
    }

    /// Abstandstabelle: pro Junction Abstand, Vorgänger, Kurve und Anker.
    pub fn table(&self) -> Vec<DistanceRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(junction, record)| DistanceRow {
                junction,
                distance: record.is_reached().then_some(record.distance),
                predecessor: record.via.map(|hop| hop.predecessor),
                curve: record.via.map(|hop| hop.curve),
                anchor: record.via.map(|hop| hop.anchor),
            })
            .collect()
    }
}

/// Position der unbesuchten Junction mit minimalem Abstand; bei Gleichstand die erste.
fn select_min(unvisited: &[usize], records: &[DistanceRecord]) -> usize {
    let mut best = 0;
    for (slot, &junction) in unvisited.iter().enumerate().skip(1) {
        if records[junction].distance < records[unvisited[best]].distance {
            best = slot;
        }
    }
    best
}
