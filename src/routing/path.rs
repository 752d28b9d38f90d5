//! Pfad-Rekonstruktion aus einem `ShortestPathTree`.

use super::dijkstra::{Hop, ShortestPathTree};
use crate::core::point_id::ANCHOR_STRIDE;
use crate::core::PointId;
use serde::Serialize;
use std::fmt;

/// Ein Anker-zu-Anker-Abschnitt einer Kurve, immer vom niedrigeren zum höheren Anker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurveSegment {
    pub from: PointId,
    pub to: PointId,
}

/// `0-3,0-6`
impl fmt::Display for CurveSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.from, self.to)
    }
}

/// Gefundene Route zwischen zwei Junctions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePath {
    /// Junctions von Quelle bis Ziel
    pub junctions: Vec<usize>,
    /// Kurvenabschnitte pro Hop in Fahrtreihenfolge, innerhalb eines Hops aufsteigend
    pub segments: Vec<CurveSegment>,
    /// Kumulierte Bogenlänge bis zum Ziel
    pub total_length: f32,
}

impl RoutePath {
    /// Anzahl der Hops zwischen Junctions
    pub fn hop_count(&self) -> usize {
        self.junctions.len().saturating_sub(1)
    }
}

impl ShortestPathTree {
    /// Rekonstruiert den Pfad von der Quelle zu `target`.
    ///
    /// `None` wenn das Ziel nicht erreichbar ist oder die Vorgängerkette
    /// nicht zur Quelle zurückführt. Panic bei ungültigem `target`.
    pub fn path_to(&self, target: usize) -> Option<RoutePath> {
        let record = &self.records[target];
        if !record.is_reached() {
            log::info!(
                "Kein Pfad von Junction {} nach {}",
                self.source,
                target
            );
            return None;
        }

        let mut hops: Vec<Hop> = Vec::new();
        let mut junctions = vec![target];
        let mut current = target;

        while current != self.source {
            if hops.len() >= self.records.len() {
                log::warn!(
                    "Vorgaengerkette ab Junction {} enthaelt einen Zyklus",
                    target
                );
                return None;
            }
            let Some(hop) = self.records[current].via else {
                log::warn!(
                    "Vorgaengerkette bricht bei Junction {} ab",
                    current
                );
                return None;
            };
            hops.push(hop);
            junctions.push(hop.predecessor);
            current = hop.predecessor;
        }

        hops.reverse();
        junctions.reverse();

        let segments = hops.iter().flat_map(hop_segments).collect();

        Some(RoutePath {
            junctions,
            segments,
            total_length: record.distance,
        })
    }
}

/// Zerlegt einen Hop in Anker-Abschnitte vom niedrigeren zum höheren Anker.
fn hop_segments(hop: &Hop) -> impl Iterator<Item = CurveSegment> {
    let low = hop.from_anchor.min(hop.anchor);
    let high = hop.from_anchor.max(hop.anchor);
    let curve = hop.curve;
    (low..high)
        .step_by(ANCHOR_STRIDE)
        .map(move |anchor| CurveSegment {
            from: PointId::new(curve, anchor),
            to: PointId::new(curve, anchor + ANCHOR_STRIDE),
        })
}
