//! Session-State: zentrale Datenhaltung einer Routing-Sitzung.

use super::CommandLog;
use crate::core::{
    AnchorIndex, AnchorMatch, ArcLengthEstimator, CurveProvider, JunctionGraph, JunctionNeighbor,
    PointId, SplineNetwork,
};
use crate::routing::ShortestPathTree;
use crate::shared::RouterOptions;
use crate::xml::NetworkDocument;
use glam::Vec3;
use std::path::PathBuf;

/// Besitzt Kurven, Junction-Graph und das Ergebnis der letzten Suche.
///
/// Es gibt keinen globalen Zustand: alle Operationen laufen über eine
/// explizit übergebene Session. Auswahl- oder Editor-Zustand gehört nicht hierher.
#[derive(Debug, Clone, Default)]
pub struct RouteSession {
    /// Anzeigename des Netzwerks
    pub name: Option<String>,
    /// Pfad der zuletzt geladenen/gespeicherten Datei
    pub current_file_path: Option<PathBuf>,
    /// Kurven-Geometrie
    pub curves: SplineNetwork,
    /// Junctions über den Kurven
    pub graph: JunctionGraph,
    /// Laufzeit-Optionen
    pub options: RouterOptions,
    /// Ergebnis der letzten Suche (verworfen bei jeder Mutation)
    pub last_search: Option<ShortestPathTree>,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
}

impl RouteSession {
    /// Erstellt eine leere Session mit den gegebenen Optionen
    pub fn new(options: RouterOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Übernimmt Kurven und Junctions aus einer geladenen Datei
    pub fn from_document(document: NetworkDocument, options: RouterOptions) -> Self {
        Self {
            name: document.name,
            curves: document.curves,
            graph: document.graph,
            options,
            ..Self::default()
        }
    }

    /// Bogenlängen-Schätzer mit den Schrittweiten aus den Optionen
    pub fn estimator(&self) -> ArcLengthEstimator {
        self.options.estimator()
    }

    /// Anzahl der Junctions
    pub fn junction_count(&self) -> usize {
        self.graph.len()
    }

    /// Position einer Junction (Position ihres ersten Mitglieds)
    pub fn junction_position(&self, junction: usize) -> Option<Vec3> {
        (junction < self.graph.len()).then(|| self.graph.junction_position(&self.curves, junction))
    }

    /// Benachbarte Junctions entlang der Kurven
    pub fn neighbors(&self, junction: usize) -> Option<Vec<JunctionNeighbor>> {
        (junction < self.graph.len())
            .then(|| self.graph.neighboring_junctions(&self.curves, junction))
    }

    /// `true` wenn die Identität auf einen vorhandenen Kontrollpunkt zeigt
    pub fn contains_point(&self, point: PointId) -> bool {
        point.curve < self.curves.curve_count()
            && point.point < self.curves.control_point_count(point.curve)
    }

    /// Nächster Ankerpunkt einer anderen Kurve innerhalb der Verbindungsdistanz
    pub fn connect_candidate(&self, point: PointId) -> Option<AnchorMatch> {
        if !self.contains_point(point) {
            return None;
        }
        AnchorIndex::from_curves(&self.curves).connect_candidate(
            &self.curves,
            point,
            self.options.connect_distance,
        )
    }

    /// Verwirft das Suchergebnis nach einer Mutation
    pub fn invalidate_search(&mut self) {
        if self.last_search.take().is_some() {
            log::debug!("Suchergebnis verworfen");
        }
    }

    /// Setzt Kurven, Junctions und Suchergebnis zurück (Optionen bleiben)
    pub fn reset(&mut self) {
        self.name = None;
        self.current_file_path = None;
        self.curves.clear();
        self.graph.clear();
        self.last_search = None;
        log::info!("Session zurueckgesetzt");
    }
}
