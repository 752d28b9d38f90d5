//! Spatial-Index (KD-Tree) über alle Ankerpunkte für Verbindungs-Kandidaten.

use glam::Vec3;
use kiddo::{KdTree, SquaredEuclidean};

use super::point_id::ANCHOR_STRIDE;
use super::{CurveProvider, PointId};

/// Standard-Abstand, unter dem ein Ankerpunkt als Verbindungs-Kandidat gilt.
pub const CONNECT_DISTANCE: f32 = 1.0;

/// Ergebnis einer Distanzabfrage gegen den Anker-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorMatch {
    /// Gefundener Ankerpunkt
    pub point: PointId,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f32,
}

/// Read-only Spatial-Index über allen Ankerpunkten eines Curve-Providers.
///
/// Muss nach Geometrie-Änderungen neu aufgebaut werden.
#[derive(Debug, Clone)]
pub struct AnchorIndex {
    tree: KdTree<f64, 3>,
    anchors: Vec<PointId>,
}

impl AnchorIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 3]>::new()).into(),
            anchors: Vec::new(),
        }
    }

    /// Baut den Index aus allen Ankerpunkten aller Kurven.
    pub fn from_curves(curves: &impl CurveProvider) -> Self {
        let mut anchors = Vec::new();
        let mut entries: Vec<[f64; 3]> = Vec::new();

        for curve in 0..curves.curve_count() {
            let count = curves.control_point_count(curve);
            for point in (0..count).step_by(ANCHOR_STRIDE) {
                let position = curves.control_point(curve, point);
                anchors.push(PointId::new(curve, point));
                entries.push(to_entry(position));
            }
        }

        let tree: KdTree<f64, 3> = (&entries).into();
        Self { tree, anchors }
    }

    /// Gibt die Anzahl indexierter Ankerpunkte zurück.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Gibt `true` zurück, wenn keine Ankerpunkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Alle Ankerpunkte innerhalb von `radius`, aufsteigend nach Distanz sortiert.
    pub fn within_radius(&self, query: Vec3, radius: f32) -> Vec<AnchorMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&to_entry(query), (radius * radius) as f64)
            .into_iter()
            .filter_map(|entry| {
                let point = *self.anchors.get(entry.item as usize)?;
                Some(AnchorMatch {
                    point,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.point.cmp(&b.point))
        });
        results
    }

    /// Nächster Ankerpunkt einer *anderen* Kurve, der näher als `max_distance` an `from` liegt.
    ///
    /// Ein Punkt wird nie mit seiner eigenen Kurve verbunden.
    pub fn connect_candidate(
        &self,
        curves: &impl CurveProvider,
        from: PointId,
        max_distance: f32,
    ) -> Option<AnchorMatch> {
        let position = curves.control_point(from.curve, from.point);
        self.within_radius(position, max_distance)
            .into_iter()
            .find(|m| m.point.curve != from.curve && m.distance < max_distance)
    }
}

fn to_entry(position: Vec3) -> [f64; 3] {
    [position.x as f64, position.y as f64, position.z as f64]
}
