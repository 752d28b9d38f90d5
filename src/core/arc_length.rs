//! Numerische Bogenlängen-Schätzung entlang parametrischer Kurven.
//!
//! Der Evaluator kennt keine geschlossene Längenformel, deshalb wird mit
//! festen Schrittweiten im Parameterraum abgetastet und die Sehnenlänge
//! aufsummiert. Es gibt zwei getrennte Schrittweiten:
//!
//! - `total_step` (grob, 0.01) für Gesamtlängen zu Diagnosezwecken
//! - `segment_step` (fein, 0.001) für Anker-zu-Anker-Längen; diese Werte sind
//!   die Kantengewichte der Routensuche und müssen untereinander vergleichbar sein

use super::point_id::{is_anchor_index, ANCHOR_STRIDE};
use super::{CurveProvider, JunctionGraph};

/// Schrittweite für Gesamtlängen (nur Diagnose).
pub const TOTAL_LENGTH_STEP: f32 = 0.01;
/// Schrittweite für Längen zwischen zwei Ankerpunkten (Kantengewichte).
pub const SEGMENT_LENGTH_STEP: f32 = 0.001;

/// Schätzt Bogenlängen durch Abtasten mit fester Schrittweite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcLengthEstimator {
    /// Parameter-Schrittweite für `total_length`
    pub total_step: f32,
    /// Parameter-Schrittweite für Anker-zu-Anker-Längen
    pub segment_step: f32,
}

impl Default for ArcLengthEstimator {
    fn default() -> Self {
        Self {
            total_step: TOTAL_LENGTH_STEP,
            segment_step: SEGMENT_LENGTH_STEP,
        }
    }
}

impl ArcLengthEstimator {
    /// Erstellt einen Schätzer mit eigenen Schrittweiten.
    ///
    /// Nicht-positive Werte fallen auf die Standard-Schrittweiten zurück.
    pub fn new(total_step: f32, segment_step: f32) -> Self {
        let sanitize = |step: f32, fallback: f32| {
            if step.is_finite() && step > 0.0 {
                step
            } else {
                log::warn!("Ungueltige Schrittweite {}, verwende {}", step, fallback);
                fallback
            }
        };
        Self {
            total_step: sanitize(total_step, TOTAL_LENGTH_STEP),
            segment_step: sanitize(segment_step, SEGMENT_LENGTH_STEP),
        }
    }

    /// Gesamtlänge einer Kurve, grob abgetastet von t = 0 bis t = 1.
    pub fn total_length(&self, curves: &impl CurveProvider, curve: usize) -> f32 {
        let length = sample_length(curves, curve, 0.0, 1.0, self.total_step);
        log::debug!("Kurve {}: Gesamtlaenge {:.4}", curve, length);
        length
    }

    /// Normierter Parameter eines Ankerpunkts: `anchor / (count - 1)`.
    ///
    /// `None` wenn `anchor` kein Vielfaches von 3 ist.
    pub fn progress_at_anchor(
        &self,
        curves: &impl CurveProvider,
        curve: usize,
        anchor: usize,
    ) -> Option<f32> {
        if !is_anchor_index(anchor) {
            return None;
        }
        let count = curves.control_point_count(curve);
        if count < 2 {
            return None;
        }
        Some(anchor as f32 / (count - 1) as f32)
    }

    /// Länge entlang der Kurve zwischen zwei Ankerpunkten (Reihenfolge egal).
    ///
    /// `None` wenn einer der Indizes kein Ankerpunkt ist.
    pub fn length_between_anchors(
        &self,
        curves: &impl CurveProvider,
        curve: usize,
        anchor_a: usize,
        anchor_b: usize,
    ) -> Option<f32> {
        let (low, high) = if anchor_a <= anchor_b {
            (anchor_a, anchor_b)
        } else {
            (anchor_b, anchor_a)
        };

        let from_t = self.progress_at_anchor(curves, curve, low)?;
        let to_t = self.progress_at_anchor(curves, curve, high)?;
        Some(sample_length(curves, curve, from_t, to_t, self.segment_step))
    }

    /// Länge von der Junction bis zu einem Ankerpunkt auf `curve`.
    ///
    /// Startpunkt ist das erste Mitglied der Junction auf dieser Kurve. Hat die
    /// Junction kein Mitglied auf der Kurve, ist die Länge 0.
    ///
    /// Einschränkung: liegen mehrere Mitglieder auf derselben Kurve (z.B. eine
    /// geschlossene Schleife mit 0-0 und 0-9), wird immer vom ersten gemessen,
    /// auch wenn der Nachbar über ein späteres Mitglied gefunden wurde. Länge
    /// und `from_anchor` des Schritts passen dann nicht zusammen.
    pub fn length_from_junction_to_anchor(
        &self,
        graph: &JunctionGraph,
        curves: &impl CurveProvider,
        junction: usize,
        curve: usize,
        anchor: usize,
    ) -> Option<f32> {
        let Some(start) = graph.junction(junction).member_on_curve(curve) else {
            return Some(0.0);
        };
        self.length_between_anchors(curves, curve, start.point, anchor)
    }

    /// Länge jedes Anker-zu-Anker-Abschnitts einer Kurve (Diagnose).
    pub fn anchor_span_lengths(&self, curves: &impl CurveProvider, curve: usize) -> Vec<f32> {
        let count = curves.control_point_count(curve);
        (ANCHOR_STRIDE..count)
            .step_by(ANCHOR_STRIDE)
            .filter_map(|anchor| {
                let length =
                    self.length_between_anchors(curves, curve, anchor - ANCHOR_STRIDE, anchor)?;
                log::debug!(
                    "Kurve {}: Abschnitt {} -> {} hat Laenge {:.4}",
                    curve,
                    anchor - ANCHOR_STRIDE,
                    anchor,
                    length
                );
                Some(length)
            })
            .collect()
    }
}

/// Summiert Sehnenlängen zwischen `from_t` und `to_t` in Schritten von `step`.
///
/// Der letzte Teilschritt endet exakt auf `to_t`, damit keine Restlänge durch
/// aufsummierte Float-Fehler verloren geht.
fn sample_length(
    curves: &impl CurveProvider,
    curve: usize,
    from_t: f32,
    to_t: f32,
    step: f32,
) -> f32 {
    let span = to_t - from_t;
    if span <= 0.0 {
        return 0.0;
    }

    let steps = ((span / step).ceil() as usize).max(1);
    let mut prev = curves.point_at(curve, from_t);
    let mut length = 0.0f32;

    for k in 1..=steps {
        let t = if k == steps {
            to_t
        } else {
            from_t + k as f32 * step
        };
        let next = curves.point_at(curve, t);
        length += prev.distance(next);
        prev = next;
    }

    length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BezierSpline, PointId, SplineNetwork};
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn straight_network() -> SplineNetwork {
        // Kurve 0: gerade Strecke (0,0) → (30,0) mit Ankern bei 0, 10, 20, 30
        let mut curves = SplineNetwork::new();
        curves.push(
            BezierSpline::polyline(&[
                Vec3::ZERO,
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(20.0, 0.0, 0.0),
                Vec3::new(30.0, 0.0, 0.0),
            ])
            .expect("Spline erwartet"),
        );
        // Kurve 1: echte Kurve (Viertelkreis-Näherung, Radius 10)
        let k = 0.552_284_8 * 10.0;
        curves.push(
            BezierSpline::from_points(vec![
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, k, 0.0),
                Vec3::new(k, 10.0, 0.0),
                Vec3::new(0.0, 10.0, 0.0),
            ])
            .expect("Spline erwartet"),
        );
        curves
    }

    #[test]
    fn junction_length_starts_at_first_member_on_curve() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();
        let graph = JunctionGraph::from_member_lists([
            vec![PointId::new(0, 0), PointId::new(0, 9)],
            vec![PointId::new(0, 6)],
        ]);

        let from_anchors: Vec<usize> = graph
            .neighboring_junctions(&curves, 0)
            .iter()
            .map(|n| n.from_anchor)
            .collect();
        assert_eq!(from_anchors, vec![0, 9]);

        // Gemessen wird ab 0-0, nicht ab dem näheren 0-9
        assert_relative_eq!(
            estimator
                .length_from_junction_to_anchor(&graph, &curves, 0, 0, 6)
                .expect("Anker"),
            20.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn total_length_of_straight_curve() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();
        assert_relative_eq!(estimator.total_length(&curves, 0), 30.0, epsilon = 1e-3);
    }

    #[test]
    fn total_length_of_quarter_circle() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();
        let expected = std::f32::consts::FRAC_PI_2 * 10.0;
        assert_relative_eq!(estimator.total_length(&curves, 1), expected, epsilon = 0.02);
    }

    #[test]
    fn progress_at_anchor_is_evenly_spaced() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();

        assert_eq!(estimator.progress_at_anchor(&curves, 0, 0), Some(0.0));
        assert_relative_eq!(
            estimator.progress_at_anchor(&curves, 0, 3).expect("Anker"),
            1.0 / 3.0
        );
        assert_eq!(estimator.progress_at_anchor(&curves, 0, 9), Some(1.0));
        assert_eq!(estimator.progress_at_anchor(&curves, 0, 4), None);
    }

    #[test]
    fn length_between_anchors_is_order_independent() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();

        for (a, b) in [(0, 3), (0, 9), (3, 6), (6, 9), (3, 9)] {
            let forward = estimator.length_between_anchors(&curves, 0, a, b);
            let backward = estimator.length_between_anchors(&curves, 0, b, a);
            assert_eq!(forward, backward);
        }
        assert_relative_eq!(
            estimator
                .length_between_anchors(&curves, 0, 9, 3)
                .expect("Anker"),
            20.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn length_between_same_anchor_is_zero() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();
        assert_eq!(estimator.length_between_anchors(&curves, 0, 6, 6), Some(0.0));
        assert_eq!(estimator.length_between_anchors(&curves, 1, 0, 0), Some(0.0));
    }

    #[test]
    fn length_between_handles_is_rejected() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();
        assert_eq!(estimator.length_between_anchors(&curves, 0, 1, 3), None);
        assert_eq!(estimator.length_between_anchors(&curves, 0, 0, 5), None);
    }

    #[test]
    fn length_from_junction_uses_member_on_same_curve() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();
        let mut graph = JunctionGraph::new();
        graph.add_members(&[PointId::new(1, 0), PointId::new(0, 3)], None);

        let length = estimator
            .length_from_junction_to_anchor(&graph, &curves, 0, 0, 9)
            .expect("Anker");
        assert_relative_eq!(length, 20.0, epsilon = 1e-3);
    }

    #[test]
    fn length_from_junction_without_member_on_curve_is_zero() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();
        let mut graph = JunctionGraph::new();
        graph.mark_as_junction(PointId::new(1, 3));

        assert_eq!(
            estimator.length_from_junction_to_anchor(&graph, &curves, 0, 0, 9),
            Some(0.0)
        );
    }

    #[test]
    fn anchor_span_lengths_cover_each_segment() {
        let curves = straight_network();
        let estimator = ArcLengthEstimator::default();
        let spans = estimator.anchor_span_lengths(&curves, 0);

        assert_eq!(spans.len(), 3);
        for span in spans {
            assert_relative_eq!(span, 10.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn invalid_steps_fall_back_to_defaults() {
        let estimator = ArcLengthEstimator::new(0.0, f32::NAN);
        assert_eq!(estimator, ArcLengthEstimator::default());
    }
}
