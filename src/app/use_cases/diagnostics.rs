//! Use-Case: Diagnose-Ausgaben zu Kurven und Junctions.

use crate::app::RouteSession;
use crate::core::point_id::ANCHOR_STRIDE;
use crate::core::CurveProvider;
use glam::Vec3;
use serde::Serialize;

/// Längen und Anker-Parameter einer Kurve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveReport {
    /// Kurven-Index
    pub curve: usize,
    /// Grob abgetastete Gesamtlänge
    pub total_length: f32,
    /// `(Anker, Parameter)` für jeden Ankerpunkt
    pub anchor_progress: Vec<(usize, f32)>,
    /// Fein abgetastete Länge jedes Anker-zu-Anker-Abschnitts
    pub span_lengths: Vec<f32>,
}

/// Eine Junction mit Position und Mitgliedern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JunctionReport {
    /// Junction-Index
    pub junction: usize,
    /// Position des ersten Mitglieds
    pub position: Vec3,
    /// Mitglieder als `Kurve-Punkt`
    pub members: Vec<String>,
    /// `true` bei genau einem Mitglied
    pub free: bool,
}

/// Bericht über alle Kurven der Session.
pub fn curve_reports(session: &RouteSession) -> Vec<CurveReport> {
    let estimator = session.estimator();
    let curves = &session.curves;

    (0..curves.curve_count())
        .map(|curve| {
            let anchor_progress = (0..curves.control_point_count(curve))
                .step_by(ANCHOR_STRIDE)
                .filter_map(|anchor| {
                    estimator
                        .progress_at_anchor(curves, curve, anchor)
                        .map(|t| (anchor, t))
                })
                .collect();
            CurveReport {
                curve,
                total_length: estimator.total_length(curves, curve),
                anchor_progress,
                span_lengths: estimator.anchor_span_lengths(curves, curve),
            }
        })
        .collect()
}

/// Bericht über alle Junctions der Session.
pub fn junction_reports(session: &RouteSession) -> Vec<JunctionReport> {
    let positions = session.graph.junction_positions(&session.curves);

    session
        .graph
        .junctions()
        .iter()
        .zip(positions)
        .enumerate()
        .map(|(junction, (members, position))| JunctionReport {
            junction,
            position,
            members: members.members().map(|p| p.to_string()).collect(),
            free: members.is_free(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BezierSpline, PointId};
    use crate::shared::RouterOptions;
    use approx::assert_relative_eq;

    fn session() -> RouteSession {
        let mut session = RouteSession::new(RouterOptions::default());
        session.curves.push(
            BezierSpline::polyline(&[Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 0.0)])
                .expect("Spline erwartet"),
        );
        session
    }

    #[test]
    fn curve_report_lists_anchor_progress_and_spans() {
        let reports = curve_reports(&session());

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.anchor_progress, vec![(0, 0.0), (3, 0.5), (6, 1.0)]);
        assert_eq!(report.span_lengths.len(), 2);
        assert_relative_eq!(report.span_lengths[0], 4.0, epsilon = 1e-3);
        assert_relative_eq!(report.span_lengths[1], 2.0, epsilon = 1e-3);
        assert_relative_eq!(report.total_length, 6.0, epsilon = 1e-3);
    }

    #[test]
    fn junction_report_uses_first_member_position() {
        let mut session = session();
        session.graph.mark_as_junction(PointId::new(0, 6));

        let reports = junction_reports(&session);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].position, Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(reports[0].members, vec!["0-6".to_string()]);
        assert!(reports[0].free);
    }
}
