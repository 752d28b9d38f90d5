//! Use-Case: Junctions markieren, verbinden, lösen und verschieben.
//!
//! Redundante oder ungültige Eingaben werden geloggt und ignoriert.

use crate::app::RouteSession;
use crate::core::PointId;
use glam::Vec3;

/// Markiert einen Ankerpunkt als freie Junction.
pub fn mark_as_junction(session: &mut RouteSession, point: PointId) -> Option<usize> {
    if !session.contains_point(point) {
        log::warn!("Punkt {} existiert nicht", point);
        return None;
    }
    let before = session.graph.len();
    let junction = session.graph.mark_as_junction(point)?;
    if session.graph.len() != before {
        session.invalidate_search();
        log::info!("{} als Junction {} markiert", point, junction);
    }
    Some(junction)
}

/// Verbindet `from` mit `to`; `from` rastet auf die Position von `to` ein.
pub fn connect(session: &mut RouteSession, from: PointId, to: PointId) {
    if !session.contains_point(from) || !session.contains_point(to) {
        log::warn!(
            "Verbindung nicht moeglich: Punkt {} oder {} existiert nicht",
            from,
            to
        );
        return;
    }
    if session.graph.are_connected(from, to) {
        log::debug!("{} und {} sind bereits verbunden", from, to);
        return;
    }

    session.graph.connect(&mut session.curves, from, to);
    session.invalidate_search();
}

/// Verbindet `from` mit dem nächsten Ankerpunkt einer anderen Kurve.
///
/// Gibt den gewählten Partner zurück, `None` wenn keiner nah genug liegt.
pub fn connect_to_nearest(session: &mut RouteSession, from: PointId) -> Option<PointId> {
    if !from.is_anchor() {
        log::warn!("Nur Ankerpunkte koennen verbunden werden ({})", from);
        return None;
    }
    let Some(candidate) = session.connect_candidate(from) else {
        log::info!(
            "Kein Ankerpunkt naeher als {} an {}",
            session.options.connect_distance,
            from
        );
        return None;
    };

    connect(session, from, candidate.point);
    Some(candidate.point)
}

/// Löst einen Punkt aus seiner Junction und versetzt ihn um den konfigurierten Offset.
pub fn disconnect(session: &mut RouteSession, point: PointId) -> bool {
    if !session.contains_point(point) {
        log::warn!("Punkt {} existiert nicht", point);
        return false;
    }
    let offset = session.options.disconnect_offset;
    let removed = session.graph.disconnect(&mut session.curves, point, offset);
    if removed {
        session.invalidate_search();
    }
    removed
}

/// Verschiebt einen Kontrollpunkt samt aller Mitglieder seiner Junction.
pub fn move_point(session: &mut RouteSession, point: PointId, position: Vec3) {
    if !session.contains_point(point) {
        log::warn!("Punkt {} existiert nicht", point);
        return;
    }
    if !position.is_finite() {
        log::warn!("Ungueltige Position {:?} fuer {}", position, point);
        return;
    }

    session.graph.move_member(&mut session.curves, point, position);
    session.invalidate_search();
    log::debug!("{} nach {:?} verschoben", point, position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BezierSpline, CurveProvider, SplineNetwork};
    use crate::shared::RouterOptions;

    fn pid(curve: usize, point: usize) -> PointId {
        PointId::new(curve, point)
    }

    fn session() -> RouteSession {
        let curves: SplineNetwork = [
            BezierSpline::line(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)),
            BezierSpline::line(Vec3::new(10.3, 0.4, 0.0), Vec3::new(20.0, 0.0, 0.0)),
        ]
        .into_iter()
        .collect();
        let mut session = RouteSession::new(RouterOptions::default());
        session.curves = curves;
        session
    }

    #[test]
    fn unknown_points_are_ignored() {
        let mut session = session();

        assert_eq!(mark_as_junction(&mut session, pid(5, 0)), None);
        connect(&mut session, pid(0, 0), pid(0, 12));
        assert!(!disconnect(&mut session, pid(9, 9)));
        move_point(&mut session, pid(3, 0), Vec3::ONE);

        assert!(session.graph.is_empty());
    }

    #[test]
    fn connect_to_nearest_snaps_onto_other_curve() {
        let mut session = session();

        let partner = connect_to_nearest(&mut session, pid(1, 0));

        assert_eq!(partner, Some(pid(0, 3)));
        assert!(session.graph.are_connected(pid(1, 0), pid(0, 3)));
        assert_eq!(session.curves.control_point(1, 0), Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn connect_to_nearest_without_candidate_is_noop() {
        let mut session = session();
        session.options.connect_distance = 0.1;

        assert_eq!(connect_to_nearest(&mut session, pid(1, 0)), None);
        assert!(session.graph.is_empty());
    }

    #[test]
    fn disconnect_uses_configured_offset() {
        let mut session = session();
        session.options.disconnect_offset = 2.0;
        connect(&mut session, pid(1, 0), pid(0, 3));

        assert!(disconnect(&mut session, pid(1, 0)));
        assert_eq!(session.curves.control_point(1, 0), Vec3::new(10.0, -2.0, 0.0));
        assert!(session.graph.is_empty());
    }

    #[test]
    fn move_point_rejects_non_finite_position() {
        let mut session = session();
        move_point(&mut session, pid(0, 0), Vec3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(session.curves.control_point(0, 0), Vec3::ZERO);
    }
}
