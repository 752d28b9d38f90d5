//! Use-Case: Routensuche und Abfrage der Ergebnisse.

use crate::app::RouteSession;
use crate::routing::{DistanceRow, RoutePath, SearchStatus, ShortestPathTree};
use anyhow::{bail, Result};

/// Führt eine Suche von `source` aus und legt das Ergebnis in der Session ab.
pub fn run_search(session: &mut RouteSession, source: usize) -> Result<SearchStatus> {
    run_search_with_abort(session, source, || false)
}

/// Wie `run_search`, bricht aber ab sobald `abort` `true` liefert.
pub fn run_search_with_abort(
    session: &mut RouteSession,
    source: usize,
    abort: impl FnMut() -> bool,
) -> Result<SearchStatus> {
    ensure_junction(session, source)?;

    let estimator = session.estimator();
    let tree = ShortestPathTree::compute_with_abort(
        &session.graph,
        &session.curves,
        &estimator,
        source,
        abort,
    );
    let status = tree.status();
    session.last_search = Some(tree);
    Ok(status)
}

/// Kürzeste Route zwischen zwei Junctions.
///
/// Stammt das letzte Suchergebnis von einer anderen Quelle, wird neu gesucht.
/// `Ok(None)` wenn das Ziel nicht erreichbar ist.
pub fn shortest_path(
    session: &mut RouteSession,
    source: usize,
    target: usize,
) -> Result<Option<RoutePath>> {
    ensure_junction(session, source)?;
    ensure_junction(session, target)?;

    let reusable = session
        .last_search
        .as_ref()
        .is_some_and(|tree| tree.source() == source && tree.status() == SearchStatus::Completed);
    if !reusable {
        run_search(session, source)?;
    }

    Ok(session
        .last_search
        .as_ref()
        .and_then(|tree| tree.path_to(target)))
}

/// Abstandstabelle der letzten Suche (`None` wenn noch nicht gesucht wurde).
pub fn distance_table(session: &RouteSession) -> Option<Vec<DistanceRow>> {
    session.last_search.as_ref().map(ShortestPathTree::table)
}

fn ensure_junction(session: &RouteSession, junction: usize) -> Result<()> {
    if junction >= session.graph.len() {
        bail!(
            "Junction {} existiert nicht (Anzahl: {})",
            junction,
            session.graph.len()
        );
    }
    Ok(())
}
