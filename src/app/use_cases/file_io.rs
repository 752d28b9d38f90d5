//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::RouteSession;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Lädt eine Netzwerk-Datei und ersetzt Kurven und Junctions der Session.
pub fn load(session: &mut RouteSession, path: &Path) -> Result<()> {
    let document = crate::xml::load_network_file(path)?;

    session.name = document.name;
    session.curves = document.curves;
    session.graph = document.graph;
    session.current_file_path = Some(path.to_path_buf());
    session.invalidate_search();

    log::info!(
        "Netzwerk geladen: {} Kurven, {} Junctions",
        session.curves.len(),
        session.graph.len()
    );
    Ok(())
}

/// Speichert die Session unter `path` oder dem zuletzt verwendeten Pfad.
pub fn save(session: &mut RouteSession, path: Option<PathBuf>) -> Result<()> {
    let path = path
        .or_else(|| session.current_file_path.clone())
        .context("Kein Speicherpfad angegeben")?;

    crate::xml::save_network_file(&path, session.name.as_deref(), &session.curves, &session.graph)?;
    session.current_file_path = Some(path);
    Ok(())
}
