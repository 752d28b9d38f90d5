//! XML Import/Export für Kurven-Netzwerke.
//!
//! Splines werden als "Structure of Arrays" gespeichert (parallele
//! Koordinatenlisten je Spline), Junctions als Identitäts-Zeilen.

pub mod codec;
pub mod parser;
pub mod writer;

use crate::core::{JunctionGraph, SplineNetwork};
use anyhow::{Context, Result};
use std::path::Path;

pub use codec::{decode_junctions, encode_junctions};
pub use parser::parse_network;
pub use writer::write_network;

/// Inhalt einer Netzwerk-Datei.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkDocument {
    /// Optionaler Anzeigename
    pub name: Option<String>,
    /// Alle Kurven
    pub curves: SplineNetwork,
    /// Junctions über den Kurven
    pub graph: JunctionGraph,
}

/// Liest und parsed eine Netzwerk-Datei.
pub fn load_network_file(path: &Path) -> Result<NetworkDocument> {
    let xml_content = std::fs::read_to_string(path)
        .with_context(|| format!("Datei konnte nicht gelesen werden: {}", path.display()))?;
    parse_network(&xml_content).with_context(|| format!("Ungueltige Datei: {}", path.display()))
}

/// Schreibt ein Netzwerk als XML-Datei.
pub fn save_network_file(
    path: &Path,
    name: Option<&str>,
    curves: &SplineNetwork,
    graph: &JunctionGraph,
) -> Result<()> {
    let xml_content = write_network(name, curves, graph);
    std::fs::write(path, xml_content)
        .with_context(|| format!("Datei konnte nicht geschrieben werden: {}", path.display()))?;
    log::info!("Netzwerk gespeichert nach: {}", path.display());
    Ok(())
}
