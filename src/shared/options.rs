//! Zentrale Konfiguration für Routensuche und Junction-Bearbeitung.
//!
//! `RouterOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{ArcLengthEstimator, CONNECT_DISTANCE, SEGMENT_LENGTH_STEP, TOTAL_LENGTH_STEP};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Junction-Bearbeitung ────────────────────────────────────────────

/// Verschiebung (negative Y-Richtung) eines Punkts beim Lösen aus seiner Junction.
pub const DISCONNECT_OFFSET: f32 = 0.5;

/// Dateiname der Optionen neben der Binary.
pub const OPTIONS_FILE_NAME: &str = "spline_route.toml";

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Router-Optionen.
/// Wird als `spline_route.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterOptions {
    // ── Bogenlänge ──────────────────────────────────────────────
    /// Parameter-Schrittweite für Gesamtlängen (Diagnose)
    #[serde(default = "default_total_length_step")]
    pub total_length_step: f32,
    /// Parameter-Schrittweite für Anker-zu-Anker-Längen (Kantengewichte)
    #[serde(default = "default_segment_length_step")]
    pub segment_length_step: f32,

    // ── Junctions ───────────────────────────────────────────────
    /// Y-Versatz beim Disconnect
    #[serde(default = "default_disconnect_offset")]
    pub disconnect_offset: f32,
    /// Maximaler Abstand für Verbindungs-Kandidaten
    #[serde(default = "default_connect_distance")]
    pub connect_distance: f32,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            total_length_step: TOTAL_LENGTH_STEP,
            segment_length_step: SEGMENT_LENGTH_STEP,
            disconnect_offset: DISCONNECT_OFFSET,
            connect_distance: CONNECT_DISTANCE,
        }
    }
}

fn default_total_length_step() -> f32 {
    TOTAL_LENGTH_STEP
}

fn default_segment_length_step() -> f32 {
    SEGMENT_LENGTH_STEP
}

fn default_disconnect_offset() -> f32 {
    DISCONNECT_OFFSET
}

fn default_connect_distance() -> f32 {
    CONNECT_DISTANCE
}

impl RouterOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("spline-route"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(OPTIONS_FILE_NAME)
    }

    /// Baut den Bogenlängen-Schätzer mit den konfigurierten Schrittweiten.
    pub fn estimator(&self) -> ArcLengthEstimator {
        ArcLengthEstimator::new(self.total_length_step, self.segment_length_step)
    }
}
