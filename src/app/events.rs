//! Mutierende Commands einer Routing-Sitzung.

use crate::core::PointId;
use glam::Vec3;
use std::path::PathBuf;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Netzwerk-Datei laden
    LoadFile { path: PathBuf },
    /// Datei speichern (None = aktueller Pfad, Some(p) = neuer Pfad)
    SaveFile { path: Option<PathBuf> },
    /// Ankerpunkt als freie Junction markieren
    MarkAsJunction { point: PointId },
    /// `from` mit `to` verbinden (rastet `from` ein)
    Connect { from: PointId, to: PointId },
    /// `from` mit dem nächsten Anker einer anderen Kurve verbinden
    ConnectToNearest { from: PointId },
    /// Punkt aus seiner Junction lösen
    Disconnect { point: PointId },
    /// Punkt samt Junction-Partnern verschieben
    MovePoint { point: PointId, position: Vec3 },
    /// Suche von einer Junction aus starten
    RunSearch { source: usize },
    /// Kurven und Junctions verwerfen
    Reset,
}

impl SessionCommand {
    /// `true` wenn der Command Kurven oder Junctions verändert.
    pub fn changes_network(&self) -> bool {
        matches!(
            self,
            Self::MarkAsJunction { .. }
                | Self::Connect { .. }
                | Self::ConnectToNearest { .. }
                | Self::Disconnect { .. }
                | Self::MovePoint { .. }
                | Self::Reset
        )
    }
}
