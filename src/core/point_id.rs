//! Punkt-Identität `(Kurve, Kontrollpunkt)` als Schlüssel im Kurven-Netzwerk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Abstand zwischen zwei Ankerpunkten einer kubischen Bézier-Spline.
///
/// Index 0, 3, 6, … liegen auf der Kurve, alle anderen sind Tangenten-Handles.
pub const ANCHOR_STRIDE: usize = 3;

/// Prüft ob ein Kontrollpunkt-Index ein Ankerpunkt ist.
pub fn is_anchor_index(point: usize) -> bool {
    point % ANCHOR_STRIDE == 0
}

/// Eindeutiger Name eines Kontrollpunkts im gesamten Netzwerk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId {
    /// Index der Kurve im Curve-Provider
    pub curve: usize,
    /// Kontrollpunkt-Index innerhalb der Kurve
    pub point: usize,
}

impl PointId {
    /// Erstellt eine neue Punkt-Identität
    pub const fn new(curve: usize, point: usize) -> Self {
        Self { curve, point }
    }

    /// `true` wenn der Punkt ein Ankerpunkt (Vielfaches von 3) ist
    pub fn is_anchor(self) -> bool {
        is_anchor_index(self.point)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.curve, self.point)
    }
}

/// Fehler beim Dekodieren einer Punkt-Identität aus `"kurve-punkt"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointIdParseError {
    input: String,
}

impl fmt::Display for PointIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ungueltige Punkt-Identitaet '{}'", self.input)
    }
}

impl std::error::Error for PointIdParseError {}

impl FromStr for PointId {
    type Err = PointIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PointIdParseError {
            input: s.to_string(),
        };

        let mut parts = s.trim().split('-');
        let (Some(curve), Some(point), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err());
        };

        let curve = curve.trim().parse::<usize>().map_err(|_| err())?;
        let point = point.trim().parse::<usize>().map_err(|_| err())?;
        Ok(Self { curve, point })
    }
}
