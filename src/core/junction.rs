//! Eine Junction: Menge koinzidenter Ankerpunkte, die gemeinsam bewegt werden.

use super::PointId;
use indexmap::IndexSet;
use std::fmt;

/// Geordnete Menge von Punkt-Identitäten an derselben physischen Position.
///
/// Einfügereihenfolge bleibt erhalten; das erste Mitglied bestimmt per
/// Konvention die Position der Junction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Junction {
    members: IndexSet<PointId>,
}

impl Junction {
    /// Erstellt eine Junction aus Mitgliedern (Duplikate werden verworfen)
    pub fn new(members: impl IntoIterator<Item = PointId>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Fügt ein Mitglied hinzu. Gibt `false` zurück wenn es schon enthalten war.
    pub fn insert(&mut self, point: PointId) -> bool {
        self.members.insert(point)
    }

    /// Entfernt ein Mitglied unter Beibehaltung der Reihenfolge der übrigen
    pub fn remove(&mut self, point: PointId) -> bool {
        self.members.shift_remove(&point)
    }

    /// Prüft ob der Punkt Mitglied ist
    pub fn contains(&self, point: PointId) -> bool {
        self.members.contains(&point)
    }

    /// Mitglieder in Einfügereihenfolge
    pub fn members(&self) -> impl Iterator<Item = PointId> + '_ {
        self.members.iter().copied()
    }

    /// Erstes Mitglied (Positions-Referenz)
    pub fn first(&self) -> Option<PointId> {
        self.members.first().copied()
    }

    /// Erstes Mitglied, das auf der angegebenen Kurve liegt
    pub fn member_on_curve(&self, curve: usize) -> Option<PointId> {
        self.members().find(|p| p.curve == curve)
    }

    /// Anzahl der Mitglieder
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// `true` wenn keine Mitglieder vorhanden sind
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Markierte, aber noch unverbundene Junction (genau ein Mitglied)
    pub fn is_free(&self) -> bool {
        self.members.len() == 1
    }
}

/// Komma-getrennte Liste der Mitglieder, z.B. `0-0,1-0`.
impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}
