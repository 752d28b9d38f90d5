//! Der Junction-Graph: welche Ankerpunkte zu welchen Junctions verschmolzen sind.
//!
//! Es gibt keine vorberechnete Kantenliste. Nachbarschaft entsteht erst in
//! `neighboring_junctions`, das von jeder Junction aus entlang der Kurven
//! läuft, bis die nächste Junction erreicht ist.

use super::point_id::ANCHOR_STRIDE;
use super::{CurveProvider, Junction, PointId};
use glam::Vec3;
use serde::Serialize;
use std::fmt;

/// Nachbar-Junction, gefunden über einen Lauf entlang einer Kurve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JunctionNeighbor {
    /// Index der benachbarten Junction
    pub junction: usize,
    /// Kurve, über die der Nachbar erreicht wird
    pub curve: usize,
    /// Ankerpunkt des Nachbarn auf dieser Kurve
    pub anchor: usize,
    /// Ankerpunkt der Ausgangs-Junction auf dieser Kurve
    pub from_anchor: usize,
}

/// Geordnete Sammlung aller Junctions eines Kurven-Netzwerks.
///
/// Junctions werden über ihre Position in der Sammlung adressiert. Ein
/// Junction-Index außerhalb von `0..len()` ist ein Programmierfehler und
/// führt zu einem Panic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JunctionGraph {
    junctions: Vec<Junction>,
}

impl JunctionGraph {
    /// Erstellt einen leeren Graphen
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut einen Graphen aus Mitglieder-Listen auf (z.B. nach dem Laden).
    ///
    /// Leere Listen, Handles und Punkte, die bereits einer früheren Junction
    /// gehören, werden verworfen.
    pub fn from_member_lists<I, L>(lists: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = PointId>,
    {
        let mut graph = Self::new();
        for list in lists {
            let members: Vec<PointId> = list.into_iter().collect();
            graph.add_members(&members, None);
        }
        graph
    }

    /// Anzahl der Junctions
    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    /// `true` wenn keine Junctions vorhanden sind
    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    /// Alle Junctions in Reihenfolge
    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    /// Zugriff auf eine Junction (Panic bei ungültigem Index)
    pub fn junction(&self, junction: usize) -> &Junction {
        &self.junctions[junction]
    }

    /// Alle Mitglieder einer Junction in Reihenfolge
    pub fn members(&self, junction: usize) -> Vec<PointId> {
        self.junctions[junction].members().collect()
    }

    /// Findet die Junction, die den Punkt enthält (lineare Suche).
    pub fn is_member(&self, point: PointId) -> Option<usize> {
        self.junctions.iter().position(|j| j.contains(point))
    }

    /// Fügt Punkte einer Junction hinzu.
    ///
    /// - `junction == None`: neue Junction aus den Punkten anhängen
    /// - `junction == Some(j)`: noch nicht enthaltene Punkte an `j` anhängen
    ///
    /// Handles und Punkte, die schon in einer anderen Junction stecken, werden
    /// übersprungen. Gibt den Index der betroffenen Junction zurück.
    pub fn add_members(&mut self, points: &[PointId], junction: Option<usize>) -> Option<usize> {
        let accepted: Vec<PointId> = points
            .iter()
            .copied()
            .filter(|&p| self.accepts(p, junction))
            .collect();

        match junction {
            None => {
                let new_junction = Junction::new(accepted);
                if new_junction.is_empty() {
                    return None;
                }
                self.junctions.push(new_junction);
                Some(self.junctions.len() - 1)
            }
            Some(index) => {
                let target = &mut self.junctions[index];
                for point in accepted {
                    target.insert(point);
                }
                Some(index)
            }
        }
    }

    fn accepts(&self, point: PointId, target: Option<usize>) -> bool {
        if !point.is_anchor() {
            log::warn!("Handle {} kann nicht Teil einer Junction sein", point);
            return false;
        }
        match self.is_member(point) {
            Some(owner) if Some(owner) != target => {
                log::warn!(
                    "Punkt {} gehoert bereits zu Junction {}, wird uebersprungen",
                    point,
                    owner
                );
                false
            }
            _ => true,
        }
    }

    /// Entfernt einen Punkt aus seiner Junction.
    ///
    /// Bleibt höchstens ein Mitglied übrig, wird die Junction gelöscht.
    /// Gibt `false` zurück wenn der Punkt in keiner Junction war.
    pub fn remove_member(&mut self, point: PointId) -> bool {
        let Some(index) = self.is_member(point) else {
            log::debug!("Punkt {} ist in keiner Junction", point);
            return false;
        };

        let junction = &mut self.junctions[index];
        junction.remove(point);
        if junction.len() <= 1 {
            self.junctions.remove(index);
            log::debug!("Junction {} aufgeloest", index);
        }
        true
    }

    /// Markiert einen Ankerpunkt als (freie) Junction.
    ///
    /// Ist der Punkt schon Mitglied, bleibt alles unverändert und der
    /// bestehende Index wird zurückgegeben.
    pub fn mark_as_junction(&mut self, point: PointId) -> Option<usize> {
        if let Some(existing) = self.is_member(point) {
            return Some(existing);
        }
        self.add_members(&[point], None)
    }

    /// `true` wenn der Punkt allein in einer Junction steht
    pub fn is_free_junction(&self, point: PointId) -> bool {
        self.is_member(point)
            .is_some_and(|index| self.junctions[index].is_free())
    }

    /// `true` wenn beide Punkte in derselben Junction liegen
    pub fn are_connected(&self, a: PointId, b: PointId) -> bool {
        match (self.is_member(a), self.is_member(b)) {
            (Some(ja), Some(jb)) => ja == jb,
            _ => false,
        }
    }

    /// Alle übrigen Mitglieder der Junction des Punkts (leer wenn keine)
    pub fn other_members(&self, point: PointId) -> Vec<PointId> {
        self.is_member(point)
            .map(|index| {
                self.junctions[index]
                    .members()
                    .filter(|&p| p != point)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Verbindet `from` mit `to` und rastet `from` auf die Position von `to` ein.
    ///
    /// Liegt `to` bereits in einer Junction, tritt `from` ihr bei, sonst
    /// entsteht eine neue Junction `{from, to}`. Steckt `from` noch in einer
    /// anderen Junction, wird es dort vorher entfernt.
    pub fn connect(&mut self, curves: &mut impl CurveProvider, from: PointId, to: PointId) {
        if from == to {
            log::warn!("Self-Connect nicht erlaubt ({})", from);
            return;
        }
        if !from.is_anchor() || !to.is_anchor() {
            log::warn!("Nur Ankerpunkte koennen verbunden werden ({} -> {})", from, to);
            return;
        }
        if self.are_connected(from, to) {
            log::debug!("{} und {} sind bereits verbunden", from, to);
            return;
        }

        if self.is_member(from).is_some() {
            self.remove_member(from);
        }

        match self.is_member(to) {
            Some(index) => {
                self.add_members(&[from], Some(index));
            }
            None => {
                self.add_members(&[from, to], None);
            }
        }

        let target = curves.control_point(to.curve, to.point);
        curves.set_control_point(from.curve, from.point, target);

        log::info!("{} mit {} verbunden", from, to);
    }

    /// Löst `from` aus seiner Junction und verschiebt den Punkt um `offset` nach unten (y).
    ///
    /// Gibt `false` zurück (ohne Verschiebung) wenn der Punkt in keiner Junction war.
    pub fn disconnect(&mut self, curves: &mut impl CurveProvider, from: PointId, offset: f32) -> bool {
        if !self.remove_member(from) {
            return false;
        }

        let position = curves.control_point(from.curve, from.point);
        curves.set_control_point(from.curve, from.point, position - Vec3::Y * offset);

        log::info!("{} aus Junction geloest", from);
        true
    }

    /// Verschiebt einen Punkt samt aller anderen Mitglieder seiner Junction.
    pub fn move_member(&self, curves: &mut impl CurveProvider, point: PointId, position: Vec3) {
        curves.set_control_point(point.curve, point.point, position);
        for other in self.other_members(point) {
            curves.set_control_point(other.curve, other.point, position);
        }
    }

    /// Position einer Junction = Position ihres ersten Mitglieds
    pub fn junction_position(&self, curves: &impl CurveProvider, junction: usize) -> Vec3 {
        self.junctions[junction]
            .first()
            .map(|p| curves.control_point(p.curve, p.point))
            .unwrap_or(Vec3::ZERO)
    }

    /// Positionen aller Junctions in Reihenfolge
    pub fn junction_positions(&self, curves: &impl CurveProvider) -> Vec<Vec3> {
        (0..self.junctions.len())
            .map(|index| self.junction_position(curves, index))
            .collect()
    }

    /// Sucht die benachbarten Junctions einer Junction.
    ///
    /// Für jedes Mitglied wird auf seiner Kurve in Anker-Schritten vorwärts und
    /// rückwärts gelaufen; pro Richtung zählt nur die erste gefundene Junction.
    /// Weiter entfernte Junctions auf derselben Kurve sind dadurch nur über
    /// ihre jeweils nächsten Nachbarn erreichbar.
    ///
    /// Liegen zwei Mitglieder auf derselben Kurve, kann derselbe Nachbar mit
    /// verschiedenen `from_anchor` auftauchen; die Kantenlänge misst
    /// `ArcLengthEstimator::length_from_junction_to_anchor` trotzdem immer ab
    /// dem ersten Mitglied auf der Kurve.
    pub fn neighboring_junctions(
        &self,
        curves: &impl CurveProvider,
        junction: usize,
    ) -> Vec<JunctionNeighbor> {
        let mut neighbors = Vec::new();

        for member in self.junctions[junction].members() {
            let count = curves.control_point_count(member.curve);
            let start_slot = member.point / ANCHOR_STRIDE;

            let forward = (start_slot + 1..)
                .map(|slot| slot * ANCHOR_STRIDE)
                .take_while(|&index| index < count);
            let backward = (0..start_slot).rev().map(|slot| slot * ANCHOR_STRIDE);

            if let Some(found) = self.first_junction_along(member, forward) {
                neighbors.push(found);
            }
            if let Some(found) = self.first_junction_along(member, backward) {
                neighbors.push(found);
            }
        }

        neighbors
    }

    fn first_junction_along(
        &self,
        from: PointId,
        mut anchors: impl Iterator<Item = usize>,
    ) -> Option<JunctionNeighbor> {
        anchors.find_map(|anchor| {
            self.is_member(PointId::new(from.curve, anchor))
                .map(|junction| JunctionNeighbor {
                    junction,
                    curve: from.curve,
                    anchor,
                    from_anchor: from.point,
                })
        })
    }

    /// Entfernt alle Junctions
    pub fn clear(&mut self) {
        self.junctions.clear();
    }
}

/// Eine Zeile pro Junction: `Junction 0: 0-0,1-0`.
impl fmt::Display for JunctionGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.junctions.is_empty() {
            return writeln!(f, "Keine Junctions");
        }
        for (index, junction) in self.junctions.iter().enumerate() {
            writeln!(f, "Junction {index}: {junction}")?;
        }
        Ok(())
    }
}
