//! Curve-Provider-Vertrag und eine kubische Bézier-Spline als Referenz-Implementierung.
//!
//! Junction-Graph, Arc-Length-Schätzer und Routensuche sehen ausschließlich den
//! `CurveProvider`-Trait. `SplineNetwork` ist der mitgelieferte Provider für
//! Dateien, CLI und Tests.

use super::point_id::ANCHOR_STRIDE;
use anyhow::{bail, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Schmale Schnittstelle zu einem Kurven-Evaluator.
///
/// Ungültige Kurven- oder Punkt-Indizes sind Vertragsverletzungen des Aufrufers
/// und dürfen paniken.
pub trait CurveProvider {
    /// Anzahl der Kurven
    fn curve_count(&self) -> usize;
    /// Anzahl der Kontrollpunkte einer Kurve
    fn control_point_count(&self, curve: usize) -> usize;
    /// Position eines Kontrollpunkts
    fn control_point(&self, curve: usize, index: usize) -> Vec3;
    /// Überschreibt die Position eines Kontrollpunkts
    fn set_control_point(&mut self, curve: usize, index: usize, position: Vec3);
    /// Punkt auf der Kurve beim normierten Parameter `t ∈ [0, 1]`
    fn point_at(&self, curve: usize, t: f32) -> Vec3;
    /// Ableitung (Geschwindigkeit) beim normierten Parameter `t`
    fn velocity_at(&self, curve: usize, t: f32) -> Vec3;
}

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// B'(t) = 3(1-t)²·(P1-P0) + 6(1-t)t·(P2-P1) + 3t²·(P3-P2)
pub fn cubic_bezier_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let inv = 1.0 - t;
    3.0 * inv * inv * (p1 - p0) + 6.0 * inv * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// Stückweise kubische Bézier-Spline mit `3n + 1` Kontrollpunkten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierSpline {
    points: Vec<Vec3>,
}

impl BezierSpline {
    /// Erstellt eine Spline aus Kontrollpunkten.
    ///
    /// Erwartet mindestens 4 Punkte und eine Anzahl der Form `3n + 1`.
    pub fn from_points(points: Vec<Vec3>) -> Result<Self> {
        if points.len() < ANCHOR_STRIDE + 1 {
            bail!(
                "Spline braucht mindestens {} Kontrollpunkte, erhalten: {}",
                ANCHOR_STRIDE + 1,
                points.len()
            );
        }
        if (points.len() - 1) % ANCHOR_STRIDE != 0 {
            bail!(
                "Anzahl der Kontrollpunkte muss 3n+1 sein, erhalten: {}",
                points.len()
            );
        }
        Ok(Self { points })
    }

    /// Gerades Segment mit Handles auf den Dritteln (gleichförmig parametrisiert).
    pub fn line(start: Vec3, end: Vec3) -> Self {
        Self {
            points: vec![
                start,
                start.lerp(end, 1.0 / 3.0),
                start.lerp(end, 2.0 / 3.0),
                end,
            ],
        }
    }

    /// Polyline durch `anchors`, jedes Teilstück als gerades Bézier-Segment.
    ///
    /// Gibt `None` zurück wenn weniger als zwei Anker übergeben werden.
    pub fn polyline(anchors: &[Vec3]) -> Option<Self> {
        let (first, rest) = anchors.split_first()?;
        if rest.is_empty() {
            return None;
        }
        let mut spline = Self {
            points: vec![*first],
        };
        let mut prev = *first;
        for &anchor in rest {
            spline.append_segment(prev.lerp(anchor, 1.0 / 3.0), prev.lerp(anchor, 2.0 / 3.0), anchor);
            prev = anchor;
        }
        Some(spline)
    }

    /// Hängt ein weiteres kubisches Segment an den letzten Ankerpunkt an.
    pub fn append_segment(&mut self, handle_a: Vec3, handle_b: Vec3, anchor: Vec3) {
        self.points.extend([handle_a, handle_b, anchor]);
    }

    /// Alle Kontrollpunkte (read-only)
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Anzahl der Kontrollpunkte
    pub fn control_point_count(&self) -> usize {
        self.points.len()
    }

    /// Anzahl der kubischen Segmente
    pub fn segment_count(&self) -> usize {
        (self.points.len().saturating_sub(1)) / ANCHOR_STRIDE
    }

    /// Bildet den globalen Parameter auf (Segment-Startindex, lokales t) ab.
    fn locate(&self, t: f32) -> (usize, f32) {
        let segments = self.segment_count();
        if t >= 1.0 {
            return ((segments - 1) * ANCHOR_STRIDE, 1.0);
        }
        let scaled = t.max(0.0) * segments as f32;
        let segment = (scaled.floor() as usize).min(segments - 1);
        (segment * ANCHOR_STRIDE, scaled - segment as f32)
    }

    /// Punkt auf der Spline beim normierten Parameter `t`.
    pub fn point(&self, t: f32) -> Vec3 {
        if self.segment_count() == 0 {
            return self.points.first().copied().unwrap_or(Vec3::ZERO);
        }
        let (i, local_t) = self.locate(t);
        let p = &self.points[i..i + 4];
        cubic_bezier(p[0], p[1], p[2], p[3], local_t)
    }

    /// Ableitung nach dem lokalen Segment-Parameter.
    pub fn velocity(&self, t: f32) -> Vec3 {
        if self.segment_count() == 0 {
            return Vec3::ZERO;
        }
        let (i, local_t) = self.locate(t);
        let p = &self.points[i..i + 4];
        cubic_bezier_derivative(p[0], p[1], p[2], p[3], local_t)
    }

    /// Normierte Fahrtrichtung beim Parameter `t` (Null-Vektor bei entarteter Tangente).
    pub fn direction(&self, t: f32) -> Vec3 {
        self.velocity(t).normalize_or_zero()
    }
}

/// Sammlung von Splines; Index in `splines` ist der Kurven-Index einer `PointId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplineNetwork {
    splines: Vec<BezierSpline>,
}

impl SplineNetwork {
    /// Erstellt ein leeres Netzwerk
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt eine Spline hinzu und gibt ihren Kurven-Index zurück
    pub fn push(&mut self, spline: BezierSpline) -> usize {
        self.splines.push(spline);
        self.splines.len() - 1
    }

    /// Zugriff auf eine Spline
    pub fn spline(&self, curve: usize) -> Option<&BezierSpline> {
        self.splines.get(curve)
    }

    /// Iterator über alle Splines
    pub fn iter(&self) -> impl Iterator<Item = &BezierSpline> {
        self.splines.iter()
    }

    /// Anzahl der Splines
    pub fn len(&self) -> usize {
        self.splines.len()
    }

    /// `true` wenn keine Splines vorhanden sind
    pub fn is_empty(&self) -> bool {
        self.splines.is_empty()
    }

    /// Entfernt alle Splines
    pub fn clear(&mut self) {
        self.splines.clear();
    }
}

impl FromIterator<BezierSpline> for SplineNetwork {
    fn from_iter<I: IntoIterator<Item = BezierSpline>>(iter: I) -> Self {
        Self {
            splines: iter.into_iter().collect(),
        }
    }
}

impl CurveProvider for SplineNetwork {
    fn curve_count(&self) -> usize {
        self.splines.len()
    }

    fn control_point_count(&self, curve: usize) -> usize {
        self.splines[curve].control_point_count()
    }

    fn control_point(&self, curve: usize, index: usize) -> Vec3 {
        self.splines[curve].points[index]
    }

    fn set_control_point(&mut self, curve: usize, index: usize, position: Vec3) {
        self.splines[curve].points[index] = position;
    }

    fn point_at(&self, curve: usize, t: f32) -> Vec3 {
        self.splines[curve].point(t)
    }

    fn velocity_at(&self, curve: usize, t: f32) -> Vec3 {
        self.splines[curve].velocity(t)
    }
}
