//! Core-Domänentypen: Punkt-Identitäten, Kurven, Junctions, Bogenlängen, Spatial-Index.

pub mod arc_length;
pub mod curve;
pub mod junction;
/// Kern-Datenmodell des Kurven-Netzwerks
///
/// - JunctionGraph: Welche Ankerpunkte zu welchen Junctions verschmolzen sind
/// - Junction: Menge koinzidenter Ankerpunkte
/// - PointId: `(Kurve, Kontrollpunkt)` als einziger Schlüssel
pub mod junction_graph;
pub mod point_id;
pub mod spatial;

pub use arc_length::{ArcLengthEstimator, SEGMENT_LENGTH_STEP, TOTAL_LENGTH_STEP};
pub use curve::{BezierSpline, CurveProvider, SplineNetwork};
pub use junction::Junction;
pub use junction_graph::{JunctionGraph, JunctionNeighbor};
pub use point_id::{is_anchor_index, PointId, PointIdParseError, ANCHOR_STRIDE};
pub use spatial::{AnchorIndex, AnchorMatch, CONNECT_DISTANCE};
