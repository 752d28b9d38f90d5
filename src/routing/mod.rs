//! Routensuche über den Junction-Graphen.
//!
//! - `dijkstra`: Single-Source-Suche mit Bogenlängen als Kantengewicht
//! - `path`: Rekonstruktion der Route als Folge von Kurvenabschnitten

pub mod dijkstra;
pub mod path;

pub use dijkstra::{DistanceRecord, DistanceRow, Hop, SearchStatus, ShortestPathTree};
pub use path::{CurveSegment, RoutePath};
