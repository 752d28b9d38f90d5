//! Spline Route Network Library.
//! Kurven-Netzwerk mit Junctions, Bogenlängen-Schätzung und Routensuche.

pub mod app;
pub mod core;
pub mod routing;
pub mod shared;
pub mod xml;

pub use app::{CommandLog, RouteSession, SessionCommand, SessionController};
pub use core::{
    AnchorIndex, AnchorMatch, ArcLengthEstimator, BezierSpline, CurveProvider, Junction,
    JunctionGraph, JunctionNeighbor, PointId, PointIdParseError, SplineNetwork,
};
pub use routing::{CurveSegment, DistanceRecord, DistanceRow, RoutePath, SearchStatus, ShortestPathTree};
pub use shared::RouterOptions;
pub use xml::{parse_network, write_network, NetworkDocument};
