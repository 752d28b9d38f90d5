//! Use-Cases der Session-Orchestrierung.

pub mod diagnostics;
pub mod file_io;
pub mod junctions;
pub mod routing;
