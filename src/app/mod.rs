//! Application-Layer: Session, Commands, Controller und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
/// Session-State
///
/// Besitzt Kurven, Junction-Graph, Optionen und das letzte Suchergebnis.
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::SessionController;
pub use events::SessionCommand;
pub use state::RouteSession;
