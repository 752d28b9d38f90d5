//! Geteilte Konfiguration für Session, CLI und Bibliotheks-Nutzer.

pub mod options;

pub use options::RouterOptions;
pub use options::{DISCONNECT_OFFSET, OPTIONS_FILE_NAME};
