//! Session-Controller für die zentrale Command-Verarbeitung.

use super::use_cases;
use super::{RouteSession, SessionCommand};

/// Führt Commands auf einer `RouteSession` aus und protokolliert die erfolgreichen.
#[derive(Debug, Default)]
pub struct SessionController;

impl SessionController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Führt mutierende Commands auf der Session aus.
    /// Dispatcht an die Use-Cases in `use_cases/`.
    pub fn handle_command(
        &mut self,
        session: &mut RouteSession,
        command: SessionCommand,
    ) -> anyhow::Result<()> {
        let entry = command.clone();
        let mut persisted = false;

        match command {
            // === Datei-I/O ===
            SessionCommand::LoadFile { path } => {
                use_cases::file_io::load(session, &path)?;
                persisted = true;
            }
            SessionCommand::SaveFile { path } => {
                use_cases::file_io::save(session, path)?;
                persisted = true;
            }

            // === Junctions ===
            SessionCommand::MarkAsJunction { point } => {
                use_cases::junctions::mark_as_junction(session, point);
            }
            SessionCommand::Connect { from, to } => {
                use_cases::junctions::connect(session, from, to)
            }
            SessionCommand::ConnectToNearest { from } => {
                use_cases::junctions::connect_to_nearest(session, from);
            }
            SessionCommand::Disconnect { point } => {
                use_cases::junctions::disconnect(session, point);
            }
            SessionCommand::MovePoint { point, position } => {
                use_cases::junctions::move_point(session, point, position)
            }

            // === Routing ===
            SessionCommand::RunSearch { source } => {
                use_cases::routing::run_search(session, source)?;
            }

            SessionCommand::Reset => session.reset(),
        }

        // Fehlgeschlagene Commands landen nicht im Log
        session.command_log.record(&entry);
        if persisted {
            session.command_log.mark_clean();
        }

        Ok(())
    }

    /// Führt mehrere Commands nacheinander aus; bricht beim ersten Fehler ab.
    pub fn handle_commands(
        &mut self,
        session: &mut RouteSession,
        commands: impl IntoIterator<Item = SessionCommand>,
    ) -> anyhow::Result<()> {
        for command in commands {
            self.handle_command(session, command)?;
        }
        Ok(())
    }
}
