//! Verlauf der ausgeführten Commands mit Speicher-Markierung.
//!
//! Das Log merkt sich, welche Einträge nach dem letzten Laden oder Speichern
//! kamen. Daraus ergeben sich die noch nicht gespeicherten Netzwerk-Änderungen.

use super::SessionCommand;

/// Ausgeführte Commands in Reihenfolge.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    entries: Vec<SessionCommand>,
    /// Anzahl der Einträge zum Zeitpunkt des letzten Ladens/Speicherns
    clean_len: usize,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen erfolgreich ausgeführten Command an.
    ///
    /// Bei MAX_ENTRIES wird die ältere Hälfte verworfen; die Speicher-Markierung
    /// rückt entsprechend nach.
    pub fn record(&mut self, command: &SessionCommand) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            let dropped = Self::MAX_ENTRIES / 2;
            self.entries.drain(..dropped);
            self.clean_len = self.clean_len.saturating_sub(dropped);
        }
        self.entries.push(command.clone());
    }

    /// Markiert den aktuellen Stand als gespeichert.
    pub fn mark_clean(&mut self) {
        self.clean_len = self.entries.len();
    }

    /// Netzwerk-Änderungen seit dem letzten Laden/Speichern.
    pub fn pending_changes(&self) -> impl Iterator<Item = &SessionCommand> {
        self.entries[self.clean_len..]
            .iter()
            .filter(|command| command.changes_network())
    }

    /// `true` wenn ungespeicherte Änderungen vorliegen.
    pub fn has_pending_changes(&self) -> bool {
        self.pending_changes().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SessionCommand] {
        &self.entries
    }
}
