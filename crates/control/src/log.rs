use serde::{Serialize, Serializer};

use crate::command::ParsedCommand;

/// A parse attempt together with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLogEntry {
    pub id: u64,
    pub command: ParsedCommand,
}

impl Serialize for CommandLogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.command.record(Some(self.id)).serialize(serializer)
    }
}

/// Append-only history of every interpreted transcript, successful or not.
///
/// Ids are 1-based and equal the entry's insertion position, so they are
/// never reused. The log lives in memory for the life of the process.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<CommandLogEntry>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, command: ParsedCommand) -> CommandLogEntry {
        let entry = CommandLogEntry {
            id: self.entries.len() as u64 + 1,
            command,
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn get(&self, id: u64) -> Option<&CommandLogEntry> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CommandLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
