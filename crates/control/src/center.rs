use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    command::Intensity,
    log::{CommandLog, CommandLogEntry},
    parser,
    registry::DeviceRegistry,
};

#[derive(Debug, Default)]
struct ControlState {
    log: CommandLog,
    registry: DeviceRegistry,
}

/// Owns the command log and the device registry and applies interpreted
/// transcripts to them.
///
/// Both stores sit behind one lock so that appending a log entry and
/// updating a place happen as a single step; concurrent requests can never
/// observe the same id or lose an update. Cloning is cheap and shares state.
#[derive(Debug, Clone, Default)]
pub struct CommandCenter {
    state: Arc<RwLock<ControlState>>,
}

impl CommandCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a transcript, apply it when it names both a place and an
    /// intensity, and record the attempt in the log.
    pub async fn interpret(&self, transcription: &str) -> CommandLogEntry {
        let command = parser::parse(transcription);

        let mut state = self.state.write().await;
        match command.target() {
            Some((place, intensity)) => state.registry.update(place, intensity),
            None if command.is_success() => {
                warn!(
                    "Command '{}' matched {:?} but is incomplete (place: {:?}, intensity: {:?}); registry left unchanged",
                    transcription,
                    command.intent(),
                    command.place(),
                    command.intensity()
                );
            }
            None => {}
        }
        let entry = state.log.append(command);
        drop(state);

        info!(
            id = entry.id,
            success = entry.command.is_success(),
            "Interpreted '{}' as {:?}",
            transcription,
            entry.command.intent()
        );
        entry
    }

    pub async fn snapshot(&self) -> BTreeMap<String, Intensity> {
        self.state.read().await.registry.snapshot()
    }

    pub async fn commands(&self) -> Vec<CommandLogEntry> {
        self.state.read().await.log.entries().to_vec()
    }

    pub async fn command(&self, id: u64) -> Option<CommandLogEntry> {
        self.state.read().await.log.get(id).cloned()
    }
}
