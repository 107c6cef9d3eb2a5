use serde::{Serialize, Serializer};

/// Coarse action category derived from trigger words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    TurnOn,
    TurnOff,
    Unrecognized,
}

/// Light intensity. The numeric encoding is part of the wire contract and
/// must stay stable: clients toggle zones by comparing against these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intensity {
    Off,
    Low,
    Mid,
    High,
}

impl Intensity {
    pub fn level(self) -> u8 {
        match self {
            Intensity::Off => 0,
            Intensity::Low => 1,
            Intensity::Mid => 2,
            Intensity::High => 3,
        }
    }
}

impl Serialize for Intensity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

/// Outcome of interpreting one transcript.
///
/// `Resolved` means a trigger word matched. Its place and intensity may
/// still be missing when the transcript was too short or the intensity word
/// was not understood; such commands are reported as successful but are
/// never applied to the device registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Unrecognized {
        transcription: String,
    },
    Resolved {
        transcription: String,
        intent: Intent,
        place: Option<String>,
        intensity: Option<Intensity>,
    },
}

impl ParsedCommand {
    pub fn is_success(&self) -> bool {
        matches!(self, ParsedCommand::Resolved { .. })
    }

    pub fn intent(&self) -> Intent {
        match self {
            ParsedCommand::Unrecognized { .. } => Intent::Unrecognized,
            ParsedCommand::Resolved { intent, .. } => *intent,
        }
    }

    pub fn transcription(&self) -> &str {
        match self {
            ParsedCommand::Unrecognized { transcription }
            | ParsedCommand::Resolved { transcription, .. } => transcription,
        }
    }

    pub fn place(&self) -> Option<&str> {
        match self {
            ParsedCommand::Resolved { place, .. } => place.as_deref(),
            ParsedCommand::Unrecognized { .. } => None,
        }
    }

    pub fn intensity(&self) -> Option<Intensity> {
        match self {
            ParsedCommand::Resolved { intensity, .. } => *intensity,
            ParsedCommand::Unrecognized { .. } => None,
        }
    }

    /// Place and intensity, only when both were extracted.
    pub fn target(&self) -> Option<(&str, Intensity)> {
        Some((self.place()?, self.intensity()?))
    }

    pub fn is_complete(&self) -> bool {
        self.target().is_some()
    }

    pub(crate) fn record(&self, id: Option<u64>) -> CommandRecord<'_> {
        CommandRecord {
            id,
            success: self.is_success(),
            transcription: self.transcription(),
            place: self.place(),
            intensity: self.intensity(),
        }
    }
}

impl Serialize for ParsedCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record(None).serialize(serializer)
    }
}

/// Flat wire shape shared by commands and log entries. Unresolved fields
/// are left out of the JSON rather than sent as `null`.
#[derive(Serialize)]
pub(crate) struct CommandRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    success: bool,
    transcription: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    place: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    intensity: Option<Intensity>,
}
