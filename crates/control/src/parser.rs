//! Grammar for spoken lighting commands.
//!
//! A command is recognized by trigger words anywhere in the transcript:
//! `apagar` switches a zone off, `encender`/`prender` switches it on. The
//! zone is always the second token. The `dormitorio` zone takes a numeral
//! qualifier ("encender dormitorio uno alto" targets `"dormitorio 1"`), and
//! for switch-on commands the last token selects the intensity by prefix.
//!
//! Parsing never fails outright: a field that cannot be extracted is left
//! empty and the rest of the command is still returned.

use crate::{
    command::{Intensity, Intent, ParsedCommand},
    numeral::normalize,
};

const TURN_OFF_TRIGGERS: &[&str] = &["apagar"];
const TURN_ON_TRIGGERS: &[&str] = &["encender", "prender"];

/// Zone whose rooms are addressed by number.
const NUMBERED_ZONE: &str = "dormitorio";

const INTENSITY_PREFIXES: &[(&str, Intensity)] = &[
    ("baj", Intensity::Low),
    ("medi", Intensity::Mid),
    ("alt", Intensity::High),
];

/// Split a transcript into lowercase, whitespace-delimited tokens.
pub fn tokenize(transcription: &str) -> Vec<String> {
    transcription
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Classify the transcript by trigger words. Transcripts containing both an
/// on and an off trigger are treated as unrecognized.
pub fn classify(tokens: &[String]) -> Intent {
    let contains_any =
        |triggers: &[&str]| tokens.iter().any(|t| triggers.iter().any(|trigger| t == trigger));

    match (contains_any(TURN_ON_TRIGGERS), contains_any(TURN_OFF_TRIGGERS)) {
        (true, false) => Intent::TurnOn,
        (false, true) => Intent::TurnOff,
        _ => Intent::Unrecognized,
    }
}

pub fn parse(transcription: &str) -> ParsedCommand {
    let tokens = tokenize(transcription);
    let intent = classify(&tokens);

    let (place, intensity) = match intent {
        Intent::Unrecognized => {
            return ParsedCommand::Unrecognized {
                transcription: transcription.to_string(),
            };
        }
        Intent::TurnOff => (turn_off_place(&tokens), Some(Intensity::Off)),
        Intent::TurnOn => (turn_on_place(&tokens), intensity_of(tokens.last())),
    };

    ParsedCommand::Resolved {
        transcription: transcription.to_string(),
        intent,
        place,
        intensity,
    }
}

// The qualifier is read from the zone token itself, so "apagar dormitorio
// uno" targets "dormitorio dormitorio". Existing clients depend on it.
fn turn_off_place(tokens: &[String]) -> Option<String> {
    let zone = tokens.get(1)?;
    if zone == NUMBERED_ZONE {
        Some(format!("{} {}", NUMBERED_ZONE, normalize(zone)))
    } else {
        Some(zone.clone())
    }
}

fn turn_on_place(tokens: &[String]) -> Option<String> {
    let zone = tokens.get(1)?;
    if zone == NUMBERED_ZONE {
        let qualifier = tokens.get(2)?;
        Some(format!("{} {}", NUMBERED_ZONE, normalize(qualifier)))
    } else {
        Some(zone.clone())
    }
}

fn intensity_of(token: Option<&String>) -> Option<Intensity> {
    let token = token?;
    INTENSITY_PREFIXES
        .iter()
        .find(|(prefix, _)| token.starts_with(prefix))
        .map(|(_, intensity)| *intensity)
}
