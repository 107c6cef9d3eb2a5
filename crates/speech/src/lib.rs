//! External collaborators of the voice command pipeline.
//!
//! An upload is staged on disk ([`stager`]), sanity-checked ([`probe`]),
//! archived to Cloud Storage ([`storage`]) and transcribed by Cloud
//! Speech-to-Text ([`transcriber`]). Each remote step sits behind a trait so
//! the HTTP layer can be exercised without network access.

pub mod auth;
pub mod config;
pub mod error;
pub mod probe;
pub mod stager;
pub mod storage;
pub mod transcriber;

#[cfg(test)]
pub(crate) mod test_utils;

pub use auth::{token_source, StaticToken, TokenSource};
pub use config::{AudioProfile, SpeechConfig};
pub use error::{SpeechError, SpeechResult};
pub use probe::{AudioMetadata, FormatProber, WavProber};
pub use stager::{AudioStager, StagedAudio};
pub use storage::{archive_key, BlobStore, GcsBlobStore};
pub use transcriber::{GoogleSpeechTranscriber, Transcriber};
