//! Interpretation of spoken Spanish lighting commands.
//!
//! Transcripts are parsed by [`parser`], recorded in a [`log::CommandLog`]
//! and, when they fully resolve, applied to a [`registry::DeviceRegistry`].
//! [`CommandCenter`] ties the three together behind a single lock.

pub mod center;
pub mod command;
pub mod log;
pub mod numeral;
pub mod parser;
pub mod registry;

pub use center::CommandCenter;
pub use command::{Intensity, Intent, ParsedCommand};
pub use log::{CommandLog, CommandLogEntry};
pub use registry::DeviceRegistry;
