//! This module aggregates the command parser and the music command handlers.

/// Music playback commands and the session they act on.
pub mod music;
/// Parsing of the verbose and concise command syntaxes.
pub mod parser;
