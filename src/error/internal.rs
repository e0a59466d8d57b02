use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Snowflakes are stored as strings; a value that no longer parses means the
    /// stored document was written by something other than this bot.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored enum tag does not match any known variant.
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant {
        /// Which enum was being parsed, e.g. "collector type"
        kind: &'static str,
        /// The stored tag
        value: String,
    },

    /// The configuration cache was read before its first successful load.
    #[error("Bot settings have not been loaded yet")]
    SettingsNotLoaded,
}
