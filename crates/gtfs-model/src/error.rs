//! Error types for GTFS value parsing and configuration.

use thiserror::Error;

/// A raw CSV value that could not be turned into its typed representation.
///
/// Each variant keeps the offending text so the loader can report it as the
/// `fieldValue` of the matching notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The date is not given in the YYYYMMDD format or is not a calendar date.
    #[error("'{0}' is not a valid date; YYYYMMDD format is expected")]
    InvalidDate(String),
    /// The time is not given in the HH:MM:SS format.
    #[error("'{0}' is not a valid time; HH:MM:SS format is expected")]
    InvalidTime(String),
    /// The color is not given in the RRGGBB format, without a leading `#`.
    #[error("'{0}' is not a valid color; RRGGBB format is expected, without a leading `#`")]
    InvalidColor(String),
    /// The value is not an integer.
    #[error("'{0}' is not a valid integer")]
    InvalidInteger(String),
    /// The value is not a floating point number.
    #[error("'{0}' is not a valid float")]
    InvalidFloat(String),
    /// The value is an integer outside of the closed set of the enumeration.
    #[error("'{0}' is not a known enumeration value")]
    UnexpectedEnumValue(String),
}

impl ParseError {
    /// The raw value that failed to parse.
    pub fn value(&self) -> &str {
        match self {
            ParseError::InvalidDate(value)
            | ParseError::InvalidTime(value)
            | ParseError::InvalidColor(value)
            | ParseError::InvalidInteger(value)
            | ParseError::InvalidFloat(value)
            | ParseError::UnexpectedEnumValue(value) => value,
        }
    }
}

/// Errors raised while reading a validation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON or does not match the expected shape.
    #[error("invalid validation config: {0}")]
    Json(#[from] serde_json::Error),
}
