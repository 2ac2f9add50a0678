//! Sentence rejection and stream errors
use thiserror::Error;

/// Framing and structural errors: the line is not a well formed
/// NMEA-0183 sentence, or a GSV message does not fit its cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing '$' start delimiter")]
    MissingStartDelimiter,
    #[error("missing '*' checksum delimiter")]
    MissingChecksumDelimiter,
    #[error("non ascii content")]
    NonAscii,
    #[error("invalid address field \"{0}\"")]
    InvalidAddress(String),
    #[error("{kind} sentence needs at least {expected} fields, got {found}")]
    TooFewFields {
        kind: String,
        expected: usize,
        found: usize,
    },
    #[error("message #{seq} is out of range for a {total} messages cycle")]
    InvalidSequence { seq: u16, total: u16 },
}

/// Field level errors, only raised on mandatory structural fields.
/// Optional fields that fail to parse are simply omitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("missing mandatory field \"{0}\"")]
    Missing(&'static str),
    #[error("non numeric mandatory field \"{name}\": \"{value}\"")]
    NotNumeric { name: &'static str, value: String },
}

/// [Error] classification, used by rejection counters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    Format,
    Checksum,
    Field,
    Io,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Format => f.write_str("format"),
            Self::Checksum => f.write_str("checksum"),
            Self::Field => f.write_str("field"),
            Self::Io => f.write_str("i/o"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("checksum mismatch: got \"{supplied}\", computed {computed:02X}")]
    Checksum { supplied: String, computed: u8 },
    #[error("field error: {0}")]
    Field(#[from] FieldError),
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classifies this [Error]
    pub fn kind(&self) -> Rejection {
        match self {
            Self::Format(_) => Rejection::Format,
            Self::Checksum { .. } => Rejection::Checksum,
            Self::Field(_) => Rejection::Field,
            Self::Io(_) => Rejection::Io,
        }
    }
}
