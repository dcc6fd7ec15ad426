//! Error types for the enigmacrypt library.

use thiserror::Error;

/// Errors produced by the enigmacrypt library.
///
/// Construction-time variants are fatal to the object being built; no
/// partially assembled component is ever returned. Per-keystroke variants
/// are reported before any rotor moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Symbol is not part of the configured alphabet.
    #[error("Symbol '{0}' is not in the alphabet")]
    InvalidSymbol(char),
    /// Key pressed on the machine is not part of the configured alphabet.
    #[error("Key '{0}' is not in the alphabet")]
    InvalidKey(char),
    /// Alphabet construction was given a repeated symbol.
    #[error("Alphabet contains duplicate symbol '{0}'")]
    DuplicateSymbol(char),
    /// Alphabet construction was given fewer than two symbols.
    #[error("Alphabet must contain at least two symbols")]
    AlphabetTooSmall,
    /// Index does not address a symbol of the alphabet.
    #[error("Index {index} is outside the alphabet of {size} symbols")]
    OutOfRange { index: usize, size: usize },
    /// Contact position handed to a wiring component is out of range.
    #[error("Contact position {position} is outside the range 0..{size}")]
    InvalidPosition { position: usize, size: usize },
    /// Wiring sequence length does not match the alphabet size.
    #[error("Wiring length {got} does not match alphabet size {expected}")]
    MismatchedLength { expected: usize, got: usize },
    /// Wiring sequence repeats a symbol or uses one outside the alphabet.
    #[error("Wiring may not contain duplicate or invalid symbols")]
    DuplicateOrInvalidSymbol,
    /// Rotor wiring is not a permutation of the alphabet.
    #[error("Invalid rotor wiring for '{name}': {reason}")]
    InvalidRotorWiring { name: String, reason: String },
    /// Reflector wiring is not a fixed-point-free involution.
    #[error("Invalid reflector wiring for '{name}': {reason}")]
    InvalidReflectorWiring { name: String, reason: String },
    /// Machine could not be assembled from the supplied parts.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Named rotor or reflector is missing from the machine catalogue.
    #[error("Unknown {kind} '{name}'")]
    UnknownComponent { kind: &'static str, name: String },
    /// Machine description document could not be parsed.
    #[error("Invalid machine description: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for EnigmaError {
    fn from(err: serde_json::Error) -> Self {
        EnigmaError::InvalidConfig(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;
