//! Symbol-string conversion utilities.
//!
//! Wiring tables, turnover sets and plugboard settings are written as strings
//! of alphabet symbols in machine descriptions. These helpers turn them into
//! contact indices and back.

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// Converts a string of symbols to their contact indices.
///
/// # Parameters
/// - `alphabet`: Alphabet defining the index space.
/// - `symbols`: Symbols to convert, in order.
///
/// # Returns
/// A `Vec<usize>` with one index per symbol.
///
/// # Errors
/// Returns [`EnigmaError::InvalidSymbol`] for the first symbol outside the alphabet.
pub fn symbols_to_indices(alphabet: &Alphabet, symbols: &str) -> Result<Vec<usize>> {
    symbols.chars().map(|c| alphabet.index_of(c)).collect()
}

/// Converts contact indices back to a string of symbols.
///
/// # Errors
/// Returns [`EnigmaError::OutOfRange`] for the first index outside the alphabet.
pub fn indices_to_symbols(alphabet: &Alphabet, indices: &[usize]) -> Result<String> {
    indices.iter().map(|&i| alphabet.symbol_of(i)).collect()
}

/// Parses whitespace-separated symbol pairs such as `"AB CD EF"`.
///
/// # Errors
/// Returns [`EnigmaError::Configuration`] if a token is not exactly two symbols.
pub fn parse_pairs(pairs: &str) -> Result<Vec<(char, char)>> {
    pairs
        .split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(a), Some(b), None) => Ok((a, b)),
                _ => Err(EnigmaError::Configuration(format!(
                    "plugboard pair '{}' must be exactly two symbols",
                    token
                ))),
            }
        })
        .collect()
}

/// Splits text into space-separated groups of `size` symbols.
///
/// A `size` of 0 returns the text unchanged.
pub fn group(text: &str, size: usize) -> String {
    if size == 0 {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
