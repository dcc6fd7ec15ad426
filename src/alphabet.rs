//! Alphabet: bidirectional symbol ↔ index conversion.
//!
//! Every component of the machine works on dense contact indices in
//! `[0, N)`. The alphabet is the only place where symbols appear, which lets
//! the same engine run over the 26 Latin letters or any other ordered,
//! duplicate-free symbol set.

use std::collections::HashMap;
use std::fmt;

use crate::error::{EnigmaError, Result};

/// The 26-letter alphabet used by every historical Enigma model.
pub const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Ordered, duplicate-free set of symbols defining the contact index space.
///
/// Immutable after construction. A machine holds one alphabet behind an
/// `Arc` and hands clones of that `Arc` to each component it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    positions: HashMap<char, usize>,
}

impl Alphabet {
    /// Creates an alphabet from an ordered sequence of symbols.
    ///
    /// # Parameters
    /// - `symbols`: The symbols in contact order; symbol `i` is contact `i`.
    ///
    /// # Errors
    /// - [`EnigmaError::DuplicateSymbol`] if a symbol appears twice.
    /// - [`EnigmaError::AlphabetTooSmall`] if fewer than two symbols are given.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::Alphabet;
    ///
    /// let alphabet = Alphabet::new("ABCD").unwrap();
    /// assert_eq!(alphabet.index_of('C').unwrap(), 2);
    /// assert!(Alphabet::new("ABCA").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.len() < 2 {
            return Err(EnigmaError::AlphabetTooSmall);
        }
        let mut positions = HashMap::with_capacity(symbols.len());
        for (index, &symbol) in symbols.iter().enumerate() {
            if positions.insert(symbol, index).is_some() {
                return Err(EnigmaError::DuplicateSymbol(symbol));
            }
        }
        Ok(Alphabet { symbols, positions })
    }

    /// Creates the 26-letter Latin alphabet `A..=Z`.
    pub fn latin() -> Self {
        let symbols: Vec<char> = LATIN.chars().collect();
        let positions = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, positions }
    }

    /// Number of symbols (and contacts) in the alphabet.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; an alphabet holds at least two symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns `true` if `symbol` is part of the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.positions.contains_key(&symbol)
    }

    /// Converts a symbol to its contact index.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if the symbol is not in the alphabet.
    pub fn index_of(&self, symbol: char) -> Result<usize> {
        self.positions
            .get(&symbol)
            .copied()
            .ok_or(EnigmaError::InvalidSymbol(symbol))
    }

    /// Converts a contact index back to its symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfRange`] if `index >= len()`.
    pub fn symbol_of(&self, index: usize) -> Result<char> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::OutOfRange {
                index,
                size: self.symbols.len(),
            })
    }

    /// The symbols in contact order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Maps free text input onto the alphabet.
    ///
    /// Returns the symbol itself when it is in the alphabet, otherwise its
    /// uppercase form when that single character is in the alphabet, and
    /// `None` when neither is.
    pub fn normalize(&self, symbol: char) -> Option<char> {
        if self.contains(symbol) {
            return Some(symbol);
        }
        let mut upper = symbol.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) if self.contains(u) => Some(u),
            _ => None,
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
