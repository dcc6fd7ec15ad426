//! Entry wheel (Eintrittswalze, ETW): the fixed stator between the
//! keyboard/plugboard contacts and the first rotor.
//!
//! Military machines wire it in alphabetical order; the commercial machines
//! wire it in keyboard order (`Q → A`, `W → B`, ...). It never rotates and is
//! not self-inverse, so `backward` is the positional inverse of `forward`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::wiring::{Permutation, Wiring};

/// Keyboard order of the commercial Enigma, wired to contacts `A..=Z`.
pub const KEYBOARD_ORDER: &str = "QWERTZUIOASDFGHJKPYXCVBNML";

/// How the keyboard side of the entry wheel is wired to the rotor side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySequence {
    /// Key `i` connects to contact `i`.
    Identity,
    /// Keys in [`KEYBOARD_ORDER`] connect to contacts in alphabet order.
    Keyboard,
    /// Arbitrary wiring supplied at construction.
    Custom,
}

/// Non-rotating permutation fixed at construction.
#[derive(Debug, Clone)]
pub struct EntryWheel {
    sequence: EntrySequence,
    wiring: Permutation,
    keys: String,
    contacts: String,
}

impl EntryWheel {
    /// Creates an entry wheel wired in alphabet order.
    pub fn identity(alphabet: &Alphabet) -> Self {
        let order = alphabet.to_string();
        EntryWheel {
            sequence: EntrySequence::Identity,
            wiring: Permutation::identity(alphabet.len()),
            keys: order.clone(),
            contacts: order,
        }
    }

    /// Creates the commercial keyboard-order entry wheel.
    ///
    /// # Errors
    /// Fails like [`custom`](Self::custom) when the alphabet is not the
    /// 26 Latin letters.
    pub fn keyboard(alphabet: &Alphabet) -> Result<Self> {
        let mut wheel = Self::custom(alphabet, KEYBOARD_ORDER, &alphabet.to_string())?;
        wheel.sequence = EntrySequence::Keyboard;
        Ok(wheel)
    }

    /// Creates an entry wheel from a preset sequence.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] for [`EntrySequence::Custom`],
    /// which needs explicit wiring, or the errors of [`keyboard`](Self::keyboard).
    pub fn from_sequence(alphabet: &Alphabet, sequence: EntrySequence) -> Result<Self> {
        match sequence {
            EntrySequence::Identity => Ok(Self::identity(alphabet)),
            EntrySequence::Keyboard => Self::keyboard(alphabet),
            EntrySequence::Custom => Err(EnigmaError::Configuration(
                "custom entry wheel requires explicit wiring".to_string(),
            )),
        }
    }

    /// Creates an entry wheel where `keys[i]` is wired to `contacts[i]`.
    ///
    /// # Parameters
    /// - `alphabet`: Alphabet of the machine.
    /// - `keys`: Keyboard-side symbols.
    /// - `contacts`: Rotor-side symbols, positionally paired with `keys`.
    ///
    /// # Errors
    /// - [`EnigmaError::MismatchedLength`] if either sequence length differs
    ///   from the alphabet size.
    /// - [`EnigmaError::DuplicateOrInvalidSymbol`] if either sequence repeats a
    ///   symbol or contains one outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::{Alphabet, EntryWheel, Wiring};
    ///
    /// let alphabet = Alphabet::new("ABCD").unwrap();
    /// let etw = EntryWheel::custom(&alphabet, "DCBA", "ABCD").unwrap();
    /// assert_eq!(etw.forward(3).unwrap(), 0);
    /// assert_eq!(etw.backward(0).unwrap(), 3);
    /// ```
    pub fn custom(alphabet: &Alphabet, keys: &str, contacts: &str) -> Result<Self> {
        let keys_idx = Self::sequence_indices(alphabet, keys)?;
        let contacts_idx = Self::sequence_indices(alphabet, contacts)?;

        let mut table = vec![0; alphabet.len()];
        for (&key, &contact) in keys_idx.iter().zip(&contacts_idx) {
            table[key] = contact;
        }
        let wiring = Permutation::new(table).map_err(|_| EnigmaError::DuplicateOrInvalidSymbol)?;

        Ok(EntryWheel {
            sequence: EntrySequence::Custom,
            wiring,
            keys: keys.to_string(),
            contacts: contacts.to_string(),
        })
    }

    /// Validates one side of a custom wiring and converts it to indices.
    fn sequence_indices(alphabet: &Alphabet, symbols: &str) -> Result<Vec<usize>> {
        let count = symbols.chars().count();
        if count != alphabet.len() {
            return Err(EnigmaError::MismatchedLength {
                expected: alphabet.len(),
                got: count,
            });
        }
        let mut seen = HashSet::with_capacity(count);
        symbols
            .chars()
            .map(|c| match alphabet.index_of(c) {
                Ok(i) if seen.insert(i) => Ok(i),
                _ => Err(EnigmaError::DuplicateOrInvalidSymbol),
            })
            .collect()
    }

    /// The preset this wheel was built from.
    pub fn sequence(&self) -> EntrySequence {
        self.sequence
    }

    /// Keyboard-side and rotor-side wiring strings.
    pub fn wirings(&self) -> (&str, &str) {
        (&self.keys, &self.contacts)
    }

    /// The wiring table (keyboard contact → rotor contact).
    pub fn permutation(&self) -> &Permutation {
        &self.wiring
    }
}

impl Wiring for EntryWheel {
    fn size(&self) -> usize {
        self.wiring.len()
    }

    fn forward(&self, position: usize) -> Result<usize> {
        self.wiring.lookup(position)
    }

    fn backward(&self, position: usize) -> Result<usize> {
        self.wiring.reverse_lookup(position)
    }
}
