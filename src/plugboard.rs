//! Plugboard (Steckerbrett): front-panel letter swaps.
//!
//! The plugboard starts as the identity and is rewired one cable at a time.
//! Each cable exchanges two contacts, so the table is always its own inverse
//! and the set of moved contacts always splits into disjoint pairs.

use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::wiring::{Permutation, Wiring};

/// Self-inverse partial permutation built from symbol pairs.
///
/// Rejected cable insertions and removals (same symbol twice, symbol already
/// cabled, pair not present, board full) are ordinary operator outcomes and
/// are reported as `false`, not as errors. Connections are enumerated in
/// insertion order.
#[derive(Debug, Clone)]
pub struct Plugboard {
    alphabet: Arc<Alphabet>,
    wiring: Permutation,
    connections: Vec<(char, char)>,
    max_connections: usize,
}

impl Plugboard {
    /// Creates an empty plugboard accepting up to ⌊N/2⌋ cables.
    pub fn new(alphabet: Arc<Alphabet>) -> Self {
        let max_connections = alphabet.len() / 2;
        Plugboard {
            wiring: Permutation::identity(alphabet.len()),
            alphabet,
            connections: Vec::new(),
            max_connections,
        }
    }

    /// Creates an empty plugboard accepting at most `max_connections` cables.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if `max_connections` exceeds ⌊N/2⌋.
    pub fn with_max_connections(alphabet: Arc<Alphabet>, max_connections: usize) -> Result<Self> {
        let limit = alphabet.len() / 2;
        if max_connections > limit {
            return Err(EnigmaError::Configuration(format!(
                "plugboard cannot hold {} cables over {} symbols (limit {})",
                max_connections,
                alphabet.len(),
                limit
            )));
        }
        let mut plugboard = Self::new(alphabet);
        plugboard.max_connections = max_connections;
        Ok(plugboard)
    }

    /// Inserts a cable between `a` and `b`.
    ///
    /// # Returns
    /// `true` if the cable was inserted; `false` if `a == b`, either symbol is
    /// already cabled, or the board holds its maximum number of cables.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if either symbol is not in the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigmacrypt::{Alphabet, Plugboard};
    ///
    /// let mut plugboard = Plugboard::new(Arc::new(Alphabet::latin()));
    /// assert!(plugboard.connect('A', 'V').unwrap());
    /// assert!(!plugboard.connect('V', 'Q').unwrap());
    /// assert!(plugboard.connect('A', '1').is_err());
    /// ```
    pub fn connect(&mut self, a: char, b: char) -> Result<bool> {
        let ia = self.alphabet.index_of(a)?;
        let ib = self.alphabet.index_of(b)?;
        if ia == ib
            || self.wiring.as_slice()[ia] != ia
            || self.wiring.as_slice()[ib] != ib
            || self.connections.len() >= self.max_connections
        {
            return Ok(false);
        }
        self.wiring.swap_images(ia, ib);
        self.connections.push((a, b));
        debug!(a = %a, b = %b, total = self.connections.len(), "plugboard cable inserted");
        Ok(true)
    }

    /// Removes the cable attached to `symbol`.
    ///
    /// # Returns
    /// `true` if a cable was removed; `false` if `symbol` was not cabled.
    pub fn disconnect(&mut self, symbol: char) -> bool {
        match self
            .connections
            .iter()
            .position(|&(a, b)| a == symbol || b == symbol)
        {
            Some(slot) => self.remove_at(slot),
            None => false,
        }
    }

    /// Removes the cable between `a` and `b`, in either order.
    ///
    /// # Returns
    /// `true` if that exact pair was cabled and is now removed.
    pub fn disconnect_pair(&mut self, a: char, b: char) -> bool {
        match self
            .connections
            .iter()
            .position(|&pair| pair == (a, b) || pair == (b, a))
        {
            Some(slot) => self.remove_at(slot),
            None => false,
        }
    }

    fn remove_at(&mut self, slot: usize) -> bool {
        let (a, b) = self.connections[slot];
        let (Ok(ia), Ok(ib)) = (self.alphabet.index_of(a), self.alphabet.index_of(b)) else {
            return false;
        };
        self.connections.remove(slot);
        self.wiring.swap_images(ia, ib);
        debug!(a = %a, b = %b, total = self.connections.len(), "plugboard cable removed");
        true
    }

    /// Removes every cable, restoring the identity wiring.
    pub fn reset(&mut self) {
        self.wiring = Permutation::identity(self.alphabet.len());
        self.connections.clear();
        debug!("plugboard reset");
    }

    /// Cables in insertion order, as `(first, second)` symbol pairs.
    pub fn connections(&self) -> &[(char, char)] {
        &self.connections
    }

    /// Number of cables currently inserted.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Maximum number of cables this board accepts.
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Returns `true` if `symbol` has a cable attached.
    pub fn is_connected(&self, symbol: char) -> bool {
        self.partner(symbol).is_some()
    }

    /// Symbol cabled to `symbol`, if any.
    pub fn partner(&self, symbol: char) -> Option<char> {
        self.connections.iter().find_map(|&(a, b)| {
            if a == symbol {
                Some(b)
            } else if b == symbol {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Alphabet the board is labelled with.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// The current wiring table.
    pub fn permutation(&self) -> &Permutation {
        &self.wiring
    }
}

impl Wiring for Plugboard {
    fn size(&self) -> usize {
        self.wiring.len()
    }

    fn forward(&self, position: usize) -> Result<usize> {
        self.wiring.lookup(position)
    }

    fn backward(&self, position: usize) -> Result<usize> {
        self.wiring.lookup(position)
    }
}
