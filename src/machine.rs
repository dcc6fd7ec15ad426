//! Machine: the complete signal path of one keystroke.
//!
//! ```text
//! key ─► ETW ─► plugboard ─► rotor n-1 … rotor 0 ─► reflector
//!                                                       │
//! lamp ◄─ ETW ◄─ plugboard ◄─ rotor n-1 … rotor 0 ◄─────┘
//! ```
//!
//! The rotor stack steps once per accepted keystroke, before the contact is
//! read. A symbol outside the alphabet is rejected before anything moves.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::entry_wheel::EntryWheel;
use crate::error::{EnigmaError, Result};
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::Rotor;
use crate::stepping::{SteppingController, SteppingMode};
use crate::wiring::Wiring;

/// An assembled rotor cipher machine.
///
/// Owns its entry wheel, plugboard, rotor stack and reflector outright. The
/// stack is stored left to right as the windows read: `rotors()[0]` sits
/// beside the reflector and the last rotor is the fast rotor.
///
/// `encode` mutates the rotor windows, so a machine shared between threads
/// must be wrapped in a lock by the caller.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    entry_wheel: EntryWheel,
    plugboard: Plugboard,
    rotors: Vec<Rotor>,
    reflector: Reflector,
    stepping: SteppingController,
}

impl Machine {
    /// Assembles a machine from its parts.
    ///
    /// Every rotor is driven by a pawl and the historical
    /// [`SteppingMode::Pawl`] rule is used; see
    /// [`with_stepping`](Self::with_stepping) to change either.
    ///
    /// # Parameters
    /// - `entry_wheel`: Stator between plugboard and rotors.
    /// - `plugboard`: Plugboard; its alphabet becomes the machine alphabet.
    /// - `rotors`: Rotor stack, leftmost first.
    /// - `reflector`: Reflector at the left end of the stack.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if the stack is empty, the same
    /// rotor is mounted in two slots, or any part is built for a different
    /// alphabet than the plugboard.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigmacrypt::{Alphabet, EntryWheel, Machine, Plugboard, Reflector, Rotor, RotorModel};
    ///
    /// let alphabet = Arc::new(Alphabet::latin());
    /// let rotor = |name, wiring, notch| {
    ///     let model = RotorModel::from_symbols(&alphabet, name, wiring, notch).unwrap();
    ///     Rotor::new(model, Arc::clone(&alphabet)).unwrap()
    /// };
    /// let rotors = vec![
    ///     rotor("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q"),
    ///     rotor("II", "AJDKSIRUXBLHWTMCQGZNPYFVOE", "E"),
    ///     rotor("III", "BDFHJLCPRTXVZNYEIWGAKMUSQO", "V"),
    /// ];
    /// let reflector = Reflector::from_symbols(&alphabet, "B", "YRUHQSLDPXNGOKMIEBFZCWVJAT").unwrap();
    /// let mut machine = Machine::build(
    ///     EntryWheel::identity(&alphabet),
    ///     Plugboard::new(Arc::clone(&alphabet)),
    ///     rotors,
    ///     reflector,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(machine.encode_text("AAAAA").unwrap(), "BDZGO");
    /// ```
    pub fn build(
        entry_wheel: EntryWheel,
        plugboard: Plugboard,
        rotors: Vec<Rotor>,
        reflector: Reflector,
    ) -> Result<Self> {
        if rotors.is_empty() {
            return Err(EnigmaError::Configuration(
                "rotor stack has no rotors".to_string(),
            ));
        }
        let alphabet = Arc::clone(plugboard.alphabet());
        let n = alphabet.len();
        if entry_wheel.size() != n {
            return Err(EnigmaError::Configuration(format!(
                "entry wheel has {} contacts, alphabet has {}",
                entry_wheel.size(),
                n
            )));
        }
        if reflector.size() != n {
            return Err(EnigmaError::Configuration(format!(
                "reflector '{}' has {} contacts, alphabet has {}",
                reflector.name(),
                reflector.size(),
                n
            )));
        }
        if let Some(rotor) = rotors.iter().find(|r| r.alphabet() != alphabet.as_ref()) {
            return Err(EnigmaError::Configuration(format!(
                "rotor '{}' is labelled with a different alphabet",
                rotor.name()
            )));
        }
        {
            let mut mounted = HashSet::new();
            if let Some(rotor) = rotors.iter().find(|r| !mounted.insert(r.name())) {
                return Err(EnigmaError::Configuration(format!(
                    "rotor '{}' is mounted twice",
                    rotor.name()
                )));
            }
        }

        let stepping = SteppingController::new(SteppingMode::default(), rotors.len())?;
        let machine = Machine {
            alphabet,
            entry_wheel,
            plugboard,
            rotors,
            reflector,
            stepping,
        };
        debug!(
            rotors = %machine.rotor_names().join(" "),
            reflector = machine.reflector.name(),
            window = %machine.window(),
            "machine assembled"
        );
        Ok(machine)
    }

    /// Replaces the stepping rule and the number of pawls.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if `pawls` is zero or larger
    /// than the rotor stack.
    pub fn with_stepping(mut self, mode: SteppingMode, pawls: usize) -> Result<Self> {
        if pawls == 0 || pawls > self.rotors.len() {
            return Err(EnigmaError::Configuration(format!(
                "{} pawls cannot drive a stack of {} rotors",
                pawls,
                self.rotors.len()
            )));
        }
        self.stepping = SteppingController::new(mode, pawls)?;
        debug!(mode = %mode, pawls, "stepping configured");
        Ok(self)
    }

    /// Presses one key.
    ///
    /// Steps the rotor stack, then routes the contact through the full
    /// signal path and returns the lamp that lights.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidKey`] if `symbol` is not in the alphabet.
    /// The rotors do not move in that case.
    pub fn encode(&mut self, symbol: char) -> Result<char> {
        let input = self
            .alphabet
            .index_of(symbol)
            .map_err(|_| EnigmaError::InvalidKey(symbol))?;
        self.stepping.advance(&mut self.rotors);
        let output = self.route(input)?;
        trace!(input, output, window = %self.window(), "keystroke");
        self.alphabet.symbol_of(output)
    }

    /// Passes a contact through every component without stepping.
    fn route(&self, input: usize) -> Result<usize> {
        let mut signal = self.entry_wheel.forward(input)?;
        signal = self.plugboard.forward(signal)?;
        for rotor in self.rotors.iter().rev() {
            signal = rotor.forward(signal)?;
        }
        signal = self.reflector.forward(signal)?;
        for rotor in &self.rotors {
            signal = rotor.backward(signal)?;
        }
        signal = self.plugboard.backward(signal)?;
        self.entry_wheel.backward(signal)
    }

    /// Encodes free text.
    ///
    /// Characters outside the alphabet are mapped to their uppercase form when
    /// that is in the alphabet; anything else (spaces, punctuation, digits on
    /// a Latin machine) is skipped without stepping the rotors.
    ///
    /// # Errors
    /// Only fails if a component reports an internal inconsistency.
    pub fn encode_text(&mut self, text: &str) -> Result<String> {
        let alphabet = Arc::clone(&self.alphabet);
        text.chars()
            .filter_map(|c| alphabet.normalize(c))
            .map(|c| self.encode(c))
            .collect()
    }

    /// Returns every rotor to its ground position.
    pub fn reset(&mut self) {
        for rotor in &mut self.rotors {
            rotor.reset();
        }
        debug!(window = %self.window(), "machine reset");
    }

    /// Window symbols, left to right.
    pub fn window(&self) -> String {
        self.rotors.iter().map(Rotor::window_symbol).collect()
    }

    /// Turns every rotor by hand to the given window symbols, left to right,
    /// and records them as the new ground position.
    ///
    /// # Errors
    /// - [`EnigmaError::MismatchedLength`] if `windows` does not name one
    ///   symbol per rotor.
    /// - [`EnigmaError::InvalidSymbol`] if a symbol is not in the alphabet.
    ///
    /// No rotor moves unless every symbol is valid.
    pub fn set_window(&mut self, windows: &str) -> Result<()> {
        let symbols: Vec<char> = windows.chars().collect();
        if symbols.len() != self.rotors.len() {
            return Err(EnigmaError::MismatchedLength {
                expected: self.rotors.len(),
                got: symbols.len(),
            });
        }
        if let Some(&bad) = symbols.iter().find(|&&c| !self.alphabet.contains(c)) {
            return Err(EnigmaError::InvalidSymbol(bad));
        }
        for (rotor, &symbol) in self.rotors.iter_mut().zip(&symbols) {
            rotor.set_window_position(symbol)?;
        }
        Ok(())
    }

    /// The machine alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn entry_wheel(&self) -> &EntryWheel {
        &self.entry_wheel
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// The plugboard, for rewiring between messages.
    pub fn plugboard_mut(&mut self) -> &mut Plugboard {
        &mut self.plugboard
    }

    /// The rotor stack, leftmost first.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// The rotor stack, for changing ring settings or single windows.
    /// The number of rotors is fixed.
    pub fn rotors_mut(&mut self) -> &mut [Rotor] {
        &mut self.rotors
    }

    /// Catalogue names of the rotors, leftmost first.
    pub fn rotor_names(&self) -> Vec<&str> {
        self.rotors.iter().map(Rotor::name).collect()
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// The active stepping rule.
    pub fn stepping_mode(&self) -> SteppingMode {
        self.stepping.mode()
    }

    /// Number of rotors driven by a pawl.
    pub fn pawls(&self) -> usize {
        self.stepping.pawls()
    }
}
