//! Stepping controller: advances the rotor windows before each keystroke.
//!
//! Two rules are available. [`SteppingMode::Pawl`] models the ratchet and
//! pawl mechanism of the real machine, including the double step of the
//! middle rotor. [`SteppingMode::Odometer`] is the simplified carry chain in
//! which a rotor only moves when the rotor to its right has just turned over.
//!
//! Rotor slices are ordered left to right; the last rotor sits next to the
//! entry wheel and is the fast rotor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnigmaError;
use crate::rotor::Rotor;

/// Rule used to decide which rotors move on a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteppingMode {
    /// Historical pawl mechanism with the middle-rotor double step.
    #[default]
    Pawl,
    /// Carry chain that stops at the first rotor not at its turnover.
    Odometer,
}

impl fmt::Display for SteppingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SteppingMode::Pawl => write!(f, "pawl"),
            SteppingMode::Odometer => write!(f, "odometer"),
        }
    }
}

impl FromStr for SteppingMode {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pawl" | "historical" | "double-step" => Ok(SteppingMode::Pawl),
            "odometer" | "simple" => Ok(SteppingMode::Odometer),
            other => Err(EnigmaError::Configuration(format!(
                "unknown stepping mode '{}'",
                other
            ))),
        }
    }
}

/// Advances a rotor stack once per keystroke.
///
/// Only the rightmost `pawls` rotors can move at all; rotors further left
/// (such as the Greek wheel of the four-rotor naval machine) stay where they
/// were set by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteppingController {
    mode: SteppingMode,
    pawls: usize,
}

impl SteppingController {
    /// Creates a controller driving the rightmost `pawls` rotors.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if `pawls` is zero. The fast
    /// rotor moves on every keystroke, so it always needs a pawl.
    pub fn new(mode: SteppingMode, pawls: usize) -> Result<Self, EnigmaError> {
        if pawls == 0 {
            return Err(EnigmaError::Configuration(
                "a stepping controller needs at least one pawl".to_string(),
            ));
        }
        Ok(SteppingController { mode, pawls })
    }

    /// Active stepping rule.
    pub fn mode(&self) -> SteppingMode {
        self.mode
    }

    /// Number of rotors the controller can move.
    pub fn pawls(&self) -> usize {
        self.pawls
    }

    /// Steps the stack for one keystroke.
    ///
    /// # Parameters
    /// - `rotors`: The stack, leftmost first.
    ///
    /// # Returns
    /// The number of rotors that moved.
    pub fn advance(&self, rotors: &mut [Rotor]) -> usize {
        let n = rotors.len();
        let first = n - self.pawls.min(n);
        if first == n {
            return 0;
        }
        match self.mode {
            SteppingMode::Pawl => Self::advance_pawl(rotors, first),
            SteppingMode::Odometer => Self::advance_odometer(rotors, first),
        }
    }

    /// Every notch is sampled before anything moves. The fast rotor always
    /// steps; a pawl that drops into the notch of the rotor on its right
    /// pushes both that rotor and the rotor on its left.
    fn advance_pawl(rotors: &mut [Rotor], first: usize) -> usize {
        let n = rotors.len();
        let notched: Vec<bool> = rotors.iter().map(Rotor::is_at_turnover).collect();
        let mut moves = vec![false; n];
        moves[n - 1] = true;
        for left in first..n - 1 {
            if notched[left + 1] {
                moves[left] = true;
                moves[left + 1] = true;
            }
        }
        let mut moved = 0;
        for (rotor, &step) in rotors.iter_mut().zip(&moves) {
            if step {
                rotor.step();
                moved += 1;
            }
        }
        moved
    }

    fn advance_odometer(rotors: &mut [Rotor], first: usize) -> usize {
        let mut slot = rotors.len();
        let mut moved = 0;
        while slot > first {
            slot -= 1;
            moved += 1;
            if !rotors[slot].step() {
                break;
            }
        }
        moved
    }
}
