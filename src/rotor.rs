//! Rotor (Walze): a rotating permutation with ring setting, window position
//! and turnover notches.
//!
//! The rotor never reshuffles its wiring table when it turns. The window
//! position is an offset applied arithmetically on the way in and removed on
//! the way out; the ring setting is folded into the table once, when it is
//! set.

use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::utils::converter::symbols_to_indices;
use crate::utils::modular::{backward_shift, forward_shift, wrap};
use crate::wiring::{Permutation, Wiring};

/// Factory wiring of a rotor as it leaves the workshop.
///
/// `wiring` maps contacts with the ring at its first position; `turnovers`
/// are the window positions at which the rotor carries its neighbour along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorModel {
    name: String,
    wiring: Permutation,
    turnovers: Vec<usize>,
}

impl RotorModel {
    /// Creates a rotor model from contact indices.
    ///
    /// # Parameters
    /// - `name`: Catalogue name (e.g. `"III"`).
    /// - `wiring`: Contact `i` is wired to `wiring[i]`.
    /// - `turnovers`: Window positions that engage the next pawl.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidRotorWiring`] if `wiring` is not a
    /// permutation or a turnover position is out of range.
    pub fn new(name: &str, wiring: Vec<usize>, turnovers: Vec<usize>) -> Result<Self> {
        let invalid = |reason: String| EnigmaError::InvalidRotorWiring {
            name: name.to_string(),
            reason,
        };
        let wiring = Permutation::new(wiring).map_err(|e| invalid(e.to_string()))?;
        if let Some(&bad) = turnovers.iter().find(|&&t| t >= wiring.len()) {
            return Err(invalid(format!(
                "turnover position {} outside 0..{}",
                bad,
                wiring.len()
            )));
        }
        Ok(RotorModel {
            name: name.to_string(),
            wiring,
            turnovers,
        })
    }

    /// Creates a rotor model from wiring and turnover strings written in
    /// alphabet symbols.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidRotorWiring`] if the wiring length differs
    /// from the alphabet, uses unknown symbols, or is not a permutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::{Alphabet, RotorModel};
    ///
    /// let alphabet = Alphabet::latin();
    /// let model = RotorModel::from_symbols(&alphabet, "I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q").unwrap();
    /// assert_eq!(model.turnovers(), &[16]);
    /// ```
    pub fn from_symbols(
        alphabet: &Alphabet,
        name: &str,
        wiring: &str,
        turnovers: &str,
    ) -> Result<Self> {
        let invalid = |reason: String| EnigmaError::InvalidRotorWiring {
            name: name.to_string(),
            reason,
        };
        let count = wiring.chars().count();
        if count != alphabet.len() {
            return Err(invalid(format!(
                "wiring has {} contacts, alphabet has {}",
                count,
                alphabet.len()
            )));
        }
        let table = symbols_to_indices(alphabet, wiring).map_err(|e| invalid(e.to_string()))?;
        let notches = symbols_to_indices(alphabet, turnovers).map_err(|e| invalid(e.to_string()))?;
        Self::new(name, table, notches)
    }

    /// Catalogue name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wiring with the ring at its first position.
    pub fn wiring(&self) -> &Permutation {
        &self.wiring
    }

    /// Window positions that carry the next rotor along.
    pub fn turnovers(&self) -> &[usize] {
        &self.turnovers
    }
}

/// A rotor mounted in a machine.
///
/// Observable state is the pair (ring setting, window position), both in
/// `[0, N)`. The ground position is the window position recorded by the last
/// hand setting and is where [`reset`](Self::reset) returns to.
#[derive(Debug, Clone)]
pub struct Rotor {
    model: RotorModel,
    alphabet: Arc<Alphabet>,
    wiring: Permutation,
    ring_setting: usize,
    window: usize,
    ground: usize,
}

impl Rotor {
    /// Mounts a rotor with ring setting 0 and the first symbol in the window.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidRotorWiring`] if the model was built for a
    /// different alphabet size.
    pub fn new(model: RotorModel, alphabet: Arc<Alphabet>) -> Result<Self> {
        if model.wiring.len() != alphabet.len() {
            return Err(EnigmaError::InvalidRotorWiring {
                name: model.name.clone(),
                reason: format!(
                    "wiring has {} contacts, alphabet has {}",
                    model.wiring.len(),
                    alphabet.len()
                ),
            });
        }
        Ok(Rotor {
            wiring: model.wiring.clone(),
            model,
            alphabet,
            ring_setting: 0,
            window: 0,
            ground: 0,
        })
    }

    /// Catalogue name of the mounted rotor.
    pub fn name(&self) -> &str {
        self.model.name()
    }

    /// The factory wiring this rotor was built from.
    pub fn model(&self) -> &RotorModel {
        &self.model
    }

    pub(crate) fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Current ring setting (0-based offset, `0 == 'A'`).
    pub fn ring_setting(&self) -> usize {
        self.ring_setting
    }

    /// Sets the ring setting (Ringstellung).
    ///
    /// Restores the factory wiring and rotates it by `offset` contacts.
    /// Neither the window position nor the turnover positions move, so a
    /// caller that needs a specific ground position must set it afterwards.
    ///
    /// # Parameters
    /// - `offset`: Any integer; normalized into `[0, N)` (`-1` is the last symbol).
    pub fn set_ring_setting(&mut self, offset: i64) {
        let n = self.alphabet.len();
        let ring = wrap(offset, n);
        self.wiring = self.model.wiring.rotated(ring);
        self.ring_setting = ring;
        debug!(rotor = %self.model.name, ring, "ring setting applied");
    }

    /// Current window position as a contact index.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Symbol currently visible in the window.
    pub fn window_symbol(&self) -> char {
        self.alphabet.symbols()[self.window]
    }

    /// Window position recorded by the last hand setting.
    pub fn ground_position(&self) -> usize {
        self.ground
    }

    /// Turns the rotor by hand until `symbol` shows in the window.
    ///
    /// Each click is a plain [`step`](Self::step); the turnover signal it
    /// returns is discarded, so neighbouring rotors never move. The target
    /// becomes the new ground position.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if `symbol` is not in the alphabet.
    pub fn set_window_position(&mut self, symbol: char) -> Result<()> {
        let target = self.alphabet.index_of(symbol)?;
        while self.window != target {
            self.step();
        }
        self.ground = target;
        debug!(rotor = %self.model.name, window = %symbol, "window position set");
        Ok(())
    }

    /// Returns the rotor to its ground position without touching its neighbours.
    pub fn reset(&mut self) {
        self.window = self.ground;
    }

    /// Returns `true` if a turnover letter shows in the window, i.e. the
    /// notch sits under the pawl of the next rotor.
    pub fn is_at_turnover(&self) -> bool {
        self.model.turnovers.contains(&self.window)
    }

    /// Advances the rotor by one position.
    ///
    /// # Returns
    /// `true` if the rotor showed a turnover letter *before* moving, meaning
    /// the next rotor should step too.
    pub fn step(&mut self) -> bool {
        let carry = self.is_at_turnover();
        self.window = forward_shift(self.window, 1, self.alphabet.len());
        carry
    }

    fn check(&self, position: usize) -> Result<()> {
        if position >= self.alphabet.len() {
            return Err(EnigmaError::InvalidPosition {
                position,
                size: self.alphabet.len(),
            });
        }
        Ok(())
    }
}

impl Wiring for Rotor {
    fn size(&self) -> usize {
        self.alphabet.len()
    }

    fn forward(&self, position: usize) -> Result<usize> {
        self.check(position)?;
        let n = self.alphabet.len();
        let contact = forward_shift(position, self.window, n);
        let exit = self.wiring.lookup(contact)?;
        Ok(backward_shift(exit, self.window, n))
    }

    fn backward(&self, position: usize) -> Result<usize> {
        self.check(position)?;
        let n = self.alphabet.len();
        let contact = forward_shift(position, self.window, n);
        let exit = self.wiring.reverse_lookup(contact)?;
        Ok(backward_shift(exit, self.window, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";

    fn rotor_i() -> Rotor {
        let alphabet = Arc::new(Alphabet::latin());
        let model = RotorModel::from_symbols(&alphabet, "I", ROTOR_I, "Q").unwrap();
        Rotor::new(model, alphabet).unwrap()
    }

    fn idx(c: char) -> usize {
        Alphabet::latin().index_of(c).unwrap()
    }

    #[test]
    fn test_base_wiring_ring_a_window_a() {
        let rotor = rotor_i();
        assert_eq!(rotor.forward(idx('A')).unwrap(), idx('E'));
        assert_eq!(rotor.forward(idx('Z')).unwrap(), idx('J'));
        assert_eq!(rotor.backward(idx('E')).unwrap(), idx('A'));
    }

    #[test]
    fn test_forward_after_one_step() {
        let mut rotor = rotor_i();
        rotor.step();
        // Contact A now meets the wire at B (K), shifted back by one.
        assert_eq!(rotor.forward(idx('A')).unwrap(), idx('J'));
    }

    #[test]
    fn test_ring_setting_b() {
        let mut rotor = rotor_i();
        rotor.set_ring_setting(1);
        assert_eq!(rotor.ring_setting(), 1);
        assert_eq!(rotor.window(), 0, "ring setting must not move the window");
        assert_eq!(rotor.forward(idx('A')).unwrap(), idx('K'));
    }

    #[test]
    fn test_ring_setting_normalized() {
        let mut rotor = rotor_i();
        rotor.set_ring_setting(-1);
        assert_eq!(rotor.ring_setting(), 25);
        rotor.set_ring_setting(27);
        assert_eq!(rotor.ring_setting(), 1);
    }

    #[test]
    fn test_ring_setting_keeps_inverse_in_step() {
        let mut rotor = rotor_i();
        for ring in 0..26 {
            rotor.set_ring_setting(ring);
            let table = rotor.wiring.as_slice().to_vec();
            assert_eq!(Permutation::new(table).unwrap(), rotor.wiring, "ring {}", ring);
            for i in 0..26 {
                assert_eq!(rotor.backward(rotor.forward(i).unwrap()).unwrap(), i);
            }
        }
    }

    #[test]
    fn test_ring_setting_resets_before_rotating() {
        let mut direct = rotor_i();
        direct.set_ring_setting(5);

        let mut repeated = rotor_i();
        repeated.set_ring_setting(3);
        repeated.set_ring_setting(5);

        for i in 0..26 {
            assert_eq!(direct.forward(i).unwrap(), repeated.forward(i).unwrap());
        }
    }

    #[test]
    fn test_ring_and_window_cancel() {
        // Moving ring and window by the same amount leaves the mapping of the
        // unrotated rotor, offset by nothing.
        let plain = rotor_i();
        let mut shifted = rotor_i();
        shifted.set_ring_setting(7);
        shifted.set_window_position('H').unwrap();
        for i in 0..26 {
            assert_eq!(plain.forward(i).unwrap(), shifted.forward(i).unwrap());
        }
    }

    #[test]
    fn test_step_reports_turnover_before_moving() {
        let mut rotor = rotor_i();
        rotor.set_window_position('P').unwrap();
        assert!(!rotor.step(), "P is not a turnover letter");
        assert_eq!(rotor.window_symbol(), 'Q');
        assert!(rotor.is_at_turnover());
        assert!(rotor.step(), "Q carries the next rotor");
        assert_eq!(rotor.window_symbol(), 'R');
        assert!(!rotor.is_at_turnover());
    }

    #[test]
    fn test_turnover_independent_of_ring() {
        let mut rotor = rotor_i();
        rotor.set_ring_setting(10);
        rotor.set_window_position('Q').unwrap();
        assert!(rotor.is_at_turnover());
    }

    #[test]
    fn test_periodicity() {
        let mut rotor = rotor_i();
        rotor.set_ring_setting(4);
        rotor.set_window_position('C').unwrap();
        let before: Vec<usize> = (0..26).map(|i| rotor.forward(i).unwrap()).collect();
        let window = rotor.window();
        let mut carries = 0;
        for _ in 0..26 {
            if rotor.step() {
                carries += 1;
            }
        }
        assert_eq!(carries, 1, "single-notch rotor turns over once per revolution");
        assert_eq!(rotor.window(), window);
        let after: Vec<usize> = (0..26).map(|i| rotor.forward(i).unwrap()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_roundtrip_every_position() {
        let mut rotor = rotor_i();
        rotor.set_ring_setting(11);
        for _ in 0..26 {
            for i in 0..26 {
                let f = rotor.forward(i).unwrap();
                assert_eq!(rotor.backward(f).unwrap(), i);
                let b = rotor.backward(i).unwrap();
                assert_eq!(rotor.forward(b).unwrap(), i);
            }
            rotor.step();
        }
    }

    #[test]
    fn test_set_window_position_records_ground() {
        let mut rotor = rotor_i();
        rotor.set_window_position('M').unwrap();
        assert_eq!(rotor.ground_position(), idx('M'));
        rotor.step();
        rotor.step();
        assert_eq!(rotor.window_symbol(), 'O');
        rotor.reset();
        assert_eq!(rotor.window_symbol(), 'M');
    }

    #[test]
    fn test_set_window_position_invalid() {
        let mut rotor = rotor_i();
        assert_eq!(
            rotor.set_window_position('m'),
            Err(EnigmaError::InvalidSymbol('m'))
        );
        assert_eq!(rotor.window(), 0);
    }

    #[test]
    fn test_invalid_position() {
        let rotor = rotor_i();
        assert!(rotor.forward(26).is_err());
        assert!(rotor.backward(26).is_err());
    }

    #[test]
    fn test_model_rejects_bad_wiring() {
        let alphabet = Alphabet::latin();
        let repeated = "EEMFLGDQVZNTOWYHXUSPAIBRCJ";
        assert!(matches!(
            RotorModel::from_symbols(&alphabet, "X", repeated, "Q"),
            Err(EnigmaError::InvalidRotorWiring { .. })
        ));
        assert!(matches!(
            RotorModel::from_symbols(&alphabet, "X", "EKM", "Q"),
            Err(EnigmaError::InvalidRotorWiring { .. })
        ));
        assert!(matches!(
            RotorModel::from_symbols(&alphabet, "X", ROTOR_I, "q"),
            Err(EnigmaError::InvalidRotorWiring { .. })
        ));
        assert!(matches!(
            RotorModel::new("X", vec![1, 0], vec![2]),
            Err(EnigmaError::InvalidRotorWiring { .. })
        ));
    }

    #[test]
    fn test_rotor_rejects_other_alphabet_size() {
        let model = RotorModel::new("tiny", vec![1, 2, 0], vec![0]).unwrap();
        assert!(Rotor::new(model, Arc::new(Alphabet::latin())).is_err());
    }

    #[test]
    fn test_double_notch_model() {
        let alphabet = Arc::new(Alphabet::latin());
        let model =
            RotorModel::from_symbols(&alphabet, "VI", "JPGVOUMFYQBENHZRDKASXLICTW", "ZM").unwrap();
        let mut rotor = Rotor::new(model, alphabet).unwrap();
        let carries = (0..26).filter(|_| rotor.step()).count();
        assert_eq!(carries, 2);
    }
}
