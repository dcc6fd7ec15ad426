//! Reflector (Umkehrwalze, UKW): the fixed involution that sends the signal
//! back through the rotor stack.

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::utils::converter::symbols_to_indices;
use crate::wiring::{Permutation, Wiring};

/// Fixed-point-free involution over the contacts.
///
/// Because every contact is paired with a different one, a machine with this
/// reflector can never encipher a symbol to itself. The `rotatable` and
/// `rewirable` flags record what the historical part allowed; the signal path
/// does not use them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    name: String,
    wiring: Permutation,
    rotatable: bool,
    rewirable: bool,
}

impl Reflector {
    /// Creates a reflector from contact indices.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidReflectorWiring`] if the table is not a
    /// permutation, is not its own inverse, or maps any contact to itself.
    pub fn new(name: &str, wiring: Vec<usize>) -> Result<Self> {
        let invalid = |reason: String| EnigmaError::InvalidReflectorWiring {
            name: name.to_string(),
            reason,
        };
        let wiring = Permutation::new(wiring).map_err(|e| invalid(e.to_string()))?;
        if let Some(fixed) = wiring.fixed_points().next() {
            return Err(invalid(format!("contact {} maps to itself", fixed)));
        }
        if !wiring.is_involution() {
            let table = wiring.as_slice();
            let broken = (0..table.len())
                .find(|&i| table[table[i]] != i)
                .unwrap_or_default();
            return Err(invalid(format!(
                "contact {} maps to {} but {} maps to {}",
                broken,
                table[broken],
                table[broken],
                table[table[broken]]
            )));
        }
        debug!(reflector = name, "reflector wiring accepted");
        Ok(Reflector {
            name: name.to_string(),
            wiring,
            rotatable: false,
            rewirable: false,
        })
    }

    /// Creates a reflector from a wiring string written in alphabet symbols.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidReflectorWiring`] if the string has the
    /// wrong length, uses unknown symbols, or is not a fixed-point-free
    /// involution.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::{Alphabet, Reflector, Wiring};
    ///
    /// let alphabet = Alphabet::latin();
    /// let ukw_b = Reflector::from_symbols(&alphabet, "B", "YRUHQSLDPXNGOKMIEBFZCWVJAT").unwrap();
    /// assert_eq!(ukw_b.forward(0).unwrap(), 24);
    /// assert!(Reflector::from_symbols(&alphabet, "bad", "ABCDEFGHIJKLMNOPQRSTUVWXYZ").is_err());
    /// ```
    pub fn from_symbols(alphabet: &Alphabet, name: &str, wiring: &str) -> Result<Self> {
        let count = wiring.chars().count();
        if count != alphabet.len() {
            return Err(EnigmaError::InvalidReflectorWiring {
                name: name.to_string(),
                reason: format!(
                    "wiring has {} contacts, alphabet has {}",
                    count,
                    alphabet.len()
                ),
            });
        }
        let table = symbols_to_indices(alphabet, wiring).map_err(|e| {
            EnigmaError::InvalidReflectorWiring {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;
        Self::new(name, table)
    }

    /// Records the historical capabilities of the part.
    pub fn with_capabilities(mut self, rotatable: bool, rewirable: bool) -> Self {
        self.rotatable = rotatable;
        self.rewirable = rewirable;
        self
    }

    /// Catalogue name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the historical reflector could be set to different positions.
    pub fn is_rotatable(&self) -> bool {
        self.rotatable
    }

    /// Whether the historical reflector could be rewired in the field.
    pub fn is_rewirable(&self) -> bool {
        self.rewirable
    }

    /// The wiring table.
    pub fn permutation(&self) -> &Permutation {
        &self.wiring
    }
}

impl Wiring for Reflector {
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

#[cfg(test)]
mod tests {
    use super::*;

    const UKW_B: &str = "YRUHQSLDPXNGOKMIEBFZCWVJAT";

    #[test]
    fn test_ukw_b_involution() {
        let alphabet = Alphabet::latin();
        let reflector = Reflector::from_symbols(&alphabet, "B", UKW_B).unwrap();
        for i in 0..26 {
            let j = reflector.forward(i).unwrap();
            assert_ne!(i, j, "contact {} must not reflect to itself", i);
            assert_eq!(reflector.forward(j).unwrap(), i);
            assert_eq!(reflector.backward(i).unwrap(), j);
        }
    }

    #[test]
    fn test_fixed_point_rejected() {
        // A<->B, C->C, D<->E ... on a five-symbol alphabet.
        let result = Reflector::new("odd", vec![1, 0, 2, 4, 3]);
        assert_eq!(
            result,
            Err(EnigmaError::InvalidReflectorWiring {
                name: "odd".to_string(),
                reason: "contact 2 maps to itself".to_string(),
            })
        );
    }

    #[test]
    fn test_non_involution_rejected() {
        let result = Reflector::new("cycle", vec![1, 2, 3, 0]);
        assert_eq!(
            result,
            Err(EnigmaError::InvalidReflectorWiring {
                name: "cycle".to_string(),
                reason: "contact 0 maps to 1 but 1 maps to 2".to_string(),
            })
        );
    }

    #[test]
    fn test_non_permutation_rejected() {
        assert!(matches!(
            Reflector::new("dup", vec![1, 1, 3, 2]),
            Err(EnigmaError::InvalidReflectorWiring { .. })
        ));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let alphabet = Alphabet::latin();
        assert!(matches!(
            Reflector::from_symbols(&alphabet, "short", "BADC"),
            Err(EnigmaError::InvalidReflectorWiring { .. })
        ));
    }

    #[test]
    fn test_capabilities_default_off() {
        let reflector = Reflector::new("tiny", vec![1, 0]).unwrap();
        assert!(!reflector.is_rotatable());
        assert!(!reflector.is_rewirable());
        let reflector = reflector.with_capabilities(true, false);
        assert!(reflector.is_rotatable());
        assert_eq!(reflector.name(), "tiny");
    }
}
