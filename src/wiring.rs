//! The wiring capability shared by every signal-path component, and the
//! permutation table that backs it.
//!
//! A signal travels `forward` from the keyboard toward the reflector and
//! `backward` from the reflector toward the lamps. Components whose table is
//! self-inverse (plugboard, reflector) answer both directions identically;
//! the others answer `backward` with the positional inverse of `forward`.

use thiserror::Error;

use crate::error::{EnigmaError, Result};

/// A component the electrical signal passes through.
///
/// Implemented by [`crate::Plugboard`], [`crate::EntryWheel`],
/// [`crate::Rotor`] and [`crate::Reflector`]. For every implementor and every
/// `i` in `[0, size())`, `backward(forward(i)) == i` and
/// `forward(backward(i)) == i`.
pub trait Wiring {
    /// Number of contacts on each side of the component.
    fn size(&self) -> usize;

    /// Maps a contact in the keyboard → reflector direction.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPosition`] if `position >= size()`.
    fn forward(&self, position: usize) -> Result<usize>;

    /// Maps a contact in the reflector → keyboard direction.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPosition`] if `position >= size()`.
    fn backward(&self, position: usize) -> Result<usize>;
}

/// Reason a table of contact indices is not a permutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermutationError {
    /// A contact is wired to a position outside the table.
    #[error("contact {index} maps to {value}, outside 0..{size}")]
    OutOfRange {
        index: usize,
        value: usize,
        size: usize,
    },
    /// Two contacts are wired to the same position.
    #[error("contact {value} is the target of more than one wire")]
    Repeated { value: usize },
}

/// A bijection on `[0, N)` stored together with its inverse.
///
/// Both lookups are O(1); the inverse is rebuilt whenever the table changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    table: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Validates `table` and builds its inverse.
    ///
    /// # Errors
    /// Returns a [`PermutationError`] if a value is out of range or repeated.
    pub fn new(table: Vec<usize>) -> std::result::Result<Self, PermutationError> {
        let size = table.len();
        let mut inverse = vec![usize::MAX; size];
        for (index, &value) in table.iter().enumerate() {
            if value >= size {
                return Err(PermutationError::OutOfRange { index, value, size });
            }
            if inverse[value] != usize::MAX {
                return Err(PermutationError::Repeated { value });
            }
            inverse[value] = index;
        }
        Ok(Permutation { table, inverse })
    }

    /// The identity permutation on `size` contacts.
    pub fn identity(size: usize) -> Self {
        let table: Vec<usize> = (0..size).collect();
        Permutation {
            inverse: table.clone(),
            table,
        }
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` for the permutation on zero contacts.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Image of `position`, or `None` when out of range.
    pub fn apply(&self, position: usize) -> Option<usize> {
        self.table.get(position).copied()
    }

    /// Preimage of `position`, or `None` when out of range.
    pub fn invert(&self, position: usize) -> Option<usize> {
        self.inverse.get(position).copied()
    }

    /// The forward table.
    pub fn as_slice(&self) -> &[usize] {
        &self.table
    }

    /// Returns `true` if applying the permutation twice is the identity.
    pub fn is_involution(&self) -> bool {
        self.table == self.inverse
    }

    /// Positions the permutation leaves in place.
    pub fn fixed_points(&self) -> impl Iterator<Item = usize> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter(|&(i, &v)| i == v)
            .map(|(i, _)| i)
    }

    /// Exchanges the images of `a` and `b`.
    ///
    /// Applied to two fixed points this wires them to each other; applied to a
    /// wired pair it restores both to themselves.
    pub(crate) fn swap_images(&mut self, a: usize, b: usize) {
        self.table.swap(a, b);
        self.inverse[self.table[a]] = a;
        self.inverse[self.table[b]] = b;
    }

    /// The same wiring turned `shift` contacts around the ring, as a ring
    /// setting does: contact `i + shift` maps to `table[i] + shift`.
    pub(crate) fn rotated(&self, shift: usize) -> Self {
        let n = self.len();
        if n == 0 {
            return self.clone();
        }
        let shift = shift % n;
        let turn = |source: &[usize]| -> Vec<usize> {
            (0..n)
                .map(|i| (source[(i + n - shift) % n] + shift) % n)
                .collect()
        };
        Permutation {
            table: turn(&self.table),
            inverse: turn(&self.inverse),
        }
    }

    /// Forward lookup reporting out-of-range contacts as an error.
    pub(crate) fn lookup(&self, position: usize) -> Result<usize> {
        self.apply(position).ok_or(EnigmaError::InvalidPosition {
            position,
            size: self.len(),
        })
    }

    /// Inverse lookup reporting out-of-range contacts as an error.
    pub(crate) fn reverse_lookup(&self, position: usize) -> Result<usize> {
        self.invert(position).ok_or(EnigmaError::InvalidPosition {
            position,
            size: self.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let p = Permutation::identity(5);
        assert_eq!(p.len(), 5);
        assert!(p.is_involution());
        assert_eq!(p.fixed_points().count(), 5);
    }

    #[test]
    fn test_new_and_inverse() {
        let p = Permutation::new(vec![2, 0, 1]).unwrap();
        assert_eq!(p.apply(0), Some(2));
        assert_eq!(p.invert(2), Some(0));
        for i in 0..3 {
            assert_eq!(p.invert(p.apply(i).unwrap()), Some(i));
        }
        assert!(!p.is_involution());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            Permutation::new(vec![0, 3, 1]),
            Err(PermutationError::OutOfRange {
                index: 1,
                value: 3,
                size: 3
            })
        );
    }

    #[test]
    fn test_repeated_rejected() {
        assert_eq!(
            Permutation::new(vec![1, 1, 0]),
            Err(PermutationError::Repeated { value: 1 })
        );
    }

    #[test]
    fn test_swap_images_pairs_and_restores() {
        let mut p = Permutation::identity(4);
        p.swap_images(0, 3);
        assert_eq!(p.as_slice(), &[3, 1, 2, 0]);
        assert!(p.is_involution());
        p.swap_images(0, 3);
        assert_eq!(p, Permutation::identity(4));
    }

    #[test]
    fn test_rotated_keeps_inverse() {
        let p = Permutation::new(vec![2, 0, 3, 1, 4]).unwrap();
        assert_eq!(p.rotated(0), p);
        assert_eq!(p.rotated(5), p);
        for shift in 1..5 {
            let r = p.rotated(shift);
            assert_eq!(Permutation::new(r.as_slice().to_vec()).unwrap(), r);
        }
        assert_eq!(p.rotated(1).as_slice(), &[0, 3, 1, 4, 2]);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let p = Permutation::identity(3);
        assert_eq!(
            p.lookup(3),
            Err(EnigmaError::InvalidPosition {
                position: 3,
                size: 3
            })
        );
        assert!(p.reverse_lookup(7).is_err());
    }
}
