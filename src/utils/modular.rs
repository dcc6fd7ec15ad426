//! Modular index arithmetic over the contact ring.
//!
//! Rotors turn by moving an offset around a ring of `N` contacts instead of
//! splicing their wiring tables, so every position shift in the crate goes
//! through these helpers.

/// Maps any signed value into `[0, modulus)`.
///
/// Negative values wrap from the top of the ring, so `wrap(-1, 26) == 25`.
///
/// # Parameters
/// - `value`: The value to normalize.
/// - `modulus`: Size of the ring (must be non-zero).
///
/// # Returns
/// The equivalent position in `[0, modulus)`.
pub(crate) fn wrap(value: i64, modulus: usize) -> usize {
    value.rem_euclid(modulus as i64) as usize
}

/// Advances `position` by `offset` contacts.
///
/// # Parameters
/// - `position`: Starting position in `[0, modulus)`.
/// - `offset`: Number of contacts to advance, in `[0, modulus)`.
/// - `modulus`: Size of the ring.
pub(crate) fn forward_shift(position: usize, offset: usize, modulus: usize) -> usize {
    (position + offset) % modulus
}

/// Moves `position` back by `offset` contacts.
///
/// # Parameters
/// - `position`: Starting position in `[0, modulus)`.
/// - `offset`: Number of contacts to retreat, in `[0, modulus)`.
/// - `modulus`: Size of the ring.
pub(crate) fn backward_shift(position: usize, offset: usize, modulus: usize) -> usize {
    (position + modulus - offset) % modulus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_positive() {
        assert_eq!(wrap(0, 26), 0);
        assert_eq!(wrap(25, 26), 25);
        assert_eq!(wrap(26, 26), 0);
        assert_eq!(wrap(53, 26), 1);
    }

    #[test]
    fn test_wrap_negative() {
        assert_eq!(wrap(-1, 26), 25);
        assert_eq!(wrap(-26, 26), 0);
        assert_eq!(wrap(-27, 26), 25);
    }

    #[test]
    fn test_forward_shift_wraps() {
        assert_eq!(forward_shift(25, 1, 26), 0);
        assert_eq!(forward_shift(3, 4, 26), 7);
    }

    #[test]
    fn test_backward_shift_wraps() {
        assert_eq!(backward_shift(0, 1, 26), 25);
        assert_eq!(backward_shift(7, 4, 26), 3);
    }

    #[test]
    fn test_shift_roundtrip() {
        for position in 0..26 {
            for offset in 0..26 {
                let moved = forward_shift(position, offset, 26);
                assert_eq!(
                    backward_shift(moved, offset, 26),
                    position,
                    "roundtrip failed for position={} offset={}",
                    position,
                    offset
                );
            }
        }
    }
}
