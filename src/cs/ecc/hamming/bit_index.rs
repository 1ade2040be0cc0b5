//! Position arithmetic for Hamming codewords.
//!
//! A codeword of `n` bits carries its parity bits at every 0-indexed position `p`
//! where `p + 1` is a power of two (0, 1, 3, 7, ...). Every other position holds a
//! data bit, in the order the data was supplied.

use std::iter;

/// Most data bits `k` parity bits can protect, `2^k - k - 1`, saturating at
/// `usize::MAX` once `2^k` no longer fits.
fn data_capacity(k: usize) -> usize {
    u32::try_from(k)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .map_or(usize::MAX, |pow| pow - k - 1)
}

/// Number of parity bits needed to protect `data_bits` data bits.
///
/// This is the smallest `k` such that `2^k - k - 1 >= data_bits`, so an empty
/// block needs no parity at all. Never more than `usize::BITS`.
pub fn parity_bits_needed(data_bits: usize) -> usize {
    let mut k = 0;
    while data_capacity(k) < data_bits {
        k += 1;
    }
    k
}

/// Total codeword length for a block of `data_bits` data bits, or `None` when
/// it does not fit in a `usize`.
pub fn checked_total_bits(data_bits: usize) -> Option<usize> {
    data_bits.checked_add(parity_bits_needed(data_bits))
}

/// Total codeword length for a block of `data_bits` data bits.
///
/// Overflows for blocks within `usize::BITS` of `usize::MAX`; use
/// [`checked_total_bits`] for sizes that have not been validated.
pub fn total_bits_for(data_bits: usize) -> usize {
    data_bits + parity_bits_needed(data_bits)
}

/// Largest number of data bits that fits in a codeword of `total_bits` bits.
///
/// Inverse of [`total_bits_for`]: for every `d`, `max_data_bits(total_bits_for(d)) == d`.
/// Lengths that no data block encodes to (4, for instance) round down to the
/// largest block that still fits.
pub fn max_data_bits(total_bits: usize) -> usize {
    // The data positions of a `total_bits` layout always fit; at most a couple
    // more can when that layout carries a spare parity bit.
    let mut data_bits = total_bits - parity_count(total_bits);
    while checked_total_bits(data_bits + 1).is_some_and(|t| t <= total_bits) {
        data_bits += 1;
    }
    data_bits
}

/// Whether 0-indexed position `p` holds a parity bit.
pub fn is_parity_position(p: usize) -> bool {
    p.wrapping_add(1).is_power_of_two()
}

/// Parity positions of a `total_bits`-bit codeword, ascending.
pub fn parity_positions(total_bits: usize) -> impl Iterator<Item = usize> {
    iter::successors(Some(0usize), |&p| p.checked_mul(2).and_then(|p| p.checked_add(1)))
        .take_while(move |&p| p < total_bits)
}

/// Data positions of a `total_bits`-bit codeword, ascending.
pub fn data_positions(total_bits: usize) -> impl Iterator<Item = usize> {
    (0..total_bits).filter(|&p| !is_parity_position(p))
}

/// Number of parity positions in a `total_bits`-bit codeword.
pub fn parity_count(total_bits: usize) -> usize {
    parity_positions(total_bits).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_bits_needed_boundaries() {
        let expected = [
            (0, 0),
            (1, 2),
            (2, 3),
            (3, 3),
            (4, 3),
            (5, 4),
            (11, 4),
            (12, 5),
            (26, 5),
            (27, 6),
            (57, 6),
            (58, 7),
        ];
        for (data_bits, parity) in expected {
            assert_eq!(
                parity_bits_needed(data_bits),
                parity,
                "data_bits = {}",
                data_bits
            );
        }
    }

    #[test]
    fn test_max_data_bits_round_trip() {
        for data_bits in 0..=1000 {
            let total = total_bits_for(data_bits);
            let recovered = max_data_bits(total);
            assert_eq!(recovered, data_bits);
            assert_eq!(recovered + parity_bits_needed(recovered), total);
        }
    }

    #[test]
    fn test_max_data_bits_rounds_down() {
        assert_eq!(max_data_bits(1), 0);
        assert_eq!(max_data_bits(2), 0);
        assert_eq!(max_data_bits(3), 1);
        assert_eq!(max_data_bits(4), 1);
        assert_eq!(max_data_bits(7), 4);
        assert_eq!(max_data_bits(8), 4);
        assert_eq!(max_data_bits(12), 8);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_sizes_near_usize_max() {
        assert_eq!(parity_bits_needed(usize::MAX), 64);
        assert_eq!(parity_bits_needed(usize::MAX - 64), 64);
        assert_eq!(checked_total_bits(usize::MAX), None);
        assert_eq!(checked_total_bits(usize::MAX - 64), Some(usize::MAX));
        assert_eq!(checked_total_bits(1 << 40), Some((1 << 40) + 41));
        assert_eq!(max_data_bits(usize::MAX), usize::MAX - 64);
        assert_eq!(max_data_bits((1 << 40) + 41), 1 << 40);
    }

    #[test]
    fn test_parity_positions() {
        assert!(is_parity_position(0));
        assert!(is_parity_position(1));
        assert!(!is_parity_position(2));
        assert!(is_parity_position(3));
        assert!(is_parity_position(7));
        assert!(!is_parity_position(8));
        assert!(!is_parity_position(usize::MAX));

        assert_eq!(parity_positions(12).collect::<Vec<_>>(), vec![0, 1, 3, 7]);
        assert_eq!(parity_positions(0).count(), 0);
        assert_eq!(
            data_positions(12).collect::<Vec<_>>(),
            vec![2, 4, 5, 6, 8, 9, 10, 11]
        );
    }

    #[test]
    fn test_parity_count_matches_needed() {
        for data_bits in 0..=300 {
            let total = total_bits_for(data_bits);
            assert_eq!(parity_count(total), parity_bits_needed(data_bits));
            assert_eq!(data_positions(total).count(), data_bits);
        }
    }
}
