//! Block encoding.

use bitvec::prelude::*;

use super::bit_index::{data_positions, total_bits_for};
use super::codeword::Codeword;
use super::coverage::CoverageMap;

/// Encodes one data block into a codeword.
///
/// The data bits fill the non-parity positions in order, then each parity bit is
/// set so that its coverage group holds an even number of ones. An empty block
/// encodes to an empty codeword.
///
/// # Arguments
///
/// * `data` - Data bits of one block, any length
///
/// # Returns
///
/// A codeword of `data.len() + parity_bits_needed(data.len())` bits
pub fn encode(data: &BitSlice<u8, Msb0>) -> Codeword {
    let coverage = CoverageMap::new(total_bits_for(data.len()));
    encode_with(data, &coverage)
}

/// Encodes with a prebuilt coverage map, which must describe a codeword of
/// `total_bits_for(data.len())` bits.
pub(crate) fn encode_with(data: &BitSlice<u8, Msb0>, coverage: &CoverageMap) -> Codeword {
    let total_bits = coverage.total_bits();
    debug_assert_eq!(total_bits, total_bits_for(data.len()));

    let mut word = Codeword::zeroed(total_bits);
    for (position, bit) in data_positions(total_bits).zip(data.iter().by_vals()) {
        word.set(position, bit);
    }

    // Parity positions are disjoint from every other group's checked positions,
    // so the order groups are filled in does not matter.
    for group in coverage {
        let parity = word.expected_parity(group);
        word.set(group.parity_position(), parity);
    }

    word
}
