//! In-memory Hamming codewords.

use std::fmt::{Display, Formatter};

use bitvec::prelude::*;

use super::bit_index::{data_positions, is_parity_position, parity_count};
use super::coverage::CoverageGroup;
use crate::cs::ecc::Result;
use crate::cs::error::Error;

/// One encoded block: data bits interleaved with parity bits at the
/// power-of-two positions.
///
/// The layout is a function of the length alone, so any bit sequence can be
/// viewed as a codeword. Codewords are values: the decoder never flips a bit of
/// a word it was handed, it returns a repaired copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Codeword {
    bits: BitVec<u8, Msb0>,
}

impl Codeword {
    /// An all-zero codeword of `total_bits` bits.
    pub fn zeroed(total_bits: usize) -> Self {
        Self {
            bits: bitvec![u8, Msb0; 0; total_bits],
        }
    }

    /// Copies `bits` into a new codeword.
    pub fn from_bits(bits: &BitSlice<u8, Msb0>) -> Self {
        Self {
            bits: bits.to_bitvec(),
        }
    }

    /// Number of bits, parity and data together.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the word holds no bits at all (an encoded empty block).
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The raw bits in position order.
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Bit at `position`, or `None` past the end.
    pub fn get(&self, position: usize) -> Option<bool> {
        self.bits.get(position).map(|b| *b)
    }

    pub(crate) fn set(&mut self, position: usize, value: bool) {
        self.bits.set(position, value);
    }

    /// A copy of this word with the bit at `position` inverted.
    pub fn with_flipped(&self, position: usize) -> Result<Self> {
        if position >= self.len() {
            return Err(Error::invalid_input(format!(
                "position {} is outside a {}-bit codeword",
                position,
                self.len()
            )));
        }
        let mut flipped = self.clone();
        let old = flipped.bits[position];
        flipped.bits.set(position, !old);
        Ok(flipped)
    }

    /// Number of parity positions in this word.
    pub fn parity_bit_count(&self) -> usize {
        parity_count(self.len())
    }

    /// Number of data positions in this word.
    pub fn data_bit_count(&self) -> usize {
        self.len() - self.parity_bit_count()
    }

    /// Values at the data positions, ascending.
    pub fn data_bits(&self) -> impl Iterator<Item = bool> + '_ {
        data_positions(self.len()).map(move |p| self.bits[p])
    }

    /// Values at the parity positions, ascending.
    pub fn parity_bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits
            .iter()
            .by_vals()
            .enumerate()
            .filter(|(p, _)| is_parity_position(*p))
            .map(|(_, b)| b)
    }

    /// Even-parity value over the group's checked positions, the parity bit
    /// itself excluded.
    pub(crate) fn expected_parity(&self, group: &CoverageGroup) -> bool {
        group
            .checked_positions()
            .fold(false, |acc, p| acc ^ self.bits[p])
    }
}

impl From<BitVec<u8, Msb0>> for Codeword {
    fn from(bits: BitVec<u8, Msb0>) -> Self {
        Self { bits }
    }
}

impl From<&BitSlice<u8, Msb0>> for Codeword {
    fn from(bits: &BitSlice<u8, Msb0>) -> Self {
        Self::from_bits(bits)
    }
}

impl AsRef<BitSlice<u8, Msb0>> for Codeword {
    fn as_ref(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }
}

impl Display for Codeword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
