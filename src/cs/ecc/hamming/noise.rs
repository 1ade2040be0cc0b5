//! Corruption injection for tests and demonstrations.
//!
//! The randomness source is always passed in, so the codec itself stays
//! deterministic and a seeded generator reproduces the same damage.

use bitvec::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::bit_index::data_positions;
use super::codeword::Codeword;
use crate::cs::ecc::Result;
use crate::cs::error::Error;

/// Which positions [`flip_random_bit`] may choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CorruptionScope {
    /// Any position, parity bits included
    #[default]
    Any,
    /// Data positions only
    DataOnly,
}

/// Returns a copy of `word` with one randomly chosen bit flipped, along with the
/// flipped position. `None` when the scope leaves nothing to flip.
pub fn flip_random_bit<R: Rng + ?Sized>(
    word: &Codeword,
    rng: &mut R,
    scope: CorruptionScope,
) -> Option<(Codeword, usize)> {
    let position = match scope {
        CorruptionScope::Any if word.is_empty() => return None,
        CorruptionScope::Any => rng.gen_range(0..word.len()),
        CorruptionScope::DataOnly => {
            let candidates: Vec<usize> = data_positions(word.len()).collect();
            *candidates.choose(rng)?
        }
    };
    let flipped = word.with_flipped(position).ok()?;
    Some((flipped, position))
}

/// Flips one bit in every block of an encoded stream.
///
/// A short final block is treated as a codeword of its own length. Blocks with
/// no eligible position are copied unchanged.
pub fn scramble_stream<R: Rng + ?Sized>(
    bits: &BitSlice<u8, Msb0>,
    total_bits_per_block: usize,
    rng: &mut R,
    scope: CorruptionScope,
) -> Result<BitVec<u8, Msb0>> {
    if total_bits_per_block == 0 {
        return Err(Error::invalid_input("block length must be positive"));
    }
    let mut out = BitVec::with_capacity(bits.len());
    for chunk in bits.chunks(total_bits_per_block) {
        let word = Codeword::from_bits(chunk);
        match flip_random_bit(&word, rng, scope) {
            Some((damaged, _)) => out.extend_from_bitslice(damaged.bits()),
            None => out.extend_from_bitslice(chunk),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::super::bit_index::is_parity_position;
    use super::super::{decoder, encoder};
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_flip_exactly_one_bit() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let word = encoder::encode(bits![u8, Msb0; 0, 1, 0, 0, 0, 0, 0, 1]);
        for _ in 0..100 {
            let (damaged, position) =
                flip_random_bit(&word, &mut rng, CorruptionScope::Any).unwrap();
            let diff = word
                .bits()
                .iter()
                .by_vals()
                .zip(damaged.bits().iter().by_vals())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(diff, 1);
            assert_ne!(word.get(position), damaged.get(position));
        }
    }

    #[test]
    fn test_data_only_scope() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let word = encoder::encode(bits![u8, Msb0; 1, 0, 1, 1, 0, 1, 1]);
        for _ in 0..100 {
            let (_, position) =
                flip_random_bit(&word, &mut rng, CorruptionScope::DataOnly).unwrap();
            assert!(!is_parity_position(position));
        }
    }

    #[test]
    fn test_nothing_to_flip() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        assert!(flip_random_bit(&Codeword::default(), &mut rng, CorruptionScope::Any).is_none());
        let parity_only = Codeword::zeroed(2);
        assert!(flip_random_bit(&parity_only, &mut rng, CorruptionScope::DataOnly).is_none());
    }

    #[test]
    fn test_scrambled_stream_is_repairable() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let data: BitVec<u8, Msb0> = (0..96).map(|i| i % 3 == 0).collect();
        let encoded = super::super::encode_stream(&data, 8).unwrap();
        let scrambled =
            scramble_stream(&encoded, 12, &mut rng, CorruptionScope::DataOnly).unwrap();
        assert_ne!(scrambled, encoded);
        let decoded = super::super::decode_stream(&scrambled, 12, true).unwrap();
        assert_eq!(decoded, data);

        let word = Codeword::from_bits(&scrambled[..12]);
        assert!(!decoder::syndrome(&word).is_clean());
    }
}
