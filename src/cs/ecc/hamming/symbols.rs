//! Conversions between caller-level symbols, text bit strings and bit vectors.
//!
//! Symbols are written most significant bit first, `bits_per_symbol` bits each.

use bitvec::prelude::*;
use log::warn;

use crate::cs::ecc::Result;
use crate::cs::error::Error;

pub(crate) fn check_width(bits_per_symbol: usize) -> Result<()> {
    if bits_per_symbol == 0 || bits_per_symbol > 32 {
        return Err(Error::invalid_input(format!(
            "bits per symbol must be in 1..=32, got {}",
            bits_per_symbol
        )));
    }
    Ok(())
}

/// Parses a string of `0` and `1` characters.
pub fn parse_bits(text: &str) -> Result<BitVec<u8, Msb0>> {
    text.chars()
        .enumerate()
        .map(|(i, c)| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(Error::invalid_input(format!(
                "bit string holds {:?} at index {}",
                other, i
            ))),
        })
        .collect()
}

/// Renders bits as a string of `0` and `1`.
pub fn to_bit_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}

/// Packs symbols into a bit vector, `bits_per_symbol` bits each.
pub fn symbols_to_bits(symbols: &[u32], bits_per_symbol: usize) -> Result<BitVec<u8, Msb0>> {
    check_width(bits_per_symbol)?;
    let mut bits = BitVec::with_capacity(symbols.len() * bits_per_symbol);
    for (i, &symbol) in symbols.iter().enumerate() {
        if bits_per_symbol < 32 && symbol >> bits_per_symbol != 0 {
            return Err(Error::invalid_input(format!(
                "symbol {} ({}) does not fit in {} bits",
                i, symbol, bits_per_symbol
            )));
        }
        for shift in (0..bits_per_symbol).rev() {
            bits.push((symbol >> shift) & 1 == 1);
        }
    }
    Ok(bits)
}

/// Unpacks `bits_per_symbol`-bit symbols. Bits left over after the last whole
/// symbol are dropped.
pub fn bits_to_symbols(bits: &BitSlice<u8, Msb0>, bits_per_symbol: usize) -> Result<Vec<u32>> {
    check_width(bits_per_symbol)?;
    let leftover = bits.len() % bits_per_symbol;
    if leftover != 0 {
        warn!(
            "dropping {} trailing bits that do not fill a {}-bit symbol",
            leftover, bits_per_symbol
        );
    }
    Ok(bits
        .chunks_exact(bits_per_symbol)
        .map(|chunk| {
            chunk
                .iter()
                .by_vals()
                .fold(0u32, |acc, b| (acc << 1) | u32::from(b))
        })
        .collect())
}

/// Packs bytes as `bits_per_symbol`-bit symbols.
pub fn bytes_to_bits(bytes: &[u8], bits_per_symbol: usize) -> Result<BitVec<u8, Msb0>> {
    let symbols: Vec<u32> = bytes.iter().map(|&b| u32::from(b)).collect();
    symbols_to_bits(&symbols, bits_per_symbol)
}

/// Unpacks `bits_per_symbol`-bit symbols into bytes; every symbol must fit in a byte.
pub fn bits_to_bytes(bits: &BitSlice<u8, Msb0>, bits_per_symbol: usize) -> Result<Vec<u8>> {
    bits_to_symbols(bits, bits_per_symbol)?
        .into_iter()
        .map(|s| {
            u8::try_from(s).map_err(|_| {
                Error::invalid_input(format!("symbol {} does not fit in a byte", s))
            })
        })
        .collect()
}
