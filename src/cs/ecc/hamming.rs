//! Generalized Hamming error correction code.
//!
//! A block of `d` data bits is expanded into a codeword of `d + k` bits, where `k` is the smallest
//! number of parity bits with `2^k >= d + k + 1`. Parity bits sit at the 0-indexed positions whose
//! 1-indexed value is a power of two (0, 1, 3, 7, ...), data bits fill the remaining positions in
//! order. The most common variant is the (7,4) code, but any block length works.
//!
//! This implementation provides:
//! - Position arithmetic and coverage groups for any codeword length
//! - Encoding of single blocks and of whole bit streams
//! - Syndrome decoding with single-bit error correction
//! - Parallel stream processing with `rayon`
//! - Seeded corruption injection for tests and demonstrations
//!
//! Two or more flipped bits in one block are not corrected and are not reliably detected;
//! see [`decoder`] for the details.
//!
//! # Block sizes
//!
//! The caller picks the data bits per block. Small blocks (4 data bits in 7) spend
//! more on parity but tolerate one error per few bits; large blocks (57 data bits
//! in 63) are cheap but still repair only one bit each. Byte streams with 8-bit
//! blocks give 12-bit codewords.

use bitvec::prelude::*;

use crate::cs::ecc::Result;

pub mod bit_index;
pub mod block_codec;
pub mod codeword;
pub mod coverage;
pub mod decoder;
pub mod encoder;
pub mod noise;
pub mod symbols;

pub use bit_index::{
    checked_total_bits, is_parity_position, max_data_bits, parity_bits_needed, total_bits_for,
};
pub use block_codec::{
    decode_stream, decode_stream_with, encode_stream, par_decode_stream, par_encode_stream,
    split_stream, BlockReport, CodecConfig, DecodedStream, TrailingBlock,
};
pub use codeword::Codeword;
pub use coverage::{coverage_for, CoverageGroup, CoverageMap};
pub use decoder::{Correction, Syndrome};
pub use noise::CorruptionScope;

/// A stream codec bound to one [`CodecConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HammingCodec {
    config: CodecConfig,
}

impl HammingCodec {
    /// Creates a new codec.
    ///
    /// # Arguments
    ///
    /// * `config` - Symbol width, block size and decoding policies
    ///
    /// # Returns
    ///
    /// A new `HammingCodec`, or an error if the symbol width is outside `1..=32`,
    /// the block size is zero, or its codeword length does not fit in a `usize`
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a standard (7,4) Hamming codec
    pub fn standard_7_4() -> Self {
        Self {
            config: CodecConfig::default().with_data_bits_per_block(4),
        }
    }

    /// Gets the configuration the codec was built with
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Data bits per block
    pub fn data_bits(&self) -> usize {
        self.config.data_bits_per_block
    }

    /// Parity bits per full block
    pub fn parity_bits(&self) -> usize {
        parity_bits_needed(self.config.data_bits_per_block)
    }

    /// Gets the total code word length (data bits + parity bits)
    pub fn total_bits(&self) -> usize {
        self.config.total_bits_per_block()
    }

    /// Encodes a bit stream.
    pub fn encode(&self, bits: &BitSlice<u8, Msb0>) -> Result<BitVec<u8, Msb0>> {
        encode_stream(bits, self.config.data_bits_per_block)
    }

    /// Decodes a bit stream using the configured autocorrect and trailing block policies.
    pub fn decode(&self, bits: &BitSlice<u8, Msb0>) -> Result<DecodedStream> {
        decode_stream_with(
            bits,
            self.total_bits(),
            self.config.autocorrect,
            self.config.trailing,
        )
    }

    /// Encodes bytes, each written as one `bits_per_symbol`-bit symbol.
    pub fn encode_bytes(&self, bytes: &[u8]) -> Result<BitVec<u8, Msb0>> {
        let bits = symbols::bytes_to_bits(bytes, self.config.bits_per_symbol)?;
        self.encode(&bits)
    }

    /// Decodes a stream produced by [`HammingCodec::encode_bytes`].
    pub fn decode_bytes(&self, bits: &BitSlice<u8, Msb0>) -> Result<Vec<u8>> {
        let decoded = self.decode(bits)?;
        symbols::bits_to_bytes(&decoded.data, self.config.bits_per_symbol)
    }
}
