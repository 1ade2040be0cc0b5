//! Error correction code implementations.
//!
//! This module provides a generalized Hamming code: any number of data bits per
//! block, parity bits at the power-of-two positions of the codeword, and
//! single-bit correction driven by the parity syndrome.
//!
//! All sequences are `bitvec` bit vectors; turning text or bytes into bits is
//! left to the [`hamming::symbols`] helpers.
//!
//! # Examples
//!
//! ```rust
//! use hamcode::cs::ecc::hamming::{decoder, encoder, symbols};
//!
//! let data = symbols::parse_bits("1011").unwrap();
//! let word = encoder::encode(&data);
//! assert_eq!(word.len(), 7);
//!
//! let damaged = word.with_flipped(2).unwrap();
//! let repaired = decoder::correct(&damaged);
//! assert_eq!(decoder::extract_data(&repaired), data);
//! ```

pub use crate::cs::error::Result;

/// Generalized Hamming single-error-correcting codes
pub mod hamming;
pub use hamming::{
    decode_stream, encode_stream, CodecConfig, Codeword, CoverageMap, HammingCodec, Syndrome,
    TrailingBlock,
};
