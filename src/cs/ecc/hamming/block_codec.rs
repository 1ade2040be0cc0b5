//! Stream chunking.
//!
//! A stream is cut into consecutive blocks, each block is encoded or decoded on
//! its own, and the results are concatenated in input order. Blocks never depend
//! on one another, so the `par_*` variants hand them to `rayon` and reassemble the
//! output in stream order.

use bitvec::prelude::*;
use log::{debug, warn};
use rayon::prelude::*;

use super::bit_index::{checked_total_bits, parity_count, total_bits_for};
use super::codeword::Codeword;
use super::coverage::CoverageMap;
use super::decoder::{self, Correction};
use super::encoder;
use super::symbols::check_width;
use crate::cs::ecc::Result;
use crate::cs::error::Error;

/// How [`decode_stream_with`] treats a final block shorter than the block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrailingBlock {
    /// Fail with [`Error::InvalidInput`].
    #[default]
    Reject,
    /// Decode the trailing bits as a shorter codeword of their own length,
    /// honouring `autocorrect`. This is what [`encode_stream`] emits for a short
    /// final chunk.
    Decode,
    /// Extract data from the trailing bits without attempting correction.
    PassThrough,
}

/// Stream-level codec parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodecConfig {
    /// Width of one caller-level symbol, 8 for bytes
    pub bits_per_symbol: usize,
    /// Data bits carried by each block
    pub data_bits_per_block: usize,
    /// Whether decoding repairs single-bit errors before extracting data
    pub autocorrect: bool,
    /// Policy for a short final block when decoding
    pub trailing: TrailingBlock,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            bits_per_symbol: 8,
            data_bits_per_block: 8,
            autocorrect: true,
            trailing: TrailingBlock::Reject,
        }
    }
}

impl CodecConfig {
    /// Sets the symbol width used by the byte helpers.
    pub fn with_bits_per_symbol(mut self, bits_per_symbol: usize) -> Self {
        self.bits_per_symbol = bits_per_symbol;
        self
    }

    /// Sets the number of data bits carried by each block.
    pub fn with_data_bits_per_block(mut self, data_bits_per_block: usize) -> Self {
        self.data_bits_per_block = data_bits_per_block;
        self
    }

    /// Turns single-bit repair on or off for decoding.
    pub fn with_autocorrect(mut self, autocorrect: bool) -> Self {
        self.autocorrect = autocorrect;
        self
    }

    /// Sets the policy for a short final block when decoding.
    pub fn with_trailing(mut self, trailing: TrailingBlock) -> Self {
        self.trailing = trailing;
        self
    }

    /// Codeword length of a full block. Call [`CodecConfig::validate`] first for
    /// block sizes that came from outside.
    pub fn total_bits_per_block(&self) -> usize {
        total_bits_for(self.data_bits_per_block)
    }

    /// Checks that the symbol width is in `1..=32` and that a full block has a
    /// representable codeword length.
    pub fn validate(&self) -> Result<()> {
        check_width(self.bits_per_symbol)?;
        check_data_block(self.data_bits_per_block).map(|_| ())
    }
}

/// Per-block outcome of a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockReport {
    /// Index of the block in the stream
    pub index: usize,
    /// Codeword length of the block
    pub len: usize,
    /// `None` when correction was not attempted
    pub correction: Option<Correction>,
}

/// Decoded data together with what happened to each block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedStream {
    /// Extracted data bits of every block, in stream order
    pub data: BitVec<u8, Msb0>,
    /// One report per block, in stream order
    pub blocks: Vec<BlockReport>,
}

impl DecodedStream {
    /// Blocks in which a bit was flipped back.
    pub fn corrected_blocks(&self) -> impl Iterator<Item = &BlockReport> + '_ {
        self.blocks
            .iter()
            .filter(|b| matches!(b.correction, Some(Correction::Corrected(_))))
    }

    /// Blocks known to hold two or more damaged bits.
    pub fn uncorrectable_blocks(&self) -> impl Iterator<Item = &BlockReport> + '_ {
        self.blocks
            .iter()
            .filter(|b| matches!(b.correction, Some(Correction::OutOfRange(_))))
    }
}

/// Validates a data block size and returns the codeword length of a full block.
fn check_data_block(data_bits_per_block: usize) -> Result<usize> {
    if data_bits_per_block == 0 {
        return Err(Error::invalid_input("data bits per block must be positive"));
    }
    checked_total_bits(data_bits_per_block).ok_or_else(|| {
        Error::invalid_input(format!(
            "a block of {} data bits has no representable codeword length",
            data_bits_per_block
        ))
    })
}

fn check_total_block(total_bits_per_block: usize) -> Result<()> {
    if total_bits_per_block == 0 {
        return Err(Error::invalid_input(
            "block length must leave room for at least one parity bit",
        ));
    }
    Ok(())
}

/// Coverage shared by every full block, built only when the stream holds one.
fn shared_coverage(
    stream_len: usize,
    block_len: usize,
    total_bits: usize,
) -> Option<CoverageMap> {
    (stream_len >= block_len).then(|| CoverageMap::new(total_bits))
}

fn encode_block(chunk: &BitSlice<u8, Msb0>, full: Option<&CoverageMap>) -> Codeword {
    match full {
        Some(map) if total_bits_for(chunk.len()) == map.total_bits() => {
            encoder::encode_with(chunk, map)
        }
        _ => encoder::encode(chunk),
    }
}

fn concat<I>(blocks: I, capacity: usize) -> BitVec<u8, Msb0>
where
    I: IntoIterator,
    I::Item: AsRef<BitSlice<u8, Msb0>>,
{
    let mut out = BitVec::with_capacity(capacity);
    for block in blocks {
        out.extend_from_bitslice(block.as_ref());
    }
    out
}

fn encoded_len(bits: usize, data_bits_per_block: usize, total_bits: usize) -> usize {
    let full = bits / data_bits_per_block;
    let rest = bits % data_bits_per_block;
    full * total_bits + total_bits_for(rest)
}

fn decoded_capacity(bits: usize, total_bits_per_block: usize) -> usize {
    let full = bits / total_bits_per_block;
    if full == 0 {
        return 0;
    }
    full * (total_bits_per_block - parity_count(total_bits_per_block))
}

/// Encodes `bits` block by block.
///
/// The final chunk may be shorter than `data_bits_per_block`; it is encoded as a
/// shorter codeword. Callers wanting fixed-size blocks pad the input first.
///
/// # Arguments
///
/// * `bits` - Data stream to encode
/// * `data_bits_per_block` - Data bits per block, positive
///
/// # Returns
///
/// The concatenated codewords, or an error if the block size is zero or its
/// codeword length does not fit in a `usize`
pub fn encode_stream(
    bits: &BitSlice<u8, Msb0>,
    data_bits_per_block: usize,
) -> Result<BitVec<u8, Msb0>> {
    let total_bits = check_data_block(data_bits_per_block)?;
    let coverage = shared_coverage(bits.len(), data_bits_per_block, total_bits);
    let words = bits
        .chunks(data_bits_per_block)
        .map(|chunk| encode_block(chunk, coverage.as_ref()));
    Ok(concat(words, encoded_len(bits.len(), data_bits_per_block, total_bits)))
}

/// Parallel [`encode_stream`]; the output is identical.
pub fn par_encode_stream(
    bits: &BitSlice<u8, Msb0>,
    data_bits_per_block: usize,
) -> Result<BitVec<u8, Msb0>> {
    let total_bits = check_data_block(data_bits_per_block)?;
    let coverage = shared_coverage(bits.len(), data_bits_per_block, total_bits);
    let chunks: Vec<&BitSlice<u8, Msb0>> = bits.chunks(data_bits_per_block).collect();
    let words: Vec<Codeword> = chunks
        .par_iter()
        .map(|chunk| encode_block(chunk, coverage.as_ref()))
        .collect();
    Ok(concat(words, encoded_len(bits.len(), data_bits_per_block, total_bits)))
}

/// Decodes `bits` block by block, rejecting a short final block.
///
/// With `autocorrect` off the data bits are extracted as received, which is
/// only useful for diagnostics.
///
/// # Arguments
///
/// * `bits` - Encoded stream
/// * `total_bits_per_block` - Codeword length of each block, positive
/// * `autocorrect` - Whether to repair single-bit errors before extracting data
///
/// # Returns
///
/// The recovered data bits, or an error for a zero block length or a stream
/// that does not split into whole blocks
pub fn decode_stream(
    bits: &BitSlice<u8, Msb0>,
    total_bits_per_block: usize,
    autocorrect: bool,
) -> Result<BitVec<u8, Msb0>> {
    decode_stream_with(bits, total_bits_per_block, autocorrect, TrailingBlock::Reject)
        .map(|decoded| decoded.data)
}

fn decode_block(
    index: usize,
    chunk: &BitSlice<u8, Msb0>,
    total_bits_per_block: usize,
    full: Option<&CoverageMap>,
    autocorrect: bool,
    trailing: TrailingBlock,
) -> Result<(BitVec<u8, Msb0>, BlockReport)> {
    let word = Codeword::from_bits(chunk);
    let short = chunk.len() != total_bits_per_block;
    let autocorrect = if short {
        match trailing {
            TrailingBlock::Reject => {
                return Err(Error::invalid_input(format!(
                    "trailing block {} holds {} bits, expected {}",
                    index,
                    chunk.len(),
                    total_bits_per_block
                )))
            }
            TrailingBlock::Decode => autocorrect,
            TrailingBlock::PassThrough => false,
        }
    } else {
        autocorrect
    };
    if short {
        warn!(
            "block {}: decoding short trailing block of {} bits ({:?})",
            index,
            chunk.len(),
            trailing
        );
    }

    let (word, correction) = if autocorrect {
        let (fixed, correction) = match full {
            Some(map) if !short => decoder::correct_with(&word, map),
            _ => decoder::correct_with_report(&word),
        };
        match correction {
            Correction::Clean => {}
            Correction::Corrected(position) => {
                debug!("block {}: corrected bit {}", index, position)
            }
            Correction::OutOfRange(syndrome) => warn!(
                "block {}: syndrome {} is past the end of a {}-bit block, left as received",
                index,
                syndrome,
                chunk.len()
            ),
        }
        (fixed, Some(correction))
    } else {
        (word, None)
    };

    let report = BlockReport {
        index,
        len: chunk.len(),
        correction,
    };
    Ok((decoder::extract_data(&word), report))
}

fn collect_decoded(
    blocks: Vec<(BitVec<u8, Msb0>, BlockReport)>,
    capacity: usize,
) -> DecodedStream {
    let (data, blocks): (Vec<_>, Vec<_>) = blocks.into_iter().unzip();
    DecodedStream {
        data: concat(data, capacity),
        blocks,
    }
}

/// Decodes `bits` block by block, reporting per-block corrections.
///
/// A short final block is handled according to `trailing`. Blocks with two or
/// more damaged bits do not abort the stream; their data is best effort.
pub fn decode_stream_with(
    bits: &BitSlice<u8, Msb0>,
    total_bits_per_block: usize,
    autocorrect: bool,
    trailing: TrailingBlock,
) -> Result<DecodedStream> {
    check_total_block(total_bits_per_block)?;
    let coverage = shared_coverage(bits.len(), total_bits_per_block, total_bits_per_block);
    let capacity = decoded_capacity(bits.len(), total_bits_per_block);
    let blocks = bits
        .chunks(total_bits_per_block)
        .enumerate()
        .map(|(index, chunk)| {
            decode_block(
                index,
                chunk,
                total_bits_per_block,
                coverage.as_ref(),
                autocorrect,
                trailing,
            )
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(collect_decoded(blocks, capacity))
}

/// Parallel [`decode_stream_with`]; the output is identical.
pub fn par_decode_stream(
    bits: &BitSlice<u8, Msb0>,
    total_bits_per_block: usize,
    autocorrect: bool,
    trailing: TrailingBlock,
) -> Result<DecodedStream> {
    check_total_block(total_bits_per_block)?;
    let coverage = shared_coverage(bits.len(), total_bits_per_block, total_bits_per_block);
    let capacity = decoded_capacity(bits.len(), total_bits_per_block);
    let chunks: Vec<&BitSlice<u8, Msb0>> = bits.chunks(total_bits_per_block).collect();
    let blocks = chunks
        .par_iter()
        .enumerate()
        .map(|(index, chunk)| {
            decode_block(
                index,
                chunk,
                total_bits_per_block,
                coverage.as_ref(),
                autocorrect,
                trailing,
            )
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(collect_decoded(blocks, capacity))
}

/// Splits every block of an encoded stream into its data and parity bits.
///
/// A short final block is split by its own length.
pub fn split_stream(
    bits: &BitSlice<u8, Msb0>,
    total_bits_per_block: usize,
) -> Result<Vec<(BitVec<u8, Msb0>, BitVec<u8, Msb0>)>> {
    check_total_block(total_bits_per_block)?;
    Ok(bits
        .chunks(total_bits_per_block)
        .map(|chunk| decoder::split(&Codeword::from_bits(chunk)))
        .collect())
}
