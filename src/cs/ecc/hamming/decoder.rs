//! Syndrome decoding and single-bit correction.
//!
//! The syndrome is built additively: every parity group whose stored bit
//! disagrees with the recomputed parity contributes its identifier (`p + 1`) to
//! a running sum. A single flipped bit at 0-indexed position `i` trips exactly the
//! groups whose identifiers add up to `i + 1`, so the sum names the culprit.
//!
//! # Limitations
//!
//! Two or more flipped bits are neither corrected nor reliably detected. The sum
//! may point at an innocent bit, which is then flipped, or past the end of the
//! word, which is reported as [`Correction::OutOfRange`]. A clean syndrome only
//! means that no group disagrees; it does not prove the word is intact.

use std::fmt::{Display, Formatter};

use bitvec::prelude::*;

use super::codeword::Codeword;
use super::coverage::CoverageMap;

/// Sum of the identifiers of every parity group that failed its check.
///
/// Zero means no group failed. Otherwise `value() - 1` is the 0-indexed position
/// believed to be corrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Syndrome(usize);

impl Syndrome {
    /// Syndrome of a word whose parity groups all check out.
    pub const CLEAN: Syndrome = Syndrome(0);

    /// Raw sum of the failed group identifiers.
    pub fn value(self) -> usize {
        self.0
    }

    /// Whether every parity group checked out.
    pub fn is_clean(self) -> bool {
        self.0 == 0
    }

    /// 0-indexed position of the suspected bit, `None` when clean.
    pub fn position(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl Display for Syndrome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What [`correct_with_report`] did to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Correction {
    /// Every parity group checked out; nothing was changed.
    Clean,
    /// The bit at this 0-indexed position was flipped back.
    Corrected(usize),
    /// The syndrome pointed past the end of the word. At least two bits are
    /// damaged and the word was left as it was.
    OutOfRange(Syndrome),
}

impl Correction {
    /// Whether the word was left untouched.
    pub fn is_unchanged(&self) -> bool {
        !matches!(self, Correction::Corrected(_))
    }
}

/// Computes the syndrome of `word`.
pub fn syndrome(word: &Codeword) -> Syndrome {
    syndrome_with(word, &CoverageMap::new(word.len()))
}

pub(crate) fn syndrome_with(word: &Codeword, coverage: &CoverageMap) -> Syndrome {
    debug_assert_eq!(coverage.total_bits(), word.len());

    // Groups are visited in ascending parity position.
    let mut sum = 0;
    for group in coverage {
        let stored = word.get(group.parity_position()).unwrap_or(false);
        if word.expected_parity(group) != stored {
            sum += group.identifier();
        }
    }
    Syndrome(sum)
}

/// Returns a copy of `word` with the bit named by its syndrome flipped back.
///
/// A clean word, or one whose syndrome points past its end, comes back
/// unchanged. The input is never modified.
///
/// # Arguments
///
/// * `word` - Received codeword, possibly damaged
///
/// # Returns
///
/// The repaired copy; correct only if at most one bit was damaged
pub fn correct(word: &Codeword) -> Codeword {
    correct_with_report(word).0
}

/// Like [`correct`], also reporting what was done.
pub fn correct_with_report(word: &Codeword) -> (Codeword, Correction) {
    correct_with(word, &CoverageMap::new(word.len()))
}

pub(crate) fn correct_with(word: &Codeword, coverage: &CoverageMap) -> (Codeword, Correction) {
    let syndrome = syndrome_with(word, coverage);
    match syndrome.position() {
        None => (word.clone(), Correction::Clean),
        Some(position) => match word.with_flipped(position) {
            Ok(fixed) => (fixed, Correction::Corrected(position)),
            Err(_) => (word.clone(), Correction::OutOfRange(syndrome)),
        },
    }
}

/// Data bits of `word` in ascending position order.
pub fn extract_data(word: &Codeword) -> BitVec<u8, Msb0> {
    word.data_bits().collect()
}

/// Separates `word` into its data bits and its parity bits, each in ascending
/// position order.
pub fn split(word: &Codeword) -> (BitVec<u8, Msb0>, BitVec<u8, Msb0>) {
    (word.data_bits().collect(), word.parity_bits().collect())
}
