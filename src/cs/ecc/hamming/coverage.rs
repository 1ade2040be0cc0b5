//! Parity coverage groups.
//!
//! The parity bit at 0-indexed position `p` enforces even parity over every
//! position `i` whose 1-indexed value `i + 1` has the `p + 1` bit set. Walking the
//! codeword, that is a run of `p + 1` positions starting at `p`, a gap of `p + 1`
//! positions, another run, and so on to the end of the word.

use super::bit_index::parity_positions;

/// The positions checked by one parity bit, including the parity bit itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoverageGroup {
    parity: usize,
    positions: Vec<usize>,
}

impl CoverageGroup {
    fn new(parity: usize, total_bits: usize) -> Self {
        let run = parity + 1;
        let positions = (parity..total_bits)
            .step_by(2 * run)
            .flat_map(|start| start..(start + run).min(total_bits))
            .collect();
        Self { parity, positions }
    }

    /// 0-indexed position of the parity bit.
    pub fn parity_position(&self) -> usize {
        self.parity
    }

    /// 1-indexed identifier of the group; a power of two.
    pub fn identifier(&self) -> usize {
        self.parity + 1
    }

    /// Every covered position in ascending order, the parity position first.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Covered positions other than the parity bit itself.
    pub fn checked_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied().filter(move |&p| p != self.parity)
    }

    /// Whether `position` belongs to this group.
    pub fn covers(&self, position: usize) -> bool {
        self.positions.binary_search(&position).is_ok()
    }
}

/// Coverage groups of every parity bit in a codeword of fixed length.
///
/// The map depends on the codeword length only, never on bit values, so one
/// instance can be built per block length and shared read-only between blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoverageMap {
    total_bits: usize,
    groups: Vec<CoverageGroup>,
}

impl CoverageMap {
    /// Builds the coverage groups for a codeword of `total_bits` bits.
    pub fn new(total_bits: usize) -> Self {
        let groups = parity_positions(total_bits)
            .map(|p| CoverageGroup::new(p, total_bits))
            .collect();
        Self { total_bits, groups }
    }

    /// Length of the codeword this map describes.
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Groups ordered by ascending parity position.
    pub fn groups(&self) -> &[CoverageGroup] {
        &self.groups
    }

    /// Group owned by the parity bit at `parity_position`, if there is one.
    pub fn get(&self, parity_position: usize) -> Option<&CoverageGroup> {
        self.groups
            .iter()
            .find(|g| g.parity_position() == parity_position)
    }

    /// Groups that check `position`, ascending.
    pub fn covering(&self, position: usize) -> impl Iterator<Item = &CoverageGroup> + '_ {
        self.groups.iter().filter(move |g| g.covers(position))
    }

    /// Number of parity bits.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the codeword is too short to hold any parity bit.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a CoverageMap {
    type Item = &'a CoverageGroup;
    type IntoIter = std::slice::Iter<'a, CoverageGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Coverage groups for a codeword of `total_bits` bits.
pub fn coverage_for(total_bits: usize) -> CoverageMap {
    CoverageMap::new(total_bits)
}
