// std
use std::collections::HashMap;
// crates
use sha2::{Digest, Sha256};
// internal
use crate::node_id::NodeId;
use crate::params::{self, CUSTODY_REQUIREMENT, NUM_OF_COLUMNS};
use crate::CustodyError;

/// Deterministic word stream derived from a node id.
///
/// Blocks are `sha256(node_id || counter)` with the counter encoded as 8
/// little-endian bytes, consumed as consecutive little-endian `u64` words.
/// A cursor serves exactly one sampling call and is then discarded.
struct DrawCursor<'a> {
    node_id: &'a NodeId,
    counter: u64,
    block: [u8; 32],
    offset: usize,
}

impl<'a> DrawCursor<'a> {
    fn new(node_id: &'a NodeId) -> Self {
        Self {
            node_id,
            counter: 0,
            block: [0u8; 32],
            offset: 32,
        }
    }

    fn next_word(&mut self) -> u64 {
        if self.offset >= self.block.len() {
            let mut hasher = Sha256::new();
            hasher.update(self.node_id.as_bytes());
            hasher.update(self.counter.to_le_bytes());
            self.block = hasher.finalize().into();
            self.counter += 1;
            self.offset = 0;
        }
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&self.block[self.offset..self.offset + 8]);
        self.offset += 8;
        u64::from_le_bytes(chunk)
    }

    /// Uniform draw in `[0, bound)`. Words falling in the incomplete final
    /// multiple of `bound` at the top of the 64-bit range are rejected and
    /// redrawn; a bare modulo there would bias low values.
    fn next_bounded(&mut self, bound: u64) -> u64 {
        let zone = (1u128 << 64) - ((1u128 << 64) % u128::from(bound));
        loop {
            let word = self.next_word();
            if u128::from(word) < zone {
                return word % bound;
            }
            tracing::trace!(word, bound, "rejecting draw in biased tail");
        }
    }
}

/// Computes the custody subnets a node is responsible for, as a sorted,
/// duplicate-free list of [`CUSTODY_REQUIREMENT`] indices drawn without
/// replacement from `[0, subnet_count)`.
///
/// The draw is a Fisher-Yates swap-to-end over the conceptual array
/// `[0, subnet_count)`, seeded by the node id's hash stream. Only displaced
/// slots are tracked, so the full array is never materialized.
pub fn compute_custody_subnets(
    node_id: &NodeId,
    subnet_count: u32,
) -> Result<Vec<u32>, CustodyError> {
    params::validate_subnet_count(subnet_count, NUM_OF_COLUMNS)?;

    let draws = CUSTODY_REQUIREMENT.min(subnet_count);
    let mut cursor = DrawCursor::new(node_id);
    let mut slots: HashMap<u64, u64> = HashMap::with_capacity(draws as usize);
    let mut subnets = Vec::with_capacity(draws as usize);

    let subnet_count = u64::from(subnet_count);
    for drawn in 0..u64::from(draws) {
        let remaining = subnet_count - drawn;
        let slot = cursor.next_bounded(remaining);
        let selected = slots.get(&slot).copied().unwrap_or(slot);
        // retire the tail slot into the one just emptied
        let tail = remaining - 1;
        let displaced = slots.remove(&tail).unwrap_or(tail);
        slots.insert(slot, displaced);
        subnets.push(selected as u32);
    }

    subnets.sort_unstable();
    tracing::trace!(%node_id, ?subnets, "computed custody subnets");
    Ok(subnets)
}
