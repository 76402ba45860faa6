//! Per-tick processed-cell mask
//!
//! A grid-sized bitset recording which cells have already settled
//! (reacted or moved) during the current tick. Movement rules consult
//! it before claiming a destination, which prevents a cell from being
//! moved twice or teleporting through a position vacated in the same
//! tick. Cleared at tick start; carries no cross-tick state.

pub struct ProcessedMask {
    words: Vec<u64>,
    len: usize,
}

impl ProcessedMask {
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; (len + 63) / 64],
            len,
        }
    }

    #[inline]
    pub fn insert(&mut self, idx: usize) {
        debug_assert!(idx < self.len);
        self.words[idx >> 6] |= 1u64 << (idx & 63);
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        idx < self.len && (self.words[idx >> 6] >> (idx & 63)) & 1 != 0
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }
}
