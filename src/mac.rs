//! Truncated-round message authentication code.
//!
//! Each block is merged into the running accumulator (`n1` XORed, `n2`
//! replaced) and then run through half the encrypt schedule, 16 rounds, with
//! the half-swap the full cipher omits.  The merge-before-rounds ordering
//! gives CBC-like chaining: the tag depends on every earlier block and on
//! block order.

use crate::gostfast::{Block, Gost, MAC16};

impl Gost {
    /// Compute the MAC over `data`, a sequence of whole 64-bit blocks.
    ///
    /// Padding policy is the caller's: a short final block must be
    /// zero-padded to 64 bits before it is handed in.
    ///
    /// # Panics
    /// Panics if `data.len()` is odd.
    pub fn mac(&self, data: &[u32]) -> Block {
        assert!(data.len() % 2 == 0, "MAC data must be whole 64-bit blocks");

        let mut acc: Block = [0, 0];
        for chunk in data.chunks_exact(2) {
            acc[0] ^= chunk[0];
            acc[1] = chunk[1];
            acc = self.run_block(acc, &MAC16);
        }
        acc
    }
}
