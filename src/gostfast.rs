use rayon::prelude::*;
use std::cmp::min;

use crate::bitslice;
use crate::tables::{f_fast, f_reference};

/// One 64-bit block as two 32-bit halves `(n1, n2)`, little-endian numbered.
pub type Block = [u32; 2];

/// The 256-bit key as eight 32-bit words.
pub type Key = [u32; 8];

/// Largest lane count the table batch path is compiled for. Must be a power
/// of 2; the dispatch match below covers up to 64.
const MAX_LANES: usize = 64;

/// Blocks handed to one rayon task by the `_par` entry points.
const PAR_CHUNK: usize = 512;

/// An ordered key-word selection plus the output convention after the last
/// round.  Encrypt, decrypt and the truncated MAC pass are three values fed
/// to one generic round runner.
pub(crate) struct Schedule {
    pub keys: &'static [usize],
    pub swap_after: bool,
}

/// Three forward key passes, then one reverse pass. No swap after the last
/// round: the output is `(n2, n1)`.
pub(crate) const ENCRYPT: Schedule = Schedule {
    keys: &[
        0, 1, 2, 3, 4, 5, 6, 7, //
        0, 1, 2, 3, 4, 5, 6, 7, //
        0, 1, 2, 3, 4, 5, 6, 7, //
        7, 6, 5, 4, 3, 2, 1, 0,
    ],
    swap_after: false,
};

/// Exact mirror of [`ENCRYPT`]: one forward pass, then three reverse passes.
pub(crate) const DECRYPT: Schedule = Schedule {
    keys: &[
        0, 1, 2, 3, 4, 5, 6, 7, //
        7, 6, 5, 4, 3, 2, 1, 0, //
        7, 6, 5, 4, 3, 2, 1, 0, //
        7, 6, 5, 4, 3, 2, 1, 0,
    ],
    swap_after: false,
};

/// The first half of the encrypt schedule (16 rounds), with the half-swap the
/// full cipher omits.  Used only by the MAC.
pub(crate) const MAC16: Schedule = Schedule {
    keys: &[
        0, 1, 2, 3, 4, 5, 6, 7, //
        0, 1, 2, 3, 4, 5, 6, 7,
    ],
    swap_after: true,
};

/// How the substitution step is evaluated.  Picked once when the engine is
/// built, never per round; every strategy produces bit-identical output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Nibble-at-a-time substitution straight out of the boxes.  Slow; kept
    /// as the baseline the fast paths are checked against.
    Reference,
    /// Pre-rotated 256-entry lookup tables, batched across const-generic
    /// lanes so the compiler can keep the adds and XORs in vector registers.
    #[default]
    Table,
    /// Boxes evaluated as XORs of AND-monomials (algebraic normal form) over
    /// 64-block bit-planes.  More boolean work than the table path but no
    /// data-dependent memory addressing.
    Bitsliced,
}

impl Strategy {
    /// One-time probe for the preferred backend on this host.
    ///
    /// Every backend here is portable Rust, and the table path has been the
    /// fastest on all tested targets, so the probe settles on it.  The
    /// bitsliced path is worth selecting explicitly where address-dependent
    /// timing variation matters more than raw throughput.
    pub fn detect() -> Self {
        Strategy::Table
    }
}

/// The GOST 28147-89 engine: a 256-bit key and the substitution strategy.
///
/// All lookup tables are `const`-built, so construction does no global setup
/// and instances are freely shared across threads.  Mode and MAC state never
/// lives in the engine; callers own it across a stream or message.
#[derive(Clone, Debug)]
pub struct Gost {
    key: Key,
    strategy: Strategy,
}

/// Advance a block through a schedule.  The round step is
/// `other ^= f(self + key[k])` with wraparound addition, the two halves
/// trading roles every round; instead of swapping data the names rotate, so
/// `a` is always the half about to feed `f`.
#[inline(always)]
fn run_rounds(f: impl Fn(u32) -> u32, key: &Key, block: Block, sched: &Schedule) -> Block {
    let (mut a, mut b) = (block[0], block[1]);
    for &k in sched.keys {
        let t = b ^ f(a.wrapping_add(key[k]));
        b = a;
        a = t;
    }
    if sched.swap_after {
        [a, b]
    } else {
        [b, a]
    }
}

impl Gost {
    /// Create an engine with the backend chosen by [`Strategy::detect`].
    pub fn new(key: Key) -> Self {
        Self::with_strategy(key, Strategy::detect())
    }

    /// Create an engine with an explicit backend.
    pub fn with_strategy(key: Key, strategy: Strategy) -> Self {
        Gost { key, strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub(crate) fn run_block(&self, block: Block, sched: &Schedule) -> Block {
        match self.strategy {
            Strategy::Reference => run_rounds(f_reference, &self.key, block, sched),
            // A lone block gains nothing from bit-planes; the table round
            // function is the scalar fallback for both fast strategies.
            Strategy::Table | Strategy::Bitsliced => {
                run_rounds(f_fast, &self.key, block, sched)
            }
        }
    }

    /// Encrypt one 64-bit block.
    pub fn encrypt_block(&self, block: Block) -> Block {
        self.run_block(block, &ENCRYPT)
    }

    /// Decrypt one 64-bit block.
    pub fn decrypt_block(&self, block: Block) -> Block {
        self.run_block(block, &DECRYPT)
    }

    /// Encrypt independent blocks in place.  Output is block-for-block
    /// identical to calling [`Gost::encrypt_block`] on each; the blocks only
    /// share a schedule position, never data, which is what makes the lane
    /// and bit-plane groupings valid.
    pub fn encrypt_blocks(&self, blocks: &mut [Block]) {
        self.run_blocks(blocks, &ENCRYPT);
    }

    /// Decrypt independent blocks in place.
    pub fn decrypt_blocks(&self, blocks: &mut [Block]) {
        self.run_blocks(blocks, &DECRYPT);
    }

    /// Encrypt independent blocks in place, splitting the batch across the
    /// rayon thread pool in [`PAR_CHUNK`]-block chunks.
    pub fn encrypt_blocks_par(&self, blocks: &mut [Block]) {
        self.run_blocks_par(blocks, &ENCRYPT);
    }

    /// Decrypt independent blocks in place across the rayon thread pool.
    pub fn decrypt_blocks_par(&self, blocks: &mut [Block]) {
        self.run_blocks_par(blocks, &DECRYPT);
    }

    fn run_blocks(&self, blocks: &mut [Block], sched: &Schedule) {
        match self.strategy {
            Strategy::Reference => {
                for block in blocks.iter_mut() {
                    *block = run_rounds(f_reference, &self.key, *block, sched);
                }
            }
            Strategy::Table => self.dispatch_lanes(blocks, sched),
            Strategy::Bitsliced => {
                let full = blocks.len() - blocks.len() % bitslice::GROUP;
                let (head, tail) = blocks.split_at_mut(full);
                for group in head.chunks_exact_mut(bitslice::GROUP) {
                    bitslice::run_group(&self.key, group, sched);
                }
                // Partial groups go through the scalar engine.
                for block in tail.iter_mut() {
                    *block = run_rounds(f_fast, &self.key, *block, sched);
                }
            }
        }
    }

    fn run_blocks_par(&self, blocks: &mut [Block], sched: &Schedule) {
        let full = (blocks.len() / PAR_CHUNK) * PAR_CHUNK;
        let (head, tail) = blocks.split_at_mut(full);
        head.par_chunks_exact_mut(PAR_CHUNK)
            .for_each(|chunk| self.run_blocks(chunk, sched));
        if !tail.is_empty() {
            self.run_blocks(tail, sched);
        }
    }

    /// Pick the widest compiled lane count that fits the batch, process the
    /// exact multiple, then redispatch the tail at a narrower width.
    fn dispatch_lanes(&self, blocks: &mut [Block], sched: &Schedule) {
        if blocks.is_empty() {
            return;
        }
        let lanes = min(1usize << blocks.len().ilog2(), MAX_LANES);
        match lanes.ilog2() {
            0 => self.process_lanes::<1>(blocks, sched),
            1 => self.process_lanes::<2>(blocks, sched),
            2 => self.process_lanes::<4>(blocks, sched),
            3 => self.process_lanes::<8>(blocks, sched),
            4 => self.process_lanes::<16>(blocks, sched),
            5 => self.process_lanes::<32>(blocks, sched),
            6 => self.process_lanes::<64>(blocks, sched),
            _ => unreachable!("lane exponent is bounded by MAX_LANES"),
        }
    }

    fn process_lanes<const B: usize>(&self, blocks: &mut [Block], sched: &Schedule) {
        let full = (blocks.len() / B) * B;
        let (head, tail) = blocks.split_at_mut(full);
        head.chunks_exact_mut(B)
            .for_each(|group| self.run_lane_group::<B>(group, sched));
        if !tail.is_empty() {
            self.dispatch_lanes(tail, sched);
        }
    }

    /// Advance `B` blocks in lockstep: one key word is added and looked up
    /// across every lane before the schedule moves on.  The fixed `B` lets
    /// the compiler keep the adds and XORs vectorized around the scalar
    /// table loads.
    fn run_lane_group<const B: usize>(&self, blocks: &mut [Block], sched: &Schedule) {
        // Lets the compiler drop all bounds checks in the round loop.
        assert!(blocks.len() == B);

        let mut a = [0u32; B];
        let mut b = [0u32; B];
        for i in 0..B {
            a[i] = blocks[i][0];
            b[i] = blocks[i][1];
        }

        for &k in sched.keys {
            let kw = self.key[k];
            for i in 0..B {
                let t = b[i] ^ f_fast(a[i].wrapping_add(kw));
                b[i] = a[i];
                a[i] = t;
            }
        }

        for i in 0..B {
            blocks[i] = if sched.swap_after {
                [a[i], b[i]]
            } else {
                [b[i], a[i]]
            };
        }
    }
}
