//! # Gostfast
//!
//! A high-performance implementation of the GOST 28147-89 block cipher,
//! structured for AVX2/AVX-512/NEON auto-vectorization, with OFB and CFB
//! chaining modes and the standard's truncated-round MAC.
//!
//! ## Execution strategies
//! The substitution step can run three ways, chosen once when the engine is
//! built and guaranteed bit-identical:
//! * **Reference**: nibble-at-a-time substitution straight out of the eight
//!   boxes. The baseline everything else is checked against.
//! * **Table** (default): four pre-rotated 256-entry tables collapse each
//!   round into four lookups and three XORs. Batches run in const-generic
//!   lane groups so the adds and XORs stay in vector registers.
//! * **Bitsliced**: the boxes evaluated in algebraic normal form over
//!   64-block bit-planes. Slower than the tables, but no data-dependent
//!   memory addressing anywhere in the round.
//!
//! Batch calls of any length are valid: whatever does not fill a lane group
//! falls back to the scalar path with identical output.
//!
//! ## Parallelism
//! `encrypt_blocks_par`/`decrypt_blocks_par` split large batches across the
//! rayon thread pool. Blocks in a batch share no state, so any partition is
//! sound. Mode and MAC state is inherently sequential per stream and is owned
//! by the caller; independent streams parallelize freely.
//!
//! ## Preconditions
//! Blocks are two 32-bit words and keys are eight; slice entry points demand
//! even word counts and panic otherwise. There is no padding, no
//! authenticated composition, and no claim about the strength of the
//! illustrative substitution boxes, which the standard leaves as a parameter
//! of the cipher instance.
//!
//! ## Examples
//!
//! ```rust
//! use gostfast::Gost;
//!
//! let key = [0u32; 8];
//! let gost = Gost::new(key);
//!
//! let block = gost.encrypt_block([0, 0]);
//! assert_eq!(block, [0xE72B17D7, 0x02F122C0]);
//! assert_eq!(gost.decrypt_block(block), [0, 0]);
//! ```

mod bitslice;
pub mod gostfast;
mod mac;
mod modes;
mod tables;

pub use gostfast::{Block, Gost, Key, Strategy};

/// Encrypt a single block under `key`. One-shot form of
/// [`Gost::encrypt_block`].
pub fn encrypt(block: Block, key: Key) -> Block {
    Gost::new(key).encrypt_block(block)
}

/// Decrypt a single block under `key`.
pub fn decrypt(block: Block, key: Key) -> Block {
    Gost::new(key).decrypt_block(block)
}

/// Encrypt many independent blocks; elementwise equal to [`encrypt`].
pub fn encrypt_many(blocks: &[Block], key: Key) -> Vec<Block> {
    let mut out = blocks.to_vec();
    Gost::new(key).encrypt_blocks(&mut out);
    out
}

/// Apply the OFB keystream for `key`/`iv` to `data` in place; self-inverse.
pub fn ofb_apply(data: &mut [u32], iv: Block, key: Key) {
    Gost::new(key).ofb_apply(data, iv);
}

/// CFB-encrypt `data` in place, updating the feedback register in `iv`.
pub fn cfb_encrypt(data: &mut [u32], iv: &mut Block, key: Key) {
    Gost::new(key).cfb_encrypt(data, iv);
}

/// CFB-decrypt `data` in place, updating the feedback register in `iv`.
pub fn cfb_decrypt(data: &mut [u32], iv: &mut Block, key: Key) {
    Gost::new(key).cfb_decrypt(data, iv);
}

/// MAC over whole 64-bit blocks; the caller zero-pads any short final block.
pub fn mac(data: &[u32], key: Key) -> Block {
    Gost::new(key).mac(data)
}
