//! Bitsliced backend: 64 blocks advance together as 64-bit bit-planes.
//!
//! Each substitution box is evaluated as its algebraic normal form, an XOR of
//! AND-monomials over the four input bits, so a round is nothing but bitwise
//! operations on the planes.  The wraparound key addition becomes a
//! ripple-carry adder against a constant, and the rotate-left-11 is a free
//! renaming of plane indices.  No table is addressed with secret-dependent
//! data anywhere on this path.

use crate::gostfast::{Block, Key, Schedule};
use crate::tables::SBOXES;

/// Blocks per bit-plane group: one per bit of the `u64` plane word.
pub(crate) const GROUP: usize = 64;

/// ANF masks for one box: `masks[j]` has bit `m` set when the monomial that
/// ANDs together the input bits selected by `m` contributes to output bit
/// `j`.  Bit 0 is the constant term.
const fn anf_masks(sbox: &[u8; 16]) -> [u16; 4] {
    // Binary Möbius transform of the truth table.
    let mut coef = *sbox;
    let mut i = 0;
    while i < 4 {
        let mut x = 0;
        while x < 16 {
            if x & (1 << i) != 0 {
                coef[x] ^= coef[x ^ (1 << i)];
            }
            x += 1;
        }
        i += 1;
    }
    let mut masks = [0u16; 4];
    let mut j = 0;
    while j < 4 {
        let mut x = 0;
        while x < 16 {
            if coef[x] >> j & 1 == 1 {
                masks[j] |= 1u16 << x;
            }
            x += 1;
        }
        j += 1;
    }
    masks
}

const fn build_anf() -> [[u16; 4]; 8] {
    let mut out = [[0u16; 4]; 8];
    let mut s = 0;
    while s < 8 {
        out[s] = anf_masks(&SBOXES[s]);
        s += 1;
    }
    out
}

/// Per-box ANF masks, indexed by nibble position, lowest first.
const ANF: [[u16; 4]; 8] = build_anf();

/// Add a constant key word to 32 bit-planes with a ripple-carry chain.
#[inline(always)]
fn add_key(a: &[u64; 32], kw: u32) -> [u64; 32] {
    let mut sum = [0u64; 32];
    let mut carry = 0u64;
    for bit in 0..32 {
        let x = a[bit];
        let k = if kw >> bit & 1 == 1 { !0u64 } else { 0 };
        sum[bit] = x ^ k ^ carry;
        carry = (x & k) | (carry & (x ^ k));
    }
    sum
}

/// The round function on bit-planes: ANF substitution per nibble, with the
/// rotation folded into where each output plane lands.
#[inline(always)]
fn f_planes(x: &[u64; 32]) -> [u64; 32] {
    let mut out = [0u64; 32];
    for (s, masks) in ANF.iter().enumerate() {
        let p = 4 * s;
        let inputs = [x[p], x[p + 1], x[p + 2], x[p + 3]];

        // All 16 monomials over this nibble's planes; index m ANDs together
        // the planes selected by the bits of m.
        let mut mono = [0u64; 16];
        for (m, slot) in mono.iter_mut().enumerate() {
            let mut v = !0u64;
            for (i, plane) in inputs.iter().enumerate() {
                if m >> i & 1 == 1 {
                    v &= *plane;
                }
            }
            *slot = v;
        }

        for (j, &mask) in masks.iter().enumerate() {
            let mut acc = 0u64;
            for (m, &v) in mono.iter().enumerate() {
                if mask >> m & 1 == 1 {
                    acc ^= v;
                }
            }
            out[(p + j + 11) % 32] ^= acc;
        }
    }
    out
}

/// Advance one full group of 64 blocks through a schedule.
///
/// # Panics
/// Panics if `blocks.len() != 64`.
pub(crate) fn run_group(key: &Key, blocks: &mut [Block], sched: &Schedule) {
    assert!(blocks.len() == GROUP);

    // Transpose into planes: bit i of plane word = that bit of block i.
    let mut a = [0u64; 32];
    let mut b = [0u64; 32];
    for (i, block) in blocks.iter().enumerate() {
        for bit in 0..32 {
            a[bit] |= ((block[0] >> bit & 1) as u64) << i;
            b[bit] |= ((block[1] >> bit & 1) as u64) << i;
        }
    }

    for &k in sched.keys {
        let f = f_planes(&add_key(&a, key[k]));
        for bit in 0..32 {
            b[bit] ^= f[bit];
        }
        std::mem::swap(&mut a, &mut b);
    }

    let (out0, out1) = if sched.swap_after { (a, b) } else { (b, a) };
    for (i, block) in blocks.iter_mut().enumerate() {
        let mut n0 = 0u32;
        let mut n1 = 0u32;
        for bit in 0..32 {
            n0 |= ((out0[bit] >> i & 1) as u32) << bit;
            n1 |= ((out1[bit] >> i & 1) as u32) << bit;
        }
        *block = [n0, n1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::f_reference;

    /// Evaluate one box through its ANF masks, scalar, and compare with the
    /// truth table.
    #[test]
    fn anf_matches_truth_tables() {
        for (s, sbox) in SBOXES.iter().enumerate() {
            for x in 0..16u16 {
                let mut y = 0u8;
                for (j, &mask) in ANF[s].iter().enumerate() {
                    let mut bit = 0u16;
                    for m in 0..16u16 {
                        // Monomial m evaluates to 1 iff m's bits are all set in x.
                        if mask >> m & 1 == 1 && x & m == m {
                            bit ^= 1;
                        }
                    }
                    y |= (bit as u8) << j;
                }
                assert_eq!(y, sbox[x as usize], "box {s}, input {x}");
            }
        }
    }

    #[test]
    fn planes_match_scalar_round_function() {
        // Drive f_planes with 64 distinct words and check each lane against
        // the scalar reference, rotation included.
        let mut words = [0u32; GROUP];
        let mut x = 0xDEADBEEFu32;
        for w in words.iter_mut() {
            *w = x;
            x = x.wrapping_mul(0x0019660D).wrapping_add(0x3C6EF35F);
        }

        let mut planes = [0u64; 32];
        for (i, w) in words.iter().enumerate() {
            for bit in 0..32 {
                planes[bit] |= ((w >> bit & 1) as u64) << i;
            }
        }
        let out = f_planes(&planes);

        for (i, w) in words.iter().enumerate() {
            let mut y = 0u32;
            for bit in 0..32 {
                y |= ((out[bit] >> i & 1) as u32) << bit;
            }
            assert_eq!(y, f_reference(*w), "lane {i}");
        }
    }
}
