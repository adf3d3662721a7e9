//! Substitution boxes and the derived lookup tables.
//!
//! The governing standard treats the eight 4-bit substitution boxes as a
//! parameter of the network being set up; the set used here is the
//! illustrative one from the classic public-domain implementation (the first
//! rows of the eight DES S-boxes, little-endian numbered, so `K8` is S-box 1).
//!
//! All tables are built in `const fn`s at compile time, so there is no mutable
//! process-wide state and nothing to initialize before first use from any
//! number of threads.

const K8: [u8; 16] = [14, 4, 13, 1, 2, 15, 11, 8, 3, 10, 6, 12, 5, 9, 0, 7];
const K7: [u8; 16] = [15, 1, 8, 14, 6, 11, 3, 4, 9, 7, 2, 13, 12, 0, 5, 10];
const K6: [u8; 16] = [10, 0, 9, 14, 6, 3, 15, 5, 1, 13, 12, 7, 11, 4, 2, 8];
const K5: [u8; 16] = [7, 13, 14, 3, 0, 6, 9, 10, 1, 2, 8, 5, 11, 12, 4, 15];
const K4: [u8; 16] = [2, 12, 4, 1, 7, 10, 11, 6, 8, 5, 3, 15, 13, 0, 14, 9];
const K3: [u8; 16] = [12, 1, 10, 15, 9, 2, 6, 8, 0, 13, 3, 4, 14, 7, 5, 11];
const K2: [u8; 16] = [4, 11, 2, 14, 15, 0, 8, 13, 3, 12, 9, 7, 5, 10, 6, 1];
const K1: [u8; 16] = [13, 2, 8, 4, 6, 15, 11, 1, 10, 9, 3, 14, 5, 0, 12, 7];

/// The eight boxes indexed by nibble position, lowest nibble first.
pub(crate) const SBOXES: [[u8; 16]; 8] = [K1, K2, K3, K4, K5, K6, K7, K8];

/// Combine two nibble boxes into one byte-at-a-time substitution table.
const fn build_pair(hi: &[u8; 16], lo: &[u8; 16]) -> [u8; 256] {
    let mut out = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        out[i] = hi[i >> 4] << 4 | lo[i & 15];
        i += 1;
    }
    out
}

const S87: [u8; 256] = build_pair(&K8, &K7);
const S65: [u8; 256] = build_pair(&K6, &K5);
const S43: [u8; 256] = build_pair(&K4, &K3);
const S21: [u8; 256] = build_pair(&K2, &K1);

/// Build the four pre-rotated tables: entry `i` places the substituted byte at
/// its position in an otherwise-zero word and rotates the whole word left by
/// 11 bits.  "Substitute four bytes, rotate by 11" then collapses into four
/// lookups and three XORs with no runtime shifting.
const fn build_ftab() -> [[u32; 256]; 4] {
    let mut out = [[0u32; 256]; 4];
    let mut i = 0;
    while i < 256 {
        out[0][i] = ((S87[i] as u32) << 24).rotate_left(11);
        out[1][i] = ((S65[i] as u32) << 16).rotate_left(11);
        out[2][i] = ((S43[i] as u32) << 8).rotate_left(11);
        out[3][i] = (S21[i] as u32).rotate_left(11);
        i += 1;
    }
    out
}

pub(crate) const FTAB: [[u32; 256]; 4] = build_ftab();

/// The round function using the pre-rotated tables.
#[inline(always)]
pub(crate) fn f_fast(x: u32) -> u32 {
    FTAB[0][(x >> 24) as usize]
        ^ FTAB[1][(x >> 16 & 255) as usize]
        ^ FTAB[2][(x >> 8 & 255) as usize]
        ^ FTAB[3][(x & 255) as usize]
}

/// Reference round function: substitute nibble by nibble straight out of the
/// boxes, then rotate.  Bit-identical to [`f_fast`] for every input; it exists
/// so the table construction itself stays testable.
#[inline]
pub(crate) fn f_reference(x: u32) -> u32 {
    let mut s = 0u32;
    let mut i = 0;
    while i < 8 {
        let nibble = (x >> (4 * i) & 15) as usize;
        s |= (SBOXES[i][nibble] as u32) << (4 * i);
        i += 1;
    }
    s.rotate_left(11)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_matches_reference() {
        // Sweep a spread of inputs including every byte value in every lane.
        for i in 0..=255u32 {
            let x = i | i << 8 | i << 16 | i << 24;
            assert_eq!(f_fast(x), f_reference(x), "x = {x:#010x}");
        }
        let mut x = 0x9E3779B9u32;
        for _ in 0..4096 {
            assert_eq!(f_fast(x), f_reference(x), "x = {x:#010x}");
            x = x.wrapping_mul(0x0019660D).wrapping_add(0x3C6EF35F);
        }
    }

    #[test]
    fn boxes_are_bijections() {
        for sbox in SBOXES {
            let mut seen = [false; 16];
            for v in sbox {
                assert!(!seen[v as usize]);
                seen[v as usize] = true;
            }
        }
    }
}
