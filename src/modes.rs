//! Chaining modes: OFB keystream generation and self-synchronizing CFB.
//!
//! Both operate in place on whole 64-bit blocks held as pairs of words.  The
//! running state (counter or feedback register) belongs to the caller for the
//! lifetime of a stream; it is not part of the key and never lives in the
//! engine.

use crate::gostfast::{Block, Gost};

/// Per-block increment for the low counter half.
const OFB_C1: u32 = 0x0101_0101;
/// Per-block increment for the high counter half.
const OFB_C2: u32 = 0x0101_0104;

/// Advance one counter half by its constant modulo 2^32 - 1, in the
/// representation where zero is disallowed: after wraparound addition, a
/// result below the constant means the add wrapped (or landed exactly on
/// zero) and is bumped by one.  Interoperability depends on this exact rule.
#[inline]
fn advance(half: u32, constant: u32) -> u32 {
    let sum = half.wrapping_add(constant);
    if sum < constant {
        sum + 1
    } else {
        sum
    }
}

impl Gost {
    /// Apply the OFB keystream to `data` in place.
    ///
    /// The counter is seeded by encrypting `iv`; each block the halves are
    /// advanced by their constants, the counter is encrypted into a gamma
    /// block, and the gamma is XORed into the next two words.  The routine is
    /// its own inverse: run it again from the same `iv` to decrypt.
    ///
    /// # Panics
    /// Panics if `data.len()` is odd.
    pub fn ofb_apply(&self, data: &mut [u32], iv: Block) {
        assert!(data.len() % 2 == 0, "OFB data must be whole 64-bit blocks");

        let mut counter = self.encrypt_block(iv);
        for chunk in data.chunks_exact_mut(2) {
            counter[0] = advance(counter[0], OFB_C1);
            counter[1] = advance(counter[1], OFB_C2);
            let gamma = self.encrypt_block(counter);
            chunk[0] ^= gamma[0];
            chunk[1] ^= gamma[1];
        }
    }

    /// CFB-encrypt `data` in place. `iv` is the running feedback register:
    /// it enters as the previous ciphertext block (or the start value) and
    /// leaves as the last ciphertext block written, so a long stream may be
    /// fed through repeated calls.
    ///
    /// # Panics
    /// Panics if `data.len()` is odd.
    pub fn cfb_encrypt(&self, data: &mut [u32], iv: &mut Block) {
        assert!(data.len() % 2 == 0, "CFB data must be whole 64-bit blocks");

        for chunk in data.chunks_exact_mut(2) {
            let mask = self.encrypt_block(*iv);
            chunk[0] ^= mask[0];
            chunk[1] ^= mask[1];
            *iv = [chunk[0], chunk[1]];
        }
    }

    /// CFB-decrypt `data` in place, updating the feedback register in `iv`.
    ///
    /// The received ciphertext is captured before the buffer is overwritten
    /// with plaintext; feeding back the decrypted words instead would
    /// desynchronize every later block.
    ///
    /// # Panics
    /// Panics if `data.len()` is odd.
    pub fn cfb_decrypt(&self, data: &mut [u32], iv: &mut Block) {
        assert!(data.len() % 2 == 0, "CFB data must be whole 64-bit blocks");

        for chunk in data.chunks_exact_mut(2) {
            let mask = self.encrypt_block(*iv);
            let received = [chunk[0], chunk[1]];
            chunk[0] ^= mask[0];
            chunk[1] ^= mask[1];
            *iv = received;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_wraps_to_nonzero() {
        // A half sitting at 0xFFFFFFFF (the all-ones representation of zero)
        // must step to the constant itself, never to 0.
        assert_eq!(advance(0xFFFF_FFFF, OFB_C1), OFB_C1);
        assert_eq!(advance(0xFFFF_FFFF, OFB_C2), OFB_C2);

        // Wrapping past zero skips the forbidden value.
        assert_eq!(advance(0u32.wrapping_sub(OFB_C1), OFB_C1), 1);
        assert_ne!(advance(0u32.wrapping_sub(OFB_C1), OFB_C1), 0);

        // The common case is a plain add.
        assert_eq!(advance(5, OFB_C1), 5 + OFB_C1);
    }
}
