//! Message schedule expansion

use crate::padding::Block;

/// Number of rounds, and so of schedule words, per block.
pub const ROUNDS: usize = 80;

/// The 80 words consumed one per round while compressing a block.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Schedule([u32; ROUNDS]);

impl Schedule {
    /// Expands the 16 words of a block.
    ///
    /// W[0..16] are copied, every later word is
    /// `rotl1(W[t-3] ^ W[t-8] ^ W[t-14] ^ W[t-16])`.
    pub fn from_words(words: [u32; 16]) -> Self {
        let mut w = [0; ROUNDS];
        w[..16].copy_from_slice(&words);
        for t in 16..ROUNDS {
            w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
        }
        Self(w)
    }

    /// The raw block words, W[0..16].
    pub fn words(&self) -> &[u32] {
        &self.0[..16]
    }

    pub fn as_array(&self) -> &[u32; ROUNDS] {
        &self.0
    }
}

impl std::ops::Index<usize> for Schedule {
    type Output = u32;

    fn index(&self, t: usize) -> &u32 {
        &self.0[t]
    }
}

impl std::fmt::Debug for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|w| format!("{:08x}", w)))
            .finish()
    }
}

/// Decodes the block as 16 big-endian words and expands it.
pub fn expand(block: &Block) -> Schedule {
    let mut words = [0; 16];
    for (t, word) in words.iter_mut().enumerate() {
        *word = u32::from_be_bytes([
            block[4 * t],
            block[4 * t + 1],
            block[4 * t + 2],
            block[4 * t + 3],
        ]);
    }
    Schedule::from_words(words)
}
