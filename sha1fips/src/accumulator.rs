//! Persistent hash words H0..H4

use crate::compress::WorkingState;

/// Length of the digest in bytes.
pub const DIGEST_LEN: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accumulator {
    pub h0: u32,
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub h4: u32,
}

impl Accumulator {
    pub const INITIAL: Accumulator = Accumulator {
        h0: 0x67452301,
        h1: 0xefcdab89,
        h2: 0x98badcfe,
        h3: 0x10325476,
        h4: 0xc3d2e1f0,
    };

    /// Adds the registers left by a compressed block, modulo 2^32.
    pub fn fold(self, state: WorkingState) -> Self {
        Self {
            h0: self.h0.wrapping_add(state.a),
            h1: self.h1.wrapping_add(state.b),
            h2: self.h2.wrapping_add(state.c),
            h3: self.h3.wrapping_add(state.d),
            h4: self.h4.wrapping_add(state.e),
        }
    }

    /// H0 || H1 || H2 || H3 || H4, each word big-endian.
    pub fn to_bytes(self) -> [u8; DIGEST_LEN] {
        let mut res = [0; DIGEST_LEN];
        let words = [self.h0, self.h1, self.h2, self.h3, self.h4];
        for (chunk, word) in res.chunks_exact_mut(4).zip(words.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        res
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl From<Accumulator> for WorkingState {
    fn from(acc: Accumulator) -> Self {
        WorkingState {
            a: acc.h0,
            b: acc.h1,
            c: acc.h2,
            d: acc.h3,
            e: acc.h4,
        }
    }
}
