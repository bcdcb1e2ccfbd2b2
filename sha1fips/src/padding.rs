//! Message padding and block decomposition
//!
//! https://datatracker.ietf.org/doc/html/rfc3174#section-4

use std::convert::TryInto;
use std::ops::Deref;
use std::slice::ChunksExact;

/// Size of a message block in bytes.
pub const BLOCK_LEN: usize = 64;

/// Largest message length in bytes whose bit length still fits the 64-bit
/// length field.
pub const MAX_MESSAGE_LEN: u64 = u64::MAX >> 3;

/// One 512-bit chunk of the padded message.
pub type Block = [u8; BLOCK_LEN];

/// Offset inside the final block where the length field starts.
const LEN_OFFSET: usize = BLOCK_LEN - 8;

/// Padding bytes appended to a message: `0x80`, zero fill and the 64-bit
/// big-endian bit length.
#[derive(Clone, Copy)]
pub struct Padding {
    bytes: [u8; BLOCK_LEN + 8],
    len: usize,
}

impl Deref for Padding {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl std::fmt::Debug for Padding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Computes the padding of a message of `len` bytes.
///
/// The terminator always takes at least one byte, so a message ending at
/// offset 56 of a block gets a whole extra block.
pub fn padding(len: u64) -> Padding {
    debug_assert!(len <= MAX_MESSAGE_LEN);

    let zeros = zero_fill(len);
    let total = 1 + zeros + 8;

    let mut bytes = [0; BLOCK_LEN + 8];
    bytes[0] = 0x80;
    bytes[1 + zeros..total].copy_from_slice(&(len << 3).to_be_bytes());

    Padding { bytes, len: total }
}

/// Length of `len` bytes of message once padded.
pub fn padded_len(len: u64) -> u64 {
    len + 9 + zero_fill(len) as u64
}

/// Appends the padding to `message`.
pub fn pad(message: &[u8]) -> Vec<u8> {
    let tail = padding(message.len() as u64);
    let mut padded = Vec::with_capacity(message.len() + tail.len());
    padded.extend_from_slice(message);
    padded.extend_from_slice(&tail);
    padded
}

/// Number of zero bytes between the terminator and the length field.
fn zero_fill(len: u64) -> usize {
    let idx = (len % BLOCK_LEN as u64) as usize;
    if idx < LEN_OFFSET {
        LEN_OFFSET - 1 - idx
    } else {
        BLOCK_LEN + LEN_OFFSET - 1 - idx
    }
}

/// Splits a padded message into blocks, in order.
///
/// `padded` must have a length that is a multiple of [`BLOCK_LEN`].
pub fn blocks(padded: &[u8]) -> Blocks<'_> {
    debug_assert_eq!(padded.len() % BLOCK_LEN, 0);
    Blocks {
        chunks: padded.chunks_exact(BLOCK_LEN),
    }
}

#[derive(Clone, Debug)]
pub struct Blocks<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(|chunk| chunk.try_into().unwrap())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Blocks<'_> {}
