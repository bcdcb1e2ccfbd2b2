//! Secure Hash Algorithm 1 (SHA-1)
//!
//! https://datatracker.ietf.org/doc/html/rfc3174

use crate::accumulator::{Accumulator, DIGEST_LEN};
use crate::compress::compress;
use crate::observe::Observer;
use crate::padding::{blocks, padding, Block, BLOCK_LEN, MAX_MESSAGE_LEN};
use crate::schedule::expand;

use log::{debug, trace};

use std::convert::TryInto;
use std::fmt;

pub fn sha1(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut state = Sha1::new();
    state.update(data);
    state.finalize()
}

/// The message is too long for its bit length to fit in 64 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthOverflow;

impl fmt::Display for LengthOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "message exceeds {} bytes", MAX_MESSAGE_LEN)
    }
}

impl std::error::Error for LengthOverflow {}

/// Incremental SHA-1 state.
///
/// At most one partial block is buffered, so input of any size can be fed
/// through [`Sha1::update`].
#[derive(Clone, Debug)]
pub struct Sha1<O = ()> {
    acc: Accumulator,
    len: u64, // number of bytes
    block_idx: usize,
    block: Block,
    block_count: u64,
    observer: O,
}

impl Sha1 {
    pub fn new() -> Self {
        Self::with_observer(())
    }
}

impl<O: Observer> Sha1<O> {
    pub fn with_observer(observer: O) -> Self {
        Self {
            acc: Accumulator::INITIAL,
            len: 0,
            block_idx: 0,
            block: [0; BLOCK_LEN],
            block_count: 0,
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Number of message bytes fed so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Feeds `input` into the hash.
    ///
    /// # Panics
    ///
    /// If the total input exceeds [`MAX_MESSAGE_LEN`] bytes. Use
    /// [`Sha1::try_update`] to handle that case.
    pub fn update(&mut self, input: &[u8]) -> &mut Self {
        match self.try_update(input) {
            Ok(this) => this,
            Err(err) => panic!("{}", err),
        }
    }

    /// Feeds `input` into the hash, rejecting input that would overflow the
    /// 64-bit length field. On error the state is left unchanged.
    pub fn try_update(&mut self, input: &[u8]) -> Result<&mut Self, LengthOverflow> {
        self.len = self
            .len
            .checked_add(input.len() as u64)
            .filter(|&len| len <= MAX_MESSAGE_LEN)
            .ok_or(LengthOverflow)?;
        self.absorb(input);
        Ok(self)
    }

    pub fn finalize(self) -> [u8; DIGEST_LEN] {
        self.finalize_with_observer().0
    }

    /// Pads the message, compresses the remaining blocks and returns the
    /// digest together with the observer.
    pub fn finalize_with_observer(mut self) -> ([u8; DIGEST_LEN], O) {
        let padding = padding(self.len);

        // buffered bytes plus padding always fill one or two blocks
        let mut tail = [0; 2 * BLOCK_LEN];
        let tail_len = self.block_idx + padding.len();
        tail[..self.block_idx].copy_from_slice(&self.block[..self.block_idx]);
        tail[self.block_idx..tail_len].copy_from_slice(&padding);

        for block in blocks(&tail[..tail_len]) {
            self.process_block(block);
        }

        debug!(
            "finalized {} bytes in {} blocks",
            self.len, self.block_count
        );
        (self.acc.to_bytes(), self.observer)
    }

    fn absorb(&mut self, mut input: &[u8]) {
        let remaining = BLOCK_LEN - self.block_idx;
        if input.len() < remaining {
            // not enough bytes to compress a block
            let n = input.len();
            self.block[self.block_idx..self.block_idx + n].copy_from_slice(input);
            self.block_idx += n;
            return;
        }

        if self.block_idx != 0 {
            // buffer has already some bytes
            let (head, tail) = input.split_at(remaining);
            self.block[self.block_idx..].copy_from_slice(head);
            let block = self.block;
            self.process_block(&block);
            input = tail;
            self.block_idx = 0;
        }

        // compress whole blocks straight from the input
        let mut chunks = input.chunks_exact(BLOCK_LEN);
        for chunk in &mut chunks {
            self.process_block(chunk.try_into().unwrap());
        }

        let remainder = chunks.remainder();
        self.block[..remainder.len()].copy_from_slice(remainder);
        self.block_idx = remainder.len();
    }

    fn process_block(&mut self, block: &Block) {
        let index = self.block_count;
        self.observer.block(index, block);

        let schedule = expand(block);
        self.observer.schedule(index, &schedule);

        let observer = &mut self.observer;
        let state = compress(self.acc.into(), &schedule, |t, state| {
            observer.round(t, state)
        });
        self.acc = self.acc.fold(state);
        self.block_count += 1;

        trace!("block {}: {:08x?}", index, self.acc);
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "digest")]
mod digest_impl {
    use super::Sha1;

    use digest::consts::{U20, U64};
    use digest::generic_array::GenericArray;
    use digest::{BlockInput, FixedOutput, Reset, Update};

    impl BlockInput for Sha1 {
        type BlockSize = U64;
    }

    impl Update for Sha1 {
        fn update(&mut self, data: impl AsRef<[u8]>) {
            Sha1::update(self, data.as_ref());
        }
    }

    impl FixedOutput for Sha1 {
        type OutputSize = U20;

        fn finalize_into(self, out: &mut GenericArray<u8, U20>) {
            out.copy_from_slice(&Sha1::finalize(self));
        }

        fn finalize_into_reset(&mut self, out: &mut GenericArray<u8, U20>) {
            out.copy_from_slice(&self.clone().finalize());
            Reset::reset(self);
        }
    }

    impl Reset for Sha1 {
        fn reset(&mut self) {
            *self = Sha1::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::compress::WorkingState;
    use crate::hex;
    use crate::schedule::Schedule;

    use super::*;

    use quickcheck_macros::quickcheck;

    #[test]
    fn test_sha1() {
        assert_eq!(
            sha1(b""),
            hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap()
        );
        assert_eq!(
            sha1(b"abc"),
            hex("a9993e364706816aba3e25717850c26c9cd0d89d").unwrap()
        );
        assert_eq!(
            sha1(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
            hex("84983e441c3bd26ebaae4aa1f95129e5e54670f1").unwrap()
        );
        assert_eq!(
            sha1(b"The quick brown fox jumps over the lazy dog"),
            hex("2fd4e1c67a2d28fced849ee1bb76e7391b93eb12").unwrap()
        );
    }

    #[test]
    fn test_sha1_block_boundary() {
        assert_eq!(
            sha1(&[b'a'; 55]),
            hex("c1c8bbdc22796e28c0e15163d20899b65621d65a").unwrap()
        );
        assert_eq!(
            sha1(&[b'a'; 56]),
            hex("c2db330f6083854c99d4b5bfb6e8f29f201be699").unwrap()
        );
    }

    #[test]
    fn test_sha1_leading_zero_byte() {
        let digest = sha1(&[b'a'; 64]);
        assert_eq!(digest[0], 0);
        assert_eq!(
            ::hex::encode(digest),
            "0098ba824b5c16427bd7a1122a5a442a25ec644d"
        );
    }

    #[test]
    fn test_sha1_1000000_updates() {
        let mut state = Sha1::new();
        for _ in 0..1000000 {
            state.update(b"a");
        }
        assert_eq!(state.len(), 1000000);
        assert_eq!(
            state.finalize(),
            hex("34aa973cd4c4daa4f61eeb2bdbad27316534016f").unwrap()
        );
    }

    #[test]
    fn test_sha1_10_updates() {
        let mut state = Sha1::new();
        for _ in 0..10 {
            state.update(b"0123456701234567012345670123456701234567012345670123456701234567");
        }
        assert_eq!(
            state.finalize(),
            hex("dea356a2cddd90c7a7ecedc5ebb563934f460452").unwrap()
        );
    }

    #[test]
    fn test_idempotent() {
        let message = b"the same bytes, twice";
        assert_eq!(sha1(message), sha1(message));
    }

    #[test]
    fn test_one_bit_flip() {
        assert_eq!(
            sha1(b"abd"),
            hex("cb4cc28df0fdbe0ecf9d9662e294b118092a5735").unwrap()
        );

        let message = vec![0x5a; 200];
        let digest = sha1(&message);
        for i in [0, 63, 64, 199].iter() {
            let mut flipped = message.clone();
            flipped[*i] ^= 1;
            assert_ne!(sha1(&flipped), digest);
        }
    }

    #[test]
    fn test_length_overflow() {
        let mut state = Sha1::new();
        state.len = MAX_MESSAGE_LEN - 1;

        assert!(state.try_update(b"a").is_ok());
        assert_eq!(state.try_update(b"a").err(), Some(LengthOverflow));
        assert_eq!(state.len(), MAX_MESSAGE_LEN);
        assert_eq!(state.block_idx, 1);
    }

    #[test]
    #[should_panic(expected = "message exceeds")]
    fn test_update_panics_on_overflow() {
        let mut state = Sha1::new();
        state.len = MAX_MESSAGE_LEN;
        state.update(b"a");
    }

    #[derive(Default)]
    struct Recorder {
        blocks: Vec<u64>,
        schedules: Vec<Schedule>,
        rounds: usize,
        last: Option<WorkingState>,
    }

    impl Observer for Recorder {
        fn block(&mut self, index: u64, _block: &Block) {
            self.blocks.push(index);
        }

        fn schedule(&mut self, _index: u64, schedule: &Schedule) {
            self.schedules.push(*schedule);
        }

        fn round(&mut self, _t: usize, state: &WorkingState) {
            self.rounds += 1;
            self.last = Some(*state);
        }
    }

    #[test]
    fn test_observer() {
        let mut state = Sha1::with_observer(Recorder::default());
        state.update(&[b'a'; 56]);
        let (digest, recorder) = state.finalize_with_observer();

        assert_eq!(digest, sha1(&[b'a'; 56]));
        assert_eq!(recorder.blocks, vec![0, 1]);
        assert_eq!(recorder.rounds, 160);
        assert_eq!(recorder.schedules[0].words()[0], 0x61616161);
        assert_eq!(recorder.schedules[1].words()[15], 56 * 8);
        assert!(recorder.last.is_some());
    }

    #[test]
    fn test_observer_by_reference() {
        let mut recorder = Recorder::default();
        let mut state = Sha1::with_observer(&mut recorder);
        state.update(b"abc");
        assert_eq!(
            state.finalize(),
            hex("a9993e364706816aba3e25717850c26c9cd0d89d").unwrap()
        );
        assert_eq!(recorder.blocks, vec![0]);
        assert_eq!(
            recorder.last,
            Some(WorkingState {
                a: 0x42541b35,
                b: 0x5738d5e1,
                c: 0x21834873,
                d: 0x681e6df6,
                e: 0xd8fdf6ad,
            })
        );
    }

    #[quickcheck]
    fn prop_chunked_equals_one_shot(data: Vec<u8>, splits: Vec<usize>) -> bool {
        let mut state = Sha1::new();
        let mut rest = &data[..];
        for split in splits {
            let (head, tail) = rest.split_at(split % (rest.len() + 1));
            state.update(head);
            rest = tail;
        }
        state.update(rest);
        state.finalize() == sha1(&data)
    }

    #[cfg(feature = "digest")]
    #[test]
    fn test_digest_traits() {
        fn check<D: digest::Digest>(input: &[u8], expected: &str) {
            let mut sh = D::new();
            sh.update(input);
            assert_eq!(::hex::encode(sh.finalize()), expected);

            // piecewise
            let mut sh = D::new();
            for chunk in input.chunks(7) {
                sh.update(chunk);
            }
            assert_eq!(::hex::encode(sh.finalize_reset()), expected);
            assert_eq!(
                ::hex::encode(sh.finalize()),
                "da39a3ee5e6b4b0d3255bfef95601890afd80709"
            );
        }

        check::<Sha1>(
            b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
            "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
        );
        check::<Sha1>(
            b"The quick brown fox jumps over the lazy cog",
            "de9f2c7fd25e1b3afad3e85a0bd17d9b100db4b3",
        );
    }
}
