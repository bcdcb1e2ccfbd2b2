//! The 80-round compression function
#![allow(clippy::many_single_char_names)]

use crate::schedule::{Schedule, ROUNDS};

/// Working registers threaded through the rounds of one block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkingState {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
    pub e: u32,
}

/// Round range, selecting the mixing function and the additive constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Rounds 0..20
    Choose,
    /// Rounds 20..40
    Parity,
    /// Rounds 40..60
    Majority,
    /// Rounds 60..80
    ParityLate,
}

impl Stage {
    pub fn for_round(t: usize) -> Self {
        match t {
            0..=19 => Stage::Choose,
            20..=39 => Stage::Parity,
            40..=59 => Stage::Majority,
            60..=79 => Stage::ParityLate,
            _ => panic!("round index out of range: {}", t),
        }
    }

    pub fn mix(self, b: u32, c: u32, d: u32) -> u32 {
        match self {
            Stage::Choose => (b & c) | ((!b) & d),
            Stage::Parity | Stage::ParityLate => b ^ c ^ d,
            Stage::Majority => (b & c) | (b & d) | (c & d),
        }
    }

    pub fn constant(self) -> u32 {
        match self {
            Stage::Choose => 0x5a827999,
            Stage::Parity => 0x6ed9eba1,
            Stage::Majority => 0x8f1bbcdc,
            Stage::ParityLate => 0xca62c1d6,
        }
    }
}

/// Runs all rounds over `schedule`, starting from `initial`.
///
/// `on_round` sees the registers after every round.
pub fn compress(
    initial: WorkingState,
    schedule: &Schedule,
    mut on_round: impl FnMut(usize, &WorkingState),
) -> WorkingState {
    let mut state = initial;
    for t in 0..ROUNDS {
        state = step(state, Stage::for_round(t), schedule[t]);
        on_round(t, &state);
    }
    state
}

fn step(WorkingState { a, b, c, d, e }: WorkingState, stage: Stage, w: u32) -> WorkingState {
    let temp = a
        .rotate_left(5)
        .wrapping_add(stage.mix(b, c, d))
        .wrapping_add(e)
        .wrapping_add(w)
        .wrapping_add(stage.constant());
    WorkingState {
        a: temp,
        b: a,
        c: b.rotate_left(30),
        d: c,
        e: d,
    }
}
