//! Hooks for watching the hash state evolve block by block

use crate::compress::WorkingState;
use crate::padding::Block;
use crate::schedule::Schedule;

/// Receives intermediate values while blocks are compressed.
///
/// All methods default to doing nothing. `index` counts blocks from zero,
/// including the padding blocks emitted on finalization.
pub trait Observer {
    /// Called with every block before it is expanded.
    fn block(&mut self, _index: u64, _block: &Block) {}

    /// Called once the block's schedule has been expanded.
    fn schedule(&mut self, _index: u64, _schedule: &Schedule) {}

    /// Called after round `t` with the updated registers.
    fn round(&mut self, _t: usize, _state: &WorkingState) {}
}

impl Observer for () {}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn block(&mut self, index: u64, block: &Block) {
        (**self).block(index, block)
    }

    fn schedule(&mut self, index: u64, schedule: &Schedule) {
        (**self).schedule(index, schedule)
    }

    fn round(&mut self, t: usize, state: &WorkingState) {
        (**self).round(t, state)
    }
}
