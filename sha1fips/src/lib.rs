//! SHA-1 message digest (FIPS 180-1), built from its individual stages so
//! each one can be inspected on its own.

pub mod accumulator;
pub mod compress;
pub mod observe;
pub mod padding;
pub mod schedule;
pub mod sha1;

pub use crate::accumulator::DIGEST_LEN;
pub use crate::observe::Observer;
pub use crate::sha1::{sha1, LengthOverflow, Sha1};

#[cfg(test)]
pub fn hex<const N: usize>(s: impl AsRef<str>) -> Option<[u8; N]> {
    use std::convert::TryInto;

    let bytes = hex::decode(s.as_ref()).ok()?;
    bytes.try_into().ok()
}
