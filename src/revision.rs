// src/revision.rs
use serde::{Deserialize, Serialize};

use crate::mix::{self, absorb4_v3, absorb_v1, absorb_v2, absorb_v3, mix_v1};

/// Published revisions of the mx3 algorithm. Outputs differ between revisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    V1,
    V2,
    #[default]
    V3,
}

impl Revision {
    pub const ALL: [Revision; 3] = [Revision::V1, Revision::V2, Revision::V3];

    #[inline]
    pub fn mix(self, x: u64) -> u64 {
        match self {
            Revision::V1 => mix_v1(x),
            Revision::V2 | Revision::V3 => mix::mix(x),
        }
    }

    /// Initial accumulator for a buffer of `len` bytes.
    #[inline]
    pub(crate) fn init(self, seed: u64, len: u64) -> u64 {
        match self {
            Revision::V1 | Revision::V2 => seed ^ len,
            Revision::V3 => absorb_v3(seed, len.wrapping_add(1)),
        }
    }

    #[inline]
    pub(crate) fn absorb(self, h: u64, x: u64) -> u64 {
        match self {
            Revision::V1 => absorb_v1(h, x),
            Revision::V2 => absorb_v2(h, x),
            Revision::V3 => absorb_v3(h, x),
        }
    }

    /// Fold a full 64-byte block. v1/v2 treat it as eight ordinary words.
    #[inline]
    pub(crate) fn absorb_block(self, h: u64, w: &[u64; 8]) -> u64 {
        match self {
            Revision::V3 => {
                let h = absorb4_v3(h, w[0], w[1], w[2], w[3]);
                absorb4_v3(h, w[4], w[5], w[6], w[7])
            }
            Revision::V1 | Revision::V2 => w.iter().fold(h, |h, &x| self.absorb(h, x)),
        }
    }

    /// Absorb the packed tail (skipped when there are no leftover bytes) and apply the final mix.
    #[inline]
    pub(crate) fn finish(self, h: u64, tail: &[u8]) -> u64 {
        let h = if tail.is_empty() { h } else { self.absorb(h, crate::chunk::pack_tail(tail)) };
        self.mix(h)
    }

    /// Generator counter for `seed`. Only v3 conditions the seed.
    #[inline]
    pub(crate) fn seed_counter(self, seed: u64) -> u64 {
        match self {
            Revision::V1 | Revision::V2 => seed,
            Revision::V3 => mix::mix(seed.wrapping_add(mix::C)),
        }
    }

    /// Hash `buffer` with this revision. See [`crate::hash()`].
    pub fn hash(self, buffer: &[u8], seed: u64) -> u64 { crate::hash::hash_with(self, buffer, seed) }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self { Revision::V1 => "v1", Revision::V2 => "v2", Revision::V3 => "v3" })
    }
}
