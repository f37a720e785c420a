//! mx3: a 64-bit bit mixer and the hash and PRNG built on it.
//!
//! Nothing here is cryptographically secure: the mixer gives strong avalanche
//! on benign input, not resistance to adversarial input.
//!
//! Modules:
//! - `mix`: the bit mixer and the stream-absorb steps.
//! - `revision`: the three published mx3 revisions (v3 is the default).
//! - `chunk`: little-endian word/block/tail reading.
//! - `hash`: seeded one-shot buffer hash.
//! - `rng`: `Mx3Rng`, the counter-based generator.
//! - `hasher`: streaming `Hasher` and seeded `BuildHasher`.
//! - `par`: order-preserving parallel hashing and stream drawing.
//! - `quality`: avalanche and bit-balance statistics.
//!
//! ```
//! let mixed = mx3::mix(123456789);
//! assert_eq!(mixed, 0x95bd_1de6_327d_ae0a);
//!
//! let digest = mx3::hash(b"Hello world!", 123456789);
//! assert_eq!(digest, mx3::hash(b"Hello world!", 123456789));
//!
//! let mut rng = mx3::Mx3Rng::new(1);
//! assert_eq!(rng.next_u64(), 0xe8eb_dbc4_39df_412a);
//! ```
#![forbid(unsafe_code)]

pub mod chunk;
pub mod error;
pub mod hash;
pub mod hasher;
pub mod mix;
pub mod par;
pub mod quality;
pub mod revision;
pub mod rng;

pub use error::{Error, Result};
pub use hash::{hash, hash_prefix, hash_prefix_with, hash_with};
pub use hasher::{Mx3BuildHasher, Mx3Hasher};
pub use mix::mix;
pub use revision::Revision;
pub use rng::Mx3Rng;
