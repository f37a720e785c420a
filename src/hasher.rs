//! Streaming `Hasher` and `BuildHasher` on top of the buffer hash.
//!
//! Writes are buffered into one 64-byte block; full blocks are absorbed as they
//! arrive and the trailing bytes are folded in by `finish`. When the total
//! length is declared up front the digest equals [`crate::hash()`] for the
//! concatenated input, however the writes are split.

use std::fmt;
use std::hash::{BuildHasher, Hasher};

use crate::chunk::{self, BLOCK, WORD};
use crate::error::{Error, Result};
use crate::revision::Revision;

/// Hasher for computing a digest of a stream of bytes. Not cryptographically secure.
#[derive(Clone)]
pub struct Mx3Hasher {
    revision: Revision,
    state: u64,
    declared: Option<u64>,
    written: u64,
    buf: [u8; BLOCK],
    filled: usize,
}

impl Mx3Hasher {
    /// Hasher for a stream of unknown length; the length is folded in at `finish`.
    pub fn new(seed: u64) -> Self { Self::with_revision(Revision::default(), seed) }

    pub fn with_revision(revision: Revision, seed: u64) -> Self {
        Self::build(revision, revision.init(seed, 0), None)
    }

    /// Hasher whose digest matches `hash` once exactly `len` bytes are written.
    pub fn with_length(seed: u64, len: u64) -> Self { Self::with_revision_and_length(Revision::default(), seed, len) }

    pub fn with_revision_and_length(revision: Revision, seed: u64, len: u64) -> Self {
        Self::build(revision, revision.init(seed, len), Some(len))
    }

    fn build(revision: Revision, state: u64, declared: Option<u64>) -> Self {
        Self { revision, state, declared, written: 0, buf: [0u8; BLOCK], filled: 0 }
    }

    pub fn revision(&self) -> Revision { self.revision }

    /// Bytes written so far.
    pub fn written(&self) -> u64 { self.written }

    /// Like `finish`, but rejects a stream that did not match its declared length.
    pub fn try_finish(&self) -> Result<u64> {
        match self.declared {
            Some(declared) if declared != self.written => {
                Err(Error::LengthMismatch { declared, written: self.written })
            }
            _ => Ok(self.finish()),
        }
    }

    #[inline]
    fn absorb_block(&mut self, block: &[u8]) {
        self.state = self.revision.absorb_block(self.state, &chunk::read_block(block));
    }
}

impl Hasher for Mx3Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.written = self.written.wrapping_add(bytes.len() as u64);
        let mut rest = bytes;

        // top up a partially filled block first
        if self.filled > 0 {
            let take = rest.len().min(BLOCK - self.filled);
            self.buf[self.filled..self.filled + take].copy_from_slice(&rest[..take]);
            self.filled += take;
            rest = &rest[take..];
            if self.filled < BLOCK { return; }
            let block = self.buf;
            self.absorb_block(&block);
            self.filled = 0;
        }

        let blocks = rest.chunks_exact(BLOCK);
        let tail = blocks.remainder();
        for block in blocks {
            self.absorb_block(block);
        }
        self.buf[..tail.len()].copy_from_slice(tail);
        self.filled = tail.len();
    }

    fn finish(&self) -> u64 {
        let rest = &self.buf[..self.filled];
        let words = rest.chunks_exact(WORD);
        let tail = words.remainder();
        let mut h = words.fold(self.state, |h, w| self.revision.absorb(h, chunk::read_word(w)));
        if self.declared.is_none() {
            h = self.revision.absorb(h, self.written);
        }
        self.revision.finish(h, tail)
    }

    // integers are hashed little-endian so digests do not depend on the host
    fn write_u8(&mut self, i: u8) { self.write(&[i]) }
    fn write_u16(&mut self, i: u16) { self.write(&i.to_le_bytes()) }
    fn write_u32(&mut self, i: u32) { self.write(&i.to_le_bytes()) }
    fn write_u64(&mut self, i: u64) { self.write(&i.to_le_bytes()) }
    fn write_u128(&mut self, i: u128) { self.write(&i.to_le_bytes()) }
    fn write_usize(&mut self, i: usize) { self.write_u64(i as u64) }
    fn write_i8(&mut self, i: i8) { self.write_u8(i as u8) }
    fn write_i16(&mut self, i: i16) { self.write_u16(i as u16) }
    fn write_i32(&mut self, i: i32) { self.write_u32(i as u32) }
    fn write_i64(&mut self, i: i64) { self.write_u64(i as u64) }
    fn write_i128(&mut self, i: i128) { self.write_u128(i as u128) }
    fn write_isize(&mut self, i: isize) { self.write_u64(i as i64 as u64) }
}

impl Default for Mx3Hasher {
    fn default() -> Self { Self::new(1) }
}

impl fmt::Debug for Mx3Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mx3Hasher")
            .field("revision", &self.revision)
            .field("declared", &self.declared)
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

/// Seeded `BuildHasher` for `HashMap`/`HashSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mx3BuildHasher {
    pub seed: u64,
    pub revision: Revision,
}

impl Mx3BuildHasher {
    pub fn new(seed: u64) -> Self { Self { seed, revision: Revision::default() } }
}

impl Default for Mx3BuildHasher {
    fn default() -> Self { Self::new(1) }
}

impl BuildHasher for Mx3BuildHasher {
    type Hasher = Mx3Hasher;

    fn build_hasher(&self) -> Mx3Hasher { Mx3Hasher::with_revision(self.revision, self.seed) }
}
