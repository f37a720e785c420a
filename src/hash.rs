// src/hash.rs
//! Seeded one-shot buffer hash.
//!
//! Chunks are read little-endian, so digests are identical on every platform.
//! The length is folded into the initial accumulator; a shorter prefix of the
//! same bytes does not collide with the full buffer.

use crate::chunk::{self, BLOCK, WORD};
use crate::error::{Error, Result};
use crate::revision::Revision;

/// Hash `buffer` with the default revision.
///
/// This hash is *not* cryptographically secure.
#[inline]
pub fn hash(buffer: &[u8], seed: u64) -> u64 {
    hash_with(Revision::default(), buffer, seed)
}

/// Hash the first `length` bytes of `buffer`; bytes past `length` are ignored.
///
/// Fails without reading anything when `length` exceeds the buffer.
pub fn hash_prefix(buffer: &[u8], length: usize, seed: u64) -> Result<u64> {
    hash_prefix_with(Revision::default(), buffer, length, seed)
}

pub fn hash_prefix_with(revision: Revision, buffer: &[u8], length: usize, seed: u64) -> Result<u64> {
    match buffer.get(..length) {
        Some(prefix) => Ok(hash_with(revision, prefix, seed)),
        None => {
            tracing::debug!(length, available = buffer.len(), "rejecting hash prefix past end of buffer");
            Err(Error::LengthOutOfBounds { length, available: buffer.len() })
        }
    }
}

pub fn hash_with(revision: Revision, buffer: &[u8], seed: u64) -> u64 {
    let mut h = revision.init(seed, buffer.len() as u64);
    let mut rest = buffer;

    // v1/v2 have no block step; their block absorb is the word loop anyway
    if revision == Revision::V3 {
        let blocks = rest.chunks_exact(BLOCK);
        let tail = blocks.remainder();
        for block in blocks {
            h = revision.absorb_block(h, &chunk::read_block(block));
        }
        rest = tail;
    }

    let words = rest.chunks_exact(WORD);
    let tail = words.remainder();
    for word in words {
        h = revision.absorb(h, chunk::read_word(word));
    }
    revision.finish(h, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
    const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog. The quick brown fox jumps over the lazy dog.";
    const SEED: u64 = 123456789;

    const V1_ALPHABET: [u64; 27] = [
        0x566319fa1c03230f, 0x1d4c331d9d3f2049, 0x491f91a790cc7f0b, 0x8e574f9a20d15f43,
        0x9cc98e8e7bcb7bab, 0x2e014c9a9b41b79b, 0x90874212c6dbd7d0, 0xde1426833c7d882a,
        0x66685094340748cb, 0xa2cc9f413d39f1bc, 0x8a44bb7774cc3564, 0x6e1f1e03075de002,
        0x0076b37093e5d3ec, 0x2b5350b03536f60b, 0x0cb6da1b8d49578c, 0xb839559f09ab5c45,
        0x930b3e15662f1adb, 0x8d3c63a40fbe05dd, 0xb09cf7a6749ef821, 0x0b034e3927754a34,
        0x5fb9e1de0c1219f3, 0xe3ac8d6b0d7675b0, 0x4dc45e937a3111c7, 0xea6df82321394835,
        0x94d8d33b442af454, 0x113c64754ecc3ae7, 0x1e29585a2a634374,
    ];

    const V2_ALPHABET: [u64; 27] = [
        0x95bd1de6327dae0a, 0xdf8558992bfc3f87, 0x1a21bfae9df45b48, 0x7f3890aee60a2b23,
        0xe426b02c719dc4a1, 0x7b18a2f70a8f5b9c, 0x0088ed8ee800c583, 0x2d6683263a1f05f8,
        0x395caf6b87f1c933, 0x0e95331bb3b640e1, 0x663e926235bb5969, 0x966fbafe45ff7e50,
        0x98a407a2a3b6c878, 0x9a161fbd700c5ef6, 0x13992c04f5edf5e3, 0x29a0245c892a71c5,
        0xb617dfdbea45debd, 0x06f23ca1b5f6a551, 0x902d9ed019625e75, 0xacff8ed243a72810,
        0xd49326d9f1065094, 0xc04a0cb2b523df98, 0x76a6bae003d7b9cb, 0xfc98e44e6e2ba3f5,
        0xa54e3589ce94a3d6, 0x00847fe0dad5593f, 0x0f1673daba637e36,
    ];

    const V3_ALPHABET: [u64; 27] = [
        0x4e069d451e12ced8, 0x5eb36ac9592ab1df, 0x28aee35eb05b5e01, 0xc84bb340afd4c59c,
        0xeeded76f960ae7a1, 0x80a4d25e6705d3ba, 0x76e1913cb3491d76, 0xe2a6e400fe57f6c3,
        0x606b49ce1423ae16, 0x79b96174f8e230a0, 0x9e602ef1d012bb2d, 0x9f9709e439dd8999,
        0x1503884eae03740a, 0xf208267c7e8a461c, 0xa08d41054b42ce80, 0x6129ee7c45f92fff,
        0x9405c374e7cec176, 0x9cc7a2b54b9c4478, 0x9d0e1fca25723cac, 0xde4e43505cedd231,
        0x91462bc2c10a62ba, 0x1e84991efaf319c1, 0x5c41b4a8350c9a0a, 0xf5d4ce766a91e9bd,
        0x017dcc3722edeeee, 0x224dc0b46df3f834, 0x6c16bdf4571e7844,
    ];

    #[test]
    fn alphabet_prefixes_match_reference() {
        for (revision, table) in [
            (Revision::V1, &V1_ALPHABET),
            (Revision::V2, &V2_ALPHABET),
            (Revision::V3, &V3_ALPHABET),
        ] {
            for len in 0..=26 {
                assert_eq!(revision.hash(&ALPHABET[..len], SEED), table[len], "{revision} len={len}");
            }
        }
    }

    #[test]
    fn alphabet_prefixes_are_distinct() {
        let digests: HashSet<u64> = (0..=26).map(|len| hash(&ALPHABET[..len], SEED)).collect();
        assert_eq!(digests.len(), 27);
    }

    #[test]
    fn long_sentence_matches_reference() {
        assert_eq!(FOX.len(), 89);
        assert_eq!(Revision::V1.hash(FOX, SEED), 0x7b519609f3b69338);
        assert_eq!(Revision::V2.hash(FOX, SEED), 0x6fd9e7bca6d66212);
        assert_eq!(hash(FOX, SEED), 0x591893507ccdbfdf);
        assert_eq!(hash(FOX, SEED), hash(FOX, SEED));
    }

    #[test]
    fn prefix_ignores_trailing_bytes() {
        let d = hash_prefix(FOX, 44, SEED).unwrap();
        assert_eq!(d, hash(&FOX[..44], SEED));
        assert_eq!(hash_prefix(FOX, FOX.len(), SEED).unwrap(), hash(FOX, SEED));
    }

    #[test]
    fn prefix_past_end_is_rejected() {
        let err = hash_prefix(b"abc", 4, SEED).unwrap_err();
        assert_eq!(err, Error::LengthOutOfBounds { length: 4, available: 3 });
        assert_eq!(err.to_string(), "hash length 4 exceeds buffer of 3 bytes");
    }

    #[test]
    fn empty_input_depends_on_seed() {
        let a = hash_prefix(b"ignored", 0, 1).unwrap();
        let b = hash_prefix(b"ignored", 0, 2).unwrap();
        assert_eq!(a, hash(&[], 1));
        assert_ne!(a, b);
    }

    #[test]
    fn trailing_zero_byte_changes_digest() {
        // zero padding of the tail must not make "ab" and "ab\0" collide
        for revision in Revision::ALL {
            assert_ne!(revision.hash(b"ab", SEED), revision.hash(b"ab\0", SEED));
            assert_ne!(revision.hash(&[0u8; 8], SEED), revision.hash(&[0u8; 16], SEED));
        }
    }
}
