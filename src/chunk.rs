//! Little-endian chunk reading shared by the one-shot hash and the streaming hasher.

/// Bytes per word.
pub const WORD: usize = 8;
/// Bytes per block (eight words).
pub const BLOCK: usize = 64;

/// Read exactly eight bytes as a little-endian word.
#[inline]
pub fn read_word(bytes: &[u8]) -> u64 {
    debug_assert_eq!(bytes.len(), WORD);
    let mut b = [0u8; WORD];
    b.copy_from_slice(bytes);
    u64::from_le_bytes(b)
}

/// Read a 64-byte block as eight little-endian words.
#[inline]
pub fn read_block(bytes: &[u8]) -> [u64; 8] {
    debug_assert_eq!(bytes.len(), BLOCK);
    let mut out = [0u64; 8];
    for (w, chunk) in out.iter_mut().zip(bytes.chunks_exact(WORD)) {
        *w = read_word(chunk);
    }
    out
}

/// Pack a 0..=7 byte tail little-endian, unused high bytes zero.
#[inline]
pub fn pack_tail(tail: &[u8]) -> u64 {
    debug_assert!(tail.len() < WORD);
    let mut b = [0u8; WORD];
    b[..tail.len()].copy_from_slice(tail);
    u64::from_le_bytes(b)
}
