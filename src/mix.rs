//! The mx3 bit mixer and the stream-absorb steps the buffer hash is built from.
//!
//! Everything here is branch-free wrapping arithmetic on `u64`; every input is valid.

/// Odd multiplier shared by every mx3 revision.
pub const C: u64 = 0xbea2_25f9_eb34_556d;

/// Mix the bits of `x` (revisions 2 and 3).
///
/// Flipping any input bit flips about half of the output bits.
#[inline]
pub fn mix(mut x: u64) -> u64 {
    x ^= x >> 32;
    x = x.wrapping_mul(C);
    x ^= x >> 29;
    x = x.wrapping_mul(C);
    x ^= x >> 32;
    x = x.wrapping_mul(C);
    x ^= x >> 29;
    x
}

/// Revision 1 mixer: multiply first, different shifts.
#[inline]
pub(crate) fn mix_v1(mut x: u64) -> u64 {
    x = x.wrapping_mul(C);
    x ^= x >> 33;
    x = x.wrapping_mul(C);
    x ^= x >> 29;
    x = x.wrapping_mul(C);
    x ^= x >> 39;
    x
}

/// Fold one word into the accumulator; `r` is the second shift (33 for v1, 43 for v2).
#[inline]
fn absorb_two_shift(mut h: u64, mut x: u64, r: u32) -> u64 {
    x = x.wrapping_mul(C);
    x ^= (x >> 57) ^ (x >> r);
    x = x.wrapping_mul(C);
    h = h.wrapping_add(x);
    h.wrapping_mul(C)
}

#[inline]
pub(crate) fn absorb_v1(h: u64, x: u64) -> u64 { absorb_two_shift(h, x, 33) }

#[inline]
pub(crate) fn absorb_v2(h: u64, x: u64) -> u64 { absorb_two_shift(h, x, 43) }

#[inline]
fn scramble_v3(mut x: u64) -> u64 {
    x = x.wrapping_mul(C);
    x ^ (x >> 39)
}

#[inline]
pub(crate) fn absorb_v3(h: u64, x: u64) -> u64 {
    h.wrapping_add(scramble_v3(x).wrapping_mul(C)).wrapping_mul(C)
}

/// Four-lane v3 absorb. The lanes are scrambled independently, then folded in order.
#[inline]
pub(crate) fn absorb4_v3(mut h: u64, a: u64, b: u64, c: u64, d: u64) -> u64 {
    let lanes = [scramble_v3(a), scramble_v3(b), scramble_v3(c), scramble_v3(d)];
    for lane in lanes {
        h = h.wrapping_add(lane.wrapping_mul(C)).wrapping_mul(C);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_matches_reference() {
        assert_eq!(mix(123456789), 0x95bd_1de6_327d_ae0a);
        assert_eq!(mix_v1(123456789), 0x5663_19fa_1c03_230f);
    }

    #[test]
    fn mix_is_total_on_extremes() {
        // zero is a fixed point of multiply/xor-shift; callers offset their input (see rng/hash)
        assert_eq!(mix(0), 0);
        assert_ne!(mix(u64::MAX), u64::MAX);
        assert_ne!(mix(1), mix(2));
    }

    #[test]
    fn absorb4_equals_sequential_single_lane_steps() {
        let (a, b, c, d) = (1u64, 0xdead_beef, u64::MAX, 42);
        let mut h = 7u64;
        for x in [a, b, c, d] {
            h = absorb_v3(h, x);
        }
        assert_eq!(absorb4_v3(7, a, b, c, d), h);
    }
}
