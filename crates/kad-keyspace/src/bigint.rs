//! Fixed-width big-endian integer core
//!
//! Treats a `[u8; KEY_SIZE_BYTES]` array as an unsigned big-endian integer
//! in `[0, 2^KEY_SIZE_BITS)`. All functions are pure byte-array operations;
//! the only non-determinism is an explicitly injected random source.

use std::cmp::Ordering;

use rand::RngCore;
use tracing::trace;

use crate::error::KeyspaceError;
use crate::{KEY_SIZE_BITS, KEY_SIZE_BYTES};

/// Raw fixed-width identifier value: `KEY_SIZE_BYTES` bytes, big-endian.
pub type RawId = [u8; KEY_SIZE_BYTES];

/// The integer 0.
pub const ZERO: RawId = [0u8; KEY_SIZE_BYTES];

/// The integer `2^KEY_SIZE_BITS - 1`.
pub const MAX: RawId = [0xFF; KEY_SIZE_BYTES];

/// Number of bytes needed to hold `bit_count` bits.
pub const fn bit_to_byte_count(bit_count: usize) -> usize {
    (bit_count + 7) / 8
}

/// Draw a value uniformly from the full range `[0, 2^KEY_SIZE_BITS)`.
///
/// Every byte is filled independently from a uniform byte distribution;
/// the range is an exact power of two, so no bias correction is needed.
pub fn random<R: RngCore>(rng: &mut R) -> RawId {
    let mut raw = ZERO;
    rng.fill_bytes(&mut raw);
    raw
}

/// The integer `2^power`: exactly one bit set, at bit-index `power`
/// counted from the least-significant bit of the whole integer.
///
/// Fails with [`KeyspaceError::PowerOutOfRange`] unless
/// `power < KEY_SIZE_BITS`.
pub fn pow2(power: usize) -> Result<RawId, KeyspaceError> {
    if power >= KEY_SIZE_BITS {
        return Err(KeyspaceError::PowerOutOfRange {
            power,
            max: KEY_SIZE_BITS,
        });
    }
    let mut raw = ZERO;
    // Bit 0 lives in the last byte of the big-endian array.
    raw[KEY_SIZE_BYTES - 1 - power / 8] = 1 << (power % 8);
    Ok(raw)
}

/// Unsigned magnitude comparison.
///
/// For fixed-width big-endian encodings, lexicographic byte comparison
/// (most-significant byte first) is exactly numeric comparison.
pub fn compare(a: &RawId, b: &RawId) -> Ordering {
    a.cmp(b)
}

/// Byte-wise XOR; independent per byte, no carry propagation.
pub fn xor(a: &RawId, b: &RawId) -> RawId {
    let mut out = ZERO;
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = a[i] ^ b[i];
    }
    out
}

/// Draw a value uniformly from the closed interval `[min(a,b), max(a,b)]`.
///
/// Rejection sampling: the span `high - low` is computed, candidates are
/// drawn from the full-range generator masked down to the span's
/// significant bits, and redrawn while they exceed the span. The accepted
/// offset is added back onto `low`. Masking to the span's bit width keeps
/// the acceptance probability above one half, and rejection (rather than
/// a remainder) keeps the draw free of modulo bias.
///
/// Argument order does not affect the distribution; `a == b` returns that
/// exact value without consuming randomness.
pub fn random_in_range<R: RngCore>(rng: &mut R, a: &RawId, b: &RawId) -> RawId {
    let (low, high) = match compare(a, b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    };
    if low == high {
        return *low;
    }

    let span = sub(high, low);
    let bits = significant_bits(&span);
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let mut candidate = random(rng);
        mask_to_bits(&mut candidate, bits);
        if compare(&candidate, &span) != Ordering::Greater {
            if attempts > 1 {
                trace!(attempts, "ranged draw accepted after redraw");
            }
            return add(low, &candidate);
        }
    }
}

/// Big-endian subtraction `a - b`; callers must ensure `a >= b`.
fn sub(a: &RawId, b: &RawId) -> RawId {
    debug_assert!(compare(a, b) != Ordering::Less);
    let mut out = ZERO;
    let mut borrow = 0u16;
    for i in (0..KEY_SIZE_BYTES).rev() {
        let lhs = u16::from(a[i]);
        let rhs = u16::from(b[i]) + borrow;
        if lhs >= rhs {
            out[i] = (lhs - rhs) as u8;
            borrow = 0;
        } else {
            out[i] = (lhs + 0x100 - rhs) as u8;
            borrow = 1;
        }
    }
    out
}

/// Big-endian addition `a + b`; callers must ensure the sum fits.
fn add(a: &RawId, b: &RawId) -> RawId {
    let mut out = ZERO;
    let mut carry = 0u16;
    for i in (0..KEY_SIZE_BYTES).rev() {
        let sum = u16::from(a[i]) + u16::from(b[i]) + carry;
        out[i] = (sum & 0xFF) as u8;
        carry = sum >> 8;
    }
    debug_assert_eq!(carry, 0);
    out
}

/// Index of the highest set bit plus one; 0 for the zero value.
fn significant_bits(x: &RawId) -> usize {
    for (i, &byte) in x.iter().enumerate() {
        if byte != 0 {
            return (KEY_SIZE_BYTES - i - 1) * 8 + (8 - byte.leading_zeros() as usize);
        }
    }
    0
}

/// Zero out everything above the lowest `bits` bits.
fn mask_to_bits(x: &mut RawId, bits: usize) {
    if bits >= KEY_SIZE_BITS {
        return;
    }
    let full_bytes = bits / 8;
    let partial_bits = bits % 8;
    let cut = KEY_SIZE_BYTES - full_bytes;
    if partial_bits == 0 {
        x[..cut].fill(0);
    } else {
        x[..cut - 1].fill(0);
        x[cut - 1] &= (1u8 << partial_bits) - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// RawId with a single byte set at `index`.
    fn raw_with_byte(index: usize, value: u8) -> RawId {
        let mut raw = ZERO;
        raw[index] = value;
        raw
    }

    #[test]
    fn test_bit_to_byte_count_rounds_up() {
        assert_eq!(bit_to_byte_count(0), 0);
        assert_eq!(bit_to_byte_count(1), 1);
        assert_eq!(bit_to_byte_count(8), 1);
        assert_eq!(bit_to_byte_count(9), 2);
        assert_eq!(bit_to_byte_count(KEY_SIZE_BITS), KEY_SIZE_BYTES);
    }

    #[test]
    fn test_pow2_sets_single_bit() {
        // Bit 0: least-significant bit of the last byte.
        assert_eq!(pow2(0).unwrap(), raw_with_byte(KEY_SIZE_BYTES - 1, 0x01));
        assert_eq!(pow2(7).unwrap(), raw_with_byte(KEY_SIZE_BYTES - 1, 0x80));
        assert_eq!(pow2(8).unwrap(), raw_with_byte(KEY_SIZE_BYTES - 2, 0x01));
        // Top bit of the whole integer.
        assert_eq!(pow2(KEY_SIZE_BITS - 1).unwrap(), raw_with_byte(0, 0x80));
    }

    #[test]
    fn test_pow2_rejects_out_of_range_exponent() {
        let err = pow2(KEY_SIZE_BITS).unwrap_err();
        assert_eq!(
            err,
            KeyspaceError::PowerOutOfRange {
                power: KEY_SIZE_BITS,
                max: KEY_SIZE_BITS,
            }
        );
    }

    #[test]
    fn test_compare_is_big_endian_magnitude() {
        assert_eq!(compare(&ZERO, &MAX), Ordering::Less);
        assert_eq!(compare(&MAX, &ZERO), Ordering::Greater);
        assert_eq!(compare(&ZERO, &ZERO), Ordering::Equal);

        // A set high byte outweighs every lower byte.
        let high = raw_with_byte(0, 0x01);
        let mut low = MAX;
        low[0] = 0x00;
        assert_eq!(compare(&high, &low), Ordering::Greater);
    }

    #[test]
    fn test_xor_is_byte_wise() {
        let a = raw_with_byte(0, 0b1010_1010);
        let b = raw_with_byte(0, 0b0110_0110);
        assert_eq!(xor(&a, &b), raw_with_byte(0, 0b1100_1100));
        assert_eq!(xor(&a, &a), ZERO);
        assert_eq!(xor(&a, &ZERO), a);
    }

    #[test]
    fn test_sub_borrows_across_bytes() {
        // 0x0100 - 0x01 = 0xFF at the bottom of the integer.
        let a = raw_with_byte(KEY_SIZE_BYTES - 2, 0x01);
        let b = raw_with_byte(KEY_SIZE_BYTES - 1, 0x01);
        assert_eq!(sub(&a, &b), raw_with_byte(KEY_SIZE_BYTES - 1, 0xFF));
        assert_eq!(sub(&MAX, &MAX), ZERO);
        assert_eq!(sub(&MAX, &ZERO), MAX);
    }

    #[test]
    fn test_add_carries_across_bytes() {
        // 0xFF + 0x01 = 0x0100.
        let a = raw_with_byte(KEY_SIZE_BYTES - 1, 0xFF);
        let b = raw_with_byte(KEY_SIZE_BYTES - 1, 0x01);
        assert_eq!(add(&a, &b), raw_with_byte(KEY_SIZE_BYTES - 2, 0x01));
        assert_eq!(add(&ZERO, &MAX), MAX);
    }

    #[test]
    fn test_add_sub_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let a = random(&mut rng);
            let b = random(&mut rng);
            let (low, high) = match compare(&a, &b) {
                Ordering::Greater => (b, a),
                _ => (a, b),
            };
            assert_eq!(add(&low, &sub(&high, &low)), high);
        }
    }

    #[test]
    fn test_significant_bits() {
        assert_eq!(significant_bits(&ZERO), 0);
        assert_eq!(significant_bits(&pow2(0).unwrap()), 1);
        assert_eq!(significant_bits(&pow2(8).unwrap()), 9);
        assert_eq!(significant_bits(&MAX), KEY_SIZE_BITS);
    }

    #[test]
    fn test_mask_to_bits_keeps_low_bits_only() {
        let mut x = MAX;
        mask_to_bits(&mut x, 1);
        assert_eq!(x, raw_with_byte(KEY_SIZE_BYTES - 1, 0x01));

        let mut x = MAX;
        mask_to_bits(&mut x, 12);
        let mut expected = ZERO;
        expected[KEY_SIZE_BYTES - 1] = 0xFF;
        expected[KEY_SIZE_BYTES - 2] = 0x0F;
        assert_eq!(x, expected);

        let mut x = MAX;
        mask_to_bits(&mut x, KEY_SIZE_BITS);
        assert_eq!(x, MAX);
    }

    #[test]
    fn test_random_in_range_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let low = pow2(100).unwrap();
        let high = pow2(101).unwrap();
        for _ in 0..1000 {
            let draw = random_in_range(&mut rng, &low, &high);
            assert_ne!(compare(&draw, &low), Ordering::Less);
            assert_ne!(compare(&draw, &high), Ordering::Greater);
        }
    }

    #[test]
    fn test_random_in_range_ignores_argument_order() {
        let mut rng = StdRng::seed_from_u64(43);
        let low = raw_with_byte(10, 0x55);
        let high = raw_with_byte(5, 0xAA);
        for _ in 0..1000 {
            let draw = random_in_range(&mut rng, &high, &low);
            assert_ne!(compare(&draw, &low), Ordering::Less);
            assert_ne!(compare(&draw, &high), Ordering::Greater);
        }
    }

    #[test]
    fn test_random_in_range_degenerate_interval() {
        let mut rng = StdRng::seed_from_u64(44);
        let bound = raw_with_byte(3, 0x7C);
        for _ in 0..10 {
            assert_eq!(random_in_range(&mut rng, &bound, &bound), bound);
        }
    }

    #[test]
    fn test_random_in_range_covers_tight_interval() {
        // Two-value interval: both endpoints must show up.
        let mut rng = StdRng::seed_from_u64(45);
        let low = raw_with_byte(KEY_SIZE_BYTES - 1, 0x10);
        let high = raw_with_byte(KEY_SIZE_BYTES - 1, 0x11);
        let mut saw_low = false;
        let mut saw_high = false;
        for _ in 0..200 {
            let draw = random_in_range(&mut rng, &low, &high);
            saw_low |= draw == low;
            saw_high |= draw == high;
        }
        assert!(saw_low && saw_high);
    }
}
