//! All-or-nothing diffusion of the secret.
//!
//! Splitting hides the secret in the constant term of a random polynomial,
//! but a party holding T-1 shares who can guess part of a low-entropy
//! secret could confirm the guess. To close that channel the secret is
//! whitened before splitting with an unkeyed, reversible transform in
//! which every output bit depends on every input bit: XTEA with a zero
//! key, slid as an overlapping 64-bit window over the secret's bytes
//! arranged in a ring.
//!
//! The byte layout mirrors the classic tool exactly so that shares remain
//! interchangeable: the d-bit value is spread over 16-bit words, least
//! significant word first, big endian inside each word. When d/8 is odd
//! the high byte of the extra word is folded into the last ring slot for
//! the duration of the mixing passes. Each window loads its two 32-bit
//! halves big-endian from four consecutive ring bytes, wrapping modulo
//! d/8.

use ssss_math::BigBits;
use zeroize::Zeroizing;

/// Smallest field degree the transform is defined for: one XTEA block.
pub const MIN_DEGREE: usize = 64;

const DELTA: u32 = 0x9e37_79b9;
const ROUNDS: u32 = 32;

fn encipher(v: &mut [u32; 2]) {
    let mut sum = 0u32;
    for _ in 0..ROUNDS {
        v[0] = v[0].wrapping_add((((v[1] << 4) ^ (v[1] >> 5)).wrapping_add(v[1])) ^ sum);
        sum = sum.wrapping_add(DELTA);
        v[1] = v[1].wrapping_add((((v[0] << 4) ^ (v[0] >> 5)).wrapping_add(v[0])) ^ sum);
    }
}

fn decipher(v: &mut [u32; 2]) {
    let mut sum = DELTA.wrapping_mul(ROUNDS);
    for _ in 0..ROUNDS {
        v[1] = v[1].wrapping_sub((((v[0] << 4) ^ (v[0] >> 5)).wrapping_add(v[0])) ^ sum);
        sum = sum.wrapping_sub(DELTA);
        v[0] = v[0].wrapping_sub((((v[1] << 4) ^ (v[1] >> 5)).wrapping_add(v[1])) ^ sum);
    }
}

/// Applies one cipher call to the 8 ring bytes starting at `start`.
fn mix_window(ring: &mut [u8], start: usize, cipher: fn(&mut [u32; 2])) {
    let n = ring.len();
    let mut v = [0u32; 2];
    for (half, value) in v.iter_mut().enumerate() {
        let mut word = 0u32;
        for k in 0..4 {
            word = (word << 8) | u32::from(ring[(start + 4 * half + k) % n]);
        }
        *value = word;
    }
    cipher(&mut v);
    for (half, value) in v.iter().enumerate() {
        for k in 0..4 {
            ring[(start + 4 * half + k) % n] = (value >> (24 - 8 * k)) as u8;
        }
    }
}

/// Lays the value out as 16-bit words, LSW first, big endian per word,
/// with the odd-byte fold applied.
fn export_buffer(value: &BigBits, degree: usize) -> Zeroizing<Vec<u8>> {
    let nbytes = degree / 8;
    let nwords = (degree + 8) / 16;
    let mut buf = Zeroizing::new(vec![0u8; 2 * nwords]);
    let be = Zeroizing::new(value.to_bytes_be(nbytes));
    for (i, b) in be.iter().rev().enumerate() {
        buf[i ^ 1] = *b;
    }
    if degree % 16 == 8 {
        buf[nbytes - 1] = buf[nbytes];
    }
    buf
}

/// Inverse of [`export_buffer`]: unfolds the odd byte and reads the word
/// layout back into a value of at most `degree` bits.
fn import_buffer(buf: &mut [u8], degree: usize) -> BigBits {
    let nbytes = degree / 8;
    if degree % 16 == 8 {
        buf[nbytes] = buf[nbytes - 1];
        buf[nbytes - 1] = 0;
    }
    let mut be = Zeroizing::new(vec![0u8; buf.len()]);
    for (i, b) in be.iter_mut().rev().enumerate() {
        *b = buf[i ^ 1];
    }
    BigBits::from_bytes_be(&be)
}

/// Diffuses a d-bit value in place.
///
/// Requires `degree >= MIN_DEGREE` and a multiple of 8; callers gate on
/// that and skip (with a warning) otherwise.
pub fn encode(value: &mut BigBits, degree: usize) {
    debug_assert!(degree >= MIN_DEGREE && degree % 8 == 0);
    let nbytes = degree / 8;
    let mut buf = export_buffer(value, degree);
    for pass in 0..40 * nbytes / 2 {
        mix_window(&mut buf[..nbytes], 2 * pass, encipher);
    }
    *value = import_buffer(&mut buf, degree);
}

/// Reverses [`encode`] by running the window sequence backwards.
pub fn decode(value: &mut BigBits, degree: usize) {
    debug_assert!(degree >= MIN_DEGREE && degree % 8 == 0);
    let nbytes = degree / 8;
    let mut buf = export_buffer(value, degree);
    for pass in (0..40 * nbytes / 2).rev() {
        mix_window(&mut buf[..nbytes], 2 * pass, decipher);
    }
    *value = import_buffer(&mut buf, degree);
}

#[cfg(test)]
mod tests {
    use super::{decipher, decode, encipher, encode};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use ssss_math::BigBits;

    #[test]
    fn xtea_zero_vector() {
        // Published vector for 32-round XTEA with an all-zero key.
        let mut v = [0u32; 2];
        encipher(&mut v);
        assert_eq!(v, [0xdee9_d4d8, 0xf713_1ed9]);
        decipher(&mut v);
        assert_eq!(v, [0, 0]);
    }

    #[test]
    fn xtea_roundtrip() {
        let mut v = [0x0123_4567, 0x89ab_cdef];
        encipher(&mut v);
        assert_eq!(v, [0x7e66_c71c, 0x8889_7221]);
        decipher(&mut v);
        assert_eq!(v, [0x0123_4567, 0x89ab_cdef]);
    }

    #[test]
    fn known_answers() {
        // Generated with an independent reference implementation.
        let cases: [(usize, u64, &[u8]); 4] = [
            (64, 0, &[0xaf, 0xc8, 0xce, 0xea, 0xe8, 0xff, 0xad, 0xe9]),
            (
                64,
                0x0123_4567_89ab_cdef,
                &[0xf8, 0xef, 0x27, 0xb2, 0x78, 0x98, 0x66, 0x03],
            ),
            (80, 0, &[0x59, 0xd7, 0x87, 0xc9, 0xc3, 0x73, 0x0b, 0x9c, 0xd9, 0x2d]),
            (
                128,
                0,
                &[
                    0x13, 0x66, 0x85, 0xa6, 0x8a, 0x5b, 0x69, 0x7a, 0xc6, 0xb6, 0x98, 0x25,
                    0x6c, 0xdc, 0xd4, 0x6e,
                ],
            ),
        ];
        for (degree, input, expected) in cases {
            let mut value = BigBits::from_u64(input);
            encode(&mut value, degree);
            assert_eq!(
                value.to_bytes_be(degree / 8),
                expected,
                "encode({input:#x}, d={degree})"
            );
        }
    }

    #[test]
    fn known_answers_odd_word_count() {
        // d = 72 exercises the extra-word byte fold.
        let mut zero = BigBits::zero();
        encode(&mut zero, 72);
        assert_eq!(
            zero.to_bytes_be(9),
            [0x02, 0x8f, 0x09, 0xdd, 0xdb, 0x7b, 0x8e, 0x44, 0x24]
        );

        let mut value =
            BigBits::from_bytes_be(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x55]);
        encode(&mut value, 72);
        assert_eq!(
            value.to_bytes_be(9),
            [0x8c, 0xd2, 0x51, 0x37, 0xb6, 0xda, 0x08, 0x0c, 0x4c]
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        for degree in [64, 72, 80, 128, 256, 1024] {
            for _ in 0..8 {
                let mut bytes = vec![0u8; degree / 8];
                rng.fill(bytes.as_mut_slice());
                let original = BigBits::from_bytes_be(&bytes);

                let mut value = original.clone();
                encode(&mut value, degree);
                assert!(value.bit_len() <= degree);
                decode(&mut value, degree);
                assert_eq!(value, original, "d={degree}");
            }
        }
    }

    #[test]
    fn encode_changes_every_input() {
        let mut value = BigBits::zero();
        encode(&mut value, 64);
        assert!(!value.is_zero());
    }
}
