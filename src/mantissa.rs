use crate::error::DecodeResult;
use crate::exponent::scale;
use crate::words::{WordReader, CHUNK_BITS, MAX_MANTISSA_WORDS, MODULO};

/// Big-endian base-`0x8000` digits of a mantissa fraction, stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Chunks {
    digits: [u16; MAX_MANTISSA_WORDS],
    len: usize,
}

impl Chunks {
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.digits[..self.len]
    }

    /// Number of digits, always in `1..=MAX_MANTISSA_WORDS`
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// The 2-bit length code stored in lead words: digit count minus one.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn length_code(&self) -> u16 {
        (self.len - 1) as u16
    }
}

/// Pack a fraction `y` in `[0, 1)` into 1-4 base-`0x8000` digits.
///
/// Stops as soon as the remaining fraction is exactly zero. Every step is
/// exact: scaling by a power of two and splitting off the integer part
/// never round.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn pack(y: f64) -> Chunks {
    debug_assert!((0.0..1.0).contains(&y), "mantissa {y} out of [0, 1)");

    let mut chunks = Chunks {
        digits: [0; MAX_MANTISSA_WORDS],
        len: 0,
    };
    let mut rest = y;
    while chunks.len < MAX_MANTISSA_WORDS {
        rest *= f64::from(MODULO);
        let digit = rest.trunc();
        chunks.digits[chunks.len] = digit as u16;
        chunks.len += 1;
        rest -= digit;
        if rest == 0.0 {
            break;
        }
    }

    // 60 bits of digits always hold a 53-bit significand
    debug_assert!(rest == 0.0, "mantissa {y} needs more than 4 chunks");
    chunks
}

/// Read `count` mantissa digits and rebuild the fraction they encode.
///
/// Digits are accumulated as a 60-bit fixed-point integer and scaled
/// once, so the result is exact for anything [`pack`] produced.
///
/// # Errors
///
/// Returns [`DecodeError`](crate::DecodeError) if the input ends early or a
/// digit is above `0x7FFF`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]
pub(crate) fn unpack(reader: &mut WordReader, count: usize) -> DecodeResult<f64> {
    debug_assert!((1..=MAX_MANTISSA_WORDS).contains(&count));

    let mut fixed = 0u64;
    for _ in 0..count {
        fixed = (fixed << CHUNK_BITS) | u64::from(reader.read_chunk()?);
    }
    Ok(scale(fixed as f64, -((count as u32 * CHUNK_BITS) as i32)))
}
