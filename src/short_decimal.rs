//! Decimal short floats: `ddd * 10^e` in a single word.
//!
//! Bits in the word:
//! - 0-9: decimal mantissa, `100..=999` when produced by the encoder
//! - 10: sign
//! - 11-14: exponent code, `e + 5`, with code 11 skipped
//! - 15: always set
//!
//! Code 11 would put the word in `0xD800..=0xDFFF`, so exponents from 6 up
//! are stored one code higher. Codes `0..=10` and `12..=14` give the
//! exponent window `-5..=8`; code 15 would collide with `0xF800` and up.

use log::trace;

use crate::words::SURROGATE_START;

const TAG: u16 = 0x8000;
const SIGN_BIT: u16 = 0x0400;
const MANTISSA_MASK: u16 = 0x03FF;
const EXPONENT_SHIFT: u32 = 11;
const EXPONENT_MASK: u16 = 0x000F;

/// The one exponent code whose words are all surrogates.
const SKIPPED_CODE: u16 = (SURROGATE_START - TAG) >> EXPONENT_SHIFT;

pub(crate) const MIN_DIGITS: f64 = 100.0;
pub(crate) const MAX_DIGITS: f64 = 999.0;

pub(crate) const MIN_EXPONENT: i32 = -5;
pub(crate) const MAX_EXPONENT: i32 = 8;

/// Exact powers of ten, one step past the window on either side.
const POW10: [f64; 10] = [1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9];

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
const fn exponent_code(exponent: i32) -> u16 {
    let code = (exponent - MIN_EXPONENT) as u16;
    if code >= SKIPPED_CODE {
        code + 1
    } else {
        code
    }
}

const fn code_exponent(code: u16) -> i32 {
    let code = if code > SKIPPED_CODE { code - 1 } else { code };
    code as i32 + MIN_EXPONENT
}

/// `flt / 10^exponent`, multiplying by `10^-exponent` for negative exponents
/// so only exact powers of ten are ever used.
fn shift_decimal_point(flt: f64, exponent: i32) -> Option<f64> {
    let power = POW10.get(exponent.unsigned_abs() as usize)?;
    if exponent < 0 {
        Some(flt * power)
    } else {
        Some(flt / power)
    }
}

/// Try to encode a finite, positive, nonzero `flt` as a single word.
///
/// Returns `None` when `flt` is not three decimal digits times a power of
/// ten within the window, or when decoding the candidate word would not
/// give back exactly the same double. The caller falls through to the
/// binary path in that case.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub(crate) fn encode(flt: f64, negative: bool) -> Option<u16> {
    debug_assert!(flt.is_finite() && flt > 0.0);

    // digits before the decimal point; off by one at exact powers of ten
    let int_digits = (flt.log2() * std::f64::consts::LOG10_2).floor() as i32 + 1;
    let mut exponent = int_digits - 3;
    let mut scaled = shift_decimal_point(flt, exponent)?;
    if scaled.round() > MAX_DIGITS {
        exponent += 1;
        scaled = shift_decimal_point(flt, exponent)?;
    } else if scaled.round() < MIN_DIGITS {
        exponent -= 1;
        scaled = shift_decimal_point(flt, exponent)?;
    }

    if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
        return None;
    }
    let digits = scaled.round();
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        return None;
    }

    let sign = if negative { SIGN_BIT } else { 0 };
    let word = TAG | (exponent_code(exponent) << EXPONENT_SHIFT) | sign | digits as u16;
    debug_assert!(word < SURROGATE_START || (0xE000..0xF800).contains(&word));

    let expected = if negative { -flt } else { flt };
    if decode_word(word).to_bits() != expected.to_bits() {
        trace!("{expected:e} is not exactly {digits}e{exponent}, using binary format");
        return None;
    }
    Some(word)
}

/// Decode a short decimal word.
///
/// Mantissas outside `100..=999` are never produced by [`encode`] but are
/// decoded by the same formula. Negative exponents divide by `10^-e`:
/// multiplying by an inexact `10^e` would drift in the last bit.
pub(crate) fn decode_word(word: u16) -> f64 {
    debug_assert!(word >= TAG && word < 0xF800);

    let digits = f64::from(word & MANTISSA_MASK);
    let exponent = code_exponent((word >> EXPONENT_SHIFT) & EXPONENT_MASK);
    let index = exponent.unsigned_abs() as usize;
    let magnitude = if exponent < 0 {
        digits / POW10[index]
    } else {
        digits * POW10[index]
    };

    if word & SIGN_BIT == 0 {
        magnitude
    } else {
        -magnitude
    }
}
