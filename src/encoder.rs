//! Encoding dispatch: classify a double and run the matching sub-encoder.
//!
//! Classification order, first match wins:
//! 1. zero (either sign) or NaN, then infinity: one special word
//! 2. `floor(log2(|x|)) >= 1023`: near-infinity format
//! 3. three decimal digits times `10^-5..=10^8`: one short decimal word
//! 4. everything else: general binary format

use crate::encoded::Encoded;
use crate::exponent::{self, BinaryExponent};
use crate::mantissa;
use crate::short_decimal;
use crate::special::SpecialValue;
use crate::words::{
    BINARY_EXPONENT_BIAS, BINARY_LENGTH_SHIFT, BINARY_SIGN_BIT, NEAR_INFINITY_END,
    NEAR_INFINITY_EXPONENT_BIAS, NEAR_INFINITY_LENGTH_SHIFT, NEAR_INFINITY_SIGN_BIT,
    NEAR_INFINITY_TAG,
};

/// Encode a double into 1-5 code units.
///
/// Total over every `f64` bit pattern and allocation-free. All NaN payloads
/// collapse to the one NaN word; the sign of zero is kept.
///
/// # Examples
///
/// ```
/// let encoded = fpcvt::encode(3.6);
/// assert_eq!(encoded.as_words(), &[0x9968]);
/// assert_eq!(encoded.value(), 3.6);
/// ```
#[must_use]
pub fn encode(value: f64) -> Encoded {
    if let Some(special) = SpecialValue::classify(value) {
        return Encoded::single(special.word());
    }

    let negative = value.is_sign_negative();
    let flt = value.abs();
    match exponent::extract(flt) {
        BinaryExponent::NearInfinity(p) => encode_near_infinity(flt, p, negative),
        BinaryExponent::General(p) => match short_decimal::encode(flt, negative) {
            Some(word) => Encoded::single(word),
            None => encode_binary(flt, p, negative),
        },
    }
}

/// Lead word `e + 1024 | sign | length code`, where `e = p + 1` is the
/// exponent of the `[0.5, 1)` mantissa. `e` stays in `-1023..=1023`, so the
/// lead word never reaches `0x8000`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn encode_binary(flt: f64, p: i32, negative: bool) -> Encoded {
    let chunks = mantissa::pack(exponent::normalize(flt, p));
    let sign = if negative { BINARY_SIGN_BIT } else { 0 };
    let lead = (p + 1 + BINARY_EXPONENT_BIAS) as u16
        | sign
        | (chunks.length_code() << BINARY_LENGTH_SHIFT);
    debug_assert!(lead < 0x8000, "binary lead word {lead:#06X}");
    Encoded::with_mantissa(lead, &chunks)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn encode_near_infinity(flt: f64, p: i32, negative: bool) -> Encoded {
    let chunks = mantissa::pack(exponent::normalize_near_infinity(flt, p));
    let sign = if negative { NEAR_INFINITY_SIGN_BIT } else { 0 };
    let lead = NEAR_INFINITY_TAG
        | (p - 1 - NEAR_INFINITY_EXPONENT_BIAS) as u16
        | sign
        | (chunks.length_code() << NEAR_INFINITY_LENGTH_SHIFT);
    debug_assert!(
        (NEAR_INFINITY_TAG..=NEAR_INFINITY_END).contains(&lead),
        "near-infinity lead word {lead:#06X}"
    );
    Encoded::with_mantissa(lead, &chunks)
}
