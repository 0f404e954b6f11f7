use fpcvt::{decode, encode, encoded_len, is_scalar_word, DecodeError, Format, SpecialValue};

/// Helper: render words the way they are written in the layout tables
fn hex_words(words: &[u16]) -> String {
    words
        .iter()
        .map(|w| format!("{w:04X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn assert_words(value: f64, expected: &[u16]) {
    let encoded = encode(value);
    assert_eq!(
        hex_words(encoded.as_words()),
        hex_words(expected),
        "encoding of {value:e}"
    );
}

// =============================================================================
// Exact word patterns
// =============================================================================

#[test]
fn test_exact_words_specials() {
    assert_words(0.0, &[0xFFF0]);
    assert_words(-0.0, &[0xFFF1]);
    assert_words(f64::INFINITY, &[0xFFF2]);
    assert_words(f64::NEG_INFINITY, &[0xFFF3]);
    assert_words(f64::NAN, &[0xFFF4]);
}

#[test]
fn test_exact_words_short_decimal() {
    // 100 * 10^-2
    assert_words(1.0, &[0x9864]);
    assert_words(-1.0, &[0x9C64]);
    // 360 * 10^-2
    assert_words(3.6, &[0x9968]);
    // 500 * 10^-3
    assert_words(0.5, &[0x91F4]);
    // 360 * 10^-5, the lowest exponent code
    assert_words(0.0036, &[0x8168]);
    // 150 * 10^2
    assert_words(15000.0, &[0xB896]);
    // 100 * 10^5, the last code below the surrogates
    assert_words(1e7, &[0xD064]);
    // 100 * 10^6 skips over 0xD800..=0xDFFF
    assert_words(1e8, &[0xE064]);
    // 280 * 10^8, the highest exponent code
    assert_words(28e9, &[0xF118]);
    assert_words(-999e8, &[0xF7E7]);
}

#[test]
fn test_exact_words_binary() {
    // 2^-20 = 0.5 * 2^-19; field -19 + 1024
    assert_words(2f64.powi(-20), &[0x03ED, 0x4000]);
    assert_words(-(2f64.powi(-20)), &[0x13ED, 0x4000]);
    // smallest normal: 0.5 * 2^-1021
    assert_words(f64::MIN_POSITIVE, &[0x0003, 0x4000]);
    // smallest subnormal: exponent clamped at -1024, mantissa 2^-50
    assert_words(5e-324, &[0x6001, 0x0000, 0x0000, 0x0000, 0x0200]);
    // 1/3 needs all four chunks
    assert_eq!(encode(1.0 / 3.0).word_count(), 5);
    assert_eq!(encode(1.0 / 3.0).lead_word(), 0x63FF);
}

#[test]
fn test_exact_words_near_infinity() {
    assert_words(2f64.powi(1023), &[0xF802, 0x4000]);
    assert_words(-(2f64.powi(1023)), &[0xF882, 0x4000]);
    assert_words(f64::MAX, &[0xF862, 0x7FFF, 0x7FFF, 0x7FFF, 0x7F80]);
    assert_words(-f64::MAX, &[0xF8E2, 0x7FFF, 0x7FFF, 0x7FFF, 0x7F80]);
}

// =============================================================================
// Lead-word bands
// =============================================================================

#[test]
fn test_every_lead_word_classifies_consistently() {
    for lead in 0..=u16::MAX {
        let format = Format::of(lead);
        let len = encoded_len(lead);
        assert_eq!(format.is_some(), len.is_some(), "lead {lead:#06X}");

        match lead {
            0x0000..=0x7FFF => {
                assert_eq!(format, Some(Format::Binary));
                assert_eq!(len, Some(usize::from(lead >> 13) + 2));
            }
            0x8000..=0xD7FF | 0xE000..=0xF7FF => {
                assert_eq!(format, Some(Format::ShortDecimal));
                assert_eq!(len, Some(1));
            }
            0xF800..=0xF8FF => {
                assert_eq!(format, Some(Format::NearInfinity));
                assert_eq!(len, Some(usize::from((lead >> 5) & 0b11) + 2));
            }
            0xFFF0..=0xFFF4 => {
                let special = SpecialValue::from_word(lead).unwrap();
                assert_eq!(format, Some(Format::Special(special)));
                assert_eq!(len, Some(1));
            }
            _ => assert_eq!(format, None, "lead {lead:#06X} should be illegal"),
        }
    }
}

#[test]
fn test_illegal_lead_words_fail_to_decode() {
    for word in (0xD800..=0xDFFF).chain(0xF900..=0xFFEF).chain(0xFFF5..=0xFFFF) {
        assert!(!is_scalar_word(word) || Format::of(word).is_none());
        assert_eq!(
            decode(&[word, 0x4000, 0x4000, 0x4000, 0x4000], 0),
            Err(DecodeError::IllegalCodeUnit { word, position: 0 })
        );
    }
}

// =============================================================================
// Short decimal band
// =============================================================================

#[test]
fn test_short_decimal_band_exhaustive() {
    // every word the encoder can produce: mantissa 100..=999 under each
    // exponent code and sign
    for code in (0u16..=14).filter(|&c| c != 11) {
        for sign in [0u16, 0x0400] {
            for digits in 100u16..=999 {
                let word = 0x8000 | (code << 11) | sign | digits;
                let value = decode(&[word], 0).unwrap().value;
                assert_eq!(
                    encode(value).as_words(),
                    &[word],
                    "{value:e} should encode back to {word:#06X}"
                );
            }
        }
    }
}

#[test]
fn test_every_high_lead_word_decodes_or_is_rejected() {
    for word in 0x8000..=0xFFFF {
        let words = [word, 0x4000, 0x4000, 0x4000, 0x4000];
        match decode(&words, 0) {
            Ok(decoded) => {
                assert_eq!(Some(decoded.consumed), encoded_len(word));
                if !decoded.value.is_nan() {
                    assert_eq!(
                        encode(decoded.value).value().to_bits(),
                        decoded.value.to_bits(),
                        "{word:#06X}"
                    );
                }
            }
            Err(err) => {
                assert_eq!(err, DecodeError::IllegalCodeUnit { word, position: 0 });
                assert_eq!(Format::of(word), None);
            }
        }
    }
}

#[test]
fn test_short_decimal_holes_decode() {
    // mantissas below 100 are never produced but still decode
    assert_eq!(decode(&[0x8000], 0).unwrap().value.to_bits(), 0.0f64.to_bits());
    assert_eq!(
        decode(&[0x8400], 0).unwrap().value.to_bits(),
        (-0.0f64).to_bits()
    );
    assert_eq!(decode(&[0x9805], 0).unwrap().value, 0.05);
    assert_eq!(decode(&[0xF3FF], 0).unwrap().value, 1023e8);
}

#[test]
fn test_non_short_decimals_use_binary() {
    for value in [1234.0, 0.1234, 1e11, 1e-6, 123_456_789.0] {
        let encoded = encode(value);
        assert_eq!(encoded.format(), Format::Binary, "{value:e}");
        assert_eq!(encoded.value(), value);
    }
}

// =============================================================================
// Continuation words
// =============================================================================

#[test]
fn test_continuation_words_never_set_high_bit() {
    for value in [1.0 / 3.0, -std::f64::consts::PI, f64::MAX, 5e-324, 1e-300] {
        let encoded = encode(value);
        assert!(encoded.as_words()[1..].iter().all(|&w| w <= 0x7FFF));
    }
}

#[test]
fn test_trailing_zero_chunks_are_dropped() {
    // 0.75 * 2^-30 needs one chunk, 1 + 2^-30 needs three
    assert_eq!(encode(0.75 * 2f64.powi(-30)).word_count(), 2);
    assert_eq!(encode(1.0 + 2f64.powi(-30)).word_count(), 4);
}
