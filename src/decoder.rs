//! Decoding of code-unit sequences back into doubles
//!
//! The lead word alone determines how many words a value occupies, so
//! decoding is a single forward pass with no lookahead or backtracking.

use std::iter::FusedIterator;
use std::str::EncodeUtf16;

use log::trace;

use crate::error::{DecodeError, DecodeResult};
use crate::exponent::scale;
use crate::mantissa;
use crate::short_decimal;
use crate::words::{
    binary_chunk_count, encoded_len, near_infinity_chunk_count, Format, WordReader, BINARY_EXPONENT_BIAS,
    BINARY_EXPONENT_MASK, BINARY_SIGN_BIT, MAX_WORDS, NEAR_INFINITY_EXPONENT_BIAS,
    NEAR_INFINITY_EXPONENT_MASK, NEAR_INFINITY_SIGN_BIT,
};

/// A decoded value together with the number of words it occupied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoded {
    pub value: f64,
    pub consumed: usize,
}

/// Decode one value starting at `words[offset]`.
///
/// # Errors
///
/// Returns [`DecodeError::IllegalCodeUnit`] if the lead word is a surrogate
/// or reserved, or a continuation word has its high bit set, and
/// [`DecodeError::UnexpectedEndOfInput`] if the slice ends before the value
/// does. Positions in errors are absolute indices into `words`.
///
/// # Examples
///
/// ```
/// let words = [0x9864, 0xFFF2];
/// let first = fpcvt::decode(&words, 0).unwrap();
/// assert_eq!((first.value, first.consumed), (1.0, 1));
/// let second = fpcvt::decode(&words, first.consumed).unwrap();
/// assert_eq!(second.value, f64::INFINITY);
/// ```
pub fn decode(words: &[u16], offset: usize) -> DecodeResult<Decoded> {
    let mut reader = WordReader::new(words, offset);
    let value = decode_value(&mut reader).map_err(|err| {
        trace!("decode at offset {offset} failed: {err}");
        err
    })?;
    Ok(Decoded {
        value,
        consumed: reader.position() - offset,
    })
}

/// Decode one value from the UTF-16 code units of `text`, starting at code
/// unit `offset`.
///
/// Does not allocate: at most [`MAX_WORDS`] units are transcoded into a
/// stack buffer. Error positions count UTF-16 units from the start of `text`.
///
/// Finding code unit `offset` means transcoding `text` from its start, so
/// each call is linear in `offset`. Use [`StrDecoder`] to walk every value
/// in a string.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_str(text: &str, offset: usize) -> DecodeResult<Decoded> {
    let mut window = [0u16; MAX_WORDS];
    let mut len = 0;
    for (slot, unit) in window.iter_mut().zip(text.encode_utf16().skip(offset)) {
        *slot = unit;
        len += 1;
    }
    decode(&window[..len], 0).map_err(|err| err.offset_by(offset))
}

fn decode_value(reader: &mut WordReader) -> DecodeResult<f64> {
    let position = reader.position();
    let lead = reader.read_word()?;
    match Format::of(lead) {
        Some(Format::Binary) => decode_binary(lead, reader),
        Some(Format::ShortDecimal) => Ok(short_decimal::decode_word(lead)),
        Some(Format::NearInfinity) => decode_near_infinity(lead, reader),
        Some(Format::Special(special)) => Ok(special.to_f64()),
        None => Err(DecodeError::IllegalCodeUnit {
            word: lead,
            position,
        }),
    }
}

fn decode_binary(lead: u16, reader: &mut WordReader) -> DecodeResult<f64> {
    let m = mantissa::unpack(reader, binary_chunk_count(lead))?;
    let exponent = i32::from(lead & BINARY_EXPONENT_MASK) - BINARY_EXPONENT_BIAS;
    Ok(apply_sign(scale(m, exponent), lead & BINARY_SIGN_BIT != 0))
}

fn decode_near_infinity(lead: u16, reader: &mut WordReader) -> DecodeResult<f64> {
    let m = mantissa::unpack(reader, near_infinity_chunk_count(lead))?;
    let exponent = i32::from(lead & NEAR_INFINITY_EXPONENT_MASK) + NEAR_INFINITY_EXPONENT_BIAS;
    Ok(apply_sign(
        scale(m * 4.0, exponent),
        lead & NEAR_INFINITY_SIGN_BIT != 0,
    ))
}

fn apply_sign(magnitude: f64, negative: bool) -> f64 {
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Iterator over the values of a concatenated word sequence
///
/// Yields one `Err` on the first malformed value, then stops.
///
/// ```
/// use fpcvt::{encode, Decoder};
///
/// let mut words = Vec::new();
/// for value in [1.5, -0.0, 1e300] {
///     words.extend_from_slice(encode(value).as_words());
/// }
/// let values: Vec<f64> = Decoder::new(&words).collect::<Result<_, _>>().unwrap();
/// assert_eq!(values, [1.5, -0.0, 1e300]);
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    words: &'a [u16],
    position: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub const fn new(words: &'a [u16]) -> Self {
        Self {
            words,
            position: 0,
            failed: false,
        }
    }

    /// Index of the next word to be decoded
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for Decoder<'_> {
    type Item = DecodeResult<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.words.len() {
            return None;
        }
        match decode(self.words, self.position) {
            Ok(decoded) => {
                self.position += decoded.consumed;
                Some(Ok(decoded.value))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Decoder<'_> {}

/// Iterator over the values encoded back to back in a string
///
/// Keeps its place in the UTF-16 transcoding of `text`, so walking the
/// whole string is linear. Error positions count UTF-16 units from the
/// start of `text`, as with [`decode_str`].
///
/// ```
/// use fpcvt::{encode, StrDecoder};
///
/// let text = format!("{}{}", encode(0.25), encode(-1e-300));
/// let values: Vec<f64> = StrDecoder::new(&text).collect::<Result<_, _>>().unwrap();
/// assert_eq!(values, [0.25, -1e-300]);
/// ```
#[derive(Debug, Clone)]
pub struct StrDecoder<'a> {
    units: EncodeUtf16<'a>,
    position: usize,
    failed: bool,
}

impl<'a> StrDecoder<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            units: text.encode_utf16(),
            position: 0,
            failed: false,
        }
    }

    /// UTF-16 offset of the next value to be decoded
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for StrDecoder<'_> {
    type Item = DecodeResult<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let lead = self.units.next()?;

        // an illegal lead word fails in `decode` without touching the rest
        let len = encoded_len(lead).unwrap_or(1);
        let mut window = [0u16; MAX_WORDS];
        window[0] = lead;
        let mut filled = 1;
        for (slot, unit) in window[1..len].iter_mut().zip(&mut self.units) {
            *slot = unit;
            filled += 1;
        }

        match decode(&window[..filled], 0) {
            Ok(decoded) => {
                self.position += decoded.consumed;
                Some(Ok(decoded.value))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err.offset_by(self.position)))
            }
        }
    }
}

impl FusedIterator for StrDecoder<'_> {}
