use std::fmt;
use std::fmt::Write as _;

use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::DecodeError;
use crate::mantissa::Chunks;
use crate::special::SpecialValue;
use crate::words::{Format, MAX_WORDS};

/// An encoded double: one lead word followed by up to four mantissa words
///
/// The words are stored inline, so producing an [`Encoded`] never allocates.
/// Every word is a Unicode scalar value, which makes the encoding safe to
/// embed in any UTF-16 string.
///
/// # NaN semantics
///
/// All NaNs share one encoding, so two `Encoded` NaNs compare equal even
/// though the doubles they came from do not. Equality and hashing are over
/// the words, which also keeps `+0.0` and `-0.0` apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoded {
    // unused trailing slots stay zero so the derived impls only see `len` words
    words: [u16; MAX_WORDS],
    len: u8,
}

impl Encoded {
    pub(crate) const fn single(word: u16) -> Self {
        Self {
            words: [word, 0, 0, 0, 0],
            len: 1,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn with_mantissa(lead: u16, chunks: &Chunks) -> Self {
        let mut words = [0; MAX_WORDS];
        words[0] = lead;
        words[1..=chunks.len()].copy_from_slice(chunks.as_slice());
        Self {
            words,
            len: (chunks.len() + 1) as u8,
        }
    }

    /// Get the encoded words (zero-copy)
    #[must_use]
    pub fn as_words(&self) -> &[u16] {
        &self.words[..self.word_count()]
    }

    /// Number of words, 1 to 5
    #[must_use]
    pub const fn word_count(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub const fn lead_word(&self) -> u16 {
        self.words[0]
    }

    /// Copy the words into a new vector
    #[must_use]
    pub fn to_vec(&self) -> Vec<u16> {
        self.as_words().to_vec()
    }

    /// Which of the four formats the lead word selects
    #[must_use]
    pub fn format(&self) -> Format {
        let format = Format::of(self.lead_word());
        debug_assert!(format.is_some(), "{self:?} has an illegal lead word");
        format.unwrap_or(Format::Special(SpecialValue::NaN))
    }

    /// Decode back to the double this was built from.
    ///
    /// Bit-exact for every input except NaN, which comes back as the
    /// canonical quiet NaN.
    #[must_use]
    pub fn value(&self) -> f64 {
        let decoded = decode(self.as_words(), 0);
        debug_assert!(decoded.is_ok(), "{self:?} does not decode: {decoded:?}");
        decoded.map_or(f64::NAN, |decoded| decoded.value)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(
            self.special(),
            Some(SpecialValue::PositiveZero | SpecialValue::NegativeZero)
        )
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.special() == Some(SpecialValue::NaN)
    }

    #[must_use]
    pub fn is_infinity(&self) -> bool {
        self.is_pos_infinity() || self.is_neg_infinity()
    }

    #[must_use]
    pub fn is_pos_infinity(&self) -> bool {
        self.special() == Some(SpecialValue::PositiveInfinity)
    }

    #[must_use]
    pub fn is_neg_infinity(&self) -> bool {
        self.special() == Some(SpecialValue::NegativeInfinity)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        !self.is_nan() && !self.is_infinity()
    }

    fn special(&self) -> Option<SpecialValue> {
        match self.format() {
            Format::Special(special) => Some(special),
            _ => None,
        }
    }

    /// The words as `char`s, ready to append to a `String`.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        // the encoder never emits surrogates, so the fallback is unreachable
        self.as_words()
            .iter()
            .map(|&w| char::from_u32(u32::from(w)).unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

impl AsRef<[u16]> for Encoded {
    fn as_ref(&self) -> &[u16] {
        self.as_words()
    }
}

impl From<f64> for Encoded {
    fn from(value: f64) -> Self {
        encode(value)
    }
}

impl TryFrom<&[u16]> for Encoded {
    type Error = DecodeError;

    /// Validate a complete encoding of exactly one value.
    #[allow(clippy::cast_possible_truncation)]
    fn try_from(words: &[u16]) -> Result<Self, Self::Error> {
        let decoded = decode(words, 0)?;
        if decoded.consumed != words.len() {
            return Err(DecodeError::TrailingWords {
                consumed: decoded.consumed,
                len: words.len(),
            });
        }
        let mut buf = [0; MAX_WORDS];
        buf[..words.len()].copy_from_slice(words);
        Ok(Self {
            words: buf,
            len: words.len() as u8,
        })
    }
}

impl fmt::Display for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Encoded[")?;
        for (i, word) in self.as_words().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{word:#06X}")?;
        }
        f.write_str("]")
    }
}
