//! The 16-bit code-unit alphabet and a bounded cursor over word slices.
//!
//! Lead word map (bit 15 is the MSB):
//!
//! | Range | Meaning |
//! |---|---|
//! | `0x0000..=0x7FFF` | general binary float, 1-4 mantissa words follow |
//! | `0x8000..=0xD7FF`, `0xE000..=0xF7FF` | decimal short float, single word |
//! | `0xD800..=0xDFFF` | UTF-16 surrogates, never legal |
//! | `0xF800..=0xF8FF` | near-infinity binary float, 1-4 mantissa words follow |
//! | `0xFFF0..=0xFFF4` | +0, -0, +Inf, -Inf, NaN |
//! | rest of `0xF900..=0xFFFF` | reserved, never legal |

use crate::error::{DecodeError, DecodeResult};
use crate::special::SpecialValue;

/// Radix of a mantissa chunk.
pub(crate) const MODULO: u32 = 0x8000;

/// Bits carried by one mantissa chunk.
pub(crate) const CHUNK_BITS: u32 = 15;

/// `ceil(53 / 15)`: enough chunks for a full binary64 significand.
pub const MAX_MANTISSA_WORDS: usize = 4;

/// Longest possible encoding: one lead word plus the mantissa chunks.
pub const MAX_WORDS: usize = 1 + MAX_MANTISSA_WORDS;

pub(crate) const SURROGATE_START: u16 = 0xD800;
pub(crate) const SURROGATE_END: u16 = 0xDFFF;

pub(crate) const NEAR_INFINITY_TAG: u16 = 0xF800;
pub(crate) const NEAR_INFINITY_END: u16 = 0xF8FF;

pub(crate) const SPECIAL_BASE: u16 = 0xFFF0;

/// Largest value a continuation (mantissa) word may hold.
pub(crate) const MAX_CHUNK: u16 = 0x7FFF;

// General binary lead word: exponent in bits 0-11, sign in bit 12, chunk
// count minus one in bits 13-14.
pub(crate) const BINARY_EXPONENT_BIAS: i32 = 1024;
pub(crate) const BINARY_EXPONENT_MASK: u16 = 0x0FFF;
pub(crate) const BINARY_SIGN_BIT: u16 = 0x1000;
pub(crate) const BINARY_LENGTH_SHIFT: u32 = 13;

// Near-infinity lead word: exponent in bits 0-4, chunk count minus one in
// bits 5-6, sign in bit 7, tag in the high byte.
pub(crate) const NEAR_INFINITY_EXPONENT_BIAS: i32 = 1020;
pub(crate) const NEAR_INFINITY_EXPONENT_MASK: u16 = 0x001F;
pub(crate) const NEAR_INFINITY_SIGN_BIT: u16 = 0x0080;
pub(crate) const NEAR_INFINITY_LENGTH_SHIFT: u32 = 5;

/// Sub-format selected by a lead word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Exponent, sign and chunk count in the lead word, mantissa chunks after it.
    Binary,
    /// Three decimal digits and a power of ten packed into one word.
    ShortDecimal,
    /// Binary float in the top binade, tagged `0xF8xx`.
    NearInfinity,
    /// One of the five fixed scalars.
    Special(SpecialValue),
}

impl Format {
    /// Classify a lead word. Returns `None` for surrogates and reserved words.
    #[must_use]
    pub const fn of(lead: u16) -> Option<Self> {
        match lead {
            0x0000..=0x7FFF => Some(Self::Binary),
            SURROGATE_START..=SURROGATE_END => None,
            0x8000..=0xF7FF => Some(Self::ShortDecimal),
            NEAR_INFINITY_TAG..=NEAR_INFINITY_END => Some(Self::NearInfinity),
            _ => match SpecialValue::from_word(lead) {
                Some(special) => Some(Self::Special(special)),
                None => None,
            },
        }
    }
}

/// Chunk count stored in bits 13-14 of a binary lead word.
#[inline]
pub(crate) const fn binary_chunk_count(lead: u16) -> usize {
    ((lead >> BINARY_LENGTH_SHIFT) & 0b11) as usize + 1
}

/// Chunk count stored in bits 5-6 of a near-infinity lead word.
#[inline]
pub(crate) const fn near_infinity_chunk_count(lead: u16) -> usize {
    ((lead >> NEAR_INFINITY_LENGTH_SHIFT) & 0b11) as usize + 1
}

/// Total number of words (lead included) announced by `lead`.
///
/// Returns `None` when `lead` can never start an encoded value.
#[must_use]
pub const fn encoded_len(lead: u16) -> Option<usize> {
    match Format::of(lead) {
        Some(Format::Binary) => Some(1 + binary_chunk_count(lead)),
        Some(Format::NearInfinity) => Some(1 + near_infinity_chunk_count(lead)),
        Some(Format::ShortDecimal | Format::Special(_)) => Some(1),
        None => None,
    }
}

/// True if `word` is a valid UTF-16 code unit on its own (not a surrogate).
#[inline]
#[must_use]
pub const fn is_scalar_word(word: u16) -> bool {
    !matches!(word, SURROGATE_START..=SURROGATE_END)
}

/// Forward-only cursor over a word slice.
///
/// Reads never go past the words the caller asks for, and failures report
/// absolute positions in the underlying slice.
pub(crate) struct WordReader<'a> {
    words: &'a [u16],
    pos: usize,
}

impl<'a> WordReader<'a> {
    #[must_use]
    pub const fn new(words: &'a [u16], pos: usize) -> Self {
        WordReader { words, pos }
    }

    /// Read a single word
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEndOfInput`] if no words remain.
    pub fn read_word(&mut self) -> DecodeResult<u16> {
        let word = *self
            .words
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEndOfInput { position: self.pos })?;
        self.pos += 1;
        Ok(word)
    }

    /// Read a mantissa chunk, which must have its high bit clear.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEndOfInput`] if no words remain, or
    /// [`DecodeError::IllegalCodeUnit`] if the word is above `0x7FFF`.
    pub fn read_chunk(&mut self) -> DecodeResult<u16> {
        let position = self.pos;
        let word = self.read_word()?;
        if word > MAX_CHUNK {
            return Err(DecodeError::IllegalCodeUnit { word, position });
        }
        Ok(word)
    }

    /// Get current word position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }
}
