//! # fpcvt
//!
//! A compact, text-safe encoding of IEEE-754 doubles as short sequences of
//! 16-bit code units.
//!
//! Every emitted word is a Unicode scalar value (never a surrogate), so an
//! encoded double can be appended to any UTF-16 string and later decoded in
//! place. The encoding provides:
//!
//! - **Exact round-trip**: every double decodes to the same bit pattern, NaN
//!   payloads aside
//! - **Self-delimiting**: the lead word alone gives the total length, so
//!   values can be concatenated without separators
//! - **Compactness**: small decimals such as `3.6` or `-0.25` take one word,
//!   anything else at most five
//!
//! ## Examples
//!
//! ```rust
//! use fpcvt::{decode, encode, Decoder};
//!
//! let encoded = encode(1.5);
//! assert_eq!(encoded.word_count(), 1);
//! assert_eq!(decode(encoded.as_words(), 0).unwrap().value, 1.5);
//!
//! // Concatenated values decode one after another
//! let mut words = encoded.to_vec();
//! words.extend_from_slice(encode(std::f64::consts::PI).as_words());
//! let values: Vec<f64> = Decoder::new(&words).collect::<Result<_, _>>().unwrap();
//! assert_eq!(values, [1.5, std::f64::consts::PI]);
//! ```
//!
//! ## Format Overview
//!
//! | Lead word         | Format        | Total words |
//! |-------------------|---------------|-------------|
//! | `0x0000..=0x7FFF` | binary        | 2-5         |
//! | `0x8000..=0xD7FF` | short decimal | 1           |
//! | `0xD800..=0xDFFF` | illegal       | -           |
//! | `0xE000..=0xF7FF` | short decimal | 1           |
//! | `0xF800..=0xF8FF` | near-infinity | 2-5         |
//! | `0xFFF0..=0xFFF4` | special       | 1           |
//!
//! Binary and near-infinity values carry a base-`2^15` mantissa in one to
//! four continuation words, each in `0x0000..=0x7FFF`. See [`Format`] for
//! the bit layout of each lead word.

pub(crate) mod decoder;
pub(crate) mod encoded;
pub(crate) mod encoder;
pub(crate) mod error;
pub(crate) mod exponent;
pub(crate) mod mantissa;
pub(crate) mod short_decimal;
pub(crate) mod special;
pub(crate) mod words;

// Re-export main types and functions
pub use decoder::{decode, decode_str, Decoded, Decoder, StrDecoder};
pub use encoded::Encoded;
pub use encoder::encode;
pub use error::{DecodeError, DecodeResult};
pub use special::SpecialValue;
pub use words::{encoded_len, is_scalar_word, Format, MAX_MANTISSA_WORDS, MAX_WORDS};
