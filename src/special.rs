use crate::words::SPECIAL_BASE;

/// The five scalar values that bypass the numeric sub-formats.
///
/// Each one is a single word in `0xFFF0..=0xFFF4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialValue {
    PositiveZero,
    NegativeZero,
    PositiveInfinity,
    NegativeInfinity,
    NaN,
}

impl SpecialValue {
    /// Return the single encoded word for this special value.
    #[must_use]
    pub const fn word(self) -> u16 {
        SPECIAL_BASE
            + match self {
                Self::PositiveZero => 0,
                Self::NegativeZero => 1,
                Self::PositiveInfinity => 2,
                Self::NegativeInfinity => 3,
                Self::NaN => 4,
            }
    }

    /// Look up the special value stored in `word`, if any.
    #[must_use]
    pub const fn from_word(word: u16) -> Option<Self> {
        match word {
            0xFFF0 => Some(Self::PositiveZero),
            0xFFF1 => Some(Self::NegativeZero),
            0xFFF2 => Some(Self::PositiveInfinity),
            0xFFF3 => Some(Self::NegativeInfinity),
            0xFFF4 => Some(Self::NaN),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::PositiveZero => 0.0,
            Self::NegativeZero => -0.0,
            Self::PositiveInfinity => f64::INFINITY,
            Self::NegativeInfinity => f64::NEG_INFINITY,
            Self::NaN => f64::NAN,
        }
    }

    /// Classify a double as one of the special values.
    ///
    /// Every NaN payload maps to [`SpecialValue::NaN`]; the sign of zero is
    /// kept. Returns `None` for finite nonzero values.
    #[must_use]
    pub fn classify(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(Self::NaN)
        } else if value == 0.0 {
            if value.is_sign_negative() {
                Some(Self::NegativeZero)
            } else {
                Some(Self::PositiveZero)
            }
        } else if value == f64::INFINITY {
            Some(Self::PositiveInfinity)
        } else if value == f64::NEG_INFINITY {
            Some(Self::NegativeInfinity)
        } else {
            None
        }
    }
}
