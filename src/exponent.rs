//! Binary exponent extraction and exact power-of-two scaling.

/// Smallest exponent the general binary path works with. Subnormals below
/// it are clamped here and come out with leading zero mantissa chunks.
pub(crate) const MIN_EXPONENT: i32 = -1024;

/// Floor-log2 values from here up go to the near-infinity format: for them
/// `2^(p + 1)` does not fit in a double.
pub(crate) const NEAR_INFINITY_EXPONENT: i32 = 1023;

const EXPONENT_BIAS: i32 = 1023;
const SIGNIFICAND_BITS: u32 = 52;
const MIN_NORMAL_EXPONENT: i32 = -1022;
const MIN_SUBNORMAL_EXPONENT: i32 = -1074;

/// Routing result of the exponent extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryExponent {
    /// Clamped `floor(log2(x))` in `MIN_EXPONENT..NEAR_INFINITY_EXPONENT`.
    General(i32),
    /// `floor(log2(x)) >= NEAR_INFINITY_EXPONENT`.
    NearInfinity(i32),
}

/// `floor(log2(flt))`, read from the bit pattern so it is exact for
/// subnormals and at the top of the range.
///
/// `flt` must be finite and strictly positive.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn floor_log2(flt: f64) -> i32 {
    debug_assert!(flt.is_finite() && flt > 0.0);
    let bits = flt.to_bits();
    let biased = ((bits >> SIGNIFICAND_BITS) & 0x7FF) as i32;
    if biased == 0 {
        // subnormal: position of the highest set fraction bit
        let fraction = bits & ((1u64 << SIGNIFICAND_BITS) - 1);
        let top_bit = 63 - fraction.leading_zeros() as i32;
        top_bit + MIN_SUBNORMAL_EXPONENT
    } else {
        biased - EXPONENT_BIAS
    }
}

/// Pick the binary exponent for a finite, nonzero, unsigned `flt`.
pub(crate) fn extract(flt: f64) -> BinaryExponent {
    let p = floor_log2(flt);
    if p >= NEAR_INFINITY_EXPONENT {
        BinaryExponent::NearInfinity(p)
    } else {
        BinaryExponent::General(p.max(MIN_EXPONENT))
    }
}

/// Mantissa in `[0, 1)` for the general path: `flt / 2^(p + 1)`, split in
/// two divisions so no step needs `2^(p + 1)`.
pub(crate) fn normalize(flt: f64, p: i32) -> f64 {
    debug_assert!((MIN_EXPONENT..NEAR_INFINITY_EXPONENT).contains(&p));
    flt / pow2(p) / 2.0
}

/// Mantissa in `[0, 1)` for the near-infinity path: `flt / 2^(p + 1)`,
/// computed as `flt / 2^(p - 1) / 4`.
pub(crate) fn normalize_near_infinity(flt: f64, p: i32) -> f64 {
    debug_assert!(p >= NEAR_INFINITY_EXPONENT);
    flt / pow2(p - 1) / 4.0
}

/// Exact `2^p`.
///
/// Covers the whole representable range including subnormal powers;
/// saturates to `0.0` below `-1074` and to infinity above `1023`.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn pow2(p: i32) -> f64 {
    if p > EXPONENT_BIAS {
        f64::INFINITY
    } else if p >= MIN_NORMAL_EXPONENT {
        f64::from_bits(((p + EXPONENT_BIAS) as u64) << SIGNIFICAND_BITS)
    } else if p >= MIN_SUBNORMAL_EXPONENT {
        f64::from_bits(1u64 << (p - MIN_SUBNORMAL_EXPONENT))
    } else {
        0.0
    }
}

/// `x * 2^p` with a single rounding whenever `2^p` is representable.
///
/// Exponents outside that range only come from hand-made word sequences;
/// they are applied in steps and saturate to zero or infinity.
pub(crate) fn scale(mut x: f64, mut p: i32) -> f64 {
    while p > EXPONENT_BIAS {
        if x == 0.0 || !x.is_finite() {
            return x;
        }
        x *= pow2(EXPONENT_BIAS);
        p -= EXPONENT_BIAS;
    }
    while p < MIN_SUBNORMAL_EXPONENT {
        if x == 0.0 || !x.is_finite() {
            return x;
        }
        x *= pow2(MIN_SUBNORMAL_EXPONENT);
        p -= MIN_SUBNORMAL_EXPONENT;
    }
    x * pow2(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_log2_normals() {
        assert_eq!(floor_log2(1.0), 0);
        assert_eq!(floor_log2(1.999_999), 0);
        assert_eq!(floor_log2(2.0), 1);
        assert_eq!(floor_log2(0.75), -1);
        assert_eq!(floor_log2(f64::MIN_POSITIVE), -1022);
        assert_eq!(floor_log2(f64::MAX), 1023);
    }

    #[test]
    fn test_floor_log2_subnormals() {
        assert_eq!(floor_log2(5e-324), -1074);
        assert_eq!(floor_log2(f64::from_bits(2)), -1073);
        assert_eq!(floor_log2(f64::from_bits(1 << 51)), -1023);
        assert_eq!(floor_log2(f64::from_bits((1 << 52) - 1)), -1023);
    }

    #[test]
    fn test_extract_routing() {
        assert_eq!(extract(1.0), BinaryExponent::General(0));
        assert_eq!(extract(5e-324), BinaryExponent::General(MIN_EXPONENT));
        assert_eq!(
            extract(f64::from_bits(1 << 50)),
            BinaryExponent::General(-1024)
        );
        assert_eq!(extract(pow2(1022) * 1.5), BinaryExponent::General(1022));
        assert_eq!(extract(pow2(1023)), BinaryExponent::NearInfinity(1023));
        assert_eq!(extract(f64::MAX), BinaryExponent::NearInfinity(1023));
    }

    #[test]
    fn test_pow2_is_exact() {
        for p in -1074..=1023 {
            let x = pow2(p);
            assert_eq!(floor_log2(x), p, "2^{p}");
            let fraction = x.to_bits() & ((1u64 << SIGNIFICAND_BITS) - 1);
            if p >= MIN_NORMAL_EXPONENT {
                assert_eq!(fraction, 0, "2^{p}");
            } else {
                // subnormal powers are a single fraction bit
                assert_eq!(x.to_bits().count_ones(), 1, "2^{p}");
            }
        }
        assert_eq!(pow2(-1075), 0.0);
        assert_eq!(pow2(1024), f64::INFINITY);
        assert_eq!(pow2(0), 1.0);
        assert_eq!(pow2(-1), 0.5);
    }

    #[test]
    fn test_normalize_range() {
        let samples = [5e-324, 1e-310, f64::MIN_POSITIVE, 0.1, 1.0, 3.0, 1e300];
        for flt in samples {
            let p = floor_log2(flt).max(MIN_EXPONENT);
            let y = normalize(flt, p);
            assert!((0.0..1.0).contains(&y), "{flt} -> {y}");
            assert_eq!(scale(y, p + 1), flt);
        }
    }

    #[test]
    fn test_normalize_near_infinity_range() {
        for flt in [pow2(1023), f64::MAX, pow2(1023) * 1.25] {
            let y = normalize_near_infinity(flt, 1023);
            assert!((0.5..1.0).contains(&y), "{flt} -> {y}");
            assert_eq!(scale(y * 4.0, 1022), flt);
        }
    }

    #[test]
    fn test_scale_saturates() {
        assert_eq!(scale(0.75, 3071), f64::INFINITY);
        assert_eq!(scale(0.0, 3071), 0.0);
        assert_eq!(scale(-0.0, -2000).to_bits(), (-0.0f64).to_bits());
        assert_eq!(scale(0.75, -3000), 0.0);
        assert_eq!(scale(0.5, 1024), pow2(1023));
        assert_eq!(scale(0.5, -1073), 5e-324);
    }
}
