//! Floating point neighbours for session-relative timestamps.
//!
//! A value change recorded at `t` needs a companion sample "right before" `t` so that
//! linear interpolation only spans one representable step. A fixed epsilon would drift
//! relative to the magnitude of `t` over long recordings, so neighbours are computed on
//! the bit representation.

/// Smallest representable step to the neighbouring value of a float width.
pub trait FloatNeighbor: Copy + PartialOrd {
    /// Largest representable value strictly less than `self`.
    /// NaN and negative infinity map to themselves.
    fn next_smaller(self) -> Self;

    /// Smallest representable value strictly greater than `self`.
    /// NaN and positive infinity map to themselves.
    fn next_larger(self) -> Self;
}

macro_rules! impl_float_neighbor {
    ($float:ty, $bits:ty) => {
        impl FloatNeighbor for $float {
            #[inline]
            fn next_smaller(self) -> Self {
                if self.is_nan() || self == <$float>::NEG_INFINITY {
                    return self;
                }
                if self == 0.0 {
                    // both +0 and -0 step to the smallest negative subnormal
                    return -<$float>::from_bits(1);
                }
                let bits: $bits = self.to_bits();
                if self > 0.0 {
                    <$float>::from_bits(bits - 1)
                } else {
                    <$float>::from_bits(bits + 1)
                }
            }

            #[inline]
            fn next_larger(self) -> Self {
                if self.is_nan() || self == <$float>::INFINITY {
                    return self;
                }
                if self == 0.0 {
                    return <$float>::from_bits(1);
                }
                let bits: $bits = self.to_bits();
                if self > 0.0 {
                    <$float>::from_bits(bits + 1)
                } else {
                    <$float>::from_bits(bits - 1)
                }
            }
        }
    };
}

impl_float_neighbor!(f64, u64);
impl_float_neighbor!(f32, u32);

/// Free-function form of [`FloatNeighbor::next_smaller`] for `f64` timestamps.
#[inline]
pub fn next_smaller(t: f64) -> f64 {
    t.next_smaller()
}

/// Free-function form of [`FloatNeighbor::next_larger`] for `f64` timestamps.
#[inline]
pub fn next_larger(t: f64) -> f64 {
    t.next_larger()
}

/// Exact comparison that only tolerates a difference below the smallest subnormal.
/// Neighbouring timestamps one ULP apart are *not* considered equal.
#[inline]
pub fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::from_bits(1)
}

/// A timestamp strictly between `previous` and `time`, as close to `time` as possible.
///
/// Prefers `time.next_smaller()`. If that would not stay above `previous`, falls back to
/// the half-way point; returns `None` when no representable value exists in between.
pub fn time_before(time: f64, previous: Option<f64>) -> Option<f64> {
    let candidate = time.next_smaller();
    if !candidate.is_finite() {
        return None;
    }
    match previous {
        None => Some(candidate),
        Some(prev) if candidate > prev => Some(candidate),
        Some(prev) => {
            let mid = prev + (time - prev) * 0.5;
            (mid > prev && mid < time).then_some(mid)
        }
    }
}
