//! # Element Types
//!
//! The closed set of numeric kinds the benchmark exercises and the
//! [`Element`] trait that gives each of them native arithmetic, a lane
//! width and a non-zero random generator.
//!
//! ## Lane Width
//! The vector register width is fixed at compile time from the enabled
//! target features. A kind's lane count is how many of its elements fit in
//! one register; a lane count of 1 means no hardware acceleration.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::vector::LanesMut;

/// Width in bytes of the widest vector register enabled for this build
pub const VECTOR_BYTES: usize = if cfg!(feature = "disable-simd") {
    0
} else if cfg!(target_feature = "avx512f") {
    64
} else if cfg!(target_feature = "avx") {
    32
} else if cfg!(any(
    target_feature = "sse2",
    target_feature = "neon",
    target_feature = "simd128"
)) {
    16
} else {
    0
};

/// Whether any vector unit is available to the vectorized path
pub const HARDWARE_ACCELERATED: bool = VECTOR_BYTES > 0;

/// Supported element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    /// 8-bit unsigned integer
    U8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
}

impl NumericKind {
    /// Every kind, in the order a default run visits them
    pub const ALL: [NumericKind; 6] = [
        NumericKind::U8,
        NumericKind::I16,
        NumericKind::I32,
        NumericKind::I64,
        NumericKind::F64,
        NumericKind::F32,
    ];

    /// Size of one element in bytes
    pub const fn byte_width(self) -> usize {
        match self {
            NumericKind::U8 => 1,
            NumericKind::I16 => 2,
            NumericKind::I32 | NumericKind::F32 => 4,
            NumericKind::I64 | NumericKind::F64 => 8,
        }
    }

    /// Number of elements processed by one vector operation (at least 1)
    pub const fn lanes(self) -> usize {
        let lanes = VECTOR_BYTES / self.byte_width();
        if lanes == 0 {
            1
        } else {
            lanes
        }
    }

    /// Short lowercase name, as accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            NumericKind::U8 => "u8",
            NumericKind::I16 => "i16",
            NumericKind::I32 => "i32",
            NumericKind::I64 => "i64",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
        }
    }

    /// Whether the kind is a floating-point type
    pub const fn is_float(self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64)
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumericKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_argument(format!("unknown numeric kind: {s}")))
    }
}

/// A primitive element type with native arithmetic for both kernel paths
pub trait Element:
    Copy + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The kind this type represents
    const KIND: NumericKind;

    /// Elements per vector register
    const LANES: usize = Self::KIND.lanes();

    /// Sum with the kind's native overflow behavior
    fn add(self, rhs: Self) -> Self;

    /// Difference with the kind's native overflow behavior
    fn sub(self, rhs: Self) -> Self;

    /// Product with the kind's native overflow behavior
    fn mul(self, rhs: Self) -> Self;

    /// Quotient, or `None` for an integer division by zero
    fn div(self, rhs: Self) -> Option<Self>;

    /// Whether the value is the kind's zero
    fn is_zero(self) -> bool;

    /// Equality used to verify results; two NaNs count as equal
    fn same(self, other: Self) -> bool;

    /// Draws a uniformly distributed value that is never zero
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Applies all four operations to one full lane block
    ///
    /// `a`, `b` and every output slice have the same length. Returns the
    /// offset of a zero integer divisor within the block.
    fn lanewise(a: &[Self], b: &[Self], out: LanesMut<'_, Self>) -> Result<(), usize> {
        if let Some(lane) = b.iter().position(|x| x.is_zero()) {
            if !Self::KIND.is_float() {
                return Err(lane);
            }
        }
        let LanesMut {
            sum,
            difference,
            product,
            quotient,
        } = out;
        for (dst, (&x, &y)) in sum.iter_mut().zip(a.iter().zip(b)) {
            *dst = x.add(y);
        }
        for (dst, (&x, &y)) in difference.iter_mut().zip(a.iter().zip(b)) {
            *dst = x.sub(y);
        }
        for (dst, (&x, &y)) in product.iter_mut().zip(a.iter().zip(b)) {
            *dst = x.mul(y);
        }
        for (dst, (&x, &y)) in quotient.iter_mut().zip(a.iter().zip(b)) {
            *dst = x.div(y).unwrap_or_default();
        }
        Ok(())
    }
}

/// Draws from `[min, max)` until the value is non-zero
fn non_zero_in<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    loop {
        let value = rng.gen_range(min..max);
        if value != 0 {
            return value;
        }
    }
}

macro_rules! impl_int_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Element for $ty {
            const KIND: NumericKind = NumericKind::$kind;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline]
            fn div(self, rhs: Self) -> Option<Self> {
                if rhs == 0 {
                    None
                } else {
                    Some(self.wrapping_div(rhs))
                }
            }

            #[inline]
            fn is_zero(self) -> bool {
                self == 0
            }

            #[inline]
            fn same(self, other: Self) -> bool {
                self == other
            }

            fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
                // Range bounds are the type's own, so the narrowing is lossless.
                non_zero_in(rng, <$ty>::MIN as i32, <$ty>::MAX as i32) as $ty
            }
        }
    )*};
}

impl_int_element!(u8 => U8, i16 => I16, i32 => I32);

impl Element for i64 {
    const KIND: NumericKind = NumericKind::I64;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    #[inline]
    fn div(self, rhs: Self) -> Option<Self> {
        if rhs == 0 {
            None
        } else {
            Some(self.wrapping_div(rhs))
        }
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0
    }

    #[inline]
    fn same(self, other: Self) -> bool {
        self == other
    }

    /// Product of two non-zero i32-range draws, which reaches most of the i64 range
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let hi = non_zero_in(rng, i32::MIN, i32::MAX) as i64;
        let lo = non_zero_in(rng, i32::MIN, i32::MAX) as i64;
        hi * lo
    }
}

impl Element for f64 {
    const KIND: NumericKind = NumericKind::F64;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline]
    fn div(self, rhs: Self) -> Option<Self> {
        Some(self / rhs)
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0.0
    }

    #[inline]
    fn same(self, other: Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }

    /// A non-zero i32-range draw scaled into roughly `[-1, 1)`
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        non_zero_in(rng, i32::MIN, i32::MAX) as f64 / i32::MAX as f64
    }

    #[cfg(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "disable-simd")))]
    fn lanewise(a: &[Self], b: &[Self], out: LanesMut<'_, Self>) -> Result<(), usize> {
        crate::vector::simd::lanewise_f64(a, b, out);
        Ok(())
    }
}

impl Element for f32 {
    const KIND: NumericKind = NumericKind::F32;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline]
    fn div(self, rhs: Self) -> Option<Self> {
        Some(self / rhs)
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0.0
    }

    #[inline]
    fn same(self, other: Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        f64::random(rng) as f32
    }

    #[cfg(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "disable-simd")))]
    fn lanewise(a: &[Self], b: &[Self], out: LanesMut<'_, Self>) -> Result<(), usize> {
        crate::vector::simd::lanewise_f32(a, b, out);
        Ok(())
    }
}
