//! Wire representation for numeric property values.
//!
//! [`JsonNumber`] is the closed set of representations a number is emitted
//! with. The `From` impls pick one by sign and integrality so no value
//! wraps: non-negative integers widen to `u64`, negative integers to `i64`,
//! floats to `f64`. Integers outside the target range saturate at its bound.

use core::fmt;

/// A number in one of its three wire representations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl JsonNumber {
    /// Returns `false` for NaN and infinities, which JSON cannot represent.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Unsigned(..) | Self::Signed(..) => true,
            Self::Float(f) => f.is_finite(),
        }
    }
}

macro_rules! impl_from_unsigned_for_json_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for JsonNumber {
                fn from(value: $t) -> Self {
                    JsonNumber::Unsigned(u64::try_from(value).unwrap_or(u64::MAX))
                }
            }
        )*
    };
}

macro_rules! impl_from_signed_for_json_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for JsonNumber {
                fn from(value: $t) -> Self {
                    if value < 0 {
                        JsonNumber::Signed(i64::try_from(value).unwrap_or(i64::MIN))
                    } else {
                        JsonNumber::Unsigned(u64::try_from(value).unwrap_or(u64::MAX))
                    }
                }
            }
        )*
    };
}

impl_from_unsigned_for_json_number!(u8, u16, u32, u64, u128, usize);
impl_from_signed_for_json_number!(i8, i16, i32, i64, i128, isize);

impl From<f32> for JsonNumber {
    fn from(value: f32) -> Self {
        JsonNumber::Float(f64::from(value))
    }
}

impl From<f64> for JsonNumber {
    fn from(value: f64) -> Self {
        JsonNumber::Float(value)
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Unsigned(n) => fmt::Display::fmt(n, f),
            JsonNumber::Signed(n) => fmt::Display::fmt(n, f),
            JsonNumber::Float(n) => fmt::Display::fmt(n, f),
        }
    }
}
