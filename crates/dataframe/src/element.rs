//! Numeric Cell Types

use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Capability set required of a table cell
///
/// NaN is a legal cell value and marks a cell that failed numeric
/// conversion or should be left out of a computation.
pub trait Element:
    Copy
    + Send
    + Sync
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + FromStr
    + Sum
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Additive identity
    const ZERO: Self;
    /// Not-a-number sentinel
    const NAN: Self;

    /// Whether the value is the NaN sentinel
    fn is_nan(self) -> bool;
    /// Lossy conversion from a count
    fn from_usize(n: usize) -> Self;
    /// Lossy conversion from `f64`
    fn from_f64(value: f64) -> Self;
    /// Widening conversion to `f64`
    fn to_f64(self) -> f64;

    /// Parse a raw text field. `None` when the bytes are not UTF-8 or not
    /// a number; callers store NaN in that case.
    fn parse_field(field: &[u8]) -> Option<Self> {
        std::str::from_utf8(field).ok()?.trim().parse().ok()
    }

    /// Replace NaN with zero
    fn or_zero(self) -> Self {
        if self.is_nan() {
            Self::ZERO
        } else {
            self
        }
    }
}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                const ZERO: Self = 0.0;
                const NAN: Self = <$t>::NAN;

                #[inline]
                fn is_nan(self) -> bool {
                    <$t>::is_nan(self)
                }

                #[inline]
                fn from_usize(n: usize) -> Self {
                    n as $t
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_element!(f32, f64);
