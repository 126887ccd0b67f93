use core::fmt::{Debug, LowerHex};
use core::hash::Hash;
use core::ops::{BitAnd, BitOr, Not, Shl, Shr};

use crate::sealed::Sealed;

/// Unsigned integer types that can back a register.
///
/// Implemented for [`u8`], [`u16`], [`u32`], and [`u64`]. All bit-range arithmetic on a register
/// is performed in its value type, modulo [`BITS`](Self::BITS).
pub trait RegisterValue:
    Copy
    + Debug
    + LowerHex
    + Hash
    + Eq
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Sealed
{
    /// The bit width of this type.
    const BITS: u32;

    /// The value with no bits set.
    const ZERO: Self;

    /// The value with every bit set.
    const ONES: Self;

    /// Truncates a `u64` to this type, keeping the least significant bits.
    fn from_u64_masked(value: u64) -> Self;

    /// Zero-extends the value to a `u64`.
    fn to_u64(self) -> u64;
}

macro_rules! impl_register_value {
    ($($ty:ty),*) => {$(
        impl Sealed for $ty {}

        impl RegisterValue for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ZERO: Self = 0;
            const ONES: Self = <$ty>::MAX;

            #[inline(always)]
            fn from_u64_masked(value: u64) -> Self {
                value as $ty
            }

            #[inline(always)]
            fn to_u64(self) -> u64 {
                self as u64
            }
        }
    )*};
}
impl_register_value!(u8, u16, u32, u64);
