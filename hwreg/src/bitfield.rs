//! The bit-range primitive underlying every field accessor.

use snafu::ensure;

use crate::error::{FieldError, OutOfRangeSnafu};
use crate::RegisterValue;

/// Returns a mask with the `num_bits` least significant bits set.
///
/// Saturates to all ones when `num_bits` is at least the width of `T`.
#[inline(always)]
pub fn compute_mask<T: RegisterValue>(num_bits: u32) -> T {
    if num_bits >= T::BITS {
        T::ONES
    } else {
        !(T::ONES << num_bits)
    }
}

/// An inclusive range of bits `high:low` within a value.
///
/// Ranges can only be built through `const fn` constructors that panic when the range is
/// invalid. Built in a `const` item, as the [`register!`](crate::register) macro does for every
/// field, an invalid range fails constant evaluation and therefore the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitRange {
    high: u32,
    low: u32,
}

impl BitRange {
    /// A single bit of a `T`.
    pub const fn bit<T: RegisterValue>(bit: u32) -> Self {
        assert!(bit < T::BITS, "bit is out of range");
        Self {
            high: bit,
            low: bit,
        }
    }

    /// A multi-bit field of a `T`. Both bit indices are inclusive.
    pub const fn field<T: RegisterValue>(high: u32, low: u32) -> Self {
        assert!(high > low, "upper bit goes before lower bit");
        assert!(high < T::BITS, "upper bit is out of range");
        Self { high, low }
    }

    /// A single bit within the value of the field described by `self`.
    pub const fn sub_bit(self, bit: u32) -> Self {
        assert!(bit < self.width(), "bit is out of range for the containing field");
        Self {
            high: bit,
            low: bit,
        }
    }

    /// A multi-bit subfield within the value of the field described by `self`.
    pub const fn sub_field(self, high: u32, low: u32) -> Self {
        assert!(high > low, "upper bit goes before lower bit");
        assert!(
            high < self.width(),
            "upper bit is out of range for the containing field",
        );
        Self { high, low }
    }

    /// The most significant bit, inclusive.
    pub const fn high(self) -> u32 {
        self.high
    }

    /// The least significant bit, which is also the field's shift.
    pub const fn low(self) -> u32 {
        self.low
    }

    /// The number of bits in the range.
    pub const fn width(self) -> u32 {
        self.high - self.low + 1
    }

    /// The range's mask aligned to bit zero.
    #[inline(always)]
    pub fn mask<T: RegisterValue>(self) -> T {
        compute_mask(self.width())
    }

    /// The range's mask in place.
    #[inline(always)]
    pub fn offset_mask<T: RegisterValue>(self) -> T {
        self.mask::<T>() << self.low
    }
}

/// Extracts the bits in `range` from `value`, shifted down to bit zero.
#[inline(always)]
pub fn get_bits<T: RegisterValue>(value: T, range: BitRange) -> T {
    (value >> range.low) & range.mask()
}

/// A mutable view of one bit range within an integer.
pub struct BitfieldRef<'a, T> {
    value: &'a mut T,
    shift: u32,
    mask: T,
}

impl<'a, T: RegisterValue> BitfieldRef<'a, T> {
    /// Creates a view of `range` within `*value`.
    #[inline(always)]
    pub fn new(value: &'a mut T, range: BitRange) -> Self {
        Self {
            value,
            shift: range.low,
            mask: range.mask(),
        }
    }

    /// Returns the field's value, shifted down to bit zero.
    #[inline(always)]
    pub fn get(&self) -> T {
        (*self.value >> self.shift) & self.mask
    }

    /// Replaces the field's bits, leaving every other bit untouched.
    ///
    /// # Panics
    ///
    /// Panics if `field_value` has bits set outside the field's width. Truncating instead would
    /// silently corrupt the value written to hardware.
    #[inline(always)]
    #[track_caller]
    pub fn set(&mut self, field_value: T) {
        assert!(
            field_value & !self.mask == T::ZERO,
            "field value {:#x} exceeds field mask {:#x}",
            field_value,
            self.mask,
        );
        self.store(field_value);
    }

    /// Replaces the field's bits, or returns an error without modifying anything if
    /// `field_value` has bits set outside the field's width.
    #[inline(always)]
    pub fn try_set(&mut self, field_value: T) -> Result<(), FieldError> {
        ensure!(
            field_value & !self.mask == T::ZERO,
            OutOfRangeSnafu {
                value: field_value.to_u64(),
                mask: self.mask.to_u64(),
            }
        );
        self.store(field_value);
        Ok(())
    }

    #[inline(always)]
    fn store(&mut self, field_value: T) {
        *self.value = (*self.value & !(self.mask << self.shift)) | (field_value << self.shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks() {
        assert_eq!(compute_mask::<u8>(0), 0);
        assert_eq!(compute_mask::<u8>(3), 0b111);
        assert_eq!(compute_mask::<u8>(8), 0xff);
        assert_eq!(compute_mask::<u32>(5), 0x1f);
        assert_eq!(compute_mask::<u64>(63), u64::MAX >> 1);
        assert_eq!(compute_mask::<u64>(64), u64::MAX);
    }

    #[test]
    fn ranges() {
        const MESSAGE_SIZE: BitRange = BitRange::field::<u32>(24, 20);
        assert_eq!(MESSAGE_SIZE.width(), 5);
        assert_eq!(MESSAGE_SIZE.mask::<u32>(), 0x1f);
        assert_eq!(MESSAGE_SIZE.offset_mask::<u32>(), 0x01f0_0000);

        const ENABLED: BitRange = BitRange::bit::<u32>(31);
        assert_eq!(ENABLED.width(), 1);
        assert_eq!(ENABLED.offset_mask::<u32>(), 0x8000_0000);

        const LOCK: BitRange = MESSAGE_SIZE.sub_bit(4);
        assert_eq!((LOCK.high(), LOCK.low()), (4, 4));

        const LOW: BitRange = MESSAGE_SIZE.sub_field(2, 0);
        assert_eq!(LOW.mask::<u32>(), 0b111);
    }

    #[test]
    #[should_panic(expected = "upper bit goes before lower bit")]
    fn inverted_range_panics_outside_const() {
        let (high, low) = (3, 7);
        let _ = BitRange::field::<u32>(high, low);
    }

    #[test]
    #[should_panic(expected = "upper bit is out of range")]
    fn wide_range_panics_outside_const() {
        let high = 16;
        let _ = BitRange::field::<u16>(high, 0);
    }

    #[test]
    #[should_panic(expected = "out of range for the containing field")]
    fn wide_subfield_panics_outside_const() {
        let parent = BitRange::field::<u32>(7, 4);
        let high = 4;
        let _ = parent.sub_field(high, 0);
    }

    #[test]
    fn get_and_set() {
        let mut value: u32 = 0xffff_ffff;
        let mut field = BitfieldRef::new(&mut value, BitRange::field::<u32>(24, 20));
        assert_eq!(field.get(), 0x1f);
        field.set(17);
        assert_eq!(field.get(), 17);
        assert_eq!(value, 0xff1f_ffff);
    }

    #[test]
    fn set_leaves_other_bits_alone() {
        for &(high, low) in &[(0, 0), (7, 0), (15, 8), (31, 31), (30, 1), (31, 0)] {
            let range = if high == low {
                BitRange::bit::<u32>(high)
            } else {
                BitRange::field::<u32>(high, low)
            };
            let outside = !range.offset_mask::<u32>();
            for &start in &[0u32, u32::MAX, 0xa5a5_5a5a] {
                for &field_value in &[0, 1, range.mask::<u32>(), range.mask::<u32>() >> 1] {
                    let mut value = start;
                    BitfieldRef::new(&mut value, range).set(field_value);
                    assert_eq!(get_bits(value, range), field_value);
                    assert_eq!(value & outside, start & outside);
                }
            }
        }
    }

    #[test]
    fn full_width_field() {
        let mut value: u64 = 0;
        let range = BitRange::field::<u64>(63, 0);
        BitfieldRef::new(&mut value, range).set(u64::MAX);
        assert_eq!(value, u64::MAX);
        assert_eq!(get_bits(value, range), u64::MAX);
    }

    #[test]
    #[should_panic(expected = "exceeds field mask")]
    fn set_out_of_range_panics() {
        let mut value: u32 = 0;
        BitfieldRef::new(&mut value, BitRange::field::<u32>(24, 20)).set(32);
    }

    #[test]
    fn try_set_out_of_range_is_an_error() {
        let mut value: u16 = 0x1234;
        let mut field = BitfieldRef::new(&mut value, BitRange::field::<u16>(7, 4));
        assert!(matches!(
            field.try_set(0x10),
            Err(FieldError::OutOfRange {
                value: 0x10,
                mask: 0xf
            }),
        ));
        field.try_set(0xa).unwrap();
        assert_eq!(value, 0x12a4);
    }
}
