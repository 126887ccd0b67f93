//! Tracking of reserved-zero bits.

use crate::bitfield::BitRange;
use crate::RegisterValue;

/// An accumulator for the bits of a register that must be written as zero.
///
/// A register definition lists its reserved-zero ranges in
/// [`Register::RESERVED_ZERO`](crate::Register::RESERVED_ZERO), and every snapshot accumulates
/// them into its mask when it is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReservedZeroMask<T> {
    mask: T,
}

impl<T: RegisterValue> ReservedZeroMask<T> {
    /// Creates an empty mask.
    pub fn new() -> Self {
        Self { mask: T::ZERO }
    }

    /// Builds the mask for a list of reserved-zero ranges. Overlapping ranges are fine.
    pub fn accumulate(ranges: &[BitRange]) -> Self {
        ranges
            .iter()
            .fold(Self::new(), |mask, &range| mask.with_range(range))
    }

    /// Adds a reserved-zero range to the mask.
    pub fn add(&mut self, range: BitRange) -> &mut Self {
        self.mask = self.mask | range.offset_mask();
        self
    }

    /// Returns the mask with a reserved-zero range added.
    #[must_use]
    pub fn with_range(mut self, range: BitRange) -> Self {
        self.add(range);
        self
    }

    /// Returns the accumulated mask.
    pub fn get(self) -> T {
        self.mask
    }
}

impl<T: RegisterValue> Default for ReservedZeroMask<T> {
    fn default() -> Self {
        Self::new()
    }
}
