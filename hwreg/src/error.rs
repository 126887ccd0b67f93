use snafu::Snafu;

/// The error type returned by the fallible field setters.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum FieldError {
    /// The value has bits set outside the field's width.
    #[snafu(display("field value {:#x} exceeds field mask {:#x}", value, mask))]
    OutOfRange {
        /// The rejected value, zero-extended.
        value: u64,
        /// The field's mask, aligned to bit zero.
        mask: u64,
    },
}
