#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
#![cfg_attr(not(test), no_std)]

/// Emits a trace record for register traffic when the `log` feature is enabled.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        ::log::trace!(target: "hwreg", $($arg)*);
    };
}

mod addr;
pub mod bitfield;
mod block;
mod error;
pub mod example;
mod io;
pub mod prelude;
mod rsvdz;
mod snapshot;
mod value;

pub use crate::addr::RegisterAddr;
pub use crate::bitfield::{BitRange, BitfieldRef};
pub use crate::error::FieldError;
pub use crate::io::{MemoryIo, MmioIo, RegisterIo};
pub use crate::rsvdz::ReservedZeroMask;
pub use crate::snapshot::{Register, RegisterBase};
pub use crate::value::RegisterValue;

mod sealed {
    pub trait Sealed {}
}

#[doc(hidden)]
pub mod __private {
    pub use hwreg_macros::register;
    pub use paste::paste;
    pub use seq_macro::seq;
}

/// Declares register types.
///
/// See the [`example`] module for a declaration and the API it generates.
///
#[doc = include_str!("../syntax.md")]
#[macro_export]
macro_rules! register {
    ($($tt:tt)*) => {
        $crate::__private::register! { ($crate, $($tt)*) }
    };
}

#[test]
fn trybuild_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests_error/*.rs");
}
