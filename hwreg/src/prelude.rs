//! The traits needed to use generated registers, plus the declaration macros.

#[doc(no_inline)]
pub use crate::{register, register_block, Register, RegisterIo};
