//! An example declaration and the API it generates.
//!
//! ```
//! use hwreg::prelude::*;
//! use hwreg::example::AuxControl;
//! use hwreg::MemoryIo;
//!
//! let mut bytes = [0u8; 0x70000];
//! let io = MemoryIo::new(&mut bytes);
//! io.write(0x64010, 0x8011_9000u32);
//!
//! let mut aux = AuxControl::get().read_from(&io);
//! assert_eq!(aux.enabled(), 1);
//! assert_eq!(aux.message_size(), 1);
//! aux.set_message_size(17).set_mode_low(0x5);
//! aux.write_to(&io);
//!
//! // Bit 15 is reserved-zero, so it is cleared on the way out.
//! assert_eq!(io.read::<u32>(0x64010), 0x8111_1005);
//! ```

use crate::register;

register! {
    /// An auxiliary control register.
    ///
    /// # Declaration
    ///
    /// ```
    /// hwreg::register! {
    ///     pub struct AuxControl: u32 @ 0x64010 {
    ///         pub enabled: bit(31),
    ///         pub busy: bit(30) as bool,
    ///         pub message_size: field(24, 20),
    ///         _: rsvdz_bit(15),
    ///         pub timeout: field(14, 12),
    ///         _: rsvdz_field(11, 8),
    ///         pub mode: field(7, 0) {
    ///             pub mode_low: subfield(3, 0),
    ///             pub mode_lock: subbit(7),
    ///         },
    ///     }
    /// }
    /// ```
    pub struct AuxControl: u32 @ 0x64010 {
        /// Enables the auxiliary channel.
        pub enabled: bit(31),
        /// Set while a message is in flight.
        pub busy: bit(30) as bool,
        /// The message size in words.
        pub message_size: field(24, 20),
        _: rsvdz_bit(15),
        /// The reply timeout, in units of 100 µs.
        pub timeout: field(14, 12),
        _: rsvdz_field(11, 8),
        /// The transfer mode.
        pub mode: field(7, 0) {
            /// The mode number.
            pub mode_low: subfield(3, 0),
            /// Locks the mode until the next reset.
            pub mode_lock: subbit(7),
        },
    }
}
