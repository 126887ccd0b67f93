//! Register blocks.

/// Declares a device whose registers sit at fixed offsets from a base address.
///
/// Each entry names a register type declared with [`register!`](crate::register) and its offset
/// from the device's base. An entry of the form `[Type; count, stride]` declares a register
/// array. Register types must be plain identifiers; bring them into scope with `use` first.
///
/// For each scalar entry `name` the device gets `name() -> RegisterAddr<Type>`. For each array
/// entry it gets `name(index) -> RegisterAddr<Type>`, which panics when `index` is out of bounds,
/// plus one constructor per element, `name_0()` through `name_{count - 1}()`.
///
/// # Example
///
/// ```
/// use hwreg::prelude::*;
///
/// hwreg::register! {
///     /// Transmit/receive data.
///     pub struct Data: u8 {
///         pub byte: field(7, 0),
///     }
///
///     /// A FIFO slot.
///     pub struct Slot: u32 {
///         pub count: field(5, 0),
///         _: rsvdz_field(31, 6),
///     }
/// }
///
/// hwreg::register_block! {
///     /// A UART.
///     pub struct Uart {
///         /// Data port.
///         pub data: Data @ 0x00,
///         /// FIFO slots.
///         pub slots: [Slot; 4, 0x4] @ 0x10,
///     }
/// }
///
/// const UART: Uart = Uart::new(0x4000);
/// assert_eq!(UART.data().addr(), 0x4000);
/// assert_eq!(UART.slots(2).addr(), 0x4018);
/// assert_eq!(UART.slots_3().addr(), 0x401c);
/// ```
#[macro_export]
macro_rules! register_block {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$reg_attr:meta])*
                $reg_vis:vis $reg_name:ident: $reg_type:tt @ $offset:literal
            ),*
            $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(
            ::core::clone::Clone,
            ::core::marker::Copy,
            ::core::fmt::Debug,
            ::core::cmp::PartialEq,
            ::core::cmp::Eq,
        )]
        $vis struct $name {
            base: u32,
        }

        #[allow(dead_code)]
        impl $name {
            /// Binds the device to the base address of its register space.
            #[inline]
            pub const fn new(base: u32) -> Self {
                Self { base }
            }

            /// The base address of the device's register space.
            #[inline]
            pub const fn base(&self) -> u32 {
                self.base
            }

            $(
                $crate::register_block! {
                    @accessors [$(#[$reg_attr])*] $reg_vis $reg_name ($reg_type) $offset
                }
            )*
        }
    };

    // A register array.
    (
        @accessors [$(#[$attr:meta])*] $vis:vis $name:ident
        ([$type:ty; $count:literal, $stride:literal]) $offset:literal
    ) => {
        $(#[$attr])*
        ///
        /// # Panics
        ///
        /// Panics if `index` is out of bounds.
        #[inline]
        $vis const fn $name(&self, index: u32) -> $crate::RegisterAddr<$type> {
            assert!(index < $count, "register array index out of bounds");
            $crate::RegisterAddr::new(self.base)
                .offset($offset)
                .index($stride, index)
        }

        $crate::__private::seq!(N in 0..$count {
            $crate::__private::paste! {
                /// One element of the register array.
                #[inline]
                $vis const fn [<$name _ N>](&self) -> $crate::RegisterAddr<$type> {
                    self.$name(N)
                }
            }
        });
    };

    // A single register.
    (@accessors [$(#[$attr:meta])*] $vis:vis $name:ident ($type:ty) $offset:literal) => {
        $(#[$attr])*
        #[inline]
        $vis const fn $name(&self) -> $crate::RegisterAddr<$type> {
            $crate::RegisterAddr::new(self.base).offset($offset)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::MemoryIo;

    crate::register! {
        struct Status: u16 {
            ready: bit(0) as bool,
            _: rsvdz_field(15, 8),
        }

        struct Channel: u32 {
            enabled: bit(31),
            length: field(15, 0),
        }
    }

    crate::register_block! {
        struct Dma {
            status: Status @ 0x2,
            channels: [Channel; 3, 0x10] @ 0x20,
        }
    }

    const DMA: Dma = Dma::new(0x100);

    #[test]
    fn addresses() {
        assert_eq!(DMA.base(), 0x100);
        assert_eq!(DMA.status().addr(), 0x102);
        assert_eq!(DMA.channels(0).addr(), 0x120);
        assert_eq!(DMA.channels(2).addr(), 0x140);
        assert_eq!(DMA.channels_0(), DMA.channels(0));
        assert_eq!(DMA.channels_1(), DMA.channels(1));
        assert_eq!(DMA.channels_2(), DMA.channels(2));
    }

    #[test]
    #[should_panic(expected = "register array index out of bounds")]
    fn index_out_of_bounds() {
        let index = 3;
        let _ = DMA.channels(index);
    }

    #[test]
    fn registers_through_a_block() {
        let mut bytes = [0u8; 0x50];
        let io = MemoryIo::new(&mut bytes);
        let dma = Dma::new(0x10);

        dma.channels_1()
            .from_value(0)
            .with_enabled(1)
            .with_length(0x200)
            .write_to(&io);
        assert_eq!(io.read::<u32>(0x40), 0x8000_0200);

        io.write(0x12, 0xff01u16);
        let status = dma.status().read_from(&io);
        assert!(status.ready());
    }
}
