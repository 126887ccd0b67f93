//! Typed register addresses.

use core::fmt;
use core::marker::PhantomData;

use crate::io::RegisterIo;
use crate::Register;

/// The address of a register of type `R`.
///
/// This is the only way to name a register without holding a snapshot of it. The `R: Register`
/// bound means an address can only be typed with something declared as a register.
pub struct RegisterAddr<R> {
    addr: u32,
    _phantom_register: PhantomData<fn() -> R>,
}

impl<R: Register> RegisterAddr<R> {
    /// Types `addr` as the address of an `R`.
    #[inline]
    pub const fn new(addr: u32) -> Self {
        Self {
            addr,
            _phantom_register: PhantomData,
        }
    }

    /// The untyped address.
    #[inline]
    pub const fn addr(self) -> u32 {
        self.addr
    }

    /// The address `delta` bytes past this one.
    ///
    /// # Panics
    ///
    /// Panics if the address overflows, which fails the build in a `const` context.
    #[inline]
    pub const fn offset(self, delta: u32) -> Self {
        match self.addr.checked_add(delta) {
            Some(addr) => Self::new(addr),
            None => panic!("register address overflow"),
        }
    }

    /// The address of element `n` of a register array starting here, `stride` bytes apart.
    ///
    /// # Panics
    ///
    /// Panics if the address overflows, which fails the build in a `const` context.
    #[inline]
    pub const fn index(self, stride: u32, n: u32) -> Self {
        match n.checked_mul(stride) {
            Some(delta) => self.offset(delta),
            None => panic!("register address overflow"),
        }
    }

    /// Reads the register into a new snapshot.
    pub fn read_from<I: RegisterIo>(self, io: &I) -> R {
        let mut reg = R::new();
        reg.set_reg_addr(self.addr).read_from(io);
        reg
    }

    /// Makes a snapshot holding `value` without touching the register.
    pub fn from_value(self, value: R::Value) -> R {
        let mut reg = R::new();
        reg.set_reg_addr(self.addr).set_reg_value(value);
        reg
    }
}

impl<R> Clone for RegisterAddr<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RegisterAddr<R> {}

impl<R> PartialEq for RegisterAddr<R> {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr
    }
}

impl<R> Eq for RegisterAddr<R> {}

impl<R> fmt::Debug for RegisterAddr<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RegisterAddr<{}>({:#x})",
            core::any::type_name::<R>(),
            self.addr,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::BitRange;
    use crate::io::MemoryIo;
    use crate::RegisterBase;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Scratch {
        base: RegisterBase<u32>,
    }

    impl Register for Scratch {
        type Value = u32;

        const RESERVED_ZERO: &'static [BitRange] = &[BitRange::field::<u32>(31, 24)];

        fn from_base(base: RegisterBase<u32>) -> Self {
            Self { base }
        }

        fn base(&self) -> &RegisterBase<u32> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut RegisterBase<u32> {
            &mut self.base
        }
    }

    const SCRATCH: RegisterAddr<Scratch> = RegisterAddr::new(0x10);

    #[test]
    fn derived_addresses() {
        const NEXT: RegisterAddr<Scratch> = SCRATCH.offset(4);
        assert_eq!(NEXT.addr(), 0x14);
        assert_eq!(SCRATCH.index(8, 0), SCRATCH);
        assert_eq!(SCRATCH.index(8, 3).addr(), 0x28);
    }

    #[test]
    #[should_panic(expected = "register address overflow")]
    fn offset_overflow() {
        let delta = u32::MAX;
        let _ = SCRATCH.offset(delta);
    }

    #[test]
    fn from_value_does_not_touch_the_register() {
        let reg = SCRATCH.from_value(0xffff_ffff);
        assert_eq!(reg.reg_addr(), 0x10);
        assert_eq!(reg.reg_value(), 0xffff_ffff);
        assert_eq!(reg.rsvdz_mask(), 0xff00_0000);
    }

    #[test]
    fn read_from_returns_independent_snapshots() {
        let mut bytes = [0u8; 0x20];
        let io = MemoryIo::new(&mut bytes);
        io.write(0x10, 0x1234_5678u32);

        let mut first = SCRATCH.read_from(&io);
        let second = SCRATCH.read_from(&io);
        assert_eq!(first.reg_value(), 0x1234_5678);
        first.set_reg_value(0);
        assert_eq!(second.reg_value(), 0x1234_5678);
    }

    #[test]
    fn debug_names_the_register() {
        let text = format!("{SCRATCH:?}");
        assert!(text.starts_with("RegisterAddr<"), "{text}");
        assert!(text.ends_with("Scratch>(0x10)"), "{text}");
    }
}
