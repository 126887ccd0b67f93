//! Register snapshots.

use crate::bitfield::BitRange;
use crate::io::RegisterIo;
use crate::rsvdz::ReservedZeroMask;
use crate::RegisterValue;

/// A staging copy of a register, which can be written to the register itself.
///
/// It knows the register's address and stores a value for the register, plus the mask of bits
/// that must be written as zero.
///
/// There is no public constructor. A base is only created by [`Register::new`], which fills in
/// the mask from the definition's [`RESERVED_ZERO`](Register::RESERVED_ZERO) table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterBase<T> {
    addr: u32,
    value: T,
    rsvdz_mask: T,
}

impl<T: RegisterValue> RegisterBase<T> {
    pub(crate) fn new(rsvdz_mask: ReservedZeroMask<T>) -> Self {
        Self {
            addr: 0,
            value: T::ZERO,
            rsvdz_mask: rsvdz_mask.get(),
        }
    }

    /// The register's address.
    pub fn addr(&self) -> u32 {
        self.addr
    }

    /// Sets the register's address.
    pub fn set_addr(&mut self, addr: u32) {
        self.addr = addr;
    }

    /// The staged value.
    pub fn value(&self) -> T {
        self.value
    }

    /// Replaces the staged value.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    /// The staged value, for in-place modification.
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// The bits cleared on every write.
    pub fn rsvdz_mask(&self) -> T {
        self.rsvdz_mask
    }

    /// Replaces the staged value with the register's current value.
    pub fn read_from<I: RegisterIo>(&mut self, io: &I) {
        self.value = io.read(self.addr);
        trace!("read {:#x} -> {:#x}", self.addr, self.value);
    }

    /// Writes the staged value to the register with every reserved-zero bit cleared.
    pub fn write_to<I: RegisterIo>(&self, io: &I) {
        let value = self.value & !self.rsvdz_mask;
        trace!(
            "write {:#x} <- {:#x} (staged {:#x})",
            self.addr,
            value,
            self.value,
        );
        io.write(self.addr, value);
    }
}

/// A register definition.
///
/// Implementations are normally generated by [`register!`](crate::register), which embeds a
/// [`RegisterBase`] in the definition and adds accessors for its fields. The provided methods give
/// every definition the snapshot's behavior.
///
/// Bring this trait into scope (it is in the [prelude](crate::prelude)) to call them.
pub trait Register: Sized {
    /// The register's value type.
    type Value: RegisterValue;

    /// The register's reserved-zero ranges.
    const RESERVED_ZERO: &'static [BitRange];

    /// Wraps snapshot state in the definition.
    fn from_base(base: RegisterBase<Self::Value>) -> Self;

    /// The snapshot state.
    fn base(&self) -> &RegisterBase<Self::Value>;

    /// The snapshot state, mutably.
    fn base_mut(&mut self) -> &mut RegisterBase<Self::Value>;

    /// Creates a snapshot with address and value zero.
    ///
    /// The reserved-zero mask is accumulated from [`RESERVED_ZERO`](Self::RESERVED_ZERO) here, so
    /// every snapshot carries the full mask before its first read or write.
    fn new() -> Self {
        Self::from_base(RegisterBase::new(ReservedZeroMask::accumulate(
            Self::RESERVED_ZERO,
        )))
    }

    /// The register's address.
    fn reg_addr(&self) -> u32 {
        self.base().addr()
    }

    /// Sets the register's address.
    fn set_reg_addr(&mut self, addr: u32) -> &mut Self {
        self.base_mut().set_addr(addr);
        self
    }

    /// The staged value.
    fn reg_value(&self) -> Self::Value {
        self.base().value()
    }

    /// Replaces the staged value.
    fn set_reg_value(&mut self, value: Self::Value) -> &mut Self {
        self.base_mut().set_value(value);
        self
    }

    /// The staged value, for in-place modification.
    fn reg_value_mut(&mut self) -> &mut Self::Value {
        self.base_mut().value_mut()
    }

    /// The bits cleared on every write.
    fn rsvdz_mask(&self) -> Self::Value {
        self.base().rsvdz_mask()
    }

    /// Replaces the staged value with the register's current value.
    fn read_from<I: RegisterIo>(&mut self, io: &I) -> &mut Self {
        self.base_mut().read_from(io);
        self
    }

    /// Writes the staged value to the register with every reserved-zero bit cleared.
    ///
    /// The staged value itself is left as is, reserved-zero bits included.
    fn write_to<I: RegisterIo>(&self, io: &I) {
        self.base().write_to(io);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryIo;

    /// A hand-written definition, as `register!` would generate it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Control {
        base: RegisterBase<u16>,
    }

    impl Register for Control {
        type Value = u16;

        const RESERVED_ZERO: &'static [BitRange] =
            &[BitRange::bit::<u16>(15), BitRange::field::<u16>(3, 0)];

        fn from_base(base: RegisterBase<u16>) -> Self {
            Self { base }
        }

        fn base(&self) -> &RegisterBase<u16> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut RegisterBase<u16> {
            &mut self.base
        }
    }

    #[test]
    fn new_snapshot() {
        let reg = Control::new();
        assert_eq!(reg.reg_addr(), 0);
        assert_eq!(reg.reg_value(), 0);
        assert_eq!(reg.rsvdz_mask(), 0x800f);
        assert_eq!(Control::new(), reg);
    }

    #[test]
    fn raw_accessors() {
        let mut reg = Control::new();
        reg.set_reg_addr(6).set_reg_value(0x1234);
        assert_eq!(reg.reg_addr(), 6);
        assert_eq!(reg.reg_value(), 0x1234);
        *reg.reg_value_mut() |= 0x8000;
        assert_eq!(reg.reg_value(), 0x9234);
    }

    #[test]
    fn read_and_write() {
        let mut bytes = [0u8; 8];
        let io = MemoryIo::new(&mut bytes);
        io.write(2, 0xffffu16);

        let mut reg = Control::new();
        reg.set_reg_addr(2).read_from(&io);
        assert_eq!(reg.reg_value(), 0xffff);
        assert_eq!(reg.reg_addr(), 2);
        assert_eq!(reg.rsvdz_mask(), 0x800f);

        reg.set_reg_addr(4).write_to(&io);
        assert_eq!(io.read::<u16>(4), 0x7ff0);
        // The staged value keeps its reserved bits.
        assert_eq!(reg.reg_value(), 0xffff);
    }

    #[test]
    fn rebuilt_snapshot_keeps_the_mask() {
        let mut bytes = [0u8; 4];
        let io = MemoryIo::new(&mut bytes);

        let mut reg = Control::from_base(*Control::new().base());
        assert_eq!(reg.rsvdz_mask(), 0x800f);
        reg.set_reg_value(0x8008).write_to(&io);
        assert_eq!(io.read::<u16>(0), 0);
    }
}
