//! Register transports.

use core::cell::Cell;
use core::marker::PhantomData;
use core::mem::{align_of, size_of};

use crate::RegisterValue;

/// A transport for register accesses.
///
/// Addresses are opaque to this crate; for the transports provided here they are byte offsets
/// into a register space. Calls are synchronous and block until the access completes. There is no
/// error path: how a transport handles failures is its own policy.
pub trait RegisterIo {
    /// Reads a value of type `T` from `addr`.
    fn read<T: RegisterValue>(&self, addr: u32) -> T;

    /// Writes a value of type `T` to `addr`.
    fn write<T: RegisterValue>(&self, addr: u32, value: T);
}

impl<I: RegisterIo> RegisterIo for &I {
    #[inline(always)]
    fn read<T: RegisterValue>(&self, addr: u32) -> T {
        (**self).read(addr)
    }

    #[inline(always)]
    fn write<T: RegisterValue>(&self, addr: u32, value: T) {
        (**self).write(addr, value)
    }
}

/// A transport performing volatile accesses to a memory-mapped register space.
///
/// Accesses outside the register space or misaligned for their width panic.
#[derive(Debug)]
pub struct MmioIo<'a> {
    base: *mut u8,
    len: usize,
    _phantom_lifetime: PhantomData<&'a mut [u8]>,
}

impl<'a> MmioIo<'a> {
    /// Creates a transport for the `len` bytes of registers starting at `base`.
    ///
    /// # Safety
    ///
    /// `base..base + len` must be a valid register space for volatile reads and writes of every
    /// width and offset used through this transport for as long as `'a` is live, and nothing
    /// else may access it through a Rust reference in that time.
    pub unsafe fn new(base: *mut u8, len: usize) -> Self {
        Self {
            base,
            len,
            _phantom_lifetime: PhantomData,
        }
    }

    /// The base address of the register space.
    pub fn base(&self) -> *mut u8 {
        self.base
    }

    fn ptr<T: RegisterValue>(&self, addr: u32) -> *mut T {
        let offset = addr as usize;
        assert!(
            offset
                .checked_add(size_of::<T>())
                .map_or(false, |end| end <= self.len),
            "register access at {:#x} is outside the {:#x}-byte register space",
            addr,
            self.len,
        );
        let ptr = self.base.wrapping_add(offset).cast::<T>();
        assert!(
            ptr as usize % align_of::<T>() == 0,
            "misaligned register access at {:#x}",
            addr,
        );
        ptr
    }
}

impl RegisterIo for MmioIo<'_> {
    #[inline]
    fn read<T: RegisterValue>(&self, addr: u32) -> T {
        // SAFETY: The pointer is in bounds of the register space promised by `new`.
        unsafe { core::ptr::read_volatile(self.ptr(addr)) }
    }

    #[inline]
    fn write<T: RegisterValue>(&self, addr: u32, value: T) {
        // SAFETY: The pointer is in bounds of the register space promised by `new`.
        unsafe { core::ptr::write_volatile(self.ptr(addr), value) }
    }
}

/// A simulated register space backed by a byte buffer.
///
/// Values are stored little-endian at their byte offset. Accesses outside the buffer panic.
#[derive(Clone, Copy, Debug)]
pub struct MemoryIo<'a> {
    bytes: &'a [Cell<u8>],
}

impl<'a> MemoryIo<'a> {
    /// Creates a register space over `bytes`.
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self::from_cells(Cell::from_mut(bytes).as_slice_of_cells())
    }

    /// Creates a register space over shared cells, so the caller can inspect it between accesses.
    pub fn from_cells(bytes: &'a [Cell<u8>]) -> Self {
        Self { bytes }
    }

    /// The size of the register space in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the register space is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn window<T: RegisterValue>(&self, addr: u32) -> &'a [Cell<u8>] {
        let start = addr as usize;
        let len = (T::BITS / 8) as usize;
        match start.checked_add(len) {
            Some(end) if end <= self.bytes.len() => &self.bytes[start..end],
            _ => panic!(
                "register access at {:#x} is outside the {:#x}-byte register space",
                addr,
                self.bytes.len(),
            ),
        }
    }
}

impl RegisterIo for MemoryIo<'_> {
    fn read<T: RegisterValue>(&self, addr: u32) -> T {
        let value = self
            .window::<T>(addr)
            .iter()
            .enumerate()
            .fold(0u64, |value, (i, byte)| value | u64::from(byte.get()) << (8 * i));
        T::from_u64_masked(value)
    }

    fn write<T: RegisterValue>(&self, addr: u32, value: T) {
        let value = value.to_u64();
        for (i, byte) in self.window::<T>(addr).iter().enumerate() {
            byte.set((value >> (8 * i)) as u8);
        }
    }
}
