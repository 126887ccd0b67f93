#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use hwreg::{RegisterIo, RegisterValue};

/// One transport access, with the value zero-extended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read { addr: u32, value: u64 },
    Write { addr: u32, value: u64 },
}

/// A register space that remembers the last value written to each address and records every
/// access. Unwritten addresses read as zero.
#[derive(Debug, Default)]
pub struct RecordingIo {
    values: RefCell<BTreeMap<u32, u64>>,
    accesses: RefCell<Vec<Access>>,
}

impl RecordingIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, addr: u32, value: u64) -> Self {
        self.values.borrow_mut().insert(addr, value);
        self
    }

    pub fn value(&self, addr: u32) -> Option<u64> {
        self.values.borrow().get(&addr).copied()
    }

    pub fn accesses(&self) -> Vec<Access> {
        self.accesses.borrow().clone()
    }

    pub fn writes(&self) -> Vec<(u32, u64)> {
        self.accesses
            .borrow()
            .iter()
            .filter_map(|access| match *access {
                Access::Write { addr, value } => Some((addr, value)),
                Access::Read { .. } => None,
            })
            .collect()
    }
}

impl RegisterIo for RecordingIo {
    fn read<T: RegisterValue>(&self, addr: u32) -> T {
        let value = self.value(addr).unwrap_or(0);
        self.accesses
            .borrow_mut()
            .push(Access::Read { addr, value });
        T::from_u64_masked(value)
    }

    fn write<T: RegisterValue>(&self, addr: u32, value: T) {
        let value = value.to_u64();
        self.values.borrow_mut().insert(addr, value);
        self.accesses
            .borrow_mut()
            .push(Access::Write { addr, value });
    }
}
