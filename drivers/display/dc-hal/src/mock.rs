//! # Mock Register Backend
//!
//! In-memory register file that records every access, for exercising
//! register protocols without hardware.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use spin::Mutex;

use crate::mmio::RegisterIo;

/// A single recorded register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Register read and the value returned
    Read {
        /// Register address
        addr: u32,
        /// Value returned
        value: u32,
    },
    /// Register write and the value written
    Write {
        /// Register address
        addr: u32,
        /// Value written
        value: u32,
    },
}

impl Access {
    /// Register address of this access
    pub fn addr(&self) -> u32 {
        match *self {
            Access::Read { addr, .. } | Access::Write { addr, .. } => addr,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    values: BTreeMap<u32, u32>,
    /// Bits that read back as zero after being written (write-1-to-clear strobes)
    strobes: BTreeMap<u32, u32>,
    log: Vec<Access>,
}

/// Recording register file
///
/// Unwritten registers read as zero.
#[derive(Debug, Default)]
pub struct MockRegisters {
    state: Mutex<MockState>,
}

impl MockRegisters {
    /// Create an empty register file
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `mask` bits of `addr` as strobes that never latch
    pub fn with_strobe_bits(self, addr: u32, mask: u32) -> Self {
        *self.state.lock().strobes.entry(addr).or_insert(0) |= mask;
        self
    }

    /// Preload a register without recording an access
    pub fn preload(&self, addr: u32, value: u32) {
        self.state.lock().values.insert(addr, value);
    }

    /// Current register value, without recording an access
    pub fn peek(&self, addr: u32) -> u32 {
        self.state.lock().values.get(&addr).copied().unwrap_or(0)
    }

    /// All recorded accesses in order
    pub fn accesses(&self) -> Vec<Access> {
        self.state.lock().log.clone()
    }

    /// Values written to `addr`, in order
    pub fn writes_to(&self, addr: u32) -> Vec<u32> {
        self.state
            .lock()
            .log
            .iter()
            .filter_map(|access| match *access {
                Access::Write { addr: a, value } if a == addr => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded accesses, keeping register contents
    pub fn clear_log(&self) {
        self.state.lock().log.clear();
    }
}

impl RegisterIo for MockRegisters {
    fn read32(&self, addr: u32) -> u32 {
        let mut state = self.state.lock();
        let value = state.values.get(&addr).copied().unwrap_or(0);
        state.log.push(Access::Read { addr, value });
        value
    }

    fn write32(&self, addr: u32, value: u32) {
        let mut state = self.state.lock();
        let strobes = state.strobes.get(&addr).copied().unwrap_or(0);
        state.values.insert(addr, value & !strobes);
        state.log.push(Access::Write { addr, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let regs = MockRegisters::new();
        regs.preload(0x10, 7);
        assert_eq!(regs.read32(0x10), 7);
        regs.write32(0x11, 9);

        assert_eq!(
            regs.accesses(),
            [
                Access::Read { addr: 0x10, value: 7 },
                Access::Write { addr: 0x11, value: 9 },
            ]
        );
    }

    #[test]
    fn test_strobe_bits_do_not_latch() {
        let regs = MockRegisters::new().with_strobe_bits(0x20, 0x1);
        regs.write32(0x20, 0x101);
        assert_eq!(regs.peek(0x20), 0x100);
        assert_eq!(regs.writes_to(0x20), [0x101]);
    }
}
