//! # Register Access
//!
//! Synchronous, ordered access to display controller registers.
//!
//! Display core registers are addressed by dword index, not byte offset:
//! register `n` lives at byte `4 * n` of the mapped register aperture.

use crate::error::{Error, Result};

// =============================================================================
// REGISTER I/O TRAIT
// =============================================================================

/// Register read/write primitives supplied by the platform layer
///
/// Accesses must reach the hardware in program order. Implementations
/// must not cache or merge reads: callers rely on observing side effects
/// of a preceding write.
pub trait RegisterIo {
    /// Read a 32-bit register
    fn read32(&self, addr: u32) -> u32;

    /// Write a 32-bit register
    fn write32(&self, addr: u32, value: u32);

    /// Read-modify-write the bits selected by `mask`
    fn update32(&self, addr: u32, mask: u32, value: u32) {
        let current = self.read32(addr);
        self.write32(addr, (current & !mask) | (value & mask));
    }
}

impl<T: RegisterIo + ?Sized> RegisterIo for &T {
    #[inline]
    fn read32(&self, addr: u32) -> u32 {
        (**self).read32(addr)
    }

    #[inline]
    fn write32(&self, addr: u32, value: u32) {
        (**self).write32(addr, value)
    }
}

// =============================================================================
// MMIO REGION
// =============================================================================

/// Value returned for reads outside the mapped aperture (bus master abort)
pub const MMIO_ABORT_VALUE: u32 = 0xFFFF_FFFF;

/// Mapped register aperture with volatile accessors
#[derive(Debug)]
pub struct MmioRegion {
    /// Virtual address of register 0
    virt_addr: usize,
    /// Aperture size in bytes
    size: usize,
}

impl MmioRegion {
    /// Wrap a mapped register aperture
    ///
    /// # Safety
    /// - `virt_addr` must map `size` bytes of device registers
    /// - The mapping must stay valid for the lifetime of the region
    pub unsafe fn new(virt_addr: usize, size: usize) -> Result<Self> {
        if virt_addr % 4 != 0 || size % 4 != 0 {
            return Err(Error::MisalignedAddress);
        }

        Ok(Self { virt_addr, size })
    }

    /// Aperture size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of dword registers in the aperture
    pub fn register_count(&self) -> u32 {
        (self.size / 4) as u32
    }

    fn byte_offset(&self, addr: u32) -> Result<usize> {
        let offset = usize::try_from(addr)
            .ok()
            .and_then(|index| index.checked_mul(4))
            .ok_or(Error::OutOfBounds)?;
        match offset.checked_add(4) {
            Some(end) if end <= self.size => Ok(offset),
            _ => Err(Error::OutOfBounds),
        }
    }

    /// Read a register, failing for addresses outside the aperture
    pub fn try_read32(&self, addr: u32) -> Result<u32> {
        let offset = self.byte_offset(addr)?;
        fence::mmio_read_barrier();
        // SAFETY: offset is in bounds and 4-byte aligned, mapping validity
        // is guaranteed by the constructor contract
        let value = unsafe { core::ptr::read_volatile((self.virt_addr + offset) as *const u32) };
        fence::mmio_read_barrier();

        #[cfg(feature = "trace-mmio")]
        log::trace!("mmio: read  [{:#06x}] -> {:#010x}", addr, value);

        Ok(value)
    }

    /// Write a register, failing for addresses outside the aperture
    pub fn try_write32(&self, addr: u32, value: u32) -> Result<()> {
        let offset = self.byte_offset(addr)?;

        #[cfg(feature = "trace-mmio")]
        log::trace!("mmio: write [{:#06x}] <- {:#010x}", addr, value);

        fence::mmio_write_barrier();
        // SAFETY: offset is in bounds and 4-byte aligned, mapping validity
        // is guaranteed by the constructor contract
        unsafe { core::ptr::write_volatile((self.virt_addr + offset) as *mut u32, value) };
        Ok(())
    }
}

impl RegisterIo for MmioRegion {
    fn read32(&self, addr: u32) -> u32 {
        match self.try_read32(addr) {
            Ok(value) => value,
            Err(_) => {
                log::error!("mmio: read of register {:#x} outside aperture", addr);
                MMIO_ABORT_VALUE
            },
        }
    }

    fn write32(&self, addr: u32, value: u32) {
        if self.try_write32(addr, value).is_err() {
            log::error!("mmio: dropped write of register {:#x} outside aperture", addr);
        }
    }
}

// =============================================================================
// MEMORY FENCE OPERATIONS
// =============================================================================

/// Memory barriers around MMIO accesses
pub mod fence {
    //! Memory barrier operations

    /// Compiler fence (prevents reordering)
    #[inline(always)]
    pub fn compiler() {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }

    /// Barrier before an MMIO write
    #[inline(always)]
    pub fn mmio_write_barrier() {
        #[cfg(target_arch = "aarch64")]
        {
            // SAFETY: barrier instruction with no memory operands
            unsafe {
                core::arch::asm!("dmb st", options(nostack, preserves_flags));
            }
        }

        #[cfg(not(target_arch = "aarch64"))]
        compiler();
    }

    /// Barrier after an MMIO read
    #[inline(always)]
    pub fn mmio_read_barrier() {
        #[cfg(target_arch = "aarch64")]
        {
            // SAFETY: barrier instruction with no memory operands
            unsafe {
                core::arch::asm!("dmb ld", options(nostack, preserves_flags));
            }
        }

        #[cfg(not(target_arch = "aarch64"))]
        compiler();
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use super::*;

    #[test]
    fn test_region_over_buffer() {
        let mut backing = vec![0u32; 8];
        // SAFETY: backing outlives the region and spans 32 bytes
        let region = unsafe { MmioRegion::new(backing.as_mut_ptr() as usize, 32) }
            .expect("aligned buffer");

        region.write32(3, 0xCAFE_F00D);
        assert_eq!(region.read32(3), 0xCAFE_F00D);
        assert_eq!(region.register_count(), 8);

        region.update32(3, 0x0000_00FF, 0x0000_0011);
        assert_eq!(region.read32(3), 0xCAFE_F011);

        assert_eq!(region.try_read32(8), Err(Error::OutOfBounds));
        assert_eq!(region.read32(8), MMIO_ABORT_VALUE);
        assert_eq!(backing[3], 0xCAFE_F011);
    }

    #[test]
    fn test_region_rejects_misaligned_base() {
        // SAFETY: construction fails before any access happens
        let result = unsafe { MmioRegion::new(0x1002, 16) };
        assert_eq!(result.err(), Some(Error::MisalignedAddress));
    }

    #[test]
    fn test_offset_overflow_is_out_of_bounds() {
        // SAFETY: every access below fails the bounds check before touching memory
        let region = unsafe { MmioRegion::new(0x1000, 16) }.expect("aligned region");

        // Both wrap to byte offset 0 with unchecked 32-bit arithmetic.
        for addr in [u32::MAX, 0x4000_0000] {
            assert_eq!(region.try_read32(addr), Err(Error::OutOfBounds));
            assert_eq!(region.try_write32(addr, 0), Err(Error::OutOfBounds));
            assert_eq!(region.read32(addr), MMIO_ABORT_VALUE);
        }
    }
}
