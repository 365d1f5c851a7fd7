//! # Source Descriptors
//!
//! Per-source register addresses, masks and behaviour.

// =============================================================================
// BEHAVIOUR
// =============================================================================

/// How a source is enabled and acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrqBehavior {
    /// Generic register toggle for both enable and acknowledge
    Generic,
    /// Generic enable; acknowledge runs the hotplug polarity protocol
    HpdAck,
    /// Source not implemented by the hardware; nothing is touched
    NoOp,
}

impl IrqBehavior {
    /// Check for the placeholder behaviour
    #[inline]
    pub const fn is_noop(self) -> bool {
        matches!(self, IrqBehavior::NoOp)
    }
}

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// Index into [`IrqSourceInfo::enable_value`] for the enable write
pub const ENABLE: usize = 0;
/// Index into [`IrqSourceInfo::enable_value`] for the disable write
pub const DISABLE: usize = 1;

/// Register protocol of one logical interrupt source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IrqSourceInfo {
    /// Register holding the enable bit
    pub enable_reg: u32,
    /// Enable field within `enable_reg`
    pub enable_mask: u32,
    /// Values written under `enable_mask` to enable / disable
    pub enable_value: [u32; 2],
    /// Register holding the acknowledge bit
    pub ack_reg: u32,
    /// Acknowledge field within `ack_reg`
    pub ack_mask: u32,
    /// Value written under `ack_mask` to clear a pending event
    pub ack_value: u32,
    /// Status register, for sources whose state is read back
    pub status_reg: Option<u32>,
    /// Enable/acknowledge behaviour
    pub behavior: IrqBehavior,
}

impl IrqSourceInfo {
    /// Placeholder for sources the hardware does not implement
    pub const DUMMY: Self = Self {
        enable_reg: 0,
        enable_mask: 0,
        enable_value: [0, 0],
        ack_reg: 0,
        ack_mask: 0,
        ack_value: 0,
        status_reg: None,
        behavior: IrqBehavior::NoOp,
    };

    /// Descriptor whose enable and acknowledge fields are toggled by
    /// writing `mask` (enable) or `!mask` (disable) and `ack_mask`
    pub const fn toggle(
        enable_reg: u32,
        enable_mask: u32,
        ack_reg: u32,
        ack_mask: u32,
        status_reg: Option<u32>,
        behavior: IrqBehavior,
    ) -> Self {
        Self {
            enable_reg,
            enable_mask,
            enable_value: [enable_mask, !enable_mask],
            ack_reg,
            ack_mask,
            ack_value: ack_mask,
            status_reg,
            behavior,
        }
    }

    /// Check whether this is a placeholder entry
    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.behavior.is_noop()
    }

    /// Register fields are consistent with the behaviour
    ///
    /// Placeholders carry no addresses; wired sources carry both an enable
    /// and an acknowledge address and non-empty masks.
    pub fn is_consistent(&self) -> bool {
        if self.is_dummy() {
            return self.enable_reg == 0
                && self.ack_reg == 0
                && self.status_reg.is_none()
                && self.enable_mask == 0
                && self.ack_mask == 0;
        }

        let hpd_has_status = match self.behavior {
            IrqBehavior::HpdAck => self.status_reg.is_some(),
            _ => true,
        };

        self.enable_reg != 0
            && self.ack_reg != 0
            && self.status_reg != Some(0)
            && self.enable_mask != 0
            && self.ack_mask != 0
            && self.enable_value[ENABLE] & self.enable_mask == self.enable_mask
            && self.enable_value[DISABLE] & self.enable_mask == 0
            && hpd_has_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_is_consistent() {
        assert!(IrqSourceInfo::DUMMY.is_dummy());
        assert!(IrqSourceInfo::DUMMY.is_consistent());
    }

    #[test]
    fn test_toggle_values() {
        let info = IrqSourceInfo::toggle(0x10, 0x100, 0x10, 0x1, None, IrqBehavior::Generic);
        assert_eq!(info.enable_value, [0x100, !0x100]);
        assert_eq!(info.ack_value, 0x1);
        assert!(info.is_consistent());
    }

    #[test]
    fn test_hpd_ack_requires_status() {
        let info = IrqSourceInfo::toggle(0x10, 0x100, 0x10, 0x1, None, IrqBehavior::HpdAck);
        assert!(!info.is_consistent());
    }
}
