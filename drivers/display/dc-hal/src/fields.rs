//! # Register Fields
//!
//! Bit layouts of the display controller registers touched by the
//! interrupt layer.

use bitflags::bitflags;
use static_assertions::const_assert_eq;

bitflags! {
    /// `DC_HPD_INT_STATUS` (read-only)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HpdIntStatus: u32 {
        /// Latched hotplug interrupt
        const DC_HPD_INT_STATUS = 1 << 0;
        /// Raw connector sense
        const DC_HPD_SENSE = 1 << 1;
        /// Debounced connector sense
        const DC_HPD_SENSE_DELAYED = 1 << 4;
        /// Latched sideband (RX) interrupt
        const DC_HPD_RX_INT_STATUS = 1 << 8;
    }
}

bitflags! {
    /// `DC_HPD_INT_CONTROL`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HpdIntControl: u32 {
        /// Write 1 to clear the latched hotplug interrupt
        const DC_HPD_INT_ACK = 1 << 0;
        /// Edge polarity: set fires on connect, clear fires on disconnect
        const DC_HPD_INT_POLARITY = 1 << 8;
        /// Hotplug interrupt enable
        const DC_HPD_INT_EN = 1 << 16;
        /// Write 1 to clear the latched RX interrupt
        const DC_HPD_RX_INT_ACK = 1 << 20;
        /// RX interrupt enable
        const DC_HPD_RX_INT_EN = 1 << 24;
    }
}

bitflags! {
    /// `DCSURF_SURFACE_FLIP_INTERRUPT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SurfaceFlipInterrupt: u32 {
        /// Flip interrupt enable
        const SURFACE_FLIP_INT_MASK = 1 << 0;
        /// Level (set) or pulse (clear) interrupt
        const SURFACE_FLIP_INT_TYPE = 1 << 1;
        /// Write 1 to clear the flip interrupt
        const SURFACE_FLIP_CLEAR = 1 << 8;
    }
}

bitflags! {
    /// `OTG_GLOBAL_SYNC_STATUS`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OtgGlobalSyncStatus: u32 {
        /// VSTARTUP interrupt enable
        const VSTARTUP_INT_EN = 1 << 4;
        /// VSTARTUP occurred
        const VSTARTUP_EVENT_OCCURRED = 1 << 5;
        /// Write 1 to clear VSTARTUP
        const VSTARTUP_EVENT_CLEAR = 1 << 6;
        /// VUPDATE interrupt enable
        const VUPDATE_INT_EN = 1 << 8;
        /// VUPDATE occurred
        const VUPDATE_EVENT_OCCURRED = 1 << 9;
        /// Write 1 to clear VUPDATE
        const VUPDATE_EVENT_CLEAR = 1 << 10;
    }
}

// Enable and clear bits share a register; they must never alias.
const_assert_eq!(
    HpdIntControl::DC_HPD_INT_EN.bits() & HpdIntControl::DC_HPD_INT_ACK.bits(),
    0
);
const_assert_eq!(
    HpdIntControl::DC_HPD_RX_INT_EN.bits() & HpdIntControl::DC_HPD_RX_INT_ACK.bits(),
    0
);
const_assert_eq!(
    SurfaceFlipInterrupt::SURFACE_FLIP_INT_MASK.bits()
        & SurfaceFlipInterrupt::SURFACE_FLIP_CLEAR.bits(),
    0
);
const_assert_eq!(
    OtgGlobalSyncStatus::VSTARTUP_INT_EN.bits() & OtgGlobalSyncStatus::VSTARTUP_EVENT_CLEAR.bits(),
    0
);
const_assert_eq!(
    OtgGlobalSyncStatus::VUPDATE_INT_EN.bits() & OtgGlobalSyncStatus::VUPDATE_EVENT_CLEAR.bits(),
    0
);

// =============================================================================
// HPD POLARITY
// =============================================================================

/// Edge on which the next hotplug interrupt fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpdPolarity {
    /// Fire when the line goes low (disconnect)
    TriggerLow,
    /// Fire when the line goes high (connect)
    TriggerHigh,
}

impl HpdPolarity {
    /// Polarity that arms the next transition away from the sensed level
    #[inline]
    pub const fn rearm_for(sense_high: bool) -> Self {
        if sense_high {
            HpdPolarity::TriggerLow
        } else {
            HpdPolarity::TriggerHigh
        }
    }

    /// Decode from a control register value
    #[inline]
    pub fn from_control(control: HpdIntControl) -> Self {
        if control.contains(HpdIntControl::DC_HPD_INT_POLARITY) {
            HpdPolarity::TriggerHigh
        } else {
            HpdPolarity::TriggerLow
        }
    }

    /// Apply to a control register value
    #[inline]
    pub fn apply(self, control: HpdIntControl) -> HpdIntControl {
        let mut control = control;
        control.set(
            HpdIntControl::DC_HPD_INT_POLARITY,
            self == HpdPolarity::TriggerHigh,
        );
        control
    }
}
