//! # Register Map
//!
//! Resolves named registers to dword addresses for a hardware generation.
//!
//! Display controller registers are grouped in per-instance blocks (one HPD
//! block per connector, one HUBPREQ block per pipe, one OTG block per timing
//! generator). An address is always `block_base_address(block, instance) +
//! register_offset(register)`.

// =============================================================================
// BLOCKS AND REGISTERS
// =============================================================================

/// Register block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterBlock {
    /// Hotplug detect, one per connector
    Hpd,
    /// Hub pipe request unit, one per pipe
    HubpReq,
    /// Output timing generator, one per timing generator
    Otg,
}

/// Registers used by the interrupt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// `DC_HPD_INT_STATUS`
    DcHpdIntStatus,
    /// `DC_HPD_INT_CONTROL`
    DcHpdIntControl,
    /// `DCSURF_SURFACE_FLIP_INTERRUPT`
    DcsurfSurfaceFlipInterrupt,
    /// `OTG_GLOBAL_SYNC_STATUS`
    OtgGlobalSyncStatus,
}

impl Register {
    /// Block this register belongs to
    pub const fn block(self) -> RegisterBlock {
        match self {
            Register::DcHpdIntStatus | Register::DcHpdIntControl => RegisterBlock::Hpd,
            Register::DcsurfSurfaceFlipInterrupt => RegisterBlock::HubpReq,
            Register::OtgGlobalSyncStatus => RegisterBlock::Otg,
        }
    }
}

// =============================================================================
// REGISTER MAP TRAIT
// =============================================================================

/// Hardware register map of one display controller generation
pub trait RegisterMap {
    /// Base address of `instance` of `block`
    fn block_base_address(&self, block: RegisterBlock, instance: u32) -> u32;

    /// Offset of `reg` within its block
    fn register_offset(&self, reg: Register) -> u32;

    /// Number of instances of `block` on this generation
    fn instance_count(&self, block: RegisterBlock) -> u32;

    /// Address of `reg` in `instance` of its block
    fn register_address(&self, reg: Register, instance: u32) -> u32 {
        debug_assert!(instance < self.instance_count(reg.block()));
        self.block_base_address(reg.block(), instance) + self.register_offset(reg)
    }
}

// =============================================================================
// DCN 2.0
// =============================================================================

/// DCN 2.0 register layout
pub mod dcn20 {
    //! DCN 2.0 block bases, strides and register offsets (dword units)

    /// Segment 2 base of the DCN IP on Navi10
    pub const DCN_BASE_INST0_SEG2: u32 = 0x0000_34C0;

    /// First HPD block, relative to segment 2
    pub const HPD0_BASE: u32 = 0x1F14;
    /// Distance between HPD blocks
    pub const HPD_STRIDE: u32 = 0x8;
    /// Number of HPD blocks
    pub const HPD_COUNT: u32 = 6;

    /// First HUBPREQ block, relative to segment 2
    pub const HUBPREQ0_BASE: u32 = 0x0568;
    /// Distance between HUBPREQ blocks
    pub const HUBPREQ_STRIDE: u32 = 0x118;
    /// Number of HUBPREQ blocks
    pub const HUBPREQ_COUNT: u32 = 6;

    /// First OTG block, relative to segment 2
    pub const OTG0_BASE: u32 = 0x1B0A;
    /// Distance between OTG blocks
    pub const OTG_STRIDE: u32 = 0x80;
    /// Number of OTG blocks
    pub const OTG_COUNT: u32 = 6;

    /// `DC_HPD_INT_STATUS` offset in an HPD block
    pub const DC_HPD_INT_STATUS: u32 = 0x0;
    /// `DC_HPD_INT_CONTROL` offset in an HPD block
    pub const DC_HPD_INT_CONTROL: u32 = 0x1;
    /// `DCSURF_SURFACE_FLIP_INTERRUPT` offset in a HUBPREQ block
    pub const DCSURF_SURFACE_FLIP_INTERRUPT: u32 = 0x2B;
    /// `OTG_GLOBAL_SYNC_STATUS` offset in an OTG block
    pub const OTG_GLOBAL_SYNC_STATUS: u32 = 0x32;
}

/// DCN 2.0 register map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dcn20RegisterMap {
    /// Base of register segment 2 for this ASIC
    segment_base: u32,
}

impl Dcn20RegisterMap {
    /// Register map with an ASIC-specific segment base
    pub const fn new(segment_base: u32) -> Self {
        Self { segment_base }
    }

    /// Segment base in use
    pub const fn segment_base(&self) -> u32 {
        self.segment_base
    }
}

impl Default for Dcn20RegisterMap {
    fn default() -> Self {
        Self::new(dcn20::DCN_BASE_INST0_SEG2)
    }
}

impl RegisterMap for Dcn20RegisterMap {
    fn block_base_address(&self, block: RegisterBlock, instance: u32) -> u32 {
        let (first, stride) = match block {
            RegisterBlock::Hpd => (dcn20::HPD0_BASE, dcn20::HPD_STRIDE),
            RegisterBlock::HubpReq => (dcn20::HUBPREQ0_BASE, dcn20::HUBPREQ_STRIDE),
            RegisterBlock::Otg => (dcn20::OTG0_BASE, dcn20::OTG_STRIDE),
        };
        self.segment_base + first + instance * stride
    }

    fn register_offset(&self, reg: Register) -> u32 {
        match reg {
            Register::DcHpdIntStatus => dcn20::DC_HPD_INT_STATUS,
            Register::DcHpdIntControl => dcn20::DC_HPD_INT_CONTROL,
            Register::DcsurfSurfaceFlipInterrupt => dcn20::DCSURF_SURFACE_FLIP_INTERRUPT,
            Register::OtgGlobalSyncStatus => dcn20::OTG_GLOBAL_SYNC_STATUS,
        }
    }

    fn instance_count(&self, block: RegisterBlock) -> u32 {
        match block {
            RegisterBlock::Hpd => dcn20::HPD_COUNT,
            RegisterBlock::HubpReq => dcn20::HUBPREQ_COUNT,
            RegisterBlock::Otg => dcn20::OTG_COUNT,
        }
    }
}
