//! # DCN 2.0
//!
//! Interrupt classification and source layout of the DCN 2.0 display core.
//!
//! DCN 2.0 reuses the DCN 1.0 interrupt-source namespace. All hotplug and
//! hotplug-RX events arrive under a single source id (`DC_HPD1_INT`); the
//! context id tells the connectors and signals apart.

use dc_hal::fields::{HpdIntControl, OtgGlobalSyncStatus, SurfaceFlipInterrupt};
use dc_hal::Register;

use crate::generation::IrqGeneration;
use crate::info::IrqBehavior;
use crate::source::{IrqSource, IrqSourceCategory};
use crate::table::EntrySpec;

// =============================================================================
// HARDWARE EVENT IDS
// =============================================================================

/// Raw source and context ids delivered by the interrupt handler ring
pub mod ids {
    //! DCN 1.0 interrupt source ids

    /// Shared source id of every HPD and HPD RX event
    pub const SRCID_DC_HPD1_INT: u32 = 0x0C;

    /// OTG 0 VSTARTUP
    pub const SRCID_DC_D1_OTG_VSTARTUP: u32 = 0x39;
    /// OTG 1 VSTARTUP
    pub const SRCID_DC_D2_OTG_VSTARTUP: u32 = 0x3A;
    /// OTG 2 VSTARTUP
    pub const SRCID_DC_D3_OTG_VSTARTUP: u32 = 0x3B;
    /// OTG 3 VSTARTUP
    pub const SRCID_DC_D4_OTG_VSTARTUP: u32 = 0x3C;
    /// OTG 4 VSTARTUP
    pub const SRCID_DC_D5_OTG_VSTARTUP: u32 = 0x3D;
    /// OTG 5 VSTARTUP
    pub const SRCID_DC_D6_OTG_VSTARTUP: u32 = 0x3E;

    /// HUBP 0 surface flip
    pub const SRCID_HUBP0_FLIP_INTERRUPT: u32 = 0x4F;
    /// HUBP 1 surface flip
    pub const SRCID_HUBP1_FLIP_INTERRUPT: u32 = 0x50;
    /// HUBP 2 surface flip
    pub const SRCID_HUBP2_FLIP_INTERRUPT: u32 = 0x51;
    /// HUBP 3 surface flip
    pub const SRCID_HUBP3_FLIP_INTERRUPT: u32 = 0x52;
    /// HUBP 4 surface flip
    pub const SRCID_HUBP4_FLIP_INTERRUPT: u32 = 0x53;
    /// HUBP 5 surface flip
    pub const SRCID_HUBP5_FLIP_INTERRUPT: u32 = 0x54;

    /// OTG 0 VUPDATE (no lock)
    pub const SRCID_OTG0_IHC_V_UPDATE_NO_LOCK_INTERRUPT: u32 = 0x57;
    /// OTG 1 VUPDATE (no lock)
    pub const SRCID_OTG1_IHC_V_UPDATE_NO_LOCK_INTERRUPT: u32 = 0x58;
    /// OTG 2 VUPDATE (no lock)
    pub const SRCID_OTG2_IHC_V_UPDATE_NO_LOCK_INTERRUPT: u32 = 0x59;
    /// OTG 3 VUPDATE (no lock)
    pub const SRCID_OTG3_IHC_V_UPDATE_NO_LOCK_INTERRUPT: u32 = 0x5A;
    /// OTG 4 VUPDATE (no lock)
    pub const SRCID_OTG4_IHC_V_UPDATE_NO_LOCK_INTERRUPT: u32 = 0x5B;
    /// OTG 5 VUPDATE (no lock)
    pub const SRCID_OTG5_IHC_V_UPDATE_NO_LOCK_INTERRUPT: u32 = 0x5C;

    /// Connector 1 hotplug
    pub const CTXID_DC_HPD1_INT: u32 = 0;
    /// Connector 2 hotplug
    pub const CTXID_DC_HPD2_INT: u32 = 1;
    /// Connector 3 hotplug
    pub const CTXID_DC_HPD3_INT: u32 = 2;
    /// Connector 4 hotplug
    pub const CTXID_DC_HPD4_INT: u32 = 3;
    /// Connector 5 hotplug
    pub const CTXID_DC_HPD5_INT: u32 = 4;
    /// Connector 6 hotplug
    pub const CTXID_DC_HPD6_INT: u32 = 5;
    /// Connector 1 hotplug RX
    pub const CTXID_DC_HPD1_RX_INT: u32 = 6;
    /// Connector 2 hotplug RX
    pub const CTXID_DC_HPD2_RX_INT: u32 = 7;
    /// Connector 3 hotplug RX
    pub const CTXID_DC_HPD3_RX_INT: u32 = 8;
    /// Connector 4 hotplug RX
    pub const CTXID_DC_HPD4_RX_INT: u32 = 9;
    /// Connector 5 hotplug RX
    pub const CTXID_DC_HPD5_RX_INT: u32 = 10;
    /// Connector 6 hotplug RX
    pub const CTXID_DC_HPD6_RX_INT: u32 = 11;
}

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Resolve a raw DCN 2.0 event to a logical source
pub const fn to_irq_source(src_id: u32, ext_id: u32) -> IrqSource {
    use ids::*;

    match src_id {
        SRCID_DC_D1_OTG_VSTARTUP => IrqSource::Vblank1,
        SRCID_DC_D2_OTG_VSTARTUP => IrqSource::Vblank2,
        SRCID_DC_D3_OTG_VSTARTUP => IrqSource::Vblank3,
        SRCID_DC_D4_OTG_VSTARTUP => IrqSource::Vblank4,
        SRCID_DC_D5_OTG_VSTARTUP => IrqSource::Vblank5,
        SRCID_DC_D6_OTG_VSTARTUP => IrqSource::Vblank6,

        SRCID_OTG0_IHC_V_UPDATE_NO_LOCK_INTERRUPT => IrqSource::Vupdate1,
        SRCID_OTG1_IHC_V_UPDATE_NO_LOCK_INTERRUPT => IrqSource::Vupdate2,
        SRCID_OTG2_IHC_V_UPDATE_NO_LOCK_INTERRUPT => IrqSource::Vupdate3,
        SRCID_OTG3_IHC_V_UPDATE_NO_LOCK_INTERRUPT => IrqSource::Vupdate4,
        SRCID_OTG4_IHC_V_UPDATE_NO_LOCK_INTERRUPT => IrqSource::Vupdate5,
        SRCID_OTG5_IHC_V_UPDATE_NO_LOCK_INTERRUPT => IrqSource::Vupdate6,

        SRCID_HUBP0_FLIP_INTERRUPT => IrqSource::Pflip1,
        SRCID_HUBP1_FLIP_INTERRUPT => IrqSource::Pflip2,
        SRCID_HUBP2_FLIP_INTERRUPT => IrqSource::Pflip3,
        SRCID_HUBP3_FLIP_INTERRUPT => IrqSource::Pflip4,
        SRCID_HUBP4_FLIP_INTERRUPT => IrqSource::Pflip5,
        SRCID_HUBP5_FLIP_INTERRUPT => IrqSource::Pflip6,

        SRCID_DC_HPD1_INT => match ext_id {
            CTXID_DC_HPD1_INT => IrqSource::Hpd1,
            CTXID_DC_HPD2_INT => IrqSource::Hpd2,
            CTXID_DC_HPD3_INT => IrqSource::Hpd3,
            CTXID_DC_HPD4_INT => IrqSource::Hpd4,
            CTXID_DC_HPD5_INT => IrqSource::Hpd5,
            CTXID_DC_HPD6_INT => IrqSource::Hpd6,
            CTXID_DC_HPD1_RX_INT => IrqSource::Hpd1Rx,
            CTXID_DC_HPD2_RX_INT => IrqSource::Hpd2Rx,
            CTXID_DC_HPD3_RX_INT => IrqSource::Hpd3Rx,
            CTXID_DC_HPD4_RX_INT => IrqSource::Hpd4Rx,
            CTXID_DC_HPD5_RX_INT => IrqSource::Hpd5Rx,
            CTXID_DC_HPD6_RX_INT => IrqSource::Hpd6Rx,
            _ => IrqSource::Invalid,
        },

        _ => IrqSource::Invalid,
    }
}

// =============================================================================
// SOURCE LAYOUT
// =============================================================================

/// Wired DCN 2.0 sources
///
/// Only HUBP 0-3 carry a flip interrupt; `Pflip5`, `Pflip6` and every
/// auxiliary, GPIO, underflow and firmware source stay placeholders.
pub const ENTRY_SPECS: [EntrySpec; 5] = [
    EntrySpec {
        category: IrqSourceCategory::Hpd,
        lines: 6,
        enable: (Register::DcHpdIntControl, HpdIntControl::DC_HPD_INT_EN.bits()),
        ack: (Register::DcHpdIntControl, HpdIntControl::DC_HPD_INT_ACK.bits()),
        status: Some(Register::DcHpdIntStatus),
        behavior: IrqBehavior::HpdAck,
    },
    EntrySpec {
        category: IrqSourceCategory::HpdRx,
        lines: 6,
        enable: (Register::DcHpdIntControl, HpdIntControl::DC_HPD_RX_INT_EN.bits()),
        ack: (Register::DcHpdIntControl, HpdIntControl::DC_HPD_RX_INT_ACK.bits()),
        status: Some(Register::DcHpdIntStatus),
        behavior: IrqBehavior::Generic,
    },
    EntrySpec {
        category: IrqSourceCategory::Pflip,
        lines: 4,
        enable: (
            Register::DcsurfSurfaceFlipInterrupt,
            SurfaceFlipInterrupt::SURFACE_FLIP_INT_MASK.bits(),
        ),
        ack: (
            Register::DcsurfSurfaceFlipInterrupt,
            SurfaceFlipInterrupt::SURFACE_FLIP_CLEAR.bits(),
        ),
        status: None,
        behavior: IrqBehavior::Generic,
    },
    EntrySpec {
        category: IrqSourceCategory::Vupdate,
        lines: 6,
        enable: (
            Register::OtgGlobalSyncStatus,
            OtgGlobalSyncStatus::VUPDATE_INT_EN.bits(),
        ),
        ack: (
            Register::OtgGlobalSyncStatus,
            OtgGlobalSyncStatus::VUPDATE_EVENT_CLEAR.bits(),
        ),
        status: None,
        behavior: IrqBehavior::Generic,
    },
    EntrySpec {
        category: IrqSourceCategory::Vblank,
        lines: 6,
        enable: (
            Register::OtgGlobalSyncStatus,
            OtgGlobalSyncStatus::VSTARTUP_INT_EN.bits(),
        ),
        ack: (
            Register::OtgGlobalSyncStatus,
            OtgGlobalSyncStatus::VSTARTUP_EVENT_CLEAR.bits(),
        ),
        status: None,
        behavior: IrqBehavior::Generic,
    },
];

/// DCN 2.0 generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dcn20;

impl IrqGeneration for Dcn20 {
    fn name(&self) -> &'static str {
        "DCN 2.0"
    }

    fn to_irq_source(&self, src_id: u32, ext_id: u32) -> IrqSource {
        to_irq_source(src_id, ext_id)
    }

    fn entry_specs(&self) -> &'static [EntrySpec] {
        &ENTRY_SPECS
    }
}

#[cfg(test)]
mod tests {
    use dc_hal::{Dcn20RegisterMap, RegisterMap};

    use super::ids::*;
    use super::*;
    use crate::table::IrqSourceTable;

    const VSTARTUP: [u32; 6] = [
        SRCID_DC_D1_OTG_VSTARTUP,
        SRCID_DC_D2_OTG_VSTARTUP,
        SRCID_DC_D3_OTG_VSTARTUP,
        SRCID_DC_D4_OTG_VSTARTUP,
        SRCID_DC_D5_OTG_VSTARTUP,
        SRCID_DC_D6_OTG_VSTARTUP,
    ];

    const VUPDATE: [u32; 6] = [
        SRCID_OTG0_IHC_V_UPDATE_NO_LOCK_INTERRUPT,
        SRCID_OTG1_IHC_V_UPDATE_NO_LOCK_INTERRUPT,
        SRCID_OTG2_IHC_V_UPDATE_NO_LOCK_INTERRUPT,
        SRCID_OTG3_IHC_V_UPDATE_NO_LOCK_INTERRUPT,
        SRCID_OTG4_IHC_V_UPDATE_NO_LOCK_INTERRUPT,
        SRCID_OTG5_IHC_V_UPDATE_NO_LOCK_INTERRUPT,
    ];

    const FLIP: [u32; 6] = [
        SRCID_HUBP0_FLIP_INTERRUPT,
        SRCID_HUBP1_FLIP_INTERRUPT,
        SRCID_HUBP2_FLIP_INTERRUPT,
        SRCID_HUBP3_FLIP_INTERRUPT,
        SRCID_HUBP4_FLIP_INTERRUPT,
        SRCID_HUBP5_FLIP_INTERRUPT,
    ];

    const HPD_CTX: [u32; 6] = [
        CTXID_DC_HPD1_INT,
        CTXID_DC_HPD2_INT,
        CTXID_DC_HPD3_INT,
        CTXID_DC_HPD4_INT,
        CTXID_DC_HPD5_INT,
        CTXID_DC_HPD6_INT,
    ];

    const HPD_RX_CTX: [u32; 6] = [
        CTXID_DC_HPD1_RX_INT,
        CTXID_DC_HPD2_RX_INT,
        CTXID_DC_HPD3_RX_INT,
        CTXID_DC_HPD4_RX_INT,
        CTXID_DC_HPD5_RX_INT,
        CTXID_DC_HPD6_RX_INT,
    ];

    #[test]
    fn test_hpd_line_3() {
        assert_eq!(to_irq_source(SRCID_DC_HPD1_INT, HPD_CTX[3]), IrqSource::Hpd4);
        assert_eq!(to_irq_source(SRCID_DC_HPD1_INT, HPD_RX_CTX[3]), IrqSource::Hpd4Rx);
    }

    #[test]
    fn test_hpd_all_lines() {
        for line in 0..6 {
            assert_eq!(
                to_irq_source(SRCID_DC_HPD1_INT, HPD_CTX[line]),
                IrqSource::hpd(line).unwrap()
            );
            assert_eq!(
                to_irq_source(SRCID_DC_HPD1_INT, HPD_RX_CTX[line]),
                IrqSource::hpd_rx(line).unwrap()
            );
        }
    }

    #[test]
    fn test_vblank_pipe_index() {
        assert_eq!(to_irq_source(VSTARTUP[2], 0), IrqSource::Vblank3);
        for (pipe, &src_id) in VSTARTUP.iter().enumerate() {
            assert_eq!(to_irq_source(src_id, 0), IrqSource::vblank(pipe).unwrap());
        }
    }

    #[test]
    fn test_vupdate_pipe_index() {
        assert_eq!(to_irq_source(VUPDATE[2], 0), IrqSource::Vupdate3);
        for (pipe, &src_id) in VUPDATE.iter().enumerate() {
            assert_eq!(to_irq_source(src_id, 0), IrqSource::vupdate(pipe).unwrap());
        }
    }

    #[test]
    fn test_pflip_pipe_index() {
        assert_eq!(to_irq_source(FLIP[2], 0), IrqSource::Pflip3);
        for (pipe, &src_id) in FLIP.iter().enumerate() {
            assert_eq!(to_irq_source(src_id, 0), IrqSource::pflip(pipe).unwrap());
        }
    }

    #[test]
    fn test_ext_id_ignored_outside_hpd() {
        assert_eq!(to_irq_source(VSTARTUP[0], 0xDEAD_BEEF), IrqSource::Vblank1);
    }

    #[test]
    fn test_unknown_ids_are_invalid() {
        let known = |src_id: u32| {
            src_id == SRCID_DC_HPD1_INT
                || VSTARTUP.contains(&src_id)
                || VUPDATE.contains(&src_id)
                || FLIP.contains(&src_id)
        };

        for src_id in 0..0x200 {
            if !known(src_id) {
                assert_eq!(to_irq_source(src_id, 0), IrqSource::Invalid, "src {:#x}", src_id);
            }
        }

        for ext_id in 12..0x200 {
            assert_eq!(to_irq_source(SRCID_DC_HPD1_INT, ext_id), IrqSource::Invalid);
        }

        assert_eq!(to_irq_source(u32::MAX, u32::MAX), IrqSource::Invalid);
        assert_eq!(to_irq_source(SRCID_DC_HPD1_INT, u32::MAX), IrqSource::Invalid);
    }

    #[test]
    fn test_layout_matches_hardware() {
        let map = Dcn20RegisterMap::default();
        let table = IrqSourceTable::build(&map, Dcn20.entry_specs());

        // 6 HPD + 6 HPD RX + 4 flip + 6 VUPDATE + 6 VBLANK
        assert_eq!(table.wired_count(), 28);

        assert!(!table.lookup(IrqSource::Pflip4).is_dummy());
        assert!(table.lookup(IrqSource::Pflip5).is_dummy());
        assert!(table.lookup(IrqSource::Pflip6).is_dummy());
        assert!(table.lookup(IrqSource::PflipUnderlay0).is_dummy());
        assert!(table.lookup(IrqSource::GpioPad17).is_dummy());
        assert!(table.lookup(IrqSource::Invalid).is_dummy());

        let vblank = table.lookup(IrqSource::Vblank2);
        let vupdate = table.lookup(IrqSource::Vupdate2);
        assert_eq!(vblank.enable_reg, vupdate.enable_reg);
        assert_eq!(vblank.enable_reg, map.register_address(Register::OtgGlobalSyncStatus, 1));
        assert_ne!(vblank.enable_mask, vupdate.enable_mask);

        assert_eq!(table.lookup(IrqSource::Hpd1).behavior, IrqBehavior::HpdAck);
        assert_eq!(table.lookup(IrqSource::Hpd1Rx).behavior, IrqBehavior::Generic);
    }

    #[test]
    fn test_every_descriptor_consistent() {
        let table = IrqSourceTable::build(&Dcn20RegisterMap::default(), &ENTRY_SPECS);
        for (source, info) in table.iter() {
            assert!(info.is_consistent(), "{:?}: {:?}", source, info);
        }
    }

    #[test]
    fn test_specs_do_not_overlap() {
        for (i, a) in ENTRY_SPECS.iter().enumerate() {
            assert!(a.lines <= a.category.lines());
            for b in &ENTRY_SPECS[i + 1..] {
                assert_ne!(a.category, b.category);
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let map = Dcn20RegisterMap::default();
        let first = IrqSourceTable::build(&map, &ENTRY_SPECS);
        let second = IrqSourceTable::build(&map, &ENTRY_SPECS);
        assert_eq!(first, second);
    }
}
