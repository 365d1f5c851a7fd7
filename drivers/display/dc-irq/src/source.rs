//! # Logical Interrupt Sources
//!
//! Device-independent identifiers for display controller interrupts.
//!
//! The enumeration is dense: every value in `0..IrqSource::COUNT` is a
//! variant, so a source indexes the descriptor table directly.
//!
//! ## Layout
//!
//! ```text
//! Value    Category           Lines
//! ─────────────────────────────────────
//! 0        Invalid            sentinel
//! 1-6      HPD                connectors 1-6
//! 7-12     HPD RX             connectors 1-6
//! 13-18    I2C/DDC            engines 1-6
//! 19-24    DP sink            sinks 1-6
//! 25       Timer
//! 26-31    Page flip          pipes 0-5
//! 32       Underlay flip
//! 33-63    GPIO pad           pads 0-30
//! 64-69    Underflow          pipes 1-6
//! 70-71    DMCU / VBIOS
//! 72-77    VUPDATE            OTG 0-5
//! 78-83    VBLANK (VSTARTUP)  OTG 0-5
//! ```

use core::fmt;

use dc_hal::Error;
use static_assertions::const_assert_eq;

// =============================================================================
// IRQ SOURCE
// =============================================================================

/// Logical interrupt source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum IrqSource {
    /// No source; returned for unrecognized events
    Invalid = 0,

    /// Hotplug detect on connector 1
    Hpd1 = 1,
    /// Hotplug detect on connector 2
    Hpd2 = 2,
    /// Hotplug detect on connector 3
    Hpd3 = 3,
    /// Hotplug detect on connector 4
    Hpd4 = 4,
    /// Hotplug detect on connector 5
    Hpd5 = 5,
    /// Hotplug detect on connector 6
    Hpd6 = 6,
    /// Hotplug RX (sideband) on connector 1
    Hpd1Rx = 7,
    /// Hotplug RX (sideband) on connector 2
    Hpd2Rx = 8,
    /// Hotplug RX (sideband) on connector 3
    Hpd3Rx = 9,
    /// Hotplug RX (sideband) on connector 4
    Hpd4Rx = 10,
    /// Hotplug RX (sideband) on connector 5
    Hpd5Rx = 11,
    /// Hotplug RX (sideband) on connector 6
    Hpd6Rx = 12,

    /// I2C/DDC engine 1
    I2cDdc1 = 13,
    /// I2C/DDC engine 2
    I2cDdc2 = 14,
    /// I2C/DDC engine 3
    I2cDdc3 = 15,
    /// I2C/DDC engine 4
    I2cDdc4 = 16,
    /// I2C/DDC engine 5
    I2cDdc5 = 17,
    /// I2C/DDC engine 6
    I2cDdc6 = 18,
    /// DisplayPort sink 1
    DpSink1 = 19,
    /// DisplayPort sink 2
    DpSink2 = 20,
    /// DisplayPort sink 3
    DpSink3 = 21,
    /// DisplayPort sink 4
    DpSink4 = 22,
    /// DisplayPort sink 5
    DpSink5 = 23,
    /// DisplayPort sink 6
    DpSink6 = 24,

    /// Display core timer
    Timer = 25,

    /// Page flip completed on pipe 0
    Pflip1 = 26,
    /// Page flip completed on pipe 1
    Pflip2 = 27,
    /// Page flip completed on pipe 2
    Pflip3 = 28,
    /// Page flip completed on pipe 3
    Pflip4 = 29,
    /// Page flip completed on pipe 4
    Pflip5 = 30,
    /// Page flip completed on pipe 5
    Pflip6 = 31,
    /// Page flip on the underlay plane
    PflipUnderlay0 = 32,

    /// GPIO pad 0
    GpioPad0 = 33,
    /// GPIO pad 1
    GpioPad1 = 34,
    /// GPIO pad 2
    GpioPad2 = 35,
    /// GPIO pad 3
    GpioPad3 = 36,
    /// GPIO pad 4
    GpioPad4 = 37,
    /// GPIO pad 5
    GpioPad5 = 38,
    /// GPIO pad 6
    GpioPad6 = 39,
    /// GPIO pad 7
    GpioPad7 = 40,
    /// GPIO pad 8
    GpioPad8 = 41,
    /// GPIO pad 9
    GpioPad9 = 42,
    /// GPIO pad 10
    GpioPad10 = 43,
    /// GPIO pad 11
    GpioPad11 = 44,
    /// GPIO pad 12
    GpioPad12 = 45,
    /// GPIO pad 13
    GpioPad13 = 46,
    /// GPIO pad 14
    GpioPad14 = 47,
    /// GPIO pad 15
    GpioPad15 = 48,
    /// GPIO pad 16
    GpioPad16 = 49,
    /// GPIO pad 17
    GpioPad17 = 50,
    /// GPIO pad 18
    GpioPad18 = 51,
    /// GPIO pad 19
    GpioPad19 = 52,
    /// GPIO pad 20
    GpioPad20 = 53,
    /// GPIO pad 21
    GpioPad21 = 54,
    /// GPIO pad 22
    GpioPad22 = 55,
    /// GPIO pad 23
    GpioPad23 = 56,
    /// GPIO pad 24
    GpioPad24 = 57,
    /// GPIO pad 25
    GpioPad25 = 58,
    /// GPIO pad 26
    GpioPad26 = 59,
    /// GPIO pad 27
    GpioPad27 = 60,
    /// GPIO pad 28
    GpioPad28 = 61,
    /// GPIO pad 29
    GpioPad29 = 62,
    /// GPIO pad 30
    GpioPad30 = 63,

    /// Pipe 1 underflow
    Dc1Underflow = 64,
    /// Pipe 2 underflow
    Dc2Underflow = 65,
    /// Pipe 3 underflow
    Dc3Underflow = 66,
    /// Pipe 4 underflow
    Dc4Underflow = 67,
    /// Pipe 5 underflow
    Dc5Underflow = 68,
    /// Pipe 6 underflow
    Dc6Underflow = 69,

    /// DMCU to driver message
    DmcuScp = 70,
    /// VBIOS software interrupt
    VbiosSw = 71,

    /// Vertical update on timing generator 0
    Vupdate1 = 72,
    /// Vertical update on timing generator 1
    Vupdate2 = 73,
    /// Vertical update on timing generator 2
    Vupdate3 = 74,
    /// Vertical update on timing generator 3
    Vupdate4 = 75,
    /// Vertical update on timing generator 4
    Vupdate5 = 76,
    /// Vertical update on timing generator 5
    Vupdate6 = 77,
    /// Vertical blank start (VSTARTUP) on timing generator 0
    Vblank1 = 78,
    /// Vertical blank start (VSTARTUP) on timing generator 1
    Vblank2 = 79,
    /// Vertical blank start (VSTARTUP) on timing generator 2
    Vblank3 = 80,
    /// Vertical blank start (VSTARTUP) on timing generator 3
    Vblank4 = 81,
    /// Vertical blank start (VSTARTUP) on timing generator 4
    Vblank5 = 82,
    /// Vertical blank start (VSTARTUP) on timing generator 5
    Vblank6 = 83,
}

const_assert_eq!(IrqSource::COUNT, IrqSource::Vblank6 as usize + 1);
const_assert_eq!(IrqSource::COUNT, 84);

impl IrqSource {
    /// Number of logical sources, including `Invalid`
    pub const COUNT: usize = 84;

    /// Every source, in discriminant order
    pub const ALL: [IrqSource; IrqSource::COUNT] = [
        IrqSource::Invalid,
        IrqSource::Hpd1,
        IrqSource::Hpd2,
        IrqSource::Hpd3,
        IrqSource::Hpd4,
        IrqSource::Hpd5,
        IrqSource::Hpd6,
        IrqSource::Hpd1Rx,
        IrqSource::Hpd2Rx,
        IrqSource::Hpd3Rx,
        IrqSource::Hpd4Rx,
        IrqSource::Hpd5Rx,
        IrqSource::Hpd6Rx,
        IrqSource::I2cDdc1,
        IrqSource::I2cDdc2,
        IrqSource::I2cDdc3,
        IrqSource::I2cDdc4,
        IrqSource::I2cDdc5,
        IrqSource::I2cDdc6,
        IrqSource::DpSink1,
        IrqSource::DpSink2,
        IrqSource::DpSink3,
        IrqSource::DpSink4,
        IrqSource::DpSink5,
        IrqSource::DpSink6,
        IrqSource::Timer,
        IrqSource::Pflip1,
        IrqSource::Pflip2,
        IrqSource::Pflip3,
        IrqSource::Pflip4,
        IrqSource::Pflip5,
        IrqSource::Pflip6,
        IrqSource::PflipUnderlay0,
        IrqSource::GpioPad0,
        IrqSource::GpioPad1,
        IrqSource::GpioPad2,
        IrqSource::GpioPad3,
        IrqSource::GpioPad4,
        IrqSource::GpioPad5,
        IrqSource::GpioPad6,
        IrqSource::GpioPad7,
        IrqSource::GpioPad8,
        IrqSource::GpioPad9,
        IrqSource::GpioPad10,
        IrqSource::GpioPad11,
        IrqSource::GpioPad12,
        IrqSource::GpioPad13,
        IrqSource::GpioPad14,
        IrqSource::GpioPad15,
        IrqSource::GpioPad16,
        IrqSource::GpioPad17,
        IrqSource::GpioPad18,
        IrqSource::GpioPad19,
        IrqSource::GpioPad20,
        IrqSource::GpioPad21,
        IrqSource::GpioPad22,
        IrqSource::GpioPad23,
        IrqSource::GpioPad24,
        IrqSource::GpioPad25,
        IrqSource::GpioPad26,
        IrqSource::GpioPad27,
        IrqSource::GpioPad28,
        IrqSource::GpioPad29,
        IrqSource::GpioPad30,
        IrqSource::Dc1Underflow,
        IrqSource::Dc2Underflow,
        IrqSource::Dc3Underflow,
        IrqSource::Dc4Underflow,
        IrqSource::Dc5Underflow,
        IrqSource::Dc6Underflow,
        IrqSource::DmcuScp,
        IrqSource::VbiosSw,
        IrqSource::Vupdate1,
        IrqSource::Vupdate2,
        IrqSource::Vupdate3,
        IrqSource::Vupdate4,
        IrqSource::Vupdate5,
        IrqSource::Vupdate6,
        IrqSource::Vblank1,
        IrqSource::Vblank2,
        IrqSource::Vblank3,
        IrqSource::Vblank4,
        IrqSource::Vblank5,
        IrqSource::Vblank6,
    ];

    /// Convert from a raw source number
    #[inline]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        if (raw as usize) < Self::COUNT {
            Some(Self::ALL[raw as usize])
        } else {
            None
        }
    }

    /// Raw source number
    #[inline]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Table index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Check for the `Invalid` sentinel
    #[inline]
    pub const fn is_valid(self) -> bool {
        !matches!(self, IrqSource::Invalid)
    }

    /// Category of this source
    pub const fn category(self) -> IrqSourceCategory {
        use IrqSourceCategory as C;

        const HPD_FIRST: u32 = IrqSource::Hpd1 as u32;
        const HPD_LAST: u32 = IrqSource::Hpd6 as u32;
        const HPD_RX_FIRST: u32 = IrqSource::Hpd1Rx as u32;
        const HPD_RX_LAST: u32 = IrqSource::Hpd6Rx as u32;
        const I2C_DDC_FIRST: u32 = IrqSource::I2cDdc1 as u32;
        const I2C_DDC_LAST: u32 = IrqSource::I2cDdc6 as u32;
        const DP_SINK_FIRST: u32 = IrqSource::DpSink1 as u32;
        const DP_SINK_LAST: u32 = IrqSource::DpSink6 as u32;
        const TIMER: u32 = IrqSource::Timer as u32;
        const PFLIP_FIRST: u32 = IrqSource::Pflip1 as u32;
        const PFLIP_LAST: u32 = IrqSource::Pflip6 as u32;
        const UNDERLAY: u32 = IrqSource::PflipUnderlay0 as u32;
        const GPIO_PAD_FIRST: u32 = IrqSource::GpioPad0 as u32;
        const GPIO_PAD_LAST: u32 = IrqSource::GpioPad30 as u32;
        const UNDERFLOW_FIRST: u32 = IrqSource::Dc1Underflow as u32;
        const UNDERFLOW_LAST: u32 = IrqSource::Dc6Underflow as u32;
        const DMCU_SCP: u32 = IrqSource::DmcuScp as u32;
        const VBIOS_SW: u32 = IrqSource::VbiosSw as u32;
        const VUPDATE_FIRST: u32 = IrqSource::Vupdate1 as u32;
        const VUPDATE_LAST: u32 = IrqSource::Vupdate6 as u32;

        match self as u32 {
            HPD_FIRST..=HPD_LAST => C::Hpd,
            HPD_RX_FIRST..=HPD_RX_LAST => C::HpdRx,
            I2C_DDC_FIRST..=I2C_DDC_LAST => C::I2cDdc,
            DP_SINK_FIRST..=DP_SINK_LAST => C::DpSink,
            TIMER => C::Timer,
            PFLIP_FIRST..=PFLIP_LAST => C::Pflip,
            UNDERLAY => C::PflipUnderlay,
            GPIO_PAD_FIRST..=GPIO_PAD_LAST => C::GpioPad,
            UNDERFLOW_FIRST..=UNDERFLOW_LAST => C::Underflow,
            DMCU_SCP => C::DmcuScp,
            VBIOS_SW => C::VbiosSw,
            VUPDATE_FIRST..=VUPDATE_LAST => C::Vupdate,
            0 => C::Invalid,
            _ => C::Vblank,
        }
    }

    /// Zero-based line within the category
    #[inline]
    pub const fn line(self) -> usize {
        self.index() - self.category().first().index()
    }

    /// Source for `line` of `category`
    pub const fn in_category(category: IrqSourceCategory, line: usize) -> Option<Self> {
        if line >= category.lines() {
            return None;
        }
        Self::from_raw(category.first().raw() + line as u32)
    }

    /// Hotplug source for connector `line` (zero-based)
    #[inline]
    pub const fn hpd(line: usize) -> Option<Self> {
        Self::in_category(IrqSourceCategory::Hpd, line)
    }

    /// Hotplug RX source for connector `line` (zero-based)
    #[inline]
    pub const fn hpd_rx(line: usize) -> Option<Self> {
        Self::in_category(IrqSourceCategory::HpdRx, line)
    }

    /// Page flip source for pipe `line`
    #[inline]
    pub const fn pflip(line: usize) -> Option<Self> {
        Self::in_category(IrqSourceCategory::Pflip, line)
    }

    /// Vertical update source for timing generator `line`
    #[inline]
    pub const fn vupdate(line: usize) -> Option<Self> {
        Self::in_category(IrqSourceCategory::Vupdate, line)
    }

    /// Vertical blank source for timing generator `line`
    #[inline]
    pub const fn vblank(line: usize) -> Option<Self> {
        Self::in_category(IrqSourceCategory::Vblank, line)
    }
}

impl TryFrom<u32> for IrqSource {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Error> {
        Self::from_raw(raw).ok_or(Error::InvalidIrqSource(raw))
    }
}

impl From<IrqSource> for u32 {
    fn from(source: IrqSource) -> u32 {
        source.raw()
    }
}

impl fmt::Display for IrqSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.line() + 1;
        match self.category() {
            IrqSourceCategory::Invalid => write!(f, "INVALID"),
            IrqSourceCategory::Hpd => write!(f, "HPD{}", n),
            IrqSourceCategory::HpdRx => write!(f, "HPD{}RX", n),
            IrqSourceCategory::I2cDdc => write!(f, "I2C_DDC{}", n),
            IrqSourceCategory::DpSink => write!(f, "DPSINK{}", n),
            IrqSourceCategory::Timer => write!(f, "TIMER"),
            IrqSourceCategory::Pflip => write!(f, "PFLIP{}", n),
            IrqSourceCategory::PflipUnderlay => write!(f, "PFLIP_UNDERLAY0"),
            IrqSourceCategory::GpioPad => write!(f, "GPIOPAD{}", self.line()),
            IrqSourceCategory::Underflow => write!(f, "DC{}UNDERFLOW", n),
            IrqSourceCategory::DmcuScp => write!(f, "DMCU_SCP"),
            IrqSourceCategory::VbiosSw => write!(f, "VBIOS_SW"),
            IrqSourceCategory::Vupdate => write!(f, "VUPDATE{}", n),
            IrqSourceCategory::Vblank => write!(f, "VBLANK{}", n),
        }
    }
}

// =============================================================================
// CATEGORIES
// =============================================================================

/// Group of sources sharing one register protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrqSourceCategory {
    /// The `Invalid` sentinel
    Invalid,
    /// Hotplug detect
    Hpd,
    /// Hotplug sideband receive
    HpdRx,
    /// I2C/DDC engines
    I2cDdc,
    /// DisplayPort sinks
    DpSink,
    /// Display core timer
    Timer,
    /// Page flip
    Pflip,
    /// Underlay page flip
    PflipUnderlay,
    /// GPIO pads
    GpioPad,
    /// Pipe underflow
    Underflow,
    /// DMCU messages
    DmcuScp,
    /// VBIOS software interrupt
    VbiosSw,
    /// Vertical update
    Vupdate,
    /// Vertical blank start
    Vblank,
}

impl IrqSourceCategory {
    /// First source of the category
    pub const fn first(self) -> IrqSource {
        match self {
            Self::Invalid => IrqSource::Invalid,
            Self::Hpd => IrqSource::Hpd1,
            Self::HpdRx => IrqSource::Hpd1Rx,
            Self::I2cDdc => IrqSource::I2cDdc1,
            Self::DpSink => IrqSource::DpSink1,
            Self::Timer => IrqSource::Timer,
            Self::Pflip => IrqSource::Pflip1,
            Self::PflipUnderlay => IrqSource::PflipUnderlay0,
            Self::GpioPad => IrqSource::GpioPad0,
            Self::Underflow => IrqSource::Dc1Underflow,
            Self::DmcuScp => IrqSource::DmcuScp,
            Self::VbiosSw => IrqSource::VbiosSw,
            Self::Vupdate => IrqSource::Vupdate1,
            Self::Vblank => IrqSource::Vblank1,
        }
    }

    /// Number of sources in the category
    pub const fn lines(self) -> usize {
        match self {
            Self::Invalid | Self::Timer | Self::PflipUnderlay | Self::DmcuScp | Self::VbiosSw => 1,
            Self::GpioPad => 31,
            _ => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn test_all_is_in_discriminant_order() {
        for (i, source) in IrqSource::ALL.iter().enumerate() {
            assert_eq!(source.index(), i);
            assert_eq!(IrqSource::from_raw(i as u32), Some(*source));
        }
        assert_eq!(IrqSource::from_raw(IrqSource::COUNT as u32), None);
    }

    #[test]
    fn test_categories_cover_enumeration() {
        let mut total = 0;
        let mut expected = 0;
        for source in IrqSource::ALL {
            let category = source.category();
            assert!(source.line() < category.lines(), "{:?}", source);
            assert_eq!(IrqSource::in_category(category, source.line()), Some(source));
            if source == category.first() {
                total += category.lines();
            }
            expected += 1;
        }
        assert_eq!(total, expected);
    }

    #[test]
    fn test_category_constructors() {
        assert_eq!(IrqSource::hpd(3), Some(IrqSource::Hpd4));
        assert_eq!(IrqSource::hpd_rx(3), Some(IrqSource::Hpd4Rx));
        assert_eq!(IrqSource::pflip(0), Some(IrqSource::Pflip1));
        assert_eq!(IrqSource::vupdate(5), Some(IrqSource::Vupdate6));
        assert_eq!(IrqSource::vblank(2), Some(IrqSource::Vblank3));
        assert_eq!(IrqSource::vblank(6), None);
        assert_eq!(
            IrqSource::in_category(IrqSourceCategory::GpioPad, 30),
            Some(IrqSource::GpioPad30)
        );
    }

    #[test]
    fn test_try_from_out_of_range() {
        assert_eq!(IrqSource::try_from(84), Err(Error::InvalidIrqSource(84)));
        assert_eq!(IrqSource::try_from(78), Ok(IrqSource::Vblank1));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(IrqSource::Hpd4Rx.to_string(), "HPD4RX");
        assert_eq!(IrqSource::GpioPad0.to_string(), "GPIOPAD0");
        assert_eq!(IrqSource::Dc2Underflow.to_string(), "DC2UNDERFLOW");
        assert_eq!(IrqSource::Vblank3.to_string(), "VBLANK3");
        assert_eq!(IrqSource::Invalid.to_string(), "INVALID");
    }
}
