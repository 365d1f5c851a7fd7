//! # Source Table
//!
//! Dense, immutable descriptor table indexed by [`IrqSource`].
//!
//! The table is produced from a short list of [`EntrySpec`]s, one per wired
//! category. Every source not covered by a spec keeps the placeholder
//! descriptor, so lookups are total over the enumeration.

use dc_hal::{Register, RegisterMap};
use static_assertions::assert_eq_size;

use crate::info::{IrqBehavior, IrqSourceInfo};
use crate::source::{IrqSource, IrqSourceCategory};

// =============================================================================
// ENTRY SPEC
// =============================================================================

/// Expansion rule for one category of wired sources
///
/// Line `n` of the category uses instance `n` of the register block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySpec {
    /// Category to populate
    pub category: IrqSourceCategory,
    /// Number of lines wired in hardware, starting at line 0
    pub lines: usize,
    /// Enable register and field
    pub enable: (Register, u32),
    /// Acknowledge register and field
    pub ack: (Register, u32),
    /// Status register, if the source is read back
    pub status: Option<Register>,
    /// Behaviour of every line
    pub behavior: IrqBehavior,
}

impl EntrySpec {
    /// Descriptor for `instance` of this category
    pub fn descriptor<M: RegisterMap + ?Sized>(&self, map: &M, instance: u32) -> IrqSourceInfo {
        let (enable_reg, enable_mask) = self.enable;
        let (ack_reg, ack_mask) = self.ack;

        IrqSourceInfo::toggle(
            map.register_address(enable_reg, instance),
            enable_mask,
            map.register_address(ack_reg, instance),
            ack_mask,
            self.status.map(|reg| map.register_address(reg, instance)),
            self.behavior,
        )
    }
}

// =============================================================================
// SOURCE TABLE
// =============================================================================

/// Descriptor table covering every [`IrqSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrqSourceTable {
    entries: [IrqSourceInfo; IrqSource::COUNT],
}

assert_eq_size!(IrqSourceTable, [IrqSourceInfo; IrqSource::COUNT]);

impl IrqSourceTable {
    /// Table with every source set to the placeholder
    pub const fn empty() -> Self {
        Self {
            entries: [IrqSourceInfo::DUMMY; IrqSource::COUNT],
        }
    }

    /// Expand `specs` against `map`
    ///
    /// Later specs override earlier ones for the same source. Lines beyond
    /// the category size are ignored.
    pub fn build<M: RegisterMap + ?Sized>(map: &M, specs: &[EntrySpec]) -> Self {
        let mut table = Self::empty();

        for spec in specs {
            debug_assert!(
                spec.lines <= spec.category.lines(),
                "{:?}: {} lines wired, category has {}",
                spec.category,
                spec.lines,
                spec.category.lines()
            );

            for line in 0..spec.lines.min(spec.category.lines()) {
                let index = spec.category.first().index() + line;
                table.entries[index] = spec.descriptor(map, line as u32);
            }
        }

        table
    }

    /// Descriptor of `source`
    #[inline]
    pub fn lookup(&self, source: IrqSource) -> &IrqSourceInfo {
        &self.entries[source.index()]
    }

    /// Iterate over every source and its descriptor
    pub fn iter(&self) -> impl Iterator<Item = (IrqSource, &IrqSourceInfo)> + '_ {
        IrqSource::ALL.iter().copied().zip(self.entries.iter())
    }

    /// Number of sources backed by hardware registers
    pub fn wired_count(&self) -> usize {
        self.entries.iter().filter(|info| !info.is_dummy()).count()
    }
}

impl Default for IrqSourceTable {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use dc_hal::fields::HpdIntControl;
    use dc_hal::regmap::dcn20;
    use dc_hal::Dcn20RegisterMap;

    use super::*;

    const HPD_SPEC: EntrySpec = EntrySpec {
        category: IrqSourceCategory::Hpd,
        lines: 2,
        enable: (Register::DcHpdIntControl, HpdIntControl::DC_HPD_INT_EN.bits()),
        ack: (Register::DcHpdIntControl, HpdIntControl::DC_HPD_INT_ACK.bits()),
        status: Some(Register::DcHpdIntStatus),
        behavior: IrqBehavior::HpdAck,
    };

    #[test]
    fn test_build_expands_lines() {
        let map = Dcn20RegisterMap::default();
        let table = IrqSourceTable::build(&map, &[HPD_SPEC]);

        assert_eq!(table.wired_count(), 2);

        let hpd2 = table.lookup(IrqSource::Hpd2);
        assert_eq!(hpd2.enable_reg, map.register_address(Register::DcHpdIntControl, 1));
        assert_eq!(hpd2.ack_reg, hpd2.enable_reg);
        assert_eq!(
            hpd2.status_reg,
            Some(map.register_address(Register::DcHpdIntStatus, 1))
        );
        assert_eq!(hpd2.enable_reg - table.lookup(IrqSource::Hpd1).enable_reg, dcn20::HPD_STRIDE);

        assert!(table.lookup(IrqSource::Hpd3).is_dummy());
    }

    #[test]
    fn test_empty_table_is_all_dummy() {
        let table = IrqSourceTable::default();
        assert_eq!(table.wired_count(), 0);
        assert!(table.iter().all(|(_, info)| *info == IrqSourceInfo::DUMMY));
    }
}
