//! # Interrupt Service
//!
//! Per-device front end used by the interrupt dispatcher: classifies raw
//! events, looks up descriptors and runs the enable/acknowledge protocols.
//!
//! ## Servicing an event
//!
//! ```text
//! (src_id, ext_id) ──► to_irq_source ──► lookup ──► behaviour
//!                                                     │
//!                       Generic ── ack_generic ◄──────┤
//!                       HpdAck  ── ack_hpd ◄──────────┤
//!                       NoOp    ── (nothing) ◄────────┘
//! ```
//!
//! The descriptor table is built once in [`IrqService::new`] and never
//! modified. The service takes no locks: the interrupt framework
//! serialises servicing of a source, and acknowledge/enable calls made
//! outside the interrupt handler must run with display interrupts masked
//! or under the framework's own lock.

use dc_hal::fields::{HpdIntControl, HpdIntStatus, HpdPolarity};
use dc_hal::{Error, RegisterIo, RegisterMap, Result};

use crate::dcn20::Dcn20;
use crate::generation::IrqGeneration;
use crate::info::{IrqBehavior, IrqSourceInfo, DISABLE, ENABLE};
use crate::source::{IrqSource, IrqSourceCategory};
use crate::table::IrqSourceTable;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Interrupt service configuration
#[derive(Debug, Clone)]
pub struct IrqServiceConfig {
    /// Acknowledge a source before changing its enable state, so a stale
    /// latched event does not fire as soon as it is enabled
    pub ack_before_set: bool,
    /// Trace events that do not classify to a source
    pub log_spurious: bool,
}

impl Default for IrqServiceConfig {
    fn default() -> Self {
        Self {
            ack_before_set: true,
            log_spurious: true,
        }
    }
}

// =============================================================================
// IRQ SERVICE
// =============================================================================

/// Interrupt service of one display controller
///
/// Register read-modify-write sequences are not serialised here. Callers
/// must not run two of them on the same register concurrently.
#[derive(Debug)]
pub struct IrqService<R: RegisterIo, G: IrqGeneration = Dcn20> {
    /// Register backend
    io: R,
    /// Hardware generation
    generation: G,
    /// Descriptor table, immutable after construction
    table: IrqSourceTable,
    /// Service configuration
    config: IrqServiceConfig,
}

impl<R: RegisterIo, G: IrqGeneration> IrqService<R, G> {
    /// Build the service for a device
    pub fn new<M: RegisterMap + ?Sized>(
        io: R,
        map: &M,
        generation: G,
        config: IrqServiceConfig,
    ) -> Self {
        let table = IrqSourceTable::build(map, generation.entry_specs());

        log::debug!(
            "{} irq service: {} of {} sources wired",
            generation.name(),
            table.wired_count(),
            IrqSource::COUNT
        );

        Self {
            io,
            generation,
            table,
            config,
        }
    }

    /// Generation name
    pub fn generation_name(&self) -> &'static str {
        self.generation.name()
    }

    /// Service configuration
    pub fn config(&self) -> &IrqServiceConfig {
        &self.config
    }

    /// Descriptor table
    pub fn table(&self) -> &IrqSourceTable {
        &self.table
    }

    /// Register backend
    pub fn io(&self) -> &R {
        &self.io
    }

    // -------------------------------------------------------------------------
    // Classification and lookup
    // -------------------------------------------------------------------------

    /// Resolve a raw hardware event to a logical source
    #[inline]
    pub fn to_irq_source(&self, src_id: u32, ext_id: u32) -> IrqSource {
        self.generation.to_irq_source(src_id, ext_id)
    }

    /// Descriptor of `source`
    #[inline]
    pub fn lookup(&self, source: IrqSource) -> &IrqSourceInfo {
        self.table.lookup(source)
    }

    /// Descriptor of a raw source number
    pub fn lookup_raw(&self, raw: u32) -> Result<&IrqSourceInfo> {
        let source = IrqSource::try_from(raw).map_err(|err| {
            log::error!("irq: no table entry for source {}", raw);
            err
        })?;
        Ok(self.lookup(source))
    }

    // -------------------------------------------------------------------------
    // Acknowledge / enable
    // -------------------------------------------------------------------------

    /// Acknowledge a pending event on `source`
    ///
    /// Placeholder sources succeed without touching any register.
    pub fn ack(&self, source: IrqSource) -> Result<()> {
        let info = self.lookup(source);
        self.dispatch_ack(source, info);
        Ok(())
    }

    /// Enable or disable `source`
    pub fn set(&self, source: IrqSource, enable: bool) -> Result<()> {
        let info = self.lookup(source);

        if self.config.ack_before_set {
            self.dispatch_ack(source, info);
        }

        match info.behavior {
            IrqBehavior::Generic | IrqBehavior::HpdAck => {
                self.set_generic(info, enable);
                Ok(())
            },
            IrqBehavior::NoOp => {
                log::error!(
                    "irq: set({}) called for non-implemented source {}",
                    enable,
                    source
                );
                Err(Error::NotSupported)
            },
        }
    }

    /// Classify a raw event and acknowledge it
    ///
    /// Returns `None` for events that do not map to a source; those are
    /// expected (spurious or unhandled ids) and must be ignored.
    pub fn handle(&self, src_id: u32, ext_id: u32) -> Result<Option<IrqSource>> {
        let source = self.to_irq_source(src_id, ext_id);
        if !source.is_valid() {
            if self.config.log_spurious {
                log::trace!(
                    "irq: ignoring unknown event src_id={:#x} ext_id={:#x}",
                    src_id,
                    ext_id
                );
            }
            return Ok(None);
        }

        self.ack(source)?;
        Ok(Some(source))
    }

    /// Clear the latched bit using the descriptor's ack register and value
    pub fn ack_generic(&self, info: &IrqSourceInfo) {
        self.io.update32(info.ack_reg, info.ack_mask, info.ack_value);
    }

    /// Write the enable or disable value under the enable mask
    pub fn set_generic(&self, info: &IrqSourceInfo, enable: bool) {
        let field = info.enable_value[if enable { ENABLE } else { DISABLE }];
        self.io.update32(info.enable_reg, info.enable_mask, field);
    }

    /// Acknowledge a hotplug source and re-arm its edge polarity
    ///
    /// Register access cannot fail, so neither can this protocol.
    pub fn ack_hpd(&self, info: &IrqSourceInfo) {
        let Some(status_reg) = info.status_reg else {
            log::warn!("irq: hotplug source without status register, plain ack");
            self.ack_generic(info);
            return;
        };

        // Sense must be sampled before the ack clears the latched state.
        let status = HpdIntStatus::from_bits_retain(self.io.read32(status_reg));
        let sense_high = status.contains(HpdIntStatus::DC_HPD_SENSE_DELAYED);

        self.ack_generic(info);

        // Fresh read: the ack may have changed the control register.
        let control = HpdIntControl::from_bits_retain(self.io.read32(info.enable_reg));
        let polarity = HpdPolarity::rearm_for(sense_high);
        self.io.write32(info.enable_reg, polarity.apply(control).bits());

        log::trace!(
            "irq: hpd ack at {:#x}, sense {}, next edge {:?}",
            info.enable_reg,
            sense_high,
            polarity
        );
    }

    // -------------------------------------------------------------------------
    // Status
    // -------------------------------------------------------------------------

    /// Raw status register of `source`, if it has one
    pub fn read_status(&self, source: IrqSource) -> Option<u32> {
        self.lookup(source)
            .status_reg
            .map(|reg| self.io.read32(reg))
    }

    /// Debounced connector sense of a hotplug source
    pub fn hpd_sense(&self, source: IrqSource) -> Option<bool> {
        match source.category() {
            IrqSourceCategory::Hpd | IrqSourceCategory::HpdRx => {},
            _ => return None,
        }

        self.read_status(source).map(|value| {
            HpdIntStatus::from_bits_retain(value).contains(HpdIntStatus::DC_HPD_SENSE_DELAYED)
        })
    }

    fn dispatch_ack(&self, source: IrqSource, info: &IrqSourceInfo) {
        match info.behavior {
            IrqBehavior::Generic => self.ack_generic(info),
            IrqBehavior::HpdAck => self.ack_hpd(info),
            IrqBehavior::NoOp => {
                log::debug!("irq: ack on non-implemented source {}", source);
            },
        }
    }
}
