//! # Hardware Generations
//!
//! Everything the interrupt service needs to know about one display
//! controller generation: how raw events are classified and which sources
//! are wired to which registers.

use crate::source::IrqSource;
use crate::table::EntrySpec;

/// Display controller generation
pub trait IrqGeneration: Send + Sync {
    /// Generation name, for logs
    fn name(&self) -> &'static str;

    /// Resolve a raw `(src_id, ext_id)` event to a logical source
    ///
    /// Must be total: unknown pairs yield [`IrqSource::Invalid`].
    fn to_irq_source(&self, src_id: u32, ext_id: u32) -> IrqSource;

    /// Wired sources and their register layout
    fn entry_specs(&self) -> &'static [EntrySpec];
}
