//! # Display Controller Interrupt Sources
//!
//! Interrupt layer of the display core: a device-independent enumeration of
//! interrupt sources, the per-generation descriptor table telling how each
//! source is enabled and acknowledged, and the classifier turning raw
//! hardware events into sources.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                       IrqService                       │
//! │       classify ─► lookup ─► ack / set protocols        │
//! └────────┬───────────────────┬───────────────────┬───────┘
//!          │                   │                   │
//! ┌────────▼───────┐  ┌────────▼───────┐  ┌────────▼───────┐
//! │ IrqGeneration  │  │ IrqSourceTable │  │   RegisterIo   │
//! │    (Dcn20)     │  │  (immutable)   │  │    (dc-hal)    │
//! └────────────────┘  └────────────────┘  └────────────────┘
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod dcn20;
pub mod generation;
pub mod info;
pub mod service;
pub mod source;
pub mod table;

pub use dcn20::Dcn20;
pub use generation::IrqGeneration;
pub use info::{IrqBehavior, IrqSourceInfo};
pub use service::{IrqService, IrqServiceConfig};
pub use source::{IrqSource, IrqSourceCategory};
pub use table::{EntrySpec, IrqSourceTable};
