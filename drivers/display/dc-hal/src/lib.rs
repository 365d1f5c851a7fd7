//! # Display Core HAL
//!
//! Register-level foundations for the display controller driver.
//!
//! ## Components
//!
//! - **Register I/O**: ordered 32-bit register access ([`RegisterIo`]) and a
//!   volatile MMIO implementation ([`MmioRegion`])
//! - **Register Map**: block/instance address resolution per hardware
//!   generation ([`RegisterMap`], [`Dcn20RegisterMap`])
//! - **Register Fields**: typed bit layouts of the interrupt registers
//! - **Errors**: the [`Error`] type shared by the display core crates
//!
//! With the `mock` feature, [`mock::MockRegisters`] provides a recording
//! register file for protocol tests.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

#[cfg(any(test, feature = "mock"))]
extern crate alloc;

pub mod error;
pub mod fields;
pub mod mmio;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod regmap;

pub use error::{Error, Result};
pub use mmio::{MmioRegion, RegisterIo};
pub use regmap::{Dcn20RegisterMap, Register, RegisterBlock, RegisterMap};
