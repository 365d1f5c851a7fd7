//! # Display Core Error Handling
//!
//! Error types shared by the register layer and the interrupt service.
//!
//! Register access itself is infallible; errors only describe contract
//! violations at the API boundary:
//! - raw source numbers outside the interrupt enumeration
//! - operations on sources the hardware does not implement
//! - MMIO windows that cannot be mapped as requested

use core::fmt;

// =============================================================================
// RESULT TYPE
// =============================================================================

/// Display core Result type alias
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Display core error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Raw interrupt source number is outside the enumeration
    InvalidIrqSource(u32),
    /// Operation is not implemented for this interrupt source
    NotSupported,
    /// Register window does not fit the mapped region
    OutOfBounds,
    /// Address not aligned to a register boundary
    MisalignedAddress,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIrqSource(raw) => write!(f, "invalid irq source {}", raw),
            Self::NotSupported => write!(f, "operation not supported for irq source"),
            Self::OutOfBounds => write!(f, "register window out of bounds"),
            Self::MisalignedAddress => write!(f, "misaligned register address"),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn test_display_carries_raw_source() {
        assert_eq!(
            Error::InvalidIrqSource(200).to_string(),
            "invalid irq source 200"
        );
    }
}
