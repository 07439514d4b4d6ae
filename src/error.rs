//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! No error is retried by the driver. After an error in the middle of a
//! sequence the panel state is unknown; recover with
//! [`Epd::reset`](crate::Epd::reset) followed by an init.
//!
//! ## Example
//!
//! ```
//! use uc8179::{Builder, BuilderError, Dimensions};
//!
//! // Pixel codes are 4 bits wide
//! let result = Builder::new().black_nibble(0x10).build();
//! assert!(matches!(result, Err(BuilderError::InvalidNibble { value: 0x10 })));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(480, 1000); // Too wide
//! assert!(result.is_err());
//! ```

use crate::display::OperatingMode;
use crate::interface::DisplayInterface;

/// Maximum gate outputs (rows) supported by the UC8179 controller
pub const MAX_GATE_OUTPUTS: u16 = 600;

/// Maximum source outputs (columns) supported by the UC8179 controller
pub const MAX_SOURCE_OUTPUTS: u16 = 800;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO/busy timeout)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// The control lines could not be brought to their idle levels
    ///
    /// Returned by [`Epd::new`](crate::Epd::new); no driver is created.
    Configuration(I::Error),
    /// Operation requires the panel to be in a ready mode
    ///
    /// Clear, display and sleep are only valid after a successful init.
    NotReady {
        /// Mode the driver was in when the operation was attempted
        mode: OperatingMode,
    },
    /// Frame buffer length does not match the panel geometry
    BufferSizeMismatch {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::Configuration(_) => write!(f, "Failed to configure control lines"),
            Self::NotReady { mode } => write!(f, "Display not ready (mode: {mode:?})"),
            Self::BufferSizeMismatch { required, provided } => {
                write!(
                    f,
                    "Buffer size mismatch: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
    /// Pixel code does not fit in a nibble
    InvalidNibble {
        /// Rejected value
        value: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {MAX_GATE_OUTPUTS}x{MAX_SOURCE_OUTPUTS}, cols must be multiple of 8)"
            ),
            Self::InvalidNibble { value } => {
                write!(f, "Invalid pixel code {value:#04x} (must be <= 0x0F)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
