//! UC8179 E-Paper Display Driver
//!
//! A driver for the UC8179 controller as used on the Waveshare 7.5" V2
//! bi-level (black/white) panel, 800x480 pixels.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` image conversion (with `graphics` feature)
//! - Full, fast and partial refresh modes
//! - Explicit power state tracking with deep sleep
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::SpiBus;
//! use uc8179::{Color, Config, Dimensions, Epd, Interface, SourceImage, convert_into};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (spi, dc, cs, rst, busy) = (MockSpi, MockPin, MockPin, MockPin, MockPin);
//! # let mut delay = MockDelay;
//! struct Checkerboard;
//!
//! impl SourceImage for Checkerboard {
//!     fn size(&self) -> (u32, u32) {
//!         (800, 480)
//!     }
//!
//!     fn pixel(&self, x: u32, y: u32) -> Color {
//!         if (x / 40 + y / 40) % 2 == 0 { Color::Black } else { Color::White }
//!     }
//! }
//!
//! let interface = Interface::new(spi, dc, cs, rst, busy);
//! let mut epd = match Epd::new(interface, Config::default()) {
//!     Ok(epd) => epd,
//!     Err(_) => return,
//! };
//!
//! let mut frame = [0u8; 800 / 8 * 480];
//! let _ = convert_into(&Checkerboard, Dimensions::default(), &mut frame);
//!
//! let _ = epd.init_full(&mut delay);
//! let _ = epd.display(&frame, &mut delay);
//! let _ = epd.sleep(&mut delay);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Bi-level color and thresholding
pub mod color;
/// UC8179 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Image to frame buffer conversion
pub mod frame;
/// Hardware interface abstraction
pub mod interface;
/// Init sequences per refresh mode
pub mod sequence;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

use embedded_hal::spi::{MODE_0, Mode};

/// SPI mode the controller expects (CPOL = 0, CPHA = 0)
pub const SPI_MODE: Mode = MODE_0;

/// Highest SPI clock the reference wiring is run at
pub const SPI_MAX_FREQUENCY_HZ: u32 = 5_000_000;

pub use color::Color;
pub use command::{Command, DEEP_SLEEP_CHECK_CODE};
pub use config::{
    Builder, Config, Dimensions, HEIGHT, InitTables, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS,
    ResetTiming, WIDTH,
};
pub use display::{Epd, OperatingMode, RefreshMode};
pub use error::{BuilderError, Error};
#[cfg(feature = "alloc")]
pub use frame::convert;
pub use frame::{BufferSizeMismatch, SourceImage, convert_into};
pub use interface::InterfaceError;
pub use interface::{BUSY_POLL_INTERVAL_MS, DEFAULT_BUSY_TIMEOUT_MS, DisplayInterface, Interface};
pub use sequence::Step;
