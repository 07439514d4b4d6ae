//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the UC8179 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The UC8179 requires:
//! - SPI bus (MOSI + SCK), Mode 0, see [`SPI_MODE`](crate::SPI_MODE)
//! - 4 GPIO pins:
//!   - **DC**: Data/Command select (output)
//!   - **CS**: Chip select (output, active low)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input, low while the panel is busy)
//!
//! Chip select is driven by the interface, not by the SPI peripheral: every
//! byte is sent in its own CS window.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::SpiBus;
//! use uc8179::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! // Create interface with SPI bus and GPIO pins (DC, CS, RST, BUSY)
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin, MockPin);
//!
//! // Send command
//! let _ = interface.send_command(0x12); // Display refresh
//!
//! // Send data
//! let _ = interface.send_data(&[0x10, 0x07]);
//!
//! // Wait for display ready
//! let _ = interface.busy_wait(&mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::config::ResetTiming;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to the UC8179 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Epd`](crate::display::Epd) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., a different busy polarity source, or a recording
/// transport for tests), implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Drive the control lines to their idle levels
    ///
    /// Called once when the driver is constructed.
    fn configure(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Assert CS, send the byte, deassert CS
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send each byte in its own CS window
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// RST high for `initial_high_ms`, low for `low_ms`, then high
    /// again followed by `settle_ms`.
    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timing: ResetTiming,
    ) -> InterfaceResult<(), Self::Error>;

    /// Wait for the busy pin to release (with timeout)
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::Timeout`] if BUSY is not released within
    /// the implementation-specific timeout period.
    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Timeout waiting for busy pin
    Timeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Timeout => write!(f, "Timeout waiting for display"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Default timeout for busy-wait in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 30_000;

/// Interval between two reads of the busy pin
pub const BUSY_POLL_INTERVAL_MS: u32 = 5;

/// Hardware interface implementation for UC8179
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
#[derive(Debug)]
pub struct Interface<SPI, DC, CS, RST, BUSY> {
    /// SPI bus for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Chip select (active low)
    cs: CS,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin (active low on this panel)
    busy: BUSY,
    /// Timeout for busy-wait in milliseconds
    busy_timeout_ms: u32,
    /// Busy pin polarity (true = active high, false = active low)
    busy_active_high: bool,
}

impl<SPI, DC, CS, RST, BUSY> Interface<SPI, DC, CS, RST, BUSY>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `cs` - Chip select pin (output, active low)
    /// * `rst` - Reset pin (output, active low)
    /// * `busy` - Busy pin (input, low while busy)
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, busy: BUSY) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            busy,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            busy_active_high: false,
        }
    }

    /// Set the busy-wait timeout in milliseconds
    ///
    /// Default is 30,000ms (30 seconds). Set to 0 to wait forever.
    pub fn set_busy_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Get the current busy-wait timeout in milliseconds
    pub fn busy_timeout(&self) -> u32 {
        self.busy_timeout_ms
    }

    /// Set busy pin polarity
    ///
    /// Default is active-low. Set to true for active-high panels.
    pub fn set_busy_active_high(&mut self, active_high: bool) -> &mut Self {
        self.busy_active_high = active_high;
        self
    }

    /// Get busy pin polarity (true = active high)
    pub fn busy_active_high(&self) -> bool {
        self.busy_active_high
    }

    /// Give back the bus and the pins
    pub fn release(self) -> (SPI, DC, CS, RST, BUSY) {
        (self.spi, self.dc, self.cs, self.rst, self.busy)
    }
}

impl<SPI, DC, CS, RST, BUSY, PinErr> Interface<SPI, DC, CS, RST, BUSY>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Send one byte inside its own chip-select window
    fn write_framed(
        &mut self,
        byte: u8,
    ) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[byte]).map_err(InterfaceError::Spi)?;
        // CS must not rise before the byte has left the bus
        self.spi.flush().map_err(InterfaceError::Spi)?;
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn is_busy(&mut self) -> InterfaceResult<bool, InterfaceError<SPI::Error, PinErr>> {
        let busy = if self.busy_active_high {
            self.busy.is_high()
        } else {
            self.busy.is_low()
        };
        busy.map_err(InterfaceError::Pin)
    }
}

impl<SPI, DC, CS, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, DC, CS, RST, BUSY>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn configure(&mut self) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.write_framed(command)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        for byte in data.iter().copied() {
            self.write_framed(byte)?;
        }
        Ok(())
    }

    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timing: ResetTiming,
    ) -> InterfaceResult<(), Self::Error> {
        log::trace!("reset pulse {:?}", timing);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(timing.initial_high_ms);
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(timing.low_ms);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(timing.settle_ms);
        Ok(())
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        let timeout_ms = self.busy_timeout_ms;
        let mut waited_ms = 0u32;

        log::debug!("e-paper busy");
        while self.is_busy()? {
            if timeout_ms > 0 && waited_ms >= timeout_ms {
                log::warn!("e-paper still busy after {}ms", waited_ms);
                return Err(InterfaceError::Timeout);
            }
            delay.delay_ms(BUSY_POLL_INTERVAL_MS);
            waited_ms = waited_ms.saturating_add(BUSY_POLL_INTERVAL_MS);
        }
        // settle
        delay.delay_ms(BUSY_POLL_INTERVAL_MS);
        log::debug!("e-paper busy release after {}ms", waited_ms);
        Ok(())
    }
}
