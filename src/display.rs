//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::Command;
use crate::config::{Config, Dimensions, MAX_SOURCE_OUTPUTS};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::sequence::Step;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Wire bytes needed for the widest supported row (two pixels per byte)
const MAX_ROW_BYTES: usize = MAX_SOURCE_OUTPUTS as usize / 2;

/// Refresh mode the panel is initialized for
///
/// Different refresh modes trade off speed vs quality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefreshMode {
    /// Full refresh using the OTP waveform (slowest, best quality, no ghosting)
    #[default]
    Full,
    /// Fast refresh using the forced fast waveform
    ///
    /// Best for: frequent full-screen updates where some ghosting is acceptable.
    Fast,
    /// Partial refresh waveform
    ///
    /// Best for: small UI updates. A full refresh is needed now and then to
    /// clear ghosting.
    Partial,
}

/// Power/initialization state of the panel as tracked by the driver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperatingMode {
    /// After construction, a reset, or a failed sequence
    #[default]
    Uninitialized,
    /// Initialized and ready for clear/display in the given mode
    Ready(RefreshMode),
    /// In deep sleep; only a reset (and init) brings it back
    Sleeping,
}

impl OperatingMode {
    /// Whether clear and display may be issued
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Driver for a UC8179 based bi-level panel
///
/// Owns the hardware interface for its whole lifetime and tracks the
/// panel's [`OperatingMode`]. Every sequence either completes or leaves
/// the driver `Uninitialized`; recover with [`reset`](Self::reset) and an
/// init.
///
/// ## Example
///
/// ```rust,no_run
/// use embedded_hal::delay::DelayNs;
/// use embedded_hal::digital::{InputPin, OutputPin};
/// use embedded_hal::spi::SpiBus;
/// use uc8179::{Config, Epd, Interface, RefreshMode};
/// # use core::convert::Infallible;
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiBus for MockSpi {
/// #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl InputPin for MockPin {
/// #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
/// #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// # let mut delay = MockDelay;
/// let interface = Interface::new(MockSpi, MockPin, MockPin, MockPin, MockPin);
/// let mut epd = match Epd::new(interface, Config::default()) {
///     Ok(epd) => epd,
///     Err(_) => return,
/// };
///
/// let frame = [0xFFu8; 800 / 8 * 480];
/// let _ = epd.init(RefreshMode::Full, &mut delay);
/// let _ = epd.display(&frame, &mut delay);
/// let _ = epd.sleep(&mut delay);
/// ```
pub struct Epd<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Current power/init state
    mode: OperatingMode,
}

impl<I> Epd<I>
where
    I: DisplayInterface,
{
    /// Create a new driver, taking ownership of the interface
    ///
    /// Drives the control lines to their idle levels. The panel itself is
    /// not touched; call one of the init functions next.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if a line cannot be driven. The
    /// interface is dropped in that case.
    pub fn new(mut interface: I, config: Config) -> Result<Self, Error<I>> {
        interface.configure().map_err(Error::Configuration)?;
        Ok(Self {
            interface,
            config,
            mode: OperatingMode::Uninitialized,
        })
    }

    /// Hardware reset
    ///
    /// Also wakes the panel from deep sleep. An init is required afterwards.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.mode = OperatingMode::Uninitialized;
        self.interface
            .reset(delay, self.config.reset_timing)
            .map_err(Error::Interface)
    }

    /// Reset the panel and program it for the given refresh mode
    pub fn init<D: DelayNs>(&mut self, mode: RefreshMode, delay: &mut D) -> DisplayResult<I> {
        log::info!("e-paper init ({:?})", mode);
        self.reset(delay)?;
        let steps = self.config.init_tables.for_mode(mode);
        self.run(steps, delay)?;
        self.mode = OperatingMode::Ready(mode);
        Ok(())
    }

    /// Initialize for full refresh
    pub fn init_full<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.init(RefreshMode::Full, delay)
    }

    /// Initialize for fast refresh
    pub fn init_fast<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.init(RefreshMode::Fast, delay)
    }

    /// Initialize for partial refresh
    pub fn init_partial<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.init(RefreshMode::Partial, delay)
    }

    /// Clear the whole panel to white
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let ready = self.require_ready()?;
        self.mode = OperatingMode::Uninitialized;

        let row_len = self.config.dimensions.bytes_per_row() * 4;
        let row = [self.config.clear_byte(); MAX_ROW_BYTES];

        self.send_command(Command::DataStartTransmission1)?;
        for _ in 0..self.config.dimensions.rows {
            let mut remaining = row_len;
            while remaining > 0 {
                let len = remaining.min(MAX_ROW_BYTES);
                self.send_data(&row[..len])?;
                remaining -= len;
            }
        }
        self.turn_on_display(delay)?;

        self.mode = OperatingMode::Ready(ready);
        Ok(())
    }

    /// Transmit a device frame buffer and refresh the panel
    ///
    /// # Arguments
    ///
    /// * `buffer` - Frame buffer, one bit per pixel (0=black, 1=white),
    ///   exactly `dimensions().buffer_size()` bytes
    /// * `delay` - Delay implementation
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` unless initialized and
    /// `Error::BufferSizeMismatch` for a buffer of the wrong length.
    pub fn display<D: DelayNs>(&mut self, buffer: &[u8], delay: &mut D) -> DisplayResult<I> {
        let ready = self.require_ready()?;
        let required = self.config.dimensions.buffer_size();
        if buffer.len() != required {
            log::warn!(
                "frame buffer is {} bytes, panel needs {}",
                buffer.len(),
                required
            );
            return Err(Error::BufferSizeMismatch {
                required,
                provided: buffer.len(),
            });
        }

        log::debug!("start e-paper display");
        self.mode = OperatingMode::Uninitialized;

        let bytes_per_row = self.config.dimensions.bytes_per_row();
        let mut wire = [0u8; MAX_ROW_BYTES];

        self.send_command(Command::DataStartTransmission1)?;
        if bytes_per_row > 0 {
            for line in buffer.chunks_exact(bytes_per_row) {
                // rows wider than the staging buffer go out in pieces
                for part in line.chunks(MAX_ROW_BYTES / 4) {
                    for (byte, out) in part.iter().zip(wire.chunks_exact_mut(4)) {
                        out.copy_from_slice(&self.expand(*byte));
                    }
                    self.send_data(&wire[..part.len() * 4])?;
                }
            }
        }
        self.turn_on_display(delay)?;

        self.mode = OperatingMode::Ready(ready);
        log::debug!("end e-paper display");
        Ok(())
    }

    /// Power off and enter deep sleep
    ///
    /// Use [`reset`](Self::reset) and an init to wake the panel.
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.require_ready()?;
        log::info!("e-paper sleep");
        self.mode = OperatingMode::Uninitialized;

        self.send_command(Command::PowerOff)?;
        self.wait_until_idle(delay)?;
        self.send_command(Command::DeepSleep)?;
        self.send_data(&[self.config.deep_sleep_check_code])?;

        self.mode = OperatingMode::Sleeping;
        Ok(())
    }

    /// Block until the panel releases BUSY
    pub fn wait_until_idle<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.busy_wait(delay).map_err(Error::Interface)
    }

    /// Current power/init state
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the hardware interface, e.g. to change the busy timeout
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Give back the hardware interface
    pub fn release(self) -> I {
        self.interface
    }

    fn require_ready(&self) -> Result<RefreshMode, Error<I>> {
        match self.mode {
            OperatingMode::Ready(mode) => Ok(mode),
            mode => {
                log::warn!("e-paper not ready ({:?})", mode);
                Err(Error::NotReady { mode })
            }
        }
    }

    fn run<D: DelayNs>(&mut self, steps: &[Step], delay: &mut D) -> DisplayResult<I> {
        for step in steps {
            match *step {
                Step::Send(command, data) => {
                    self.send_command(command)?;
                    if !data.is_empty() {
                        self.send_data(data)?;
                    }
                }
                Step::Delay(ms) => delay.delay_ms(ms),
                Step::WaitIdle => self.wait_until_idle(delay)?,
            }
        }
        Ok(())
    }

    /// Refresh the panel from SRAM and wait for it to finish
    fn turn_on_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_command(Command::DisplayRefresh)?;
        delay.delay_ms(self.config.refresh_settle_ms);
        self.wait_until_idle(delay)
    }

    /// Expand eight buffer pixels into four wire bytes of two nibbles each
    fn expand(&self, byte: u8) -> [u8; 4] {
        // set bits of the inverted byte are black pixels
        let ink = !byte;
        let code = |mask: u8| {
            if ink & mask != 0 {
                self.config.black_nibble
            } else {
                self.config.white_nibble
            }
        };

        let mut out = [0u8; 4];
        for (pair, slot) in out.iter_mut().enumerate() {
            let high = 0x80u8 >> (pair * 2);
            *slot = (code(high) << 4) | code(high >> 1);
        }
        out
    }

    /// Send a command to the display controller
    fn send_command(&mut self, command: Command) -> DisplayResult<I> {
        self.interface
            .send_command(command.address())
            .map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}
