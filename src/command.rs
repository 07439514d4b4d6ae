//! UC8179 command definitions
//!
//! This module defines the register/operation bytes used to control the
//! UC8179 e-paper controller. Commands are sent over SPI with the DC pin
//! low; their parameters follow with the DC pin high.
//!
//! ## Command Structure
//!
//! Every byte travels in its own chip-select window:
//! 1. Set DC low (command) or high (data)
//! 2. Assert CS (low)
//! 3. Send one byte
//! 4. Deassert CS (high)
//!
//! ## Example
//!
//! ```rust,no_run
//! use uc8179::Command;
//!
//! assert_eq!(Command::DisplayRefresh.address(), 0x12);
//! assert_eq!(Command::DeepSleep.address(), 0x07);
//! ```

/// Check code that must follow [`Command::DeepSleep`] for it to be executed
pub const DEEP_SLEEP_CHECK_CODE: u8 = 0xA5;

/// UC8179 commands
///
/// The values are fixed by the controller datasheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Resolution, LUT selection, BWR pixels, gate scan direction, source shift
    /// direction, booster switch and soft reset.
    PanelSetting = 0x00,

    /// Internal/external power selection and VGH/VGL/VDH/VDL levels
    PowerSetting = 0x01,

    /// Powers off charge pump, T-con, source and gate drivers, VCOM and the
    /// temperature sensor. Register contents are kept. BUSY goes low until done.
    PowerOff = 0x02,

    /// Turns the power on following the power ON sequence.
    /// BUSY goes high once complete.
    PowerOn = 0x04,

    /// Booster soft-start phase timing and driving strength
    BoosterSoftStart = 0x06,

    /// Enters deep sleep. The only parameter is a check code
    /// ([`DEEP_SLEEP_CHECK_CODE`]). Only a hardware reset wakes the chip.
    DeepSleep = 0x07,

    /// Starts transmitting old/black-white frame data into SRAM
    DataStartTransmission1 = 0x10,

    /// Refreshes the panel according to SRAM data and LUT.
    /// BUSY goes low until the update is finished.
    DisplayRefresh = 0x12,

    /// Dual SPI mode selection
    DualSpi = 0x15,

    /// Border output (VBD) and data polarity, plus the data/VCOM interval
    VcomAndDataIntervalSetting = 0x50,

    /// Non-overlap period of gate and source
    TconSetting = 0x60,

    /// Horizontal and vertical display resolution
    TconResolution = 0x61,

    /// Cascade setting, used to enable the forced temperature below
    CascadeSetting = 0xE0,

    /// Forces the temperature value used for LUT selection.
    /// Selects the fast and partial waveforms.
    ForceTemperature = 0xE5,
}

impl Command {
    /// Byte sent over the wire for this command
    pub fn address(self) -> u8 {
        self as u8
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.address()
    }
}
