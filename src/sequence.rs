//! Register programming sequences
//!
//! Each refresh mode is entered by replaying a fixed table of [`Step`]s
//! after a hardware reset. The tables are plain data so that another panel
//! revision can be supported by swapping one table in
//! [`InitTables`](crate::config::InitTables).
//!
//! Values follow the Waveshare 7.5" V2 (UC8179) reference sequences.

use crate::command::Command;

/// One step of an init sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Send a command followed by its data bytes
    Send(Command, &'static [u8]),
    /// Wait the given number of milliseconds
    Delay(u32),
    /// Block until the panel releases BUSY
    WaitIdle,
}

/// Full refresh: power rails, booster, power on, then panel registers
pub const FULL_INIT: &[Step] = &[
    // VGH=20V, VGL=-20V, VDH=15V, VDL=-15V
    Step::Send(Command::PowerSetting, &[0x07, 0x07, 0x3F, 0x3F]),
    Step::Send(Command::BoosterSoftStart, &[0x17, 0x17, 0x28, 0x17]),
    Step::Send(Command::PowerOn, &[]),
    Step::Delay(100),
    Step::WaitIdle,
    // KW mode, OTP LUT
    Step::Send(Command::PanelSetting, &[0x1F]),
    // 800 x 480
    Step::Send(Command::TconResolution, &[0x03, 0x20, 0x01, 0xE0]),
    Step::Send(Command::DualSpi, &[0x00]),
    Step::Send(Command::VcomAndDataIntervalSetting, &[0x10, 0x07]),
    Step::Send(Command::TconSetting, &[0x22]),
];

/// Fast refresh: shortened power-up plus forced fast waveform
pub const FAST_INIT: &[Step] = &[
    Step::Send(Command::PanelSetting, &[0x1F]),
    Step::Send(Command::VcomAndDataIntervalSetting, &[0x10, 0x07]),
    Step::Send(Command::PowerOn, &[]),
    Step::Delay(100),
    Step::WaitIdle,
    Step::Send(Command::BoosterSoftStart, &[0x27, 0x27, 0x18, 0x17]),
    Step::Send(Command::CascadeSetting, &[0x02]),
    Step::Send(Command::ForceTemperature, &[0x5A]),
];

/// Partial refresh: power on plus forced partial waveform
pub const PARTIAL_INIT: &[Step] = &[
    Step::Send(Command::PanelSetting, &[0x1F]),
    Step::Send(Command::PowerOn, &[]),
    Step::Delay(100),
    Step::WaitIdle,
    Step::Send(Command::CascadeSetting, &[0x02]),
    Step::Send(Command::ForceTemperature, &[0x6E]),
];
