//! Color type for bi-level e-paper displays
//!
//! This module defines the [`Color`] enum for the two optical states of the
//! panel and the thresholding used to map arbitrary colors onto them.
//!
//! ## Color Representation
//!
//! In the device frame buffer each pixel is one bit, most significant bit
//! first:
//!
//! | Color | Bit | Byte of 8 pixels |
//! |-------|-----|------------------|
//! | Black | 0   | 0x00             |
//! | White | 1   | 0xFF             |
//!
//! ## Example
//!
//! ```
//! use uc8179::Color;
//!
//! assert_eq!(Color::nearest(10, 20, 30), Color::Black);
//! assert_eq!(Color::nearest(200, 220, 240), Color::White);
//! assert_eq!(Color::White.byte(), 0xFF);
//! ```

/// Colors supported by the panel
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Black pixels
    Black,
    /// White pixels (background)
    #[default]
    White,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    /// `On` is ink, so it maps to black
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::Black,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::White,
        }
    }
}

impl Color {
    /// Palette used for thresholding, in match priority order
    pub const PALETTE: [Self; 2] = [Self::Black, Self::White];

    /// Map an RGB color to the closest palette entry
    ///
    /// Distance is the sum of squared channel differences. Ties resolve to
    /// black, the first palette entry.
    pub fn nearest(r: u8, g: u8, b: u8) -> Self {
        Self::PALETTE
            .into_iter()
            .min_by_key(|color| color.distance(r, g, b))
            .unwrap_or_default()
    }

    /// Gray level this color is displayed as
    pub fn level(self) -> u8 {
        match self {
            Self::Black => 0x00,
            Self::White => 0xFF,
        }
    }

    fn distance(self, r: u8, g: u8, b: u8) -> u32 {
        let level = self.level();
        sq(r.abs_diff(level)) + sq(g.abs_diff(level)) + sq(b.abs_diff(level))
    }

    /// Value of this pixel's bit in the device frame buffer
    pub fn bit(self) -> bool {
        self == Self::White
    }

    /// Byte value for eight pixels of this color
    pub fn byte(self) -> u8 {
        if self.bit() { 0xFF } else { 0x00 }
    }
}

fn sq(channel: u8) -> u32 {
    let c = u32::from(channel);
    c * c
}
