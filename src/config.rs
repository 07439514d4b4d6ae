//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS};

use crate::command::DEEP_SLEEP_CHECK_CODE;
use crate::display::RefreshMode;
use crate::sequence::{FAST_INIT, FULL_INIT, PARTIAL_INIT, Step};

/// Native width of the 7.5" V2 panel in pixels
pub const WIDTH: u16 = 800;

/// Native height of the 7.5" V2 panel in pixels
pub const HEIGHT: u16 = 480;

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, corresponds to gate outputs)
    pub rows: u16,
    /// Number of columns (width in pixels, corresponds to source outputs)
    pub cols: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows == 0 or rows > MAX_GATE_OUTPUTS
    /// - cols == 0 or cols > MAX_SOURCE_OUTPUTS
    /// - cols % 8 != 0 (must be byte-aligned for memory)
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_GATE_OUTPUTS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if cols == 0 || cols > MAX_SOURCE_OUTPUTS || cols % 8 != 0 {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of bytes holding one row of the device frame buffer
    pub fn bytes_per_row(&self) -> usize {
        self.cols as usize / 8
    }

    /// Calculate required buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        self.bytes_per_row() * self.rows as usize
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            rows: HEIGHT,
            cols: WIDTH,
        }
    }
}

/// Timing of the hardware reset pulse
///
/// RST is driven high, low, then high again, holding each level for the
/// given number of milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResetTiming {
    /// Time RST is held high before the pulse
    pub initial_high_ms: u32,
    /// Width of the low pulse
    pub low_ms: u32,
    /// Time to wait after RST returns high
    pub settle_ms: u32,
}

impl Default for ResetTiming {
    fn default() -> Self {
        // The 7in5 V2 only resets reliably with a short (2ms) low pulse
        Self {
            initial_high_ms: 20,
            low_ms: 2,
            settle_ms: 20,
        }
    }
}

/// Register programming sequences, one per refresh mode
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitTables {
    /// Sequence bringing the panel into full refresh mode
    pub full: &'static [Step],
    /// Sequence bringing the panel into fast refresh mode
    pub fast: &'static [Step],
    /// Sequence bringing the panel into partial refresh mode
    pub partial: &'static [Step],
}

impl InitTables {
    /// Table for the given refresh mode
    pub fn for_mode(&self, mode: RefreshMode) -> &'static [Step] {
        match mode {
            RefreshMode::Full => self.full,
            RefreshMode::Fast => self.fast,
            RefreshMode::Partial => self.partial,
        }
    }
}

impl Default for InitTables {
    fn default() -> Self {
        Self {
            full: FULL_INIT,
            fast: FAST_INIT,
            partial: PARTIAL_INIT,
        }
    }
}

/// Display configuration
///
/// This struct holds all configurable parameters for the UC8179 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Hardware reset pulse timing
    pub reset_timing: ResetTiming,
    /// Delay between the display refresh command and the busy-wait
    pub refresh_settle_ms: u32,
    /// Init sequences for full, fast and partial refresh
    pub init_tables: InitTables,
    /// 4-bit code transmitted for a black pixel
    pub black_nibble: u8,
    /// 4-bit code transmitted for a white pixel
    pub white_nibble: u8,
    /// Parameter sent with the deep sleep command
    pub deep_sleep_check_code: u8,
}

impl Config {
    /// Byte carrying two white pixels, used to clear the panel
    pub fn clear_byte(&self) -> u8 {
        (self.white_nibble << 4) | self.white_nibble
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            reset_timing: ResetTiming::default(),
            refresh_settle_ms: 100,
            init_tables: InitTables::default(),
            black_nibble: 0x0,
            white_nibble: 0x3,
            deep_sleep_check_code: DEEP_SLEEP_CHECK_CODE,
        }
    }
}

/// Builder for constructing display configuration
///
/// Every setting defaults to the values of the Waveshare 7.5" V2 panel.
///
/// # Example
///
/// ```rust,no_run
/// use uc8179::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(480, 800) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).refresh_settle_ms(100).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.config.dimensions = dims;
        self
    }

    /// Set the hardware reset pulse timing
    pub fn reset_timing(mut self, timing: ResetTiming) -> Self {
        self.config.reset_timing = timing;
        self
    }

    /// Set the delay between the refresh command and the busy-wait
    pub fn refresh_settle_ms(mut self, ms: u32) -> Self {
        self.config.refresh_settle_ms = ms;
        self
    }

    /// Replace the init sequences (e.g. for another panel revision)
    pub fn init_tables(mut self, tables: InitTables) -> Self {
        self.config.init_tables = tables;
        self
    }

    /// Set the 4-bit code transmitted for black pixels
    pub fn black_nibble(mut self, value: u8) -> Self {
        self.config.black_nibble = value;
        self
    }

    /// Set the 4-bit code transmitted for white pixels
    pub fn white_nibble(mut self, value: u8) -> Self {
        self.config.white_nibble = value;
        self
    }

    /// Set the deep sleep check code
    pub fn deep_sleep_check_code(mut self, value: u8) -> Self {
        self.config.deep_sleep_check_code = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidNibble` if a pixel code does not fit in 4 bits
    pub fn build(self) -> Result<Config, BuilderError> {
        for value in [self.config.black_nibble, self.config.white_nibble] {
            if value > 0x0F {
                return Err(BuilderError::InvalidNibble { value });
            }
        }
        Ok(self.config)
    }
}
