//! Recording mocks for unit tests
//!
//! Every mock appends to one shared [`Trace`], so tests can check the
//! relative order of pin changes, bus bytes and delays.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

/// Control line identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Line {
    Dc,
    Cs,
    Rst,
    Busy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    /// Output line driven to a level (true = high)
    Set(Line, bool),
    /// Byte written on the bus
    Byte(u8),
    Flush,
    BusyRead,
    DelayMs(u32),
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub(crate) fn bytes(&self) -> Vec<u8> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Byte(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MockError;

impl embedded_hal::digital::Error for MockError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl embedded_hal::spi::Error for MockError {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        embedded_hal::spi::ErrorKind::Other
    }
}

#[derive(Debug)]
pub(crate) struct MockBus {
    trace: Trace,
    writes_left: Option<usize>,
}

impl MockBus {
    pub(crate) fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            writes_left: None,
        }
    }

    /// Fail every write after the first `writes` successful ones
    pub(crate) fn fail_after(&mut self, writes: usize) {
        self.writes_left = Some(writes);
    }
}

impl embedded_hal::spi::ErrorType for MockBus {
    type Error = MockError;
}

impl SpiBus for MockBus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        if let Some(left) = self.writes_left.as_mut() {
            if *left == 0 {
                return Err(MockError);
            }
            *left -= 1;
        }
        for word in words {
            self.trace.push(Event::Byte(*word));
        }
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.write(words)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.trace.push(Event::Flush);
        Ok(())
    }
}

#[derive(Debug)]
enum PinKind {
    Output(Line),
    /// Reads low (busy) for this many reads, then high
    Busy(u32),
    Failing,
}

#[derive(Debug)]
pub(crate) struct MockPin {
    trace: Trace,
    kind: PinKind,
}

impl MockPin {
    pub(crate) fn output(trace: &Trace, line: Line) -> Self {
        Self {
            trace: trace.clone(),
            kind: PinKind::Output(line),
        }
    }

    pub(crate) fn busy(trace: &Trace, busy_reads: u32) -> Self {
        Self {
            trace: trace.clone(),
            kind: PinKind::Busy(busy_reads),
        }
    }

    pub(crate) fn failing(trace: &Trace, _line: Line) -> Self {
        Self {
            trace: trace.clone(),
            kind: PinKind::Failing,
        }
    }

    fn set(&mut self, level: bool) -> Result<(), MockError> {
        match self.kind {
            PinKind::Output(line) => {
                self.trace.push(Event::Set(line, level));
                Ok(())
            }
            PinKind::Busy(_) => Ok(()),
            PinKind::Failing => Err(MockError),
        }
    }

    fn read_high(&mut self) -> Result<bool, MockError> {
        self.trace.push(Event::BusyRead);
        match &mut self.kind {
            PinKind::Busy(left) if *left > 0 => {
                *left -= 1;
                Ok(false)
            }
            PinKind::Failing => Err(MockError),
            _ => Ok(true),
        }
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.read_high()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.read_high().map(|high| !high)
    }
}

#[derive(Debug)]
pub(crate) struct MockDelay {
    trace: Trace,
    total_ms: u32,
}

impl MockDelay {
    pub(crate) fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            total_ms: 0,
        }
    }

    pub(crate) fn total_ms(&self) -> u32 {
        self.total_ms
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
        self.trace.push(Event::DelayMs(ms));
    }
}
