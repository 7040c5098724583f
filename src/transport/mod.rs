//! Bus access for the 3-wire STLED316S interface.
//!
//! [`SpiTransport`] drives the chip from a hardware SPI peripheral and can
//! only write. [`BitBangTransport`] toggles the strobe, clock and data pins
//! directly and can also read keyscan data back.

mod bitbang;
mod spi;

pub use bitbang::{BitBangTransport, DEFAULT_HALF_PERIOD_NS};
pub use spi::{SpiTransport, MODE};

use crate::frame::Frame;

/// Sends framed operations to the chip. Each call is one strobe cycle.
///
/// A [`Frame`] holds at most [`MAX_FRAME_LEN`](crate::MAX_FRAME_LEN) bytes,
/// so every transport puts the whole frame on the bus or fails.
pub trait Transport {
    type Error;

    /// Puts the bus lines in their idle state.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// Transports that can clock a byte back out of the chip.
pub trait ReadTransport: Transport {
    /// Sends the read `command` and returns the byte the chip answers with.
    fn read(&mut self, command: u8) -> Result<u8, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        T::init(self)
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        T::write(self, frame)
    }
}

impl<T: ReadTransport + ?Sized> ReadTransport for &mut T {
    fn read(&mut self, command: u8) -> Result<u8, Self::Error> {
        T::read(self, command)
    }
}
