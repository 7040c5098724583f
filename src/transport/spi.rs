use embedded_hal::spi::{Mode, SpiDevice, MODE_3};

use super::Transport;
use crate::constants::MAX_FRAME_LEN;
use crate::frame::Frame;

/// Clock idles high and the chip samples data on the rising edge.
pub const MODE: Mode = MODE_3;

/// Hardware SPI transport.
///
/// The chip shifts data LSB first while SPI peripherals shift MSB first, so
/// every byte is bit-reversed before it goes on the bus. Chip select is
/// handled by the [`SpiDevice`] and frames exactly one operation.
pub struct SpiTransport<SPI> {
    spi: SPI,
}

impl<SPI> SpiTransport<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn destroy(self) -> SPI {
        self.spi
    }
}

impl<SPI> Transport for SpiTransport<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        let bytes = frame.as_bytes();
        let mut buffer = [0; MAX_FRAME_LEN];
        for (out, byte) in buffer.iter_mut().zip(bytes) {
            *out = byte.reverse_bits();
        }
        self.spi.write(&buffer[..bytes.len()])
    }
}
