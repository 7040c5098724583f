use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::{ReadTransport, Transport};
use crate::frame::Frame;

/// Half of one bit time, giving a 500 kHz bus clock.
pub const DEFAULT_HALF_PERIOD_NS: u32 = 1_000;

/// Strobe setup and hold time around a framed operation.
const STROBE_DELAY_NS: u32 = 2_000;

/// Software 3-wire transport.
///
/// The data pin must be usable as both output and input (an open-drain pin
/// with pull-up) so the chip can drive it during reads.
pub struct BitBangTransport<STB, CLK, DIO, D> {
    stb: STB,
    clk: CLK,
    dio: DIO,
    delay: D,
    half_period_ns: u32,
}

impl<STB, CLK, DIO, D, E> BitBangTransport<STB, CLK, DIO, D>
where
    STB: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    DIO: OutputPin<Error = E> + InputPin,
    D: DelayNs,
{
    pub fn new(stb: STB, clk: CLK, dio: DIO, delay: D) -> Self {
        Self {
            stb,
            clk,
            dio,
            delay,
            half_period_ns: DEFAULT_HALF_PERIOD_NS,
        }
    }

    /// Sets half a bit time; the chip accepts clocks up to 1 MHz.
    pub fn with_half_period_ns(mut self, half_period_ns: u32) -> Self {
        self.half_period_ns = half_period_ns;
        self
    }

    pub fn destroy(self) -> (STB, CLK, DIO, D) {
        (self.stb, self.clk, self.dio, self.delay)
    }

    /// Runs `op` with strobe asserted. Strobe is released even when `op` fails.
    fn framed<R>(&mut self, op: impl FnOnce(&mut Self) -> Result<R, E>) -> Result<R, E> {
        self.clk.set_high()?;
        self.stb.set_low()?;
        self.delay.delay_ns(STROBE_DELAY_NS);

        let result = op(self);

        self.delay.delay_ns(STROBE_DELAY_NS);
        let released = self.stb.set_high();
        let value = result?;
        released?;
        Ok(value)
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), E> {
        for bit in 0..8 {
            if byte & (1 << bit) != 0 {
                self.dio.set_high()?;
            } else {
                self.dio.set_low()?;
            }
            self.clk.set_low()?;
            self.delay.delay_ns(self.half_period_ns);
            self.clk.set_high()?;
            self.delay.delay_ns(self.half_period_ns);
        }
        Ok(())
    }

    fn shift_in(&mut self) -> Result<u8, E> {
        // release the line so the chip can drive it
        self.dio.set_high()?;

        let mut byte = 0;
        for bit in 0..8 {
            self.clk.set_low()?;
            self.delay.delay_ns(self.half_period_ns);
            self.clk.set_high()?;
            if self.dio.is_high()? {
                byte |= 1 << bit;
            }
            self.delay.delay_ns(self.half_period_ns);
        }
        Ok(byte)
    }
}

impl<STB, CLK, DIO, D, E> Transport for BitBangTransport<STB, CLK, DIO, D>
where
    STB: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    DIO: OutputPin<Error = E> + InputPin,
    D: DelayNs,
{
    type Error = E;

    fn init(&mut self) -> Result<(), E> {
        self.stb.set_high()?;
        self.clk.set_high()?;
        self.dio.set_low()
    }

    fn write(&mut self, frame: &Frame) -> Result<(), E> {
        let bytes = frame.as_bytes();

        #[cfg(feature = "defmt")]
        defmt::trace!("bitbang write {=[u8]:x}", bytes);

        self.framed(|bus| bytes.iter().try_for_each(|byte| bus.shift_out(*byte)))
    }
}

impl<STB, CLK, DIO, D, E> ReadTransport for BitBangTransport<STB, CLK, DIO, D>
where
    STB: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    DIO: OutputPin<Error = E> + InputPin,
    D: DelayNs,
{
    fn read(&mut self, command: u8) -> Result<u8, E> {
        let result = self.framed(|bus| {
            bus.shift_out(command)?;
            bus.shift_in()
        });
        // back to idle level once the chip let go of the line
        let idle = self.dio.set_low();
        let byte = result?;
        idle?;

        #[cfg(feature = "defmt")]
        defmt::trace!("bitbang read {=u8:x} -> {=u8:x}", command, byte);

        Ok(byte)
    }
}
