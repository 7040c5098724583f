//! Rust driver for the ST STLED316S LED controller with keyscan.
//!
//! The STLED316S drives up to six common-anode 7-segment digits plus a bank of
//! eight discrete LEDs over a 3-wire serial bus. The chip can be reached
//! through a hardware SPI peripheral ([`SpiTransport`]) or bit-banged pins
//! ([`BitBangTransport`]); only the latter can read keyscan data back.
//!
//! ```ignore
//! use stled316s::{Config, Digit, SpiTransport, Stled316s};
//!
//! let mut display: Stled316s<_, 4> = Stled316s::new(SpiTransport::new(spi));
//! display.begin(Config::default())?;
//! display.disp_udec(1234u32)?;
//! display.set_dp(Digit::N3, true)?;
//! ```
//!
//! # Features
//!
//! - **`defmt`**: bus traces and [`defmt::Format`] on the public types.

#![no_std]

mod buffer;
mod constants;
mod encoder;
mod frame;
pub mod transport;

pub use buffer::DisplayBuffer;
pub use constants::*;
pub use encoder::{SegmentEncoder, SegmentMap};
pub use frame::{Addressing, BrightnessMode, Command, Frame, Page, ReadAddress};
pub use transport::{BitBangTransport, ReadTransport, SpiTransport, Transport};

use num_traits::ToPrimitive;

/// Digit selector. Digit 1 shows the least significant figure of a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Digit {
    All = 0,
    N1 = 1,
    N2 = 2,
    N3 = 3,
    N4 = 4,
    N5 = 5,
    N6 = 6,
}

impl Digit {
    fn index(self) -> Option<usize> {
        match self {
            Digit::All => None,
            digit => Some(digit as usize - 1),
        }
    }
}

/// Discrete LED selector, valued as the LED's bit in the LED data register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Led {
    All = 0x00,
    N1 = 0x01,
    N2 = 0x02,
    N3 = 0x04,
    N4 = 0x08,
    N5 = 0x10,
    N6 = 0x20,
    N7 = 0x40,
    N8 = 0x80,
}

impl Led {
    fn mask(self) -> u8 {
        match self {
            Led::All => 0xFF,
            led => led as u8,
        }
    }

    fn index(self) -> Option<usize> {
        match self {
            Led::All => None,
            led => Some((led as u8).trailing_zeros() as usize),
        }
    }
}

/// Settings applied by [`Stled316s::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output line wiring of the segments.
    pub segment_map: SegmentMap,
    /// Initial level (0-7) of every digit and LED.
    pub brightness: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            segment_map: SegmentMap::STANDARD,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

pub struct Stled316s<T, const NUM_DIGITS: u8> {
    pub transport: T,
    encoder: SegmentEncoder,
    buffer: DisplayBuffer,
    on: bool,
}

impl<T, const NUM_DIGITS: u8> Stled316s<T, NUM_DIGITS>
where
    T: Transport,
{
    const DIGITS_IN_RANGE: () = assert!(
        NUM_DIGITS >= 1 && NUM_DIGITS <= MAX_DIGITS,
        "STLED316S drives 1 to 6 digits"
    );

    pub fn new(transport: T) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::DIGITS_IN_RANGE;

        Self {
            transport,
            encoder: SegmentEncoder::default(),
            buffer: DisplayBuffer::new(),
            on: false,
        }
    }

    pub fn destroy(self) -> T {
        self.transport
    }

    /// Idles the bus, applies `config` brightness to every digit and LED, clears
    /// and turns the display on.
    pub fn begin(&mut self, config: Config) -> Result<(), Stled316sError<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("stled316s begin, {=u8} digits, {}", NUM_DIGITS, config);

        self.transport.init()?;
        self.encoder = SegmentEncoder::new(&config.segment_map);
        self.set_brightness(Digit::All, config.brightness)?;
        self.set_brightness_led(Led::All, config.brightness)?;
        self.clear_display()?;
        self.display_on()
    }

    pub fn display_on(&mut self) -> Result<(), Stled316sError<T::Error>> {
        self.send(&Frame::command(Command::DISPLAY_ON))?;
        self.on = true;
        Ok(())
    }

    pub fn display_off(&mut self) -> Result<(), Stled316sError<T::Error>> {
        self.send(&Frame::command(Command::DISPLAY_OFF))?;
        self.on = false;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Blanks every digit. Decimal points set with [`Stled316s::set_dp`] stay
    /// recorded and reappear with the next content written to their digit.
    pub fn clear_display(&mut self) -> Result<(), Stled316sError<T::Error>> {
        self.buffer.clear();
        self.write_digits()
    }

    /// Sets the brightness (0-7) of one digit, or all of them with [`Digit::All`].
    ///
    /// Digits are paired in the brightness registers; the paired digit keeps
    /// its level.
    pub fn set_brightness(
        &mut self,
        digit: Digit,
        brightness: u8,
    ) -> Result<(), Stled316sError<T::Error>> {
        self.buffer.set_digit_brightness(digit.index(), brightness);
        self.send(&Frame::config(
            BrightnessMode::Variable,
            NUM_DIGITS,
            self.buffer.digit_brightness(),
        ))
    }

    /// Drives every digit at one level (0-7), ignoring the per-digit registers.
    pub fn set_constant_brightness(
        &mut self,
        brightness: u8,
    ) -> Result<(), Stled316sError<T::Error>> {
        self.send(&Frame::config(
            BrightnessMode::Constant(brightness),
            NUM_DIGITS,
            self.buffer.digit_brightness(),
        ))
    }

    /// Writes a raw segment pattern to one digit, or every digit with [`Digit::All`].
    pub fn disp_raw(&mut self, digit: Digit, raw: u8) -> Result<(), Stled316sError<T::Error>> {
        match digit.index() {
            None => {
                for i in 0..NUM_DIGITS as usize {
                    self.buffer.set_digit(i, raw, self.encoder.dp());
                }
                self.write_digits()
            }
            Some(i) if i < NUM_DIGITS as usize => {
                self.buffer.set_digit(i, raw, self.encoder.dp());
                self.write_digit(i)
            }
            Some(_) => self.ignore(digit),
        }
    }

    /// Writes raw segment patterns starting at digit 1. Bytes past the
    /// configured digit count are dropped.
    pub fn disp_raw_all(&mut self, raw: &[u8]) -> Result<(), Stled316sError<T::Error>> {
        for (i, pattern) in raw.iter().take(NUM_DIGITS as usize).enumerate() {
            self.buffer.set_digit(i, *pattern, self.encoder.dp());
        }
        self.write_digits()
    }

    /// Displays an unsigned decimal number. Figures that do not fit are
    /// dropped from the top, leading zeros are blank.
    pub fn disp_udec<N>(&mut self, number: N) -> Result<(), Stled316sError<T::Error>>
    where
        N: ToPrimitive,
    {
        let mut num = number.to_u64().ok_or(Stled316sError::InvalidValue)?;
        for i in 0..NUM_DIGITS as usize {
            let pattern = if i == 0 || num > 0 {
                self.encoder.encode((num % 10) as u8)
            } else {
                0
            };
            self.buffer.set_digit(i, pattern, self.encoder.dp());
            num /= 10;
        }
        self.write_digits()
    }

    /// Displays an unsigned number in hex, zero padded to the digit count.
    pub fn disp_hex<N>(&mut self, number: N) -> Result<(), Stled316sError<T::Error>>
    where
        N: ToPrimitive,
    {
        let mut num = number.to_u64().ok_or(Stled316sError::InvalidValue)?;
        for i in 0..NUM_DIGITS as usize {
            let pattern = self.encoder.encode((num & 0x0F) as u8);
            self.buffer.set_digit(i, pattern, self.encoder.dp());
            num >>= 4;
        }
        self.write_digits()
    }

    /// Turns the decimal point of a digit on or off. The setting sticks to the
    /// digit across later content writes.
    pub fn set_dp(&mut self, digit: Digit, state: bool) -> Result<(), Stled316sError<T::Error>> {
        match digit.index() {
            None => {
                for i in 0..NUM_DIGITS as usize {
                    self.buffer.set_dp(i, state, self.encoder.dp());
                }
                self.write_digits()
            }
            Some(i) if i < NUM_DIGITS as usize => {
                self.buffer.set_dp(i, state, self.encoder.dp());
                self.write_digit(i)
            }
            Some(_) => self.ignore(digit),
        }
    }

    /// Sets the brightness (0-7) of one discrete LED, or all of them with [`Led::All`].
    pub fn set_brightness_led(
        &mut self,
        led: Led,
        brightness: u8,
    ) -> Result<(), Stled316sError<T::Error>> {
        self.buffer.set_led_brightness(led.index(), brightness);
        self.send(&Frame::led_brightness(self.buffer.led_brightness()))
    }

    /// Switches discrete LEDs. The LED register is write-only, other LEDs
    /// keep the state last written through this driver.
    pub fn set_led(&mut self, led: Led, state: bool) -> Result<(), Stled316sError<T::Error>> {
        let value = self.buffer.update_leds(led.mask(), state);
        self.send(&Frame::write_fixed(Page::Led, register::LED_DATA, value))
    }

    /// Digit registers as last sent, digit 1 first.
    pub fn digits(&self) -> &[u8] {
        &self.buffer.digits()[..NUM_DIGITS as usize]
    }

    pub fn dp_mask(&self) -> u8 {
        self.buffer.dp_mask()
    }

    pub fn led_state(&self) -> u8 {
        self.buffer.led_state()
    }

    pub fn digit_brightness(&self) -> &[u8; DIGIT_BRIGHTNESS_REGS] {
        self.buffer.digit_brightness()
    }

    pub fn led_brightness(&self) -> &[u8; LED_BRIGHTNESS_REGS] {
        self.buffer.led_brightness()
    }

    fn write_digits(&mut self) -> Result<(), Stled316sError<T::Error>> {
        let frame = Frame::write(
            Page::Digit,
            register::DIGIT_OFFSET,
            &self.buffer.digits()[..NUM_DIGITS as usize],
        );
        self.send(&frame)
    }

    fn write_digit(&mut self, index: usize) -> Result<(), Stled316sError<T::Error>> {
        let frame = Frame::write_fixed(
            Page::Digit,
            register::DIGIT_OFFSET + index as u8,
            self.buffer.digit(index),
        );
        self.send(&frame)
    }

    fn send(&mut self, frame: &Frame) -> Result<(), Stled316sError<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("stled316s write {=[u8]:x}", frame.as_bytes());

        self.transport.write(frame)?;
        Ok(())
    }

    fn ignore(&self, _digit: Digit) -> Result<(), Stled316sError<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::warn!("{} outside the {=u8} configured digits", _digit, NUM_DIGITS);

        Ok(())
    }
}

impl<T, const NUM_DIGITS: u8> Stled316s<T, NUM_DIGITS>
where
    T: ReadTransport,
{
    pub fn read_register(&mut self, address: ReadAddress) -> Result<u8, Stled316sError<T::Error>> {
        Ok(self.transport.read(Command::read(address).into())?)
    }

    /// Reads both keyscan registers, key data 1 in the high byte.
    pub fn read_keys(&mut self) -> Result<u16, Stled316sError<T::Error>> {
        let key_1 = self.read_register(ReadAddress::KeyData1)?;
        let key_2 = self.read_register(ReadAddress::KeyData2)?;

        Ok((key_1 as u16) << 8 | (key_2 as u16))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stled316sError<E> {
    Transport(E),
    InvalidValue,
}

impl<E> From<E> for Stled316sError<E> {
    fn from(error: E) -> Self {
        Stled316sError::Transport(error)
    }
}
