//! Command byte and frame construction for the STLED316S serial protocol.
//!
//! Every bus operation starts with one command byte:
//!
//! ```text
//! bit   7    6      5       4:3    2:0
//!       0   R/W  fixed   page   address
//! ```
//!
//! The start address lives in the low bits of the command byte, so a framed
//! write is the command byte followed directly by its data bytes. In
//! auto-increment mode the chip advances its pointer after every data byte.

use crate::constants::{
    command, page, register, DIGIT_BRIGHTNESS_REGS, LED_BRIGHTNESS_REGS, MAX_FRAME_LEN,
};

/// Register page selected by a command byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    Digit,
    Led,
    Config,
    LedBrightness,
}

impl From<Page> for u8 {
    fn from(value: Page) -> u8 {
        match value {
            Page::Digit => page::DIGIT,
            Page::Led => page::LED,
            Page::Config => page::CONFIG,
            Page::LedBrightness => page::LED_BRIGHTNESS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Addressing {
    /// Pointer advances after each data byte.
    Increment,
    /// Pointer stays on the addressed register.
    Fixed,
}

/// Readable registers on the read page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadAddress {
    LedData,
    KeyData1,
    KeyData2,
}

impl From<ReadAddress> for u8 {
    fn from(address: ReadAddress) -> u8 {
        match address {
            ReadAddress::LedData => register::READ_LED_DATA,
            ReadAddress::KeyData1 => register::KEY_DATA1,
            ReadAddress::KeyData2 => register::KEY_DATA2,
        }
    }
}

/// How the configuration byte drives digit brightness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrightnessMode {
    /// One level (0-7) for every digit.
    Constant(u8),
    /// Levels taken from the per-digit brightness registers.
    Variable,
}

impl BrightnessMode {
    /// Configuration register value for `digits` scanned digits.
    pub fn config_byte(self, digits: u8) -> u8 {
        use register::config::*;

        let digits = digits.saturating_sub(1) & DIGITS_MASK;
        match self {
            BrightnessMode::Constant(level) => {
                (level & 0x07) << BRIGHTNESS_SHIFT | BRIGHTNESS_CONSTANT | digits
            }
            BrightnessMode::Variable => BRIGHTNESS_VARIABLE | digits,
        }
    }
}

/// A single command byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command(u8);

impl Command {
    pub const DISPLAY_ON: Command = Command(command::DISPLAY_ON);
    pub const DISPLAY_OFF: Command = Command(command::DISPLAY_OFF);

    pub fn write(page: Page, addressing: Addressing, address: u8) -> Self {
        let mode = match addressing {
            Addressing::Increment => command::ADDR_INCREMENT,
            Addressing::Fixed => command::ADDR_FIXED,
        };
        Command(
            command::DATA_WRITE
                | mode
                | (u8::from(page) & command::PAGE_MASK)
                | (address & command::ADDRESS_MASK),
        )
    }

    pub fn read(address: ReadAddress) -> Self {
        Command(command::DATA_READ | page::READ | (u8::from(address) & command::ADDRESS_MASK))
    }

    pub fn page(self) -> u8 {
        self.0 & command::PAGE_MASK
    }

    pub fn address(self) -> u8 {
        self.0 & command::ADDRESS_MASK
    }

    pub fn is_fixed(self) -> bool {
        self.0 & command::ADDR_FIXED != 0
    }

    pub fn is_read(self) -> bool {
        self.0 & command::DATA_READ != 0
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> u8 {
        command.0
    }
}

/// One complete bus operation: a command byte and its data bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl Frame {
    /// Standalone command without data phase.
    pub fn command(command: Command) -> Self {
        let mut bytes = [0; MAX_FRAME_LEN];
        bytes[0] = command.into();
        Frame { bytes, len: 1 }
    }

    /// Frame from already encoded bytes, `None` if `bytes` is empty or longer
    /// than [`MAX_FRAME_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > MAX_FRAME_LEN {
            return None;
        }
        let mut frame = Frame {
            bytes: [0; MAX_FRAME_LEN],
            len: bytes.len(),
        };
        frame.bytes[..bytes.len()].copy_from_slice(bytes);
        Some(frame)
    }

    /// Burst write starting at `address`. Data past the frame capacity is dropped.
    pub fn write(page: Page, address: u8, data: &[u8]) -> Self {
        let mut frame = Self::command(Command::write(page, Addressing::Increment, address));
        for byte in data.iter().take(MAX_FRAME_LEN - 1) {
            frame.bytes[frame.len] = *byte;
            frame.len += 1;
        }
        frame
    }

    /// Single register write that leaves the neighbouring registers alone.
    pub fn write_fixed(page: Page, address: u8, data: u8) -> Self {
        let mut frame = Self::command(Command::write(page, Addressing::Fixed, address));
        frame.bytes[1] = data;
        frame.len = 2;
        frame
    }

    /// Configuration byte followed by the DIG12, DIG34 and DIG56 brightness registers.
    pub fn config(
        mode: BrightnessMode,
        digits: u8,
        brightness: &[u8; DIGIT_BRIGHTNESS_REGS],
    ) -> Self {
        let mut data = [0; 1 + DIGIT_BRIGHTNESS_REGS];
        data[0] = mode.config_byte(digits);
        data[1..].copy_from_slice(brightness);
        Self::write(Page::Config, register::CONFIG, &data)
    }

    pub fn led_brightness(brightness: &[u8; LED_BRIGHTNESS_REGS]) -> Self {
        Self::write(Page::LedBrightness, 0, brightness)
    }

    pub fn header(&self) -> Command {
        Command(self.bytes[0])
    }

    pub fn data(&self) -> &[u8] {
        &self.bytes[1..self.len]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_commands_stand_alone() {
        assert_eq!(Frame::command(Command::DISPLAY_ON).as_bytes(), &[0x0D]);
        assert_eq!(Frame::command(Command::DISPLAY_OFF).as_bytes(), &[0x0E]);
    }

    #[test]
    fn burst_write_has_single_header() {
        let frame = Frame::write(Page::Digit, 0, &[0x11, 0x22, 0x33]);
        assert_eq!(frame.as_bytes(), &[0x00, 0x11, 0x22, 0x33]);
        assert!(!frame.header().is_fixed());
        assert_eq!(frame.header().address(), 0);
        assert_eq!(frame.data(), &[0x11, 0x22, 0x33]);
    }

    #[test]
    fn fixed_write_selects_register() {
        let frame = Frame::write_fixed(Page::Digit, 3, 0xAA);
        assert_eq!(frame.as_bytes(), &[0x23, 0xAA]);
        assert!(frame.header().is_fixed());
        assert_eq!(frame.header().page(), page::DIGIT);

        let frame = Frame::write_fixed(Page::Led, 0, 0x05);
        assert_eq!(frame.as_bytes(), &[0x28, 0x05]);
    }

    #[test]
    fn address_is_masked_to_three_bits() {
        let command = Command::write(Page::Digit, Addressing::Fixed, 0x0B);
        assert_eq!(command.address(), 0x03);
        assert_eq!(command.page(), page::DIGIT);
    }

    #[test]
    fn read_command_targets_read_page() {
        assert_eq!(u8::from(Command::read(ReadAddress::LedData)), 0x48);
        assert_eq!(u8::from(Command::read(ReadAddress::KeyData1)), 0x49);
        assert_eq!(u8::from(Command::read(ReadAddress::KeyData2)), 0x4A);
        assert!(Command::read(ReadAddress::KeyData1).is_read());
    }

    #[test]
    fn config_frame_layout() {
        let frame = Frame::config(BrightnessMode::Variable, 6, &[0x22, 0x22, 0x22]);
        assert_eq!(frame.as_bytes(), &[0x10, 0x05, 0x22, 0x22, 0x22]);

        let frame = Frame::config(BrightnessMode::Constant(7), 4, &[0, 0, 0]);
        assert_eq!(frame.as_bytes(), &[0x10, 0xFB, 0, 0, 0]);
    }

    #[test]
    fn led_brightness_frame_layout() {
        let frame = Frame::led_brightness(&[0x12, 0x34, 0x56, 0x70]);
        assert_eq!(frame.as_bytes(), &[0x18, 0x12, 0x34, 0x56, 0x70]);
    }

    #[test]
    fn encoded_bytes_fit_one_frame() {
        let frame = Frame::from_bytes(&[0x00, 1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x00, 1, 2, 3, 4, 5, 6]);
        assert_eq!(frame.header(), Command::write(Page::Digit, Addressing::Increment, 0));

        assert!(Frame::from_bytes(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).is_none());
        assert!(Frame::from_bytes(&[]).is_none());
    }

    #[test]
    fn oversized_burst_is_truncated() {
        let frame = Frame::write(Page::Digit, 0, &[1; 10]);
        assert_eq!(frame.as_bytes().len(), MAX_FRAME_LEN);
    }
}
